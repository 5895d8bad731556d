#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use vetting_dash::api::{ApiBase, ApiClient};

/// Serves `router` on an ephemeral local port for the lifetime of the test runtime.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("mock backend serves");
    });
    addr
}

/// Address that refuses connections: bound once, then released.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);
    addr
}

pub fn client_for(addr: SocketAddr) -> ApiClient {
    let base = ApiBase::parse(&format!("http://{addr}")).expect("valid base");
    ApiClient::new(base)
}

pub fn backend() -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/text", get(|| async { "plain words, not json" }))
        .route(
            "/api/missing",
            get(|| async { (StatusCode::NOT_FOUND, "Profile not found") }),
        )
        .route("/api/slow", get(slow))
        .route("/api/echo", post(echo))
        .route("/api/profiles", get(list_profiles))
        .route("/api/profiles/:profile_id", get(get_profile))
        .route("/api/match/run", post(run_match))
        .route("/api/match/interview_questions", post(interview_questions))
        .route("/api/match/scorecard", post(scorecard))
        .route("/api/match/explain", post(explain))
        .route("/api/jd/list", get(list_jds))
        .route("/api/jd/normalize", post(normalize_jd))
        .route("/api/jd/:jd_id", get(get_jd))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": "2.5.0" }))
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(10)).await;
    "too late"
}

async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({ "content_type": content_type, "body": body }))
}

async fn list_profiles(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let domain = params.get("domain").cloned().unwrap_or_default();
    Json(json!([
        { "profile_id": "DR-001", "domain": domain, "full_name": "Ada Lovelace", "email": "ada@example.com" },
        { "profile_id": "DR-002", "domain": domain, "full_name": "Grace Hopper" },
    ]))
}

async fn get_profile(Path(profile_id): Path<String>) -> (StatusCode, Json<Value>) {
    if profile_id == "DR-001" {
        (
            StatusCode::OK,
            Json(json!({ "profile_id": profile_id, "skills": { "languages": ["rust"] } })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Profile not found" })),
        )
    }
}

async fn run_match(Form(form): Form<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let Some(jd_id) = form.get("jd_id") else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "No job description loaded yet. Normalize a JD first." })),
        );
    };
    let top_k: usize = form
        .get("top_k")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(30);
    let results: Vec<Value> = [("DR-001", "Ada Lovelace", 0.93), ("DR-002", "Grace Hopper", 0.71)]
        .into_iter()
        .take(top_k)
        .map(|(profile_id, name, score)| {
            json!({
                "profile_id": profile_id,
                "name": name,
                "email": "",
                "score": score,
                "top_matches": ["rust", "postgres"],
                "breakdown": {},
            })
        })
        .collect();
    (
        StatusCode::OK,
        Json(json!({
            "jd": { "jd_id": jd_id, "company": "Acme", "title": "Backend Engineer", "created_at": "" },
            "results": results,
        })),
    )
}

async fn interview_questions(Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "profile_id": form.get("profile_id").cloned().unwrap_or_default(),
        "jd_id": form.get("jd_id").cloned().unwrap_or_default(),
        "questions": ["Walk through a service you owned end to end."],
    }))
}

async fn scorecard(Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "profile_id": form.get("profile_id").cloned().unwrap_or_default(),
        "match_score": 0.82,
        "vertical": { "label": "SaaS / Product" },
        "received": form,
    }))
}

async fn explain(Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "profile_id": form.get("profile_id").cloned().unwrap_or_default(),
        "summary": "Strong skill alignment",
        "received": form,
    }))
}

async fn list_jds(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let domain = params.get("domain").cloned().unwrap_or_default();
    Json(json!([
        { "jd_id": "JDD-42", "domain": domain, "company": "Acme", "title": "Backend Engineer" },
        { "jd_id": "JDD-7", "domain": domain },
    ]))
}

async fn normalize_jd(Form(form): Form<HashMap<String, String>>) -> Json<Value> {
    let field = |key: &str| form.get(key).cloned().unwrap_or_default();
    Json(json!({
        "jd_id": "JDD-100",
        "company": field("company"),
        "title": field("title"),
        "domain": field("domain"),
        "created_at": "2026-01-05T09:30:00Z",
        "jd_skills": { "languages": ["rust"] },
        "jd_text": field("jd_text"),
    }))
}

async fn get_jd(Path(jd_id): Path<String>, uri: Uri) -> Json<Value> {
    Json(json!({ "jd_id": jd_id, "raw_path": uri.path() }))
}
