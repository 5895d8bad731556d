//! Typed wrappers over the backend routes the dashboard calls.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiClient, ApiError, FormPayload};

pub const DEFAULT_DOMAIN: &str = "technology";
pub const DEFAULT_TOP_K: u32 = 30;

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub profile_id: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdSummary {
    pub jd_id: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Job description a match run was scored against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JdRef {
    pub jd_id: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub created_at: String,
}

/// One row of a ranking, highest score first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub profile_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub score: f64,
    #[serde(default)]
    pub top_matches: Vec<String>,
    #[serde(default)]
    pub breakdown: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRun {
    pub jd: JdRef,
    #[serde(default)]
    pub results: Vec<RankedCandidate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewQuestions {
    pub profile_id: String,
    #[serde(default)]
    pub jd_id: String,
    #[serde(default)]
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedJd {
    pub jd_id: String,
    pub company: String,
    pub title: String,
    pub domain: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub jd_skills: Value,
    #[serde(default)]
    pub jd_text: String,
}

/// Raw job description text to be normalized into skills by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJd {
    pub company: String,
    pub title: String,
    pub jd_text: String,
    pub domain: String,
}

impl NewJd {
    fn form(&self) -> FormPayload {
        FormPayload::new()
            .field("company", &self.company)
            .field("title", &self.title)
            .field("jd_text", &self.jd_text)
            .field("domain", &self.domain)
    }
}

/// Parameters of a ranking run. Without a `jd_id` the backend uses the latest
/// JD of the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchQuery {
    pub domain: String,
    pub jd_id: Option<String>,
    pub top_k: u32,
}

impl Default for MatchQuery {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            jd_id: None,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl MatchQuery {
    fn form(&self) -> FormPayload {
        FormPayload::new()
            .field("domain", &self.domain)
            .optional("jd_id", self.jd_id.as_deref())
            .field("top_k", self.top_k)
    }
}

/// One candidate evaluated against a JD (or the domain's latest JD).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    pub profile_id: String,
    pub domain: String,
    pub jd_id: Option<String>,
}

impl CandidateQuery {
    pub fn new(profile_id: impl Into<String>) -> Self {
        Self {
            profile_id: profile_id.into(),
            domain: DEFAULT_DOMAIN.to_string(),
            jd_id: None,
        }
    }

    pub fn against(mut self, jd_id: impl Into<String>) -> Self {
        self.jd_id = Some(jd_id.into());
        self
    }

    fn form(&self) -> FormPayload {
        FormPayload::new()
            .field("profile_id", &self.profile_id)
            .field("domain", &self.domain)
            .optional("jd_id", self.jd_id.as_deref())
    }
}

#[derive(Debug, Clone)]
pub struct VettingApi {
    client: ApiClient,
}

impl VettingApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn health(&self) -> Result<HealthReport, ApiError> {
        self.client.get("/api/health").await?.decode()
    }

    pub async fn list_profiles(&self, domain: &str) -> Result<Vec<ProfileSummary>, ApiError> {
        let path = with_domain("/api/profiles", domain)?;
        self.client.get(&path).await?.decode()
    }

    pub async fn profile(&self, profile_id: &str) -> Result<Value, ApiError> {
        let path = format!("/api/profiles/{}", segment(profile_id));
        self.client.get(&path).await?.decode()
    }

    pub async fn list_jds(&self, domain: &str) -> Result<Vec<JdSummary>, ApiError> {
        let path = with_domain("/api/jd/list", domain)?;
        self.client.get(&path).await?.decode()
    }

    pub async fn jd(&self, jd_id: &str) -> Result<Value, ApiError> {
        let path = format!("/api/jd/{}", segment(jd_id));
        self.client.get(&path).await?.decode()
    }

    pub async fn normalize_jd(&self, jd: &NewJd) -> Result<NormalizedJd, ApiError> {
        self.client
            .post_form("/api/jd/normalize", &jd.form())
            .await?
            .decode()
    }

    pub async fn run_match(&self, query: &MatchQuery) -> Result<MatchRun, ApiError> {
        self.client
            .post_form("/api/match/run", &query.form())
            .await?
            .decode()
    }

    pub async fn scorecard(&self, query: &CandidateQuery) -> Result<Value, ApiError> {
        self.client
            .post_form("/api/match/scorecard", &query.form())
            .await?
            .decode()
    }

    pub async fn interview_questions(
        &self,
        query: &CandidateQuery,
    ) -> Result<InterviewQuestions, ApiError> {
        self.client
            .post_form("/api/match/interview_questions", &query.form())
            .await?
            .decode()
    }

    pub async fn explain(&self, query: &CandidateQuery) -> Result<Value, ApiError> {
        self.client
            .post_form("/api/match/explain", &query.form())
            .await?
            .decode()
    }
}

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

fn with_domain(path: &str, domain: &str) -> Result<String, ApiError> {
    let query = serde_urlencoded::to_string([("domain", domain)])?;
    Ok(format!("{path}?{query}"))
}
