//! Request helper for the vetting dashboard backend.
//!
//! Every call goes through [`ApiClient::request`]: one HTTP exchange, the body
//! read as text, non-2xx statuses turned into [`ApiError::Http`], and 2xx
//! bodies decoded as JSON when they parse and returned as text otherwise.

mod base;
pub mod endpoints;
mod form;

pub use base::{ApiBase, DEFAULT_DEV_API_BASE, PREVIEW_PORT};
pub use endpoints::{
    CandidateQuery, HealthReport, InterviewQuestions, JdRef, JdSummary, MatchQuery, MatchRun,
    NewJd, NormalizedJd, ProfileSummary, RankedCandidate, VettingApi, DEFAULT_DOMAIN,
    DEFAULT_TOP_K,
};
pub use form::FormPayload;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} was cancelled")]
    Cancelled { url: String },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("could not encode JSON payload: {0}")]
    EncodeJson(#[from] serde_json::Error),
    #[error("could not encode form payload: {0}")]
    EncodeForm(#[from] serde_urlencoded::ser::Error),
    #[error("invalid API base '{value}': {reason}")]
    InvalidBase { value: String, reason: String },
}

impl ApiError {
    /// Status code of an HTTP failure, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    Json(Value),
    Text(String),
}

impl ApiBody {
    fn from_text(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => ApiBody::Json(value),
            Err(_) => ApiBody::Text(text),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiBody::Json(value) => Some(value),
            ApiBody::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiBody::Text(text) => Some(text),
            ApiBody::Json(_) => None,
        }
    }

    /// Reads a string field of a JSON object body.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.as_json()?.get(key)?.as_str()
    }

    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            ApiBody::Json(value) => {
                serde_json::from_value(value).map_err(|err| ApiError::Decode(err.to_string()))
            }
            ApiBody::Text(text) => Err(ApiError::Decode(format!(
                "expected JSON, received text ({} bytes)",
                text.len()
            ))),
        }
    }
}

/// Method, headers, body and cancellation for a single request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    base: ApiBase,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: ApiBase) -> Self {
        Self::with_http(base, reqwest::Client::new())
    }

    pub fn with_http(base: ApiBase, http: reqwest::Client) -> Self {
        Self { base, http }
    }

    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<ApiBody, ApiError> {
        let url = self.base.url_for(path);
        let RequestOptions {
            method,
            headers,
            body,
            cancel,
        } = options;

        debug!("FETCH {method} {url}");

        let mut builder = self.http.request(method, url.as_str()).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let exchange = async move {
            let response = builder.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        let outcome = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ApiError::Cancelled { url }),
                outcome = exchange => outcome,
            },
            None => exchange.await,
        };

        let (status, text) = outcome.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(ApiBody::from_text(text))
    }

    pub async fn get(&self, path: &str) -> Result<ApiBody, ApiError> {
        self.request(path, RequestOptions::get()).await
    }

    /// POSTs `payload` as a JSON body.
    pub async fn post_json<T>(&self, path: &str, payload: &T) -> Result<ApiBody, ApiError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_string(payload)?;
        let options = RequestOptions::post()
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_body(body);
        self.request(path, options).await
    }

    /// POSTs the present fields of `payload` as `application/x-www-form-urlencoded`.
    pub async fn post_form(&self, path: &str, payload: &FormPayload) -> Result<ApiBody, ApiError> {
        let options = RequestOptions::post()
            .with_header(
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .with_body(payload.encode()?);
        self.request(path, options).await
    }
}
