use reqwest::Url;

use super::ApiError;

/// Origin the dashboard API is served from when pages are previewed locally.
pub const DEFAULT_DEV_API_BASE: &str = "http://127.0.0.1:8000";

/// Port used by static-file preview servers for the dashboard pages.
pub const PREVIEW_PORT: u16 = 5500;

/// Origin (scheme, host and port) that API paths are appended to, optionally
/// followed by a path prefix such as `/vetting` when the API is mounted below
/// the root. Queries and fragments are rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase {
    origin: String,
}

impl ApiBase {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let url = Url::parse(raw.trim()).map_err(|err| ApiError::InvalidBase {
            value: raw.to_string(),
            reason: err.to_string(),
        })?;
        Self::from_url(&url)
    }

    pub fn from_url(url: &Url) -> Result<Self, ApiError> {
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ApiError::InvalidBase {
                value: url.to_string(),
                reason: "expected an http or https origin".to_string(),
            });
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::InvalidBase {
                value: url.to_string(),
                reason: "a base may not carry a query or fragment".to_string(),
            });
        }

        Ok(Self {
            origin: url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Picks the API origin for a page: previews on port 5500 talk to `dev_api`,
    /// every other page talks to its own origin.
    pub fn for_page(page: &Url, dev_api: &ApiBase) -> Result<Self, ApiError> {
        if page.port() == Some(PREVIEW_PORT) {
            return Ok(dev_api.clone());
        }

        let origin = page.origin();
        if !origin.is_tuple() {
            return Err(ApiError::InvalidBase {
                value: page.to_string(),
                reason: "page has an opaque origin".to_string(),
            });
        }

        Self::parse(&origin.ascii_serialization())
    }

    /// Plain concatenation; callers pass paths starting with `/`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.origin, path)
    }

    pub fn as_str(&self) -> &str {
        &self.origin
    }
}

impl Default for ApiBase {
    fn default() -> Self {
        Self {
            origin: DEFAULT_DEV_API_BASE.to_string(),
        }
    }
}
