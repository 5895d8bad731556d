use std::path::{Component, Path, PathBuf};

use reqwest::Url;

use super::{FragmentSource, ViewError};

/// Fetches fragments relative to the page URL, the way a browser resolves them.
#[derive(Debug, Clone)]
pub struct HttpFragmentSource {
    page: Url,
    http: reqwest::Client,
}

impl HttpFragmentSource {
    pub fn new(page: Url) -> Self {
        Self::with_http(page, reqwest::Client::new())
    }

    pub fn with_http(page: Url, http: reqwest::Client) -> Self {
        Self { page, http }
    }
}

impl FragmentSource for HttpFragmentSource {
    async fn fetch_fragment(&self, path: &str) -> Result<String, ViewError> {
        let url = self
            .page
            .join(path)
            .map_err(|_| ViewError::InvalidPath(path.to_string()))?;

        let fetch_error = |source: reqwest::Error| ViewError::Fetch {
            path: path.to_string(),
            source,
        };
        let response = self.http.get(url).send().await.map_err(fetch_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ViewError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(fetch_error)
    }
}

/// Reads fragments from a directory of static views.
#[derive(Debug, Clone)]
pub struct FsFragmentSource {
    root: PathBuf,
}

impl FsFragmentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, ViewError> {
        let relative = Path::new(path);
        let contained = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if !contained {
            return Err(ViewError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl FragmentSource for FsFragmentSource {
    async fn fetch_fragment(&self, path: &str) -> Result<String, ViewError> {
        let resolved = self.resolve(path)?;
        tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|source| ViewError::Io {
                path: path.to_string(),
                source,
            })
    }
}
