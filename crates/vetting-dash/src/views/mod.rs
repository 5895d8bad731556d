//! Single-page navigation: each trigger swaps a markup fragment into the root
//! container.
//!
//! A failed fragment fetch keeps the previous view; the error goes back to the
//! caller and is logged, nothing is injected in its place.

mod source;

pub use source::{FsFragmentSource, HttpFragmentSource};

use std::fmt;
use std::future::Future;

use tracing::{debug, warn};

pub const ROOT_CONTAINER_ID: &str = "app-root";
pub const VETTING_HEADING: &str = "<h2>Vetting Dashboard</h2>";

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("no navigation trigger with id '{0}'")]
    UnknownTrigger(String),
    #[error("fragment path '{0}' is not a relative path inside the views root")]
    InvalidPath(String),
    #[error("fetching fragment {path} failed: {source}")]
    Fetch {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("fragment {path} answered with status {status}")]
    Status { path: String, status: u16 },
    #[error("reading fragment {path} failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Navigable sections of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Vetting,
    Profiles,
    Jds,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Vetting, Section::Profiles, Section::Jds];

    pub fn trigger_id(self) -> &'static str {
        match self {
            Section::Vetting => "nav-vetting",
            Section::Profiles => "nav-profiles",
            Section::Jds => "nav-jds",
        }
    }

    /// `None` for sections rendered inline.
    pub fn fragment_path(self) -> Option<&'static str> {
        match self {
            Section::Vetting => None,
            Section::Profiles => Some("views/profiles.html"),
            Section::Jds => Some("views/jds.html"),
        }
    }

    pub fn from_trigger(trigger_id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.trigger_id() == trigger_id)
    }

    /// Accepts a trigger id or a bare section name such as `profiles`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_ascii_lowercase();
        Self::from_trigger(&raw).or_else(|| match raw.as_str() {
            "vetting" => Some(Section::Vetting),
            "profiles" => Some(Section::Profiles),
            "jds" | "jd" => Some(Section::Jds),
            _ => None,
        })
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.trigger_id())
    }
}

/// Element whose content is replaced on navigation.
pub trait ViewContainer {
    fn replace_markup(&mut self, markup: String);
    fn markup(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootContainer {
    id: String,
    markup: String,
}

impl RootContainer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            markup: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Default for RootContainer {
    fn default() -> Self {
        Self::new(ROOT_CONTAINER_ID)
    }
}

impl ViewContainer for RootContainer {
    fn replace_markup(&mut self, markup: String) {
        self.markup = markup;
    }

    fn markup(&self) -> &str {
        &self.markup
    }
}

/// Where fragment markup comes from.
pub trait FragmentSource: Send + Sync {
    fn fetch_fragment(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<String, ViewError>> + Send;
}

#[derive(Debug)]
pub struct ViewLoader<S, C = RootContainer> {
    source: S,
    container: C,
}

impl<S: FragmentSource> ViewLoader<S, RootContainer> {
    pub fn new(source: S) -> Self {
        Self::with_container(source, RootContainer::default())
    }
}

impl<S, C> ViewLoader<S, C>
where
    S: FragmentSource,
    C: ViewContainer,
{
    pub fn with_container(source: S, container: C) -> Self {
        Self { source, container }
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Handles a click on the trigger with `trigger_id`.
    pub async fn click(&mut self, trigger_id: &str) -> Result<Section, ViewError> {
        let section = Section::from_trigger(trigger_id)
            .ok_or_else(|| ViewError::UnknownTrigger(trigger_id.to_string()))?;
        self.navigate(section).await?;
        Ok(section)
    }

    pub async fn navigate(&mut self, section: Section) -> Result<(), ViewError> {
        let Some(path) = section.fragment_path() else {
            self.container.replace_markup(VETTING_HEADING.to_string());
            debug!(%section, "rendered inline view");
            return Ok(());
        };

        match self.source.fetch_fragment(path).await {
            Ok(markup) => {
                debug!(%section, path, bytes = markup.len(), "swapped view fragment");
                self.container.replace_markup(markup);
                Ok(())
            }
            Err(err) => {
                warn!(%section, path, error = %err, "view fragment failed, keeping previous view");
                Err(err)
            }
        }
    }
}
