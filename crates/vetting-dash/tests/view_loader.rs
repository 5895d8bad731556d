//! Navigation clicks against recording, HTTP and filesystem fragment sources.

mod common;

use std::collections::HashMap;
use std::sync::Mutex;

use axum::routing::get;
use axum::Router;
use reqwest::Url;

use vetting_dash::views::{
    FragmentSource, FsFragmentSource, HttpFragmentSource, Section, ViewContainer, ViewError,
    ViewLoader, VETTING_HEADING,
};

#[derive(Default)]
struct RecordingSource {
    fragments: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl RecordingSource {
    fn with_fragment(mut self, path: &str, markup: &str) -> Self {
        self.fragments.insert(path.to_string(), markup.to_string());
        self
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().expect("recording mutex poisoned").clone()
    }
}

impl FragmentSource for RecordingSource {
    async fn fetch_fragment(&self, path: &str) -> Result<String, ViewError> {
        self.requested
            .lock()
            .expect("recording mutex poisoned")
            .push(path.to_string());
        self.fragments.get(path).cloned().ok_or(ViewError::Status {
            path: path.to_string(),
            status: 404,
        })
    }
}

fn recording() -> RecordingSource {
    RecordingSource::default()
        .with_fragment("views/profiles.html", "<section id=\"profiles\"></section>")
        .with_fragment("views/jds.html", "<section id=\"jds\"></section>")
}

#[tokio::test]
async fn profiles_click_fetches_its_fragment_once() {
    let mut loader = ViewLoader::new(recording());

    let section = loader.click("nav-profiles").await.expect("profiles load");

    assert_eq!(section, Section::Profiles);
    assert_eq!(loader.source().requested(), vec!["views/profiles.html"]);
    assert_eq!(loader.container().markup(), "<section id=\"profiles\"></section>");
}

#[tokio::test]
async fn vetting_click_renders_inline_without_fetching() {
    let mut loader = ViewLoader::new(recording());

    loader.click("nav-vetting").await.expect("vetting renders");

    assert!(loader.source().requested().is_empty());
    assert_eq!(loader.container().markup(), VETTING_HEADING);
    assert_eq!(loader.container().markup(), "<h2>Vetting Dashboard</h2>");
}

#[tokio::test]
async fn failed_fragment_keeps_previous_view() {
    let source = RecordingSource::default().with_fragment("views/profiles.html", "<p>profiles</p>");
    let mut loader = ViewLoader::new(source);
    loader
        .navigate(Section::Profiles)
        .await
        .expect("profiles load");

    let err = loader
        .navigate(Section::Jds)
        .await
        .expect_err("jds fragment is missing");

    assert!(matches!(err, ViewError::Status { status: 404, .. }));
    assert_eq!(loader.container().markup(), "<p>profiles</p>");
}

#[tokio::test]
async fn unknown_trigger_is_rejected() {
    let mut loader = ViewLoader::new(recording());

    let err = loader
        .click("nav-reports")
        .await
        .expect_err("no such trigger");

    assert!(matches!(err, ViewError::UnknownTrigger(ref id) if id == "nav-reports"));
    assert!(loader.source().requested().is_empty());
    assert_eq!(loader.container().markup(), "");
}

#[tokio::test]
async fn http_source_resolves_fragments_against_the_page() {
    let router = Router::new().route(
        "/ui/views/jds.html",
        get(|| async { "<table id=\"jd-table\"></table>" }),
    );
    let addr = common::spawn(router).await;
    let page = Url::parse(&format!("http://{addr}/ui/index.html")).expect("page url");
    let mut loader = ViewLoader::new(HttpFragmentSource::new(page));

    loader.click("nav-jds").await.expect("jds load");
    assert_eq!(loader.container().markup(), "<table id=\"jd-table\"></table>");

    let err = loader
        .click("nav-profiles")
        .await
        .expect_err("profiles fragment is not served");
    assert!(matches!(err, ViewError::Status { status: 404, .. }));
    assert_eq!(loader.container().markup(), "<table id=\"jd-table\"></table>");
}

#[tokio::test]
async fn fs_source_reads_from_the_views_root() {
    let root = tempfile::tempdir().expect("temp dir");
    std::fs::create_dir_all(root.path().join("views")).expect("views dir");
    std::fs::write(
        root.path().join("views/profiles.html"),
        "<ul id=\"profile-list\"></ul>",
    )
    .expect("fragment written");

    let mut loader = ViewLoader::new(FsFragmentSource::new(root.path()));
    loader
        .navigate(Section::Profiles)
        .await
        .expect("profiles load");
    assert_eq!(loader.container().markup(), "<ul id=\"profile-list\"></ul>");

    let err = loader
        .navigate(Section::Jds)
        .await
        .expect_err("jds fragment missing on disk");
    assert!(matches!(err, ViewError::Io { .. }));
    assert_eq!(loader.container().markup(), "<ul id=\"profile-list\"></ul>");
}
