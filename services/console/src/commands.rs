use crate::cli::{DomainArgs, MatchArgs, ViewArgs};
use tracing::info;
use vetting_dash::api::{
    ApiClient, JdSummary, MatchQuery, ProfileSummary, RankedCandidate, VettingApi,
};
use vetting_dash::config::AppConfig;
use vetting_dash::error::AppError;
use vetting_dash::health::{HealthMonitor, HealthStatus, StatusBadge};
use vetting_dash::markup::{escape_html, escape_html_opt};
use vetting_dash::state::UiState;
use vetting_dash::views::{FsFragmentSource, Section, ViewContainer, ViewError, ViewLoader};

pub(crate) struct Context {
    config: AppConfig,
    api: VettingApi,
    health: HealthMonitor,
}

impl Context {
    pub(crate) fn new(config: AppConfig) -> Self {
        let client = ApiClient::new(config.api.base.clone());
        let health = HealthMonitor::with_timeout(client.clone(), config.api.health_timeout);
        Self {
            config,
            api: VettingApi::new(client),
            health,
        }
    }
}

pub(crate) async fn health(context: &Context) -> Result<(), AppError> {
    let mut badge = StatusBadge::default();
    let status = context.health.check(&mut badge).await;

    println!("Backend {}: {}", context.config.api.base.as_str(), badge.label());
    match status {
        HealthStatus::Up { version } => {
            println!("Version: {}", version.as_deref().unwrap_or("?"));
            Ok(())
        }
        HealthStatus::Down { reason } => Err(AppError::BackendDown(reason)),
    }
}

pub(crate) async fn profiles(context: &Context, args: DomainArgs) -> Result<(), AppError> {
    let profiles = context.api.list_profiles(&args.domain).await?;
    info!(domain = %args.domain, count = profiles.len(), "listed profiles");

    if profiles.is_empty() {
        println!("No profiles in domain '{}'", args.domain);
        return Ok(());
    }

    if args.html {
        for profile in &profiles {
            println!("{}", profile_row(profile));
        }
        return Ok(());
    }

    println!("Profiles ({})", args.domain);
    for profile in &profiles {
        println!(
            "- {} | {} | {}",
            profile.profile_id,
            profile.full_name.as_deref().unwrap_or("(unnamed)"),
            profile.email.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub(crate) async fn jds(context: &Context, args: DomainArgs) -> Result<(), AppError> {
    let jds = context.api.list_jds(&args.domain).await?;
    info!(domain = %args.domain, count = jds.len(), "listed job descriptions");

    if jds.is_empty() {
        println!("No job descriptions in domain '{}'", args.domain);
        return Ok(());
    }

    if args.html {
        for jd in &jds {
            println!("{}", jd_row(jd));
        }
        return Ok(());
    }

    println!("Job descriptions ({})", args.domain);
    for jd in &jds {
        println!(
            "- {} | {} @ {} | created {}",
            jd.jd_id,
            jd.title.as_deref().unwrap_or("(untitled)"),
            jd.company.as_deref().unwrap_or("(unknown company)"),
            jd.created_at.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub(crate) async fn run_match(context: &Context, args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        domain,
        jd_id,
        top_k,
        select,
        html,
    } = args;

    let mut state = UiState::new();
    let query = MatchQuery {
        domain,
        jd_id,
        top_k,
    };
    let run = context.api.run_match(&query).await?;
    println!(
        "Ranking for {} ({} @ {})",
        run.jd.jd_id, run.jd.title, run.jd.company
    );
    state.record_ranking(run);

    if let Some(index) = select {
        state.select_row(index)?;
    }

    if state.latest_rank().is_empty() {
        println!("No candidates ranked");
        return Ok(());
    }

    let selected = state.selected_row().map(|row| row.profile_id.clone());
    for (position, candidate) in state.latest_rank().iter().enumerate() {
        let is_selected = selected.as_deref() == Some(candidate.profile_id.as_str());
        if html {
            println!("{}", candidate_row(candidate, is_selected));
        } else {
            let marker = if is_selected { '>' } else { ' ' };
            println!("{marker} {}", render_candidate(position, candidate));
        }
    }
    Ok(())
}

fn render_candidate(position: usize, candidate: &RankedCandidate) -> String {
    format!(
        "{:>2}. {} {} score {:.2} [{}]",
        position + 1,
        candidate.profile_id,
        candidate.name,
        candidate.score,
        candidate.top_matches.join(", ")
    )
}

fn candidate_row(candidate: &RankedCandidate, selected: bool) -> String {
    let class = if selected { " class=\"selected\"" } else { "" };
    format!(
        "<tr data-profile-id=\"{}\"{class}><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td></tr>",
        escape_html(&candidate.profile_id),
        escape_html(&candidate.name),
        escape_html(&candidate.email),
        candidate.score,
        escape_html(&candidate.top_matches.join(", "))
    )
}

fn profile_row(profile: &ProfileSummary) -> String {
    format!(
        "<tr data-profile-id=\"{}\"><td>{}</td><td>{}</td></tr>",
        escape_html(&profile.profile_id),
        escape_html_opt(profile.full_name.as_deref()),
        escape_html_opt(profile.email.as_deref())
    )
}

fn jd_row(jd: &JdSummary) -> String {
    format!(
        "<option value=\"{}\">{} @ {}</option>",
        escape_html(&jd.jd_id),
        escape_html_opt(jd.title.as_deref()),
        escape_html_opt(jd.company.as_deref())
    )
}

pub(crate) async fn view(context: &Context, args: ViewArgs) -> Result<(), AppError> {
    let section = Section::parse(&args.section)
        .ok_or_else(|| ViewError::UnknownTrigger(args.section.clone()))?;
    let root = args
        .views_dir
        .unwrap_or_else(|| context.config.views.root.clone());

    let mut loader = ViewLoader::new(FsFragmentSource::new(root));
    loader.navigate(section).await?;
    println!("{}", loader.container().markup());
    Ok(())
}
