use crate::commands::{self, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vetting_dash::api::{ApiBase, DEFAULT_DOMAIN, DEFAULT_TOP_K};
use vetting_dash::config::AppConfig;
use vetting_dash::error::AppError;
use vetting_dash::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Vetting Console",
    about = "Drive the candidate vetting dashboard backend from the command line",
    version
)]
struct Cli {
    /// Override the configured API origin (e.g. http://127.0.0.1:8000)
    #[arg(long, global = true)]
    api_base: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the liveness endpoint (default command)
    Health,
    /// List candidate profiles
    Profiles(DomainArgs),
    /// List job descriptions
    Jds(DomainArgs),
    /// Rank profiles against a job description
    Match(MatchArgs),
    /// Render a dashboard section from the local view fragments
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub(crate) struct DomainArgs {
    /// Domain filter applied by the backend
    #[arg(long, default_value = DEFAULT_DOMAIN)]
    pub(crate) domain: String,
    /// Print table rows for the dashboard instead of plain text
    #[arg(long)]
    pub(crate) html: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    #[arg(long, default_value = DEFAULT_DOMAIN)]
    pub(crate) domain: String,
    /// Job description to rank against (defaults to the latest in the domain)
    #[arg(long)]
    pub(crate) jd_id: Option<String>,
    /// Number of candidates to return
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub(crate) top_k: u32,
    /// Highlight a row of the ranking (zero-based)
    #[arg(long)]
    pub(crate) select: Option<usize>,
    /// Print table rows for the dashboard instead of plain text
    #[arg(long)]
    pub(crate) html: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ViewArgs {
    /// Section name or trigger id: vetting, profiles, jds, nav-profiles, ...
    pub(crate) section: String,
    /// Directory holding the views/ fragments
    #[arg(long)]
    pub(crate) views_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(raw) = cli.api_base.as_deref() {
        config.api.base = ApiBase::parse(raw)?;
    }

    telemetry::init(&config.telemetry)?;

    let context = Context::new(config);
    match cli.command.unwrap_or(Command::Health) {
        Command::Health => commands::health(&context).await,
        Command::Profiles(args) => commands::profiles(&context, args).await,
        Command::Jds(args) => commands::jds(&context, args).await,
        Command::Match(args) => commands::run_match(&context, args).await,
        Command::View(args) => commands::view(&context, args).await,
    }
}
