use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use liftboard::config::{ApiConfig, Credentials, DEFAULT_API_URL, SessionToken};
use liftboard::io::api::ApiSource;
use liftboard::io::auth;
use liftboard::io::files::DirectorySource;
use liftboard::pipeline;
use liftboard::{ExerciseCatalog, Result, ToolError};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("liftboard=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Auth(args) => execute_auth(&cli.api_url, args),
        Command::Download(args) => execute_download(&cli.api_url, args),
        Command::Report(args) => execute_report(&cli.api_url, args),
    }
}

fn execute_auth(api_url: &str, args: AuthArgs) -> Result<()> {
    let email = args
        .username
        .ok_or(ToolError::MissingCredentials("BOXMATE_USERNAME is not set"))?;
    let password = args
        .password
        .ok_or(ToolError::MissingCredentials("BOXMATE_PASSWORD is not set"))?;

    let client = reqwest::blocking::Client::new();
    let token = auth::authenticate(&client, api_url, &Credentials { email, password })?;
    println!("Authentication token: {}", token.expose());
    Ok(())
}

fn execute_download(api_url: &str, args: DownloadArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.as_ref())?;
    let api = ApiSource::new(api_config(api_url, args.token)?);
    let saved = pipeline::download(&catalog, &api, &args.output_dir)?;
    info!(saved, "all leaderboards saved");
    Ok(())
}

fn execute_report(api_url: &str, args: ReportArgs) -> Result<()> {
    let catalog = load_catalog(args.catalog.as_ref())?;

    let summary = match args.source {
        SourceKind::Files => {
            if !args.input_dir.is_dir() {
                return Err(ToolError::MissingInput(args.input_dir));
            }
            let mut source = DirectorySource::new(args.input_dir);
            pipeline::build_report(&catalog, &mut source, &args.output)?
        }
        SourceKind::Api => {
            let mut source = ApiSource::new(api_config(api_url, args.token)?);
            pipeline::build_report(&catalog, &mut source, &args.output)?
        }
    };

    println!(
        "Excel export complete: {} ({} athletes, {} rows)",
        args.output.display(),
        summary.athletes,
        summary.rows
    );
    Ok(())
}

fn load_catalog(path: Option<&PathBuf>) -> Result<ExerciseCatalog> {
    match path {
        Some(path) => ExerciseCatalog::from_path(path),
        None => Ok(ExerciseCatalog::boxmate()),
    }
}

fn api_config(api_url: &str, token: Option<String>) -> Result<ApiConfig> {
    let token = token.ok_or(ToolError::MissingCredentials(
        "BOXMATE_AUTH_TOKEN is not set",
    ))?;
    Ok(ApiConfig::new(api_url, SessionToken::new(token)))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Consolidate Boxmate lift leaderboards into a single spreadsheet."
)]
struct Cli {
    /// Base URL of the member API.
    #[arg(long, global = true, env = "BOXMATE_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Exchange member credentials for an auth token.
    Auth(AuthArgs),
    /// Save every leaderboard payload to a directory.
    Download(DownloadArgs),
    /// Aggregate leaderboards into an Excel report.
    Report(ReportArgs),
}

#[derive(clap::Args)]
struct AuthArgs {
    #[arg(long, env = "BOXMATE_USERNAME")]
    username: Option<String>,

    #[arg(long, env = "BOXMATE_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(clap::Args)]
struct DownloadArgs {
    /// Directory the `<id>.json` files are written to.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Member token from `liftboard auth`.
    #[arg(long, env = "BOXMATE_AUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// JSON catalog to use instead of the built-in leaderboards.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ReportArgs {
    /// Where leaderboards are read from.
    #[arg(long, value_enum, default_value_t = SourceKind::Files)]
    source: SourceKind,

    /// Directory holding downloaded `<id>.json` files.
    #[arg(long, default_value = ".")]
    input_dir: PathBuf,

    /// Output workbook path.
    #[arg(long, default_value = "LiftingData.xlsx")]
    output: PathBuf,

    /// Member token, required with `--source api`.
    #[arg(long, env = "BOXMATE_AUTH_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// JSON catalog to use instead of the built-in leaderboards.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    Files,
    Api,
}
