use anyhow::Result;
use clap::Parser;
use dlpage::commands::{self, Config, DEFAULT_REPO};
use std::path::PathBuf;
use std::process::ExitCode;

/// dlpage - Download Page Release Updater
///
/// Fill a static download page with the file links, sizes, dates and version
/// of a GitHub release.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
/// This is useful for avoiding rate limits.
///
/// Examples:
///   dlpage update site/index.html     # Patch the page with the latest release
///   dlpage show --tag v2.9.87         # Show how a release maps onto the page
#[derive(Parser, Debug)]
#[command(author, version = env!("DLPAGE_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Repository publishing the releases
    #[arg(
        long,
        env = "DLPAGE_REPO",
        value_name = "OWNER/REPO",
        default_value = DEFAULT_REPO,
        global = true
    )]
    pub repo: String,

    /// Use the release with this tag instead of the latest one
    #[arg(long, value_name = "TAG", global = true)]
    pub tag: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Patch a download page with release information
    Update(UpdateArgs),

    /// Show the release assets and the page slots they fill
    Show,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// The HTML page to patch
    #[arg(value_name = "PAGE")]
    pub page: PathBuf,

    /// Write the patched page here instead of overwriting PAGE
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = dlpage::runtime::RealRuntime;
    let config = Config::new(&runtime, &cli.repo, cli.tag, cli.api_url)?;

    match cli.command {
        Commands::Update(args) => {
            if !commands::update(runtime, config, &args.page, args.output).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Show => commands::show(config).await?,
    }
    Ok(ExitCode::SUCCESS)
}
