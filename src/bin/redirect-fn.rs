use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use release_redirect::config::load_config;
use release_redirect::observability::logging;
use release_redirect::release::GitHubReleases;
use release_redirect::resolver::Resolver;
use release_redirect::serverless::{self, ServerlessError};

#[derive(Parser)]
#[command(name = "redirect-fn")]
#[command(about = "Resolves a single API gateway event to a redirect response", long_about = None)]
struct Cli {
    /// Optional TOML configuration file. GITHUB_REPO overrides it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Event JSON file. Reads stdin when omitted.
    #[arg(short, long)]
    event: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    logging::init(&config.observability.log_level, std::io::stderr);

    let input = match &cli.event {
        Some(path) => std::fs::read(path).map_err(ServerlessError::Io)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf).map_err(ServerlessError::Io)?;
            buf
        }
    };

    let releases = GitHubReleases::new(&config.release)?;
    tracing::debug!(url = %releases.url(), "Release source configured");
    let resolver = Resolver::new(config.storage.clone(), Arc::new(releases));

    let output = serverless::handle_json(&resolver, &input).await?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    stdout.flush()?;
    Ok(())
}
