use std::path::PathBuf;

use clap::Parser;

use release_redirect::config::load_config;
use release_redirect::http::HttpServer;
use release_redirect::lifecycle::{signals, startup, Shutdown};
use release_redirect::observability::logging;

#[derive(Parser)]
#[command(name = "release-redirect")]
#[command(about = "Redirects short paths to release download URLs", long_about = None)]
struct Cli {
    /// Optional TOML configuration file. PORT and GITHUB_REPO override it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    logging::init(&config.observability.log_level, std::io::stdout);

    tracing::info!("release-redirect v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        repo = %config.release.repo,
        storage_host = %config.storage.host,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    startup::start_metrics(&config.observability);

    let server = HttpServer::new(config)?;
    let listener = startup::bind_listener(&server.config().listener).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_on_signal(&shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Gracefully shut down server");
    Ok(())
}
