use clap::Parser;
use souk_web::{build_router, AppState, Config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Souk storefront server.
#[derive(Parser, Debug)]
#[command(name = "souk-web", version, about)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env(),
    };

    let addr = config.bind_addr();
    let state = AppState::new(config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "souk listening");
    axum::serve(listener, app).await?;
    Ok(())
}
