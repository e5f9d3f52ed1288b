use anyhow::Context;
use clap::Parser;
use fittrack::{
    api::routes::create_router,
    db::DatabaseProvider,
    utils::{logging::init_logging, toml_config::FitTrackConfig},
    AppState,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// FitTrack API server
#[derive(Debug, Parser)]
#[command(name = "fittrack-server", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "FITTRACK_CONFIG", default_value = "fittrack.toml")]
    config: PathBuf,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = FitTrackConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_logging(&config.server.log_level, config.server.log_format);

    let secret = config
        .jwt_secret()
        .context("JWT signing secret is not usable")?;

    let db = Arc::new(
        DatabaseProvider::from_url(&config.database.url)
            .create_client()
            .await
            .context("failed to open database")?,
    );

    let state = AppState::new(
        db.clone(),
        db,
        secret.as_bytes(),
        config.auth.token_ttl_secs,
    )
    .context("failed to initialise auth")?;

    let app = create_router(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        address = %addr,
        database = %config.database.url,
        token_ttl_secs = config.auth.token_ttl_secs,
        "fittrack-server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("fittrack-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
