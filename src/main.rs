use axum::http::HeaderValue;
use clap::Parser;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trendfuse::{AppState, Config, ReportOrchestrator};

/// Multi-model trend research server.
#[derive(Debug, Parser)]
#[command(name = "trendfuse-server", version, about)]
struct Args {
    /// Bind address, overrides the HOST environment variable.
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides the PORT environment variable.
    #[arg(long)]
    port: Option<u16>,

    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    env_file: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.env_file {
        dotenvy::from_path(path)?;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trendfuse=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let orchestrator = Arc::new(ReportOrchestrator::from_config(&config)?);
    let state = AppState { orchestrator };

    let cors = if config.server.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .server
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = trendfuse::api::routes::create_router()
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("trendfuse listening on http://{addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
