use axum::{Router, http::StatusCode, response::IntoResponse, routing::get};
use clap::Parser;
use common::config::{BackendConfig, Config};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;

use crate::model::GenericError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "config/dev.yaml")]
    pub config: String,
}

pub fn initialize_executable() -> Result<Config, GenericError> {
    // A missing .env file is the normal case outside development
    if let Ok(path) = dotenvy::dotenv() {
        println!("Loaded environment from {:?}", path);
    }

    match std::env::current_dir() {
        Ok(dir) => println!("Current directory: {:?}", dir),
        Err(e) => eprintln!("Failed to get current directory: {}", e),
    }

    let args = Args::parse();
    println!("Loading config from: {}", args.config);
    let config = Config::load(&args.config)?;
    println!("Loaded config: {:#?}", config);

    Ok(config)
}

/// Installs the global fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn initialize_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn install_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Adds `/metrics` serving the Prometheus exposition of `handle`.
pub fn with_metrics_route(app: Router, handle: PrometheusHandle) -> Router {
    app.route(
        "/metrics",
        get(move || std::future::ready(handle.render())),
    )
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK").into_response()
}

pub async fn serve(config: &BackendConfig, app: Router) -> Result<(), GenericError> {
    tracing::info!("Starting backend service at {}", config.server_address);
    let listener = tokio::net::TcpListener::bind(&config.server_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
