use std::error::Error;
use std::sync::Arc;

use paysim::{
    decision::DecisionService,
    web::{AppState, router},
};
use processing::executable_utils::{
    initialize_executable, initialize_tracing, install_metrics_recorder, serve, with_metrics_route,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("Starting backend...");
    let config = initialize_executable()?;
    initialize_tracing(&config.backend.log_level);
    let metrics = install_metrics_recorder()?;

    let decisions = match DecisionService::load(&config.model) {
        Ok(decisions) => decisions,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load model artifacts");
            return Err(e.into());
        }
    };

    let app = with_metrics_route(router(AppState::new(Arc::new(decisions))), metrics);
    serve(&config.backend, app).await
}
