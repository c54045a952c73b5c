use std::sync::Arc;

use askama::Template;
use axum::{
    Form, Router,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use metrics::counter;
use processing::{classifier::ClassifierError, executable_utils::health_check};
use tower_http::trace::TraceLayer;

use crate::{
    decision::{Decision, DecisionError, DecisionService, Verdict},
    transaction::{PredictForm, ValidationError},
};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage;

#[derive(Template)]
#[template(path = "predict.html")]
pub struct PredictPage;

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultPage {
    pub result: Verdict,
    pub probability: String,
    pub is_fraud: bool,
}

impl From<&Decision> for ResultPage {
    fn from(decision: &Decision) -> Self {
        Self {
            result: decision.verdict,
            probability: decision.display_probability_text(),
            is_fraud: decision.verdict == Verdict::Fraud,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    decisions: Arc<DecisionService>,
}

impl AppState {
    pub fn new(decisions: Arc<DecisionService>) -> Self {
        Self { decisions }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/predict", get(predict_form).post(predict))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Response {
    render(IndexPage)
}

async fn predict_form() -> Response {
    render(PredictPage)
}

pub async fn predict(
    State(state): State<AppState>,
    form: Result<Form<PredictForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            return DecisionError::from(ValidationError::MalformedBody(rejection.body_text()))
                .into_response();
        }
    };

    // Inference is CPU-bound; keep it off the async workers
    let decisions = Arc::clone(&state.decisions);
    let outcome = tokio::task::spawn_blocking(move || decisions.evaluate_form(form)).await;

    match outcome {
        Ok(Ok(decision)) => render(ResultPage::from(&decision)),
        Ok(Err(e)) => e.into_response(),
        Err(join_error) => DecisionError::Inference(ClassifierError::Runtime(anyhow::anyhow!(
            "evaluation task failed: {}",
            join_error
        )))
        .into_response(),
    }
}

fn render(page: impl Template) -> Response {
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render template");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error occurred: {}", e),
            )
                .into_response()
        }
    }
}

impl IntoResponse for DecisionError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            DecisionError::Validation(e) => {
                tracing::warn!(error = %e, "Rejected prediction request");
                (StatusCode::BAD_REQUEST, "validation")
            }
            DecisionError::Inference(e) => {
                tracing::error!(error = %e, "Prediction failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "inference")
            }
        };
        counter!("paysim_predict_errors_total", "kind" => kind).increment(1);

        (status, format!("Error occurred: {}", self)).into_response()
    }
}
