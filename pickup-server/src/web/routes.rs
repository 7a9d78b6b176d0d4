//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::pipeline::{PipelineError, RideRequest};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/rides", post(plan_rides))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Plan pickup rides from the rider's location to a destination.
async fn plan_rides(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RidesResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let request: RideRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid ride request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    request
        .source
        .validate()
        .map_err(|e| AppError::BadRequest {
            message: format!("Invalid source: {e}"),
        })?;
    request
        .destination
        .validate()
        .map_err(|e| AppError::BadRequest {
            message: format!("Invalid destination: {e}"),
        })?;

    let plan = state.pipeline.plan_rides(&request, Utc::now()).await?;

    Ok(Json(plan.into()))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
    GatewayTimeout { message: String },
    Internal { message: String },
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        let message = e.to_string();
        match e {
            PipelineError::Timeout(_) => AppError::GatewayTimeout { message },
            PipelineError::Geometry(_)
            | PipelineError::Walking(_)
            | PipelineError::Driving(_)
            | PipelineError::Pricing(_)
            | PipelineError::MatrixSize { .. }
            | PipelineError::MissingRoute { .. }
            | PipelineError::PriceCount { .. } => AppError::BadGateway { message },
            PipelineError::Misaligned { .. } | PipelineError::Task(_) => {
                AppError::Internal { message }
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::GatewayTimeout { message } => (StatusCode::GATEWAY_TIMEOUT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
