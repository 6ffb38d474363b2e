//! Request handlers.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tracing::{info, warn};

use crate::app::pipeline::fit_payload;
use crate::domain::ErrorBody;
use crate::error::ServiceError;
use crate::server::AppState;

/// `POST /fit`.
///
/// The body is parsed regardless of `Content-Type`.
pub async fn fit(State(state): State<Arc<AppState>>, body: Bytes) -> Result<Response, ServiceError> {
    let output = fit_payload(&body, &state.config)?;
    info!(
        n = output.fit.n,
        tau0 = output.result.tau0,
        mu = output.result.mu,
        r2 = output.result.r2,
        bounded = output.fit.bounded,
        "fit ok"
    );
    Ok((StatusCode::OK, Json(output.result)).into_response())
}

/// `GET /health`.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// HTTP status for a pipeline failure.
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Fit(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        warn!(
            status = status.as_u16(),
            kind = self.kind(),
            reason = self.reason(),
            error = %self,
            "fit rejected"
        );
        (status, Json(ErrorBody::from(&self))).into_response()
    }
}
