//! Maps library errors onto HTTP responses.

use crate::error::BenefitsError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

impl BenefitsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BenefitNotFound(_) | Self::UserNotFound(_) | Self::NotRequested => {
                StatusCode::NOT_FOUND
            }
            Self::AlreadyInStatus(_) | Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::SimulationUnsupported | Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::InvalidFormula(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BenefitNotFound(_) => "BENEFIT_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::NotRequested => "NOT_REQUESTED",
            Self::AlreadyInStatus(_) | Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::SimulationUnsupported => "SIMULATION_UNSUPPORTED",
            Self::InvalidFormula(_) => "INVALID_FORMULA",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for BenefitsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details stay in the log.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = json!({
            "error": message,
            "code": self.error_code(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for BenefitsError {
    fn from(rejection: JsonRejection) -> Self {
        Self::ValidationError(rejection.body_text())
    }
}
