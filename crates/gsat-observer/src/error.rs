//! Error types for the HTTP API.
//!
//! [`ObserverError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//! Input-validation failures from the engine and malformed query strings
//! become `400 Bad Request`.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gsat_core::ScoringError;
use tracing::{error, warn};

/// Errors that can occur in the HTTP API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The scoring engine rejected the request or failed.
    #[error("{0}")]
    Scoring(#[from] ScoringError),

    /// An invalid query parameter was provided.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ObserverError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Scoring(
                ScoringError::InvalidOptionCount { .. }
                | ScoringError::InvalidConstraint { .. }
                | ScoringError::InfeasibleGuessCount { .. }
                | ScoringError::UnknownScoreRule(_)
                | ScoringError::InvalidTrialCount(_)
                | ScoringError::TrialCountExceeded { .. },
            )
            | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Scoring(ScoringError::Cancelled { .. }) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Scoring(
                ScoringError::ExchangeabilityViolated { .. } | ScoringError::ArithmeticOverflow,
            )
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for ObserverError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        let errors = [
            ScoringError::invalid_constraint("overlap"),
            ScoringError::InfeasibleGuessCount {
                requested: 9,
                undetermined: 2,
            },
            ScoringError::UnknownScoreRule(String::from("lenient")),
            ScoringError::InvalidTrialCount(0),
            ScoringError::TrialCountExceeded {
                requested: 10,
                max: 5,
            },
        ];
        for err in errors {
            assert_eq!(ObserverError::from(err).status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn invariant_breaches_are_server_errors() {
        let err = ObserverError::from(ScoringError::ExchangeabilityViolated { guess_count: 2 });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
