//! API error taxonomy.
//!
//! Every failure a handler can surface maps onto one of these variants, and
//! each variant carries a human-readable message rendered inline by clients.
//! Errors never leave persisted state inconsistent: a failed submission keeps
//! the caller's draft intact so the form can be retried without re-entry.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ApiError {
    /// A required field is missing or malformed. Caught before any
    /// network/database call; names the offending field(s).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Candidate name or repository URL collides with an existing record.
    /// When the existing record has no owner and the caller is signed in,
    /// `claimable` offers the claim path instead of a dead end.
    #[error("Duplicate submission: {reason}")]
    Duplicate {
        reason: String,
        existing_id: Option<Uuid>,
        claimable: bool,
    },

    /// Sponsor plan selected without a completed payment confirmation.
    #[error("Payment required: {0}")]
    PaymentRequired(String),

    /// Action requires sign-in.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// A remote call failed (duplicate check, draft operation, backlink
    /// fetch, final submission). The workflow stays in its pre-call state.
    #[error("Network error: {0}")]
    Network(String),

    /// Resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    existing_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    claimable: Option<bool>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Duplicate { .. } => StatusCode::CONFLICT,
            ApiError::PaymentRequired(_) => StatusCode::PAYMENT_REQUIRED,
            ApiError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            ApiError::Network(_) => StatusCode::BAD_GATEWAY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::Duplicate { .. } => "duplicate_error",
            ApiError::PaymentRequired(_) => "payment_required",
            ApiError::AuthenticationRequired => "authentication_required",
            ApiError::Network(_) => "network_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::Database(_) | ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details stay in the logs, not the response body.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
        }

        let (existing_id, claimable) = match &self {
            ApiError::Duplicate {
                existing_id,
                claimable,
                ..
            } => (*existing_id, Some(*claimable)),
            _ => (None, None),
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            error: self.kind().to_string(),
            message,
            existing_id,
            claimable,
        };

        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            ApiError::Validation("license is required".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::PaymentRequired("no capture".into()).status(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            ApiError::AuthenticationRequired.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Duplicate {
                reason: "name collision".into(),
                existing_id: None,
                claimable: false,
            }
            .status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn duplicate_carries_claim_info() {
        let id = Uuid::new_v4();
        let err = ApiError::Duplicate {
            reason: "repository already listed".into(),
            existing_id: Some(id),
            claimable: true,
        };
        match err {
            ApiError::Duplicate {
                existing_id,
                claimable,
                ..
            } => {
                assert_eq!(existing_id, Some(id));
                assert!(claimable);
            }
            _ => unreachable!(),
        }
    }
}
