use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gym_core::CoreError;
use gym_ledger::LedgerError;
use gym_notify::NotifyError;
use gym_offer::OfferError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    AuthenticationError(String),
    #[error("{0}")]
    AuthorizationError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    NotFoundError(String),
    #[error("{0}")]
    ConflictError(String),
    #[error("{0}")]
    DeliveryError(String),
    #[error("{0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::DeliveryError(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            CoreError::NotFound(msg) => AppError::NotFoundError(msg),
            CoreError::Conflict(msg) => AppError::ConflictError(msg),
            CoreError::InternalError(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl From<OfferError> for AppError {
    fn from(err: OfferError) -> Self {
        match err {
            OfferError::UnknownOffer(_) => AppError::ValidationError(err.to_string()),
            OfferError::InvalidRule(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidAmount(_) | LedgerError::InvalidDiscount(_) => {
                AppError::ValidationError(err.to_string())
            }
            LedgerError::ClientMismatch { .. } => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl From<NotifyError> for AppError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::Delivery { .. } => AppError::DeliveryError(err.to_string()),
            NotifyError::Store(e) => e.into(),
        }
    }
}
