//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::tabs::TabError;

/// Application-level error type for the admin dashboard.
///
/// Backend failures never reach this type: the tabs turn them into demo
/// rows or notifications.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The request does not match the mounted tab.
    #[error(transparent)]
    Tab(#[from] TabError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Session(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Tab(TabError::UnknownProduct(_)) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Session(_) => "Internal server error".to_string(),
            Self::Tab(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use coffee_stand_core::ProductId;

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Tab(TabError::UnknownProduct(ProductId::new("42")));
        assert_eq!(err.to_string(), "Product 42 is not in the product list");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(AppError::Tab(TabError::UnknownProduct(ProductId::new("1")))),
            StatusCode::NOT_FOUND
        );
    }
}
