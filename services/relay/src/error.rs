use axum::http::StatusCode;
use thiserror::Error;
use zoom_connector::ZoomError;

use crate::validate::ValidationError;

/// Everything that can go wrong while handling a webhook request. The
/// webhook handler is the only place these become wire responses.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid parameters: {}", .0.details.join("; "))]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Zoom(#[from] ZoomError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Zoom(ZoomError::Upstream { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            RelayError::Zoom(ZoomError::Timeout) => StatusCode::REQUEST_TIMEOUT,
            RelayError::Zoom(ZoomError::Unreachable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            RelayError::Zoom(ZoomError::MalformedResponse(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => "Invalid parameters",
            _ => status_message(self.status()),
        }
    }
}

/// Fixed user-visible message per status code. Internal error text never
/// reaches the caller through this path.
pub fn status_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::UNAUTHORIZED => "Invalid access token",
        StatusCode::FORBIDDEN => "Insufficient permissions to access recordings",
        StatusCode::NOT_FOUND => "User not found or no recordings available",
        StatusCode::REQUEST_TIMEOUT => "Request timeout",
        StatusCode::TOO_MANY_REQUESTS => "Zoom API rate limit exceeded",
        StatusCode::SERVICE_UNAVAILABLE => "Zoom API service unavailable",
        StatusCode::INTERNAL_SERVER_ERROR => "Internal server error",
        _ => "An unexpected error occurred",
    }
}
