//! Failure of an external collaborator (catalog, booking service, user directory).

use http::StatusCode;
use thiserror::Error;

use crate::domain::booking::BookingError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The collaborator answered with a non-success status.
    #[error("collaborator returned {status}{}", .message.as_deref().map(|m| format!(": {}", m)).unwrap_or_default())]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be understood.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Creates a status error from a raw code. Unknown codes become 500.
    pub fn status(code: u16, message: Option<String>) -> Self {
        Self::Status {
            status: StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Status {
            status: StatusCode::CONFLICT,
            message: Some(message.into()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Status {
            status: StatusCode::NOT_FOUND,
            message: Some(message.into()),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Status {
            status: StatusCode::BAD_REQUEST,
            message: Some(message.into()),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the collaborator, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// A conflict on user creation means the email is already registered.
    pub fn is_duplicate(&self) -> bool {
        self.status_code() == Some(StatusCode::CONFLICT)
    }
}

impl From<ServiceError> for BookingError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Status { status, message } => {
                BookingError::from_status(status.as_u16(), message)
            }
            ServiceError::Timeout { .. } | ServiceError::Network(_) | ServiceError::Decode(_) => {
                BookingError::Failed
            }
        }
    }
}
