use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Error for login and identity resolution.
///
/// `UserNotFound` and `InvalidCredentials` stay distinct here for logging;
/// the HTTP layer reports both as the same 401.
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Repository error: {0}")]
    Repository(#[from] UserError),
}

/// Reason the access guard turned a request away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GuardRejection {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Unauthorized")]
    Unauthorized,
}

/// Error for login notice delivery.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("Failed to build message: {0}")]
    MessageBuildFailed(String),

    #[error("Failed to deliver message: {0}")]
    DeliveryFailed(String),
}
