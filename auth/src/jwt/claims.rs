use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Claims carried by a session token.
///
/// `exp` is always `iat` plus the issuer's validity window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject issued at `issued_at`.
    ///
    /// # Arguments
    /// * `subject` - Unique subject identifier
    /// * `issued_at` - Issue time
    /// * `validity` - How long the token stays valid after `issued_at`
    ///
    /// # Errors
    /// * `EncodingFailed` - Expiry falls outside the representable time range
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at.checked_add_signed(validity).ok_or_else(|| {
            TokenError::EncodingFailed(format!("validity window of {} overflows", validity))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        })
    }
}
