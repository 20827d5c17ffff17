use std::sync::Arc;

use auth::Authenticator;

use crate::domain::session::errors::GuardRejection;
use crate::domain::session::models::AuthenticatedUser;
use crate::domain::user::models::UserId;

const BEARER_PREFIX: &str = "Bearer ";

/// Gate in front of protected routes.
///
/// Takes the raw `Authorization` header value and either admits the request
/// with its resolved identity or rejects it. Signature, expiry and parse
/// failures all collapse into `Unauthorized`.
#[derive(Clone)]
pub struct AccessGuard {
    authenticator: Arc<Authenticator>,
}

impl AccessGuard {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Decide whether a request may proceed.
    ///
    /// # Arguments
    /// * `authorization` - `Authorization` header value, if present and valid UTF-8
    ///
    /// # Errors
    /// * `MissingToken` - Header absent, not a bearer credential, or empty
    /// * `Unauthorized` - Token failed validation
    pub fn check(&self, authorization: Option<&str>) -> Result<AuthenticatedUser, GuardRejection> {
        let token = extract_bearer_token(authorization).ok_or(GuardRejection::MissingToken)?;

        let subject = self.authenticator.validate_token(token).map_err(|e| {
            tracing::debug!(reason = %e, "Token rejected");
            GuardRejection::Unauthorized
        })?;

        let user_id = UserId::from_string(&subject).map_err(|e| {
            tracing::warn!(reason = %e, "Token subject is not a user id");
            GuardRejection::Unauthorized
        })?;

        Ok(AuthenticatedUser { user_id })
    }
}

fn extract_bearer_token(authorization: Option<&str>) -> Option<&str> {
    let token = authorization?.strip_prefix(BEARER_PREFIX)?.trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use auth::SigningSecret;
    use chrono::Duration;
    use chrono::Utc;

    use super::*;

    fn authenticator(secret: &[u8]) -> Arc<Authenticator> {
        let secret = SigningSecret::from_bytes(secret).expect("Invalid test secret");
        Arc::new(Authenticator::new(&secret, Duration::hours(24)))
    }

    fn guard() -> (AccessGuard, Arc<Authenticator>) {
        let authenticator = authenticator(b"test_secret_key_at_least_32_bytes!");
        (AccessGuard::new(Arc::clone(&authenticator)), authenticator)
    }

    #[test]
    fn test_admits_valid_token() {
        let (guard, authenticator) = guard();
        let user_id = UserId::new();
        let token = authenticator.issue_token(user_id).unwrap();

        let admitted = guard
            .check(Some(format!("Bearer {}", token).as_str()))
            .expect("Request should be admitted");

        assert_eq!(admitted.user_id, user_id);
    }

    #[test]
    fn test_admission_is_repeatable() {
        let (guard, authenticator) = guard();
        let user_id = UserId::new();
        let header = format!("Bearer {}", authenticator.issue_token(user_id).unwrap());

        let first = guard.check(Some(header.as_str())).unwrap();
        let second = guard.check(Some(header.as_str())).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_header() {
        let (guard, _) = guard();
        assert_eq!(guard.check(None), Err(GuardRejection::MissingToken));
    }

    #[test]
    fn test_wrong_scheme() {
        let (guard, authenticator) = guard();
        let token = authenticator.issue_token(UserId::new()).unwrap();

        assert_eq!(
            guard.check(Some(format!("Basic {}", token).as_str())),
            Err(GuardRejection::MissingToken)
        );
        assert_eq!(guard.check(Some(token.as_str())), Err(GuardRejection::MissingToken));
    }

    #[test]
    fn test_empty_bearer() {
        let (guard, _) = guard();

        assert_eq!(guard.check(Some("Bearer ")), Err(GuardRejection::MissingToken));
        assert_eq!(guard.check(Some("Bearer   ")), Err(GuardRejection::MissingToken));
    }

    #[test]
    fn test_garbage_token() {
        let (guard, _) = guard();
        assert_eq!(
            guard.check(Some("Bearer 12312312")),
            Err(GuardRejection::Unauthorized)
        );
    }

    #[test]
    fn test_foreign_token() {
        let (guard, _) = guard();
        let other = authenticator(b"another_secret_key_at_least_32_bytes");
        let token = other.issue_token(UserId::new()).unwrap();

        assert_eq!(
            guard.check(Some(format!("Bearer {}", token).as_str())),
            Err(GuardRejection::Unauthorized)
        );
    }

    #[test]
    fn test_expired_token() {
        let (guard, authenticator) = guard();
        let token = authenticator
            .token_issuer()
            .issue_at(UserId::new(), Utc::now() - Duration::hours(25))
            .unwrap();

        assert_eq!(
            guard.check(Some(format!("Bearer {}", token).as_str())),
            Err(GuardRejection::Unauthorized)
        );
    }

    #[test]
    fn test_subject_not_a_user_id() {
        let (guard, authenticator) = guard();
        let token = authenticator.issue_token("not-a-uuid").unwrap();

        assert_eq!(
            guard.check(Some(format!("Bearer {}", token).as_str())),
            Err(GuardRejection::Unauthorized)
        );
    }
}
