use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::PasswordError;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginNotice;
use crate::domain::session::models::Session;
use crate::domain::session::notifications::NotificationDispatcher;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-users";

/// Domain service implementation for login and identity resolution.
///
/// A login runs lookup, verification, issuance, then queues a notice. Any
/// step can end the attempt early.
pub struct SessionService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    notifications: NotificationDispatcher,
    /// Verified against when the email is unknown, so both failure paths
    /// pay for one Argon2 run.
    decoy_hash: String,
}

impl<UR> SessionService<UR>
where
    UR: UserRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User lookup implementation
    /// * `authenticator` - Password verification and token issuance
    /// * `notifications` - Queue for login notices
    ///
    /// # Errors
    /// * `HashingFailed` - The decoy hash for unknown users could not be computed
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        notifications: NotificationDispatcher,
    ) -> Result<Self, PasswordError> {
        let decoy_hash = authenticator.hash_password(DECOY_PASSWORD)?;

        Ok(Self {
            repository,
            authenticator,
            notifications,
            decoy_hash,
        })
    }

    async fn find_user(&self, email: &str) -> Result<Option<User>, SessionError> {
        match EmailAddress::new(email.to_string()) {
            Ok(email) => Ok(self.repository.find_by_email(&email).await?),
            Err(e) => {
                tracing::debug!(reason = %e, "Login attempt with unparseable email");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<UR> SessionServicePort for SessionService<UR>
where
    UR: UserRepository,
{
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let Some(user) = self.find_user(email).await? else {
            let _ = self
                .authenticator
                .verify_password(password, &self.decoy_hash);
            tracing::debug!("Login attempt for unknown user");
            return Err(SessionError::UserNotFound);
        };

        let result = self
            .authenticator
            .authenticate(password, &user.password_hash, user.id)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
                    SessionError::InvalidCredentials
                }
                AuthenticationError::TokenError(err) => {
                    SessionError::TokenIssuance(err.to_string())
                }
            })?;

        self.notifications.dispatch(LoginNotice::new(&user));

        tracing::info!(user_id = %user.id, "Session issued");

        Ok(Session {
            user_id: user.id,
            token: result.access_token,
        })
    }

    async fn current_user(&self, id: &UserId) -> Result<User, SessionError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(SessionError::UserNotFound)
    }
}
