use async_trait::async_trait;

use crate::domain::session::errors::NotificationError;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginNotice;
use crate::domain::session::models::Session;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for session domain service operations.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and open a session.
    ///
    /// # Arguments
    /// * `email` - Email address as submitted
    /// * `password` - Plaintext password as submitted
    ///
    /// # Returns
    /// Session with the user's id and a freshly issued token
    ///
    /// # Errors
    /// * `UserNotFound` - No user with this email (or email is unparseable)
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenIssuance` - Token could not be signed
    /// * `Repository` - Lookup failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, SessionError>;

    /// Load the identity behind an authenticated request.
    ///
    /// # Errors
    /// * `UserNotFound` - User no longer exists
    /// * `Repository` - Lookup failed
    async fn current_user(&self, id: &UserId) -> Result<User, SessionError>;
}

/// Outbound port delivering login notices.
#[async_trait]
pub trait LoginNotifier: Send + Sync + 'static {
    /// Deliver one notice to `notice.recipient()`.
    ///
    /// # Errors
    /// * `InvalidRecipient` - Name or email cannot form a mailbox
    /// * `MessageBuildFailed` - Message could not be assembled
    /// * `DeliveryFailed` - Transport refused or timed out
    async fn send_login_notice(&self, notice: &LoginNotice) -> Result<(), NotificationError>;
}
