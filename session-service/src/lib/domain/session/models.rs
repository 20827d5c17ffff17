use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Outcome of a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub token: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Identity attached to a request that passed the access guard.
///
/// Lives in the request's extensions for the duration of that request only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Login notification queued after a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginNotice {
    pub display_name: String,
    pub email: String,
    pub logged_in_at: DateTime<Utc>,
}

impl LoginNotice {
    pub fn new(user: &User) -> Self {
        Self {
            display_name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            logged_in_at: Utc::now(),
        }
    }

    /// Mailbox the notice is addressed to, `"<name> <email>"`.
    pub fn recipient(&self) -> String {
        format!("{} <{}>", self.display_name, self.email)
    }
}
