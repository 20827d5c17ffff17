use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// User store kept in process memory.
///
/// Backs the integration tests; registration happens through `insert`.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user whose password is already hashed.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Another user has this email
    pub fn insert(&self, user: User) -> Result<User, UserError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let users = self
            .users
            .read()
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(users.values().find(|user| &user.email == email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let users = self
            .users
            .read()
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(users.get(id).cloned())
    }
}
