//! Authentication utilities library
//!
//! Provides the stateless building blocks of session authentication:
//! - Password hashing (Argon2id)
//! - Signed, time-bound bearer tokens (HS256 JWT)
//! - Authentication coordination
//!
//! Services define their own ports and adapt these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningSecret, TokenIssuer};
//! use chrono::Duration;
//!
//! let secret = SigningSecret::from_config("secret_key_at_least_32_bytes_long!").unwrap();
//! let issuer = TokenIssuer::new(&secret, Duration::hours(24));
//! let token = issuer.issue("user123").unwrap();
//! assert_eq!(issuer.validate(&token).unwrap(), "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, SigningSecret};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(&SigningSecret::generate(), Duration::hours(24));
//!
//! // Stored at registration
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "user123").unwrap();
//!
//! // Later requests
//! let subject = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(subject, "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::SigningSecret;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use password::PasswordError;
pub use password::PasswordHasher;
