use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

use super::errors::TokenError;

/// Process-wide token signing secret.
///
/// Built once at startup and handed to the [`TokenIssuer`](super::TokenIssuer);
/// never mutated afterwards.
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Minimum accepted secret length for HS256.
    pub const MIN_LENGTH: usize = 32;

    const GENERATED_LENGTH: usize = 64;

    /// Use a configured secret.
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is shorter than 32 bytes
    pub fn from_config(secret: &str) -> Result<Self, TokenError> {
        Self::from_bytes(secret.as_bytes())
    }

    /// Use raw secret bytes.
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is shorter than 32 bytes
    pub fn from_bytes(secret: &[u8]) -> Result<Self, TokenError> {
        if secret.len() < Self::MIN_LENGTH {
            return Err(TokenError::WeakSecret {
                min: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self(secret.to_vec()))
    }

    /// Generate a random secret from the operating system CSPRNG.
    ///
    /// Tokens signed with a generated secret do not survive a restart.
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; Self::GENERATED_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"<redacted>").finish()
    }
}
