//! Password hashing and verification for authgate.
//!
//! Uses Argon2id for secure password hashing.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;
use tracing::warn;

use crate::config::PasswordConfig;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Argon2 cost parameters were rejected.
    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// One-way salted hash plus verification primitive.
///
/// `hash` is not deterministic: two calls on the same input produce
/// different encodings, and both verify.
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password.
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored hash.
    fn verify(&self, plaintext: &str, hashed: &str) -> bool;
}

/// Argon2id hasher with configurable cost parameters.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Create a hasher with explicit parameters.
    ///
    /// - `memory_kib`: memory cost in KiB
    /// - `iterations`: time cost
    /// - `parallelism`: lanes
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    /// Create a hasher from the `[password]` configuration section.
    pub fn from_config(config: &PasswordConfig) -> Result<Self, PasswordError> {
        Self::new(config.memory_kib, config.iterations, config.parallelism)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            self.params.clone(),
        )
    }
}

impl Default for Argon2Hasher {
    /// 64 MB memory, 3 iterations, 4 lanes.
    fn default() -> Self {
        let defaults = PasswordConfig::default();
        Self::from_config(&defaults).unwrap_or(Self {
            params: Params::default(),
        })
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;

        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        match verify_password(plaintext, hashed) {
            Ok(()) => true,
            Err(PasswordError::InvalidHash) => {
                warn!("Stored password hash is not a valid PHC string");
                false
            }
            Err(_) => false,
        }
    }
}

/// Verify a password against a stored hash.
///
/// The cost parameters are read from the PHC string, not from any
/// hasher configuration, so hashes made under older settings still verify.
///
/// # Examples
///
/// ```
/// use authgate::auth::{Argon2Hasher, CredentialHasher, verify_password};
///
/// let hasher = Argon2Hasher::new(8 * 1024, 1, 1).unwrap();
/// let hash = hasher.hash("my_secure_password").unwrap();
/// assert!(verify_password("my_secure_password", &hash).is_ok());
/// assert!(verify_password("wrong_password", &hash).is_err());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}
