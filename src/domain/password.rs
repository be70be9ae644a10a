//! Password hashing - one-way salted transform for stored credentials.
//!
//! The service only ever sees the [`PasswordHasher`] trait; [`Argon2Hasher`]
//! is the production implementation, configured once at startup.

use std::str::FromStr;

use argon2::{
    password_hash::{
        self, rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

use crate::config::HashingConfig;

/// Errors raised by password hashing.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The stored hash could not be parsed. Distinct from a mismatch.
    #[error("malformed password hash: {0}")]
    MalformedHash(String),

    #[error("unsupported hashing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// One-way salted password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password. Every call draws a fresh salt.
    fn hash(&self, plain_text: &str) -> Result<String, PasswordError>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors only when `hashed` is malformed.
    fn verify(&self, plain_text: &str, hashed: &str) -> Result<bool, PasswordError>;
}

/// Argon2 hasher with a server-side secret key.
#[derive(Clone)]
pub struct Argon2Hasher {
    secret: Vec<u8>,
    algorithm: Algorithm,
    params: Params,
}

// Don't expose the secret in debug output
impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("params", &self.params)
            .finish()
    }
}

impl Argon2Hasher {
    /// Build a hasher from configuration.
    ///
    /// # Errors
    /// Rejects unknown algorithm identifiers, out-of-range cost parameters
    /// and oversized secrets, so a bad policy fails at startup.
    pub fn from_config(config: &HashingConfig) -> Result<Self, PasswordError> {
        let algorithm = Algorithm::from_str(&config.algorithm)
            .map_err(|_| PasswordError::UnsupportedAlgorithm(config.algorithm.clone()))?;
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        let hasher = Self {
            secret: config.secret_bytes().to_vec(),
            algorithm,
            params,
        };
        hasher.argon2()?;
        Ok(hasher)
    }

    fn argon2(&self) -> Result<Argon2<'_>, PasswordError> {
        Argon2::new_with_secret(
            &self.secret,
            self.algorithm,
            Version::V0x13,
            self.params.clone(),
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain_text: &str, hashed: &str) -> Result<bool, PasswordError> {
        let parsed =
            PasswordHash::new(hashed).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        match self.argon2()?.verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        let config = HashingConfig::new("unit-test-secret").with_cost(8, 1, 1);
        Argon2Hasher::from_config(&config).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("SecurePassword123!").unwrap();

        assert_ne!(hash, "SecurePassword123!");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("SecurePassword123!", &hash).unwrap());
        assert!(!hasher.verify("WrongPassword123", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = hasher();
        let first = hasher.hash("SamePassword123").unwrap();
        let second = hasher.hash("SamePassword123").unwrap();

        // Different salts produce different hashes
        assert_ne!(first, second);
        assert!(hasher.verify("SamePassword123", &first).unwrap());
        assert!(hasher.verify("SamePassword123", &second).unwrap());
    }

    #[test]
    fn test_empty_and_long_inputs_accepted() {
        let hasher = hasher();
        let long = "x".repeat(4096);

        let hash = hasher.hash(&long).unwrap();
        assert!(hasher.verify(&long, &hash).unwrap());
        assert!(hasher.hash("").is_ok());
    }

    #[test]
    fn test_malformed_hash_is_error_not_mismatch() {
        let result = hasher().verify("anything", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::MalformedHash(_))));
    }

    #[test]
    fn test_secret_is_part_of_the_hash() {
        let hash = hasher().hash("pw").unwrap();

        let other = HashingConfig::new("a-different-secret").with_cost(8, 1, 1);
        let other = Argon2Hasher::from_config(&other).unwrap();
        assert!(!other.verify("pw", &hash).unwrap());
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let mut config = HashingConfig::new("k");
        config.algorithm = "HS256".to_string();

        let result = Argon2Hasher::from_config(&config);
        assert!(matches!(result, Err(PasswordError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let config = HashingConfig::new("k").with_cost(8, 0, 1);
        assert!(matches!(
            Argon2Hasher::from_config(&config),
            Err(PasswordError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        assert!(!format!("{:?}", hasher()).contains("unit-test-secret"));
    }
}
