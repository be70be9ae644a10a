//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_DB_MIN_CONNECTIONS,
    DEFAULT_HASH_ALGORITHM, DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB,
    DEFAULT_HASH_PARALLELISM, DEV_HASH_SECRET, MAX_LIST_LIMIT,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub database: DatabaseConfig,
    pub hashing: HashingConfig,
    pub max_list_limit: u64,
}

/// Connection pool settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            min_connections: DEFAULT_DB_MIN_CONNECTIONS,
        }
    }
}

/// Password hashing policy: algorithm, cost, and the secret key mixed into every hash.
#[derive(Clone)]
pub struct HashingConfig {
    secret: String,
    pub algorithm: String,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl std::fmt::Debug for HashingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashingConfig")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("memory_kib", &self.memory_kib)
            .field("iterations", &self.iterations)
            .field("parallelism", &self.parallelism)
            .finish()
    }
}

impl HashingConfig {
    /// Default policy with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: DEFAULT_HASH_ALGORITHM.to_string(),
            memory_kib: DEFAULT_HASH_MEMORY_KIB,
            iterations: DEFAULT_HASH_ITERATIONS,
            parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }

    /// Override the cost parameters.
    pub fn with_cost(mut self, memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        self.memory_kib = memory_kib;
        self.iterations = iterations;
        self.parallelism = parallelism;
        self
    }

    /// Get secret bytes for the hasher.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails in release builds when `HASH_SECRET` is not set.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let secret = match env::var("HASH_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                tracing::warn!("HASH_SECRET not set, using insecure default for development");
                DEV_HASH_SECRET.to_string()
            }
            _ => {
                return Err(AppError::config(
                    "HASH_SECRET environment variable must be set in production",
                ))
            }
        };

        let hashing = HashingConfig {
            secret,
            algorithm: env::var("HASH_ALGORITHM")
                .unwrap_or_else(|_| DEFAULT_HASH_ALGORITHM.to_string()),
            memory_kib: env_or("HASH_MEMORY_KIB", DEFAULT_HASH_MEMORY_KIB),
            iterations: env_or("HASH_ITERATIONS", DEFAULT_HASH_ITERATIONS),
            parallelism: env_or("HASH_PARALLELISM", DEFAULT_HASH_PARALLELISM),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: env_or("DATABASE_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            min_connections: env_or("DATABASE_MIN_CONNECTIONS", DEFAULT_DB_MIN_CONNECTIONS),
        };

        Ok(Self {
            database,
            hashing,
            max_list_limit: env_or("LIST_MAX_LIMIT", MAX_LIST_LIMIT),
        })
    }
}

/// Parse an environment variable, falling back to `default` when absent or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
