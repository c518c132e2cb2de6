//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use libris_lending::domain::rules::DEFAULT_MAX_LOANS;

use crate::error::AppError;

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interface to bind (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Port to bind (`PORT`, default `3000`).
    pub port: u16,
    /// Loan limit per member (`LIBRIS_MAX_LOANS`, default 3).
    pub max_loans: usize,
    /// Optional YAML file of books and members to register at startup
    /// (`LIBRIS_SEED_FILE`).
    pub seed_file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let max_loans = match lookup("LIBRIS_MAX_LOANS") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => {
                    return Err(AppError::Config(
                        "LIBRIS_MAX_LOANS must be at least 1".to_owned(),
                    ));
                }
                Ok(limit) => limit,
                Err(e) => {
                    return Err(AppError::Config(format!(
                        "LIBRIS_MAX_LOANS must be a positive integer: {e}"
                    )));
                }
            },
            None => DEFAULT_MAX_LOANS,
        };
        let seed_file = lookup("LIBRIS_SEED_FILE").map(PathBuf::from);

        Ok(Self {
            host,
            port,
            max_loans,
            seed_file,
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
