//! Process configuration, read once at startup.

use std::net::SocketAddr;

use backend_core::Environment;

/// Port used when `PORT` is unset or empty.
pub const DEFAULT_PORT: u16 = 8080;

/// Version reported when `APP_VERSION` is unset or empty.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Largest accepted request body: 10 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

const PORT_VAR: &str = "PORT";
const ENVIRONMENT_VAR: &str = "APP_ENV";
/// Read when `APP_ENV` is unset or empty.
const FALLBACK_ENVIRONMENT_VAR: &str = "NODE_ENV";
const VERSION_VAR: &str = "APP_VERSION";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value '{value}' for {var}: {reason}")]
    InvalidVar {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Immutable service configuration shared by every request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GatewayConfig {
    /// TCP port bound on all interfaces.
    pub port: u16,
    /// Deployment mode; gates verbose error messages.
    pub environment: Environment,
    /// Version string reported by health payloads.
    pub version: String,
    /// Request body ceiling in bytes.
    pub body_limit_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: Environment::Development,
            version: DEFAULT_VERSION.to_owned(),
            body_limit_bytes: DEFAULT_BODY_LIMIT,
        }
    }
}

impl GatewayConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidVar`] if `PORT` is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration through `lookup`, treating empty values as unset.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidVar`] if `PORT` is not a valid port number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match get(PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidVar {
                var: PORT_VAR,
                reason: e.to_string(),
                value: raw,
            })?,
            None => defaults.port,
        };

        Ok(Self {
            port,
            environment: get(ENVIRONMENT_VAR)
                .or_else(|| get(FALLBACK_ENVIRONMENT_VAR))
                .map_or(defaults.environment, |raw| Environment::parse(&raw)),
            version: get(VERSION_VAR).unwrap_or(defaults.version),
            body_limit_bytes: defaults.body_limit_bytes,
        })
    }

    /// Replaces the deployment mode.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Replaces the request body ceiling.
    #[must_use]
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit_bytes = bytes;
        self
    }

    /// Address to bind: all interfaces on the configured port.
    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
