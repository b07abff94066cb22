//! Environment-driven configuration for the notary and digest services.
//!
//! ## Variables
//!
//! | Variable | Default | Used by |
//! |----------|---------|---------|
//! | `HOST` | `0.0.0.0` | both |
//! | `PORT` | `8082` (notary), `8081` (digest) | both |
//! | `DIGEST_SERVICE_URL` / `HASHER_SERVICE_URL` | `http://localhost:8081/hash` | notary |
//! | `DIGEST_TIMEOUT_MS` | `5000` | notary |
//! | `DIGEST_MODE` | `remote` | notary |
//! | `LOG_FORMAT` | `json` | both |
//!
//! Empty variables are treated as unset.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Default notary port.
pub const DEFAULT_NOTARY_PORT: u16 = 8082;

/// Default digest service port.
pub const DEFAULT_DIGEST_PORT: u16 = 8081;

/// Default remote digest endpoint.
pub const DEFAULT_DIGEST_SERVICE_URL: &str = "http://localhost:8081/hash";

/// Default digest call timeout.
pub const DEFAULT_DIGEST_TIMEOUT: Duration = Duration::from_millis(5000);

const DEFAULT_HOST: &str = "0.0.0.0";

/// Configuration errors. All of them abort startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Host and port do not form a socket address.
    #[error("Invalid bind address {0}")]
    InvalidBindAddress(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Where the notary gets digests from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestMode {
    /// Call the remote digest service.
    Remote,
    /// Hash in process.
    Local,
}

impl DigestMode {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "remote" => Some(Self::Remote),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

impl fmt::Display for DigestMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured JSON lines.
    Json,
    /// Human-readable output for local development.
    Pretty,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// Notary service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotaryConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Remote digest endpoint.
    pub digest_service_url: String,
    /// Timeout for a single digest call.
    pub digest_timeout: Duration,
    /// Remote or in-process digests.
    pub digest_mode: DigestMode,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for NotaryConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_NOTARY_PORT,
            digest_service_url: DEFAULT_DIGEST_SERVICE_URL.to_string(),
            digest_timeout: DEFAULT_DIGEST_TIMEOUT,
            digest_mode: DigestMode::Remote,
            log_format: LogFormat::Json,
        }
    }
}

impl NotaryConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);
        let defaults = Self::default();

        let digest_timeout = match env.get("DIGEST_TIMEOUT_MS") {
            Some(raw) => {
                let millis: u64 = raw.parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::InvalidValue {
                        var: "DIGEST_TIMEOUT_MS",
                        value: raw.clone(),
                        reason: e.to_string(),
                    }
                })?;
                if millis == 0 {
                    return Err(ConfigError::InvalidValue {
                        var: "DIGEST_TIMEOUT_MS",
                        value: raw,
                        reason: "timeout must be positive".to_string(),
                    });
                }
                Duration::from_millis(millis)
            }
            None => defaults.digest_timeout,
        };

        let digest_mode = match env.get("DIGEST_MODE") {
            Some(raw) => DigestMode::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                var: "DIGEST_MODE",
                value: raw.clone(),
                reason: "expected \"remote\" or \"local\"".to_string(),
            })?,
            None => defaults.digest_mode,
        };

        Ok(Self {
            host: env.get("HOST").unwrap_or(defaults.host),
            port: env.port(DEFAULT_NOTARY_PORT)?,
            digest_service_url: env
                .get("DIGEST_SERVICE_URL")
                .or_else(|| env.get("HASHER_SERVICE_URL"))
                .unwrap_or(defaults.digest_service_url),
            digest_timeout,
            digest_mode,
            log_format: env.log_format()?,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        bind_addr(&self.host, self.port)
    }
}

/// Digest service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestServiceConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
}

impl DigestServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        Ok(Self {
            host: env.get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.port(DEFAULT_DIGEST_PORT)?,
            log_format: env.log_format()?,
        })
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        bind_addr(&self.host, self.port)
    }
}

/// Variable lookup that skips empty values.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    fn port(&self, default: u16) -> Result<u16, ConfigError> {
        match self.get("PORT") {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                var: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            }),
            None => Ok(default),
        }
    }

    fn log_format(&self) -> Result<LogFormat, ConfigError> {
        match self.get("LOG_FORMAT") {
            Some(raw) => LogFormat::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                var: "LOG_FORMAT",
                value: raw.clone(),
                reason: "expected \"json\" or \"pretty\"".to_string(),
            }),
            None => Ok(LogFormat::Json),
        }
    }
}

fn bind_addr(host: &str, port: u16) -> Result<SocketAddr, ConfigError> {
    let raw = format!("{}:{}", host, port);
    raw.parse().map_err(|_| ConfigError::InvalidBindAddress(raw))
}
