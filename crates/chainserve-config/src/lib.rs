//! Server configuration for chainserve.
//!
//! Values come from the process environment. The binary loads a `.env` file
//! with `dotenvy` before calling [`ServerConfig::from_env`], so both sources
//! work the same way.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8000` |
//! | `OLLAMA_HOST` | `http://localhost:11434` (`host[:port]` without a scheme means `http://`, port 11434) |
//! | `MODEL_ID` | `EEVE-Korean-10.8B:latest` |
//! | `OLLAMA_TIMEOUT_SECS` | unset (no timeout) |
//! | `TRACE_BASE_URL` | unset (trace links disabled) |
//! | `SKIP_MODEL_CHECK` | `false` |
//!
//! # Example
//!
//! ```rust
//! use chainserve_config::ServerConfig;
//!
//! let config = ServerConfig::from_lookup(|key| match key {
//!     "PORT" => Some("9000".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.addr(), "0.0.0.0:9000");
//! assert_eq!(config.model.model, "EEVE-Korean-10.8B:latest");
//! ```

use std::str::FromStr;
use std::time::Duration;

use chainserve_core::ModelConfig;
use reqwest::Url;
use tracing::debug;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_PORT: u16 = 11434;
pub const DEFAULT_MODEL_ID: &str = "EEVE-Korean-10.8B:latest";

/// Errors that can occur when loading the configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// The model identifier is empty.
    #[error("Model identifier must not be empty")]
    EmptyModel,

    /// The model server does not serve the configured model.
    #[error("Model '{model}' is not available at {api_base}: {reason}")]
    ModelUnresolvable {
        model: String,
        api_base: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::InvalidValue {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Complete runtime configuration for the server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Chat model behind every pipeline.
    pub model: ModelConfig,
    /// Per-request timeout for model calls. `None` leaves calls unbounded.
    pub model_timeout: Option<Duration>,
    /// Base URL used to build public trace links.
    pub trace_base_url: Option<String>,
    /// Skip the startup check that the model is served.
    pub skip_model_check: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model: ModelConfig {
                model: DEFAULT_MODEL_ID.to_string(),
                api_base: DEFAULT_OLLAMA_HOST.to_string(),
            },
            model_timeout: None,
            trace_base_url: None,
            skip_model_check: false,
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(v) => parse(&v, "PORT")?,
            None => defaults.port,
        };

        let model = match lookup("MODEL_ID") {
            Some(v) if v.trim().is_empty() => return Err(ConfigError::EmptyModel),
            Some(v) => v.trim().to_string(),
            None => defaults.model.model,
        };

        let model_timeout = get("OLLAMA_TIMEOUT_SECS")
            .map(|v| parse::<u64>(&v, "OLLAMA_TIMEOUT_SECS"))
            .transpose()?
            .map(Duration::from_secs);

        let api_base = match get("OLLAMA_HOST") {
            Some(v) => parse_ollama_host(&v)?,
            None => defaults.model.api_base,
        };

        let skip_model_check = match get("SKIP_MODEL_CHECK") {
            Some(v) => parse_bool(&v, "SKIP_MODEL_CHECK")?,
            None => false,
        };

        let config = Self {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            model: ModelConfig { model, api_base },
            model_timeout,
            trace_base_url: get("TRACE_BASE_URL").map(|u| u.trim_end_matches('/').to_string()),
            skip_model_check,
        };

        debug!(?config, "Loaded server config");
        Ok(config)
    }

    /// Socket address string to bind, e.g. `0.0.0.0:8000`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T>(value: &str, key: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| ConfigError::invalid(key, value, e))
}

/// Reads `OLLAMA_HOST` the way the Ollama CLI does: a bare `host` or
/// `host:port` means plain HTTP, on port 11434 unless one is given.
fn parse_ollama_host(value: &str) -> Result<String, ConfigError> {
    const KEY: &str = "OLLAMA_HOST";

    let has_scheme = value.contains("://");
    let candidate = match has_scheme {
        true => value.to_string(),
        false => format!("http://{value}"),
    };

    let mut url = Url::parse(&candidate).map_err(|e| ConfigError::invalid(KEY, value, e))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(KEY, value, "scheme must be http or https"));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::invalid(KEY, value, "missing host"));
    }
    if !has_scheme && url.port().is_none() {
        url.set_port(Some(DEFAULT_OLLAMA_PORT))
            .map_err(|_| ConfigError::invalid(KEY, value, "cannot set port"))?;
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

fn parse_bool(value: &str, key: &'static str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(key, value, "expected a boolean")),
    }
}
