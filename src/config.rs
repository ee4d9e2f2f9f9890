use anyhow::{bail, Context, Result};

/// Default connect timeout in seconds
const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Default total request timeout in seconds, applied to every call
/// including the refresh call
const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Client configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Origin of the backend, e.g. `https://localhost:3001`
    pub api_root: String,

    /// HTTP connect timeout in seconds
    pub connect_timeout: u64,

    /// HTTP request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Configuration with default timeouts
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            api_root: api_root.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Load configuration from the environment with priority: ENV > defaults
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let api_root = std::env::var("API_ROOT").context("API_ROOT must be set")?;
        let connect_timeout = read_env_u64("HTTP_CONNECT_TIMEOUT", DEFAULT_CONNECT_TIMEOUT)?;
        let request_timeout = read_env_u64("HTTP_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT)?;

        let config = Self {
            api_root,
            connect_timeout,
            request_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api_root.trim().is_empty() {
            bail!("API root must not be empty");
        }
        if self.connect_timeout == 0 || self.request_timeout == 0 {
            bail!("HTTP timeouts must be greater than zero");
        }
        Ok(())
    }
}

fn read_env_u64(name: &str, default: u64) -> Result<u64> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{name} must be an integer number of seconds")),
        Err(_) => Ok(default),
    }
}
