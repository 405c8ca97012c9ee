//! Runtime configuration read from the environment.
//!
//! Nothing is persisted. Each run reads these once and threads the
//! resulting value through the pipeline:
//!   ACTIVESHOT_SCREENCAPTURE     path of the capture executable
//!   ACTIVESHOT_CAPTURE_TIMEOUT   seconds to wait for it (unset = forever)
//! Log verbosity follows `RUST_LOG` (see `env_logger`).

use std::path::PathBuf;
use std::time::Duration;

pub const CAPTURE_PROGRAM_ENV: &str = "ACTIVESHOT_SCREENCAPTURE";
pub const CAPTURE_TIMEOUT_ENV: &str = "ACTIVESHOT_CAPTURE_TIMEOUT";

const CAPTURE_PROGRAM_NAME: &str = "screencapture";
const CAPTURE_PROGRAM_FALLBACK: &str = "/usr/sbin/screencapture";

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub capture_program: PathBuf,
    pub capture_timeout: Option<Duration>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("ACTIVESHOT_CAPTURE_TIMEOUT must be a positive number of seconds, got '{0}'")]
    InvalidTimeout(String),
}

impl RuntimeConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let capture_program = match non_empty(lookup(CAPTURE_PROGRAM_ENV)) {
            Some(path) => PathBuf::from(path),
            None => which::which(CAPTURE_PROGRAM_NAME)
                .unwrap_or_else(|_| PathBuf::from(CAPTURE_PROGRAM_FALLBACK)),
        };

        let capture_timeout = match non_empty(lookup(CAPTURE_TIMEOUT_ENV)) {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        log::debug!(
            "[CONFIG] capture program {}, timeout {:?}",
            capture_program.display(),
            capture_timeout
        );

        Ok(Self {
            capture_program,
            capture_timeout,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let secs: f64 = raw
        .parse()
        .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigError::InvalidTimeout(raw.to_string()));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))
}
