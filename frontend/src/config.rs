//! Console configuration loaded via OrthoConfig.
//!
//! Values come from `--flags`, `USERS_CONSOLE_*` environment variables, and
//! configuration files, merged by `ortho_config`. Every field is optional;
//! accessors apply defaults and validate.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::LoadOrdering;

const DEFAULT_BASE_URL: &str = "https://reqres.in/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const TOKEN_DIR: &str = "users-console";
const TOKEN_FILE: &str = "token";
const FALLBACK_TOKEN_PATH: &str = ".users-console-token";

/// Errors raised when settings hold unusable values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `base_url` is not an absolute URL.
    #[error("invalid base URL '{value}': {message}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// `request_timeout_secs` is zero.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Settings for the users console.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS_CONSOLE")]
pub struct ConsoleSettings {
    /// Root of the users REST service.
    pub base_url: Option<String>,
    /// Location of the stored access token.
    pub token_path: Option<PathBuf>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// API key sent as `x-api-key`, for services that require one.
    pub api_key: Option<String>,
    /// Use the in-memory directory and skip the token check.
    #[ortho_config(default = false)]
    pub offline: bool,
    /// Apply every page response as it arrives instead of only the latest
    /// request's.
    #[ortho_config(default = false)]
    pub last_response_wins: bool,
}

impl ConsoleSettings {
    /// Return the service root, falling back to the public demo service.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the value does not
    /// parse as an absolute URL.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).map_err(|error| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            message: error.to_string(),
        })
    }

    /// Return the token location, falling back to
    /// `$HOME/.config/users-console/token`, or a file in the working
    /// directory when `HOME` is unset.
    pub fn token_path(&self) -> PathBuf {
        self.token_path.clone().unwrap_or_else(default_token_path)
    }

    /// Return the per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroTimeout`] for a zero value.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => Err(SettingsError::ZeroTimeout),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Reconciliation policy for overlapping page loads.
    pub const fn load_ordering(&self) -> LoadOrdering {
        if self.last_response_wins {
            LoadOrdering::LatestResponse
        } else {
            LoadOrdering::LatestRequest
        }
    }
}

fn default_token_path() -> PathBuf {
    env::var_os("HOME").map_or_else(
        || PathBuf::from(FALLBACK_TOKEN_PATH),
        |home| {
            PathBuf::from(home)
                .join(".config")
                .join(TOKEN_DIR)
                .join(TOKEN_FILE)
        },
    )
}
