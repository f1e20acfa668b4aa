//! Configuration and settings management
//!
//! Loads settings from config files and environment variables, and validates
//! the values the bot cannot start without.

use config::{Config, ConfigError, Environment, File};
use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upper bound for in-memory sessions.
pub const DEFAULT_SESSION_CAPACITY: u64 = 10_000;

/// Errors raised while loading or validating startup configuration
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Underlying config source failed to load or deserialize
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// A required value is absent or empty
    #[error("{0} is missing")]
    Missing(&'static str),
    /// Bot token does not look like `<id>:<secret>`
    #[error("BOT_TOKEN is malformed")]
    MalformedToken,
    /// Channel id is neither a `-100…` id nor an `@handle`
    #[error("CHANNEL_ID is malformed: {0}")]
    MalformedChannel(String),
}

/// Build the layered configuration shared by all settings structs.
///
/// Sources, lowest priority first: `config/default`, `config/$RUN_MODE`,
/// `config/local`, `APP__*` variables, then plain environment variables.
///
/// # Errors
///
/// Returns a `ConfigError` if a present source cannot be parsed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Not checked into git
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        // UPPER_SNAKE_CASE is mapped to snake_case, empty values count as unset
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

/// Settings of the submission flow itself
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FlowSettings {
    /// Maximum number of sessions kept in memory
    #[serde(default = "default_session_capacity")]
    pub session_capacity: u64,
    /// Seconds of inactivity after which a session is dropped, 0 keeps it
    /// until reset, submission or restart
    #[serde(default)]
    pub session_idle_timeout_secs: u64,
}

const fn default_session_capacity() -> u64 {
    DEFAULT_SESSION_CAPACITY
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            session_capacity: DEFAULT_SESSION_CAPACITY,
            session_idle_timeout_secs: 0,
        }
    }
}

impl FlowSettings {
    /// Load flow settings from environment and files.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Config` if loading or deserializing fails.
    pub fn new() -> Result<Self, SettingsError> {
        Self::from_config(build_config()?)
    }

    /// Deserialize flow settings from an already built configuration.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Config` if a value has the wrong type.
    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        Ok(config.try_deserialize()?)
    }
}

/// Destination channel for published submissions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelTarget {
    /// Numeric channel id, e.g. `-1001234567890`
    Id(i64),
    /// Public channel handle including the leading `@`
    Username(String),
}

impl ChannelTarget {
    /// Parse a `CHANNEL_ID` value.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Missing` for an empty value and
    /// `SettingsError::MalformedChannel` for anything that is neither a
    /// `-100` prefixed id nor a valid handle.
    pub fn parse(raw: &str) -> Result<Self, SettingsError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(SettingsError::Missing("CHANNEL_ID"));
        }

        if regex_is_match!(r"^-100[0-9]{5,}$", raw) {
            return raw
                .parse::<i64>()
                .map(Self::Id)
                .map_err(|_| SettingsError::MalformedChannel(raw.to_string()));
        }

        if regex_is_match!(r"^@[A-Za-z][A-Za-z0-9_]{4,31}$", raw) {
            return Ok(Self::Username(raw.to_string()));
        }

        Err(SettingsError::MalformedChannel(raw.to_string()))
    }
}

/// Check that a bot token is present and shaped like `123456:secret`.
///
/// # Errors
///
/// Returns `SettingsError::Missing` or `SettingsError::MalformedToken`.
pub fn validate_token(token: &str) -> Result<(), SettingsError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SettingsError::Missing("BOT_TOKEN"));
    }
    if regex_is_match!(r"^[0-9]{5,}:[A-Za-z0-9_-]{30,}$", token) {
        Ok(())
    } else {
        Err(SettingsError::MalformedToken)
    }
}
