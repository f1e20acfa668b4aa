//! Telegram transport settings.

use config::Config;
use serde::{Deserialize, Serialize};
use sino_core::config::{validate_token, ChannelTarget, FlowSettings, SettingsError};
use std::sync::Arc;

/// Telegram transport settings loaded from environment variables.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TelegramSettings {
    /// Telegram Bot API token.
    #[serde(default)]
    pub bot_token: String,
    /// Channel that receives published submissions, `-100…` or `@handle`.
    #[serde(default)]
    pub channel_id: String,
}

impl TelegramSettings {
    /// Create new settings by loading from environment and files.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Config` if loading or deserializing fails.
    pub fn new() -> Result<Self, SettingsError> {
        Self::from_config(sino_core::config::build_config()?)
    }

    /// Deserialize Telegram settings from an already built configuration.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Config` if a value has the wrong type.
    pub fn from_config(config: Config) -> Result<Self, SettingsError> {
        Ok(config.try_deserialize()?)
    }
}

/// Combined settings used by the Telegram transport layer.
#[derive(Clone, Debug)]
pub struct BotSettings {
    /// Submission flow settings.
    pub flow: Arc<FlowSettings>,
    /// Telegram-specific settings.
    pub telegram: Arc<TelegramSettings>,
    /// Parsed publish destination.
    pub channel: ChannelTarget,
}

impl BotSettings {
    /// Validate and combine the settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` when the token or channel id is missing or
    /// malformed.
    pub fn new(flow: FlowSettings, telegram: TelegramSettings) -> Result<Self, SettingsError> {
        validate_token(&telegram.bot_token)?;
        let channel = ChannelTarget::parse(&telegram.channel_id)?;
        Ok(Self {
            flow: Arc::new(flow),
            telegram: Arc::new(telegram),
            channel,
        })
    }
}

/// Attempts for a reply to the user before giving up.
pub const TELEGRAM_API_MAX_RETRIES: usize = 3;
/// First backoff delay between reply attempts.
pub const TELEGRAM_API_INITIAL_BACKOFF_MS: u64 = 500;
/// Upper bound of the backoff delay.
pub const TELEGRAM_API_MAX_BACKOFF_MS: u64 = 5000;

#[cfg(test)]
mod tests {
    use super::*;

    fn telegram(token: &str, channel: &str) -> TelegramSettings {
        TelegramSettings {
            bot_token: token.to_string(),
            channel_id: channel.to_string(),
        }
    }

    const TOKEN: &str = "123456789:AAHdqTcvCH1vGWJxfSeofSAs0K5PALDsawq";

    #[test]
    fn test_valid_settings() {
        let settings = BotSettings::new(FlowSettings::default(), telegram(TOKEN, "@tuyona_partners"))
            .expect("valid settings");
        assert_eq!(
            settings.channel,
            ChannelTarget::Username("@tuyona_partners".to_string())
        );
    }

    #[test]
    fn test_missing_values_fail_fast() {
        assert!(matches!(
            BotSettings::new(FlowSettings::default(), telegram("", "@tuyona_partners")),
            Err(SettingsError::Missing("BOT_TOKEN"))
        ));
        assert!(matches!(
            BotSettings::new(FlowSettings::default(), telegram(TOKEN, "")),
            Err(SettingsError::Missing("CHANNEL_ID"))
        ));
        assert!(matches!(
            BotSettings::new(FlowSettings::default(), telegram(TOKEN, "partners")),
            Err(SettingsError::MalformedChannel(_))
        ));
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config::builder()
            .set_override("bot_token", TOKEN)
            .expect("override")
            .set_override("channel_id", "-1001234567890")
            .expect("override")
            .build()
            .expect("config");
        let telegram = TelegramSettings::from_config(config).expect("settings");
        let settings = BotSettings::new(FlowSettings::default(), telegram).expect("valid");
        assert_eq!(settings.channel, ChannelTarget::Id(-1_001_234_567_890));
    }
}
