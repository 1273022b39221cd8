//! Startup configuration
//!
//! Credentials and phone numbers are read once at startup and handed to the
//! clients explicitly. A missing required key aborts startup.

use thiserror::Error;

use crate::api::twilio::Channel;

pub const NASDAQ_API_KEY: &str = "NASDAQ_API_KEY";
pub const TWILIO_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
pub const TWILIO_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
pub const PHONE_FROM_NUMBER: &str = "PHONE_FROM_NUMBER";
pub const PHONE_TO_NUMBER: &str = "PHONE_TO_NUMBER";
pub const WHATSAPP_FROM_NUMBER: &str = "WHATSAPP_FROM_NUMBER";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} missing")]
    Missing(&'static str),
}

/// Twilio credentials plus the sender and recipient numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub phone_from_number: String,
    pub phone_to_number: String,
    pub whatsapp_from_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub nasdaq_api_key: String,
    /// Absent when nothing will be delivered (dry run or no channels)
    pub twilio: Option<TwilioConfig>,
}

impl Config {
    /// Read the configuration from the process environment.
    ///
    /// `channels` decides which delivery keys are required; pass an empty
    /// slice to skip Twilio entirely.
    pub fn from_env(channels: &[Channel]) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), channels)
    }

    pub fn from_lookup<F>(lookup: F, channels: &[Channel]) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let nasdaq_api_key = required(NASDAQ_API_KEY)?;

        let twilio = if channels.is_empty() {
            None
        } else {
            let whatsapp_from_number = if channels.contains(&Channel::WhatsApp) {
                Some(required(WHATSAPP_FROM_NUMBER)?)
            } else {
                None
            };

            Some(TwilioConfig {
                account_sid: required(TWILIO_ACCOUNT_SID)?,
                auth_token: required(TWILIO_AUTH_TOKEN)?,
                phone_from_number: required(PHONE_FROM_NUMBER)?,
                phone_to_number: required(PHONE_TO_NUMBER)?,
                whatsapp_from_number,
            })
        };

        Ok(Self {
            nasdaq_api_key,
            twilio,
        })
    }
}
