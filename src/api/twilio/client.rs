use reqwest::Client as HttpClient;
use tracing::{debug, info};

use super::models::{Channel, CreateMessageRequest, MessageResponse};
use crate::api::error::handle_error_response;
use crate::api::ApiError;
use crate::config::TwilioConfig;
use crate::services::report_service::Notifier;

/// Twilio REST client for outbound SMS and WhatsApp messages
pub struct TwilioClient {
    http_client: HttpClient,
    account_sid: String,
    auth_token: String,
    base_url: String,
}

impl TwilioClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.twilio.com/2010-04-01";

    /// Create a new Twilio API client
    pub fn new(account_sid: String, auth_token: String) -> Self {
        Self::with_base_url(account_sid, auth_token, Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(account_sid: String, auth_token: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            account_sid,
            auth_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/Accounts/{}/Messages.json", self.base_url, self.account_sid)
    }

    /// POST /Accounts/{sid}/Messages.json
    ///
    /// `from` and `to` must already carry any channel prefix.
    pub async fn send_message(
        &self,
        from: &str,
        to: &str,
        body: &str,
    ) -> Result<MessageResponse, ApiError> {
        let form = CreateMessageRequest { from, to, body };

        let response = self
            .http_client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        response
            .json::<MessageResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

/// Delivers reports through Twilio using the configured phone numbers
pub struct TwilioNotifier {
    client: TwilioClient,
    config: TwilioConfig,
}

impl TwilioNotifier {
    pub fn new(config: TwilioConfig) -> Self {
        let client = TwilioClient::new(config.account_sid.clone(), config.auth_token.clone());
        Self { client, config }
    }

    fn sender(&self, channel: Channel) -> Result<&str, ApiError> {
        match channel {
            Channel::Sms => Ok(self.config.phone_from_number.as_str()),
            Channel::WhatsApp => self.config.whatsapp_from_number.as_deref().ok_or_else(|| {
                ApiError::RequestError("no WhatsApp sender number configured".to_string())
            }),
        }
    }
}

impl Notifier for TwilioNotifier {
    async fn notify(&self, channel: Channel, body: &str) -> Result<(), ApiError> {
        let from = channel.address(self.sender(channel)?);
        let to = channel.address(&self.config.phone_to_number);

        debug!("Sending {} message to {}", channel, to);
        let response = self.client.send_message(&from, &to, body).await?;
        info!("{} message {} accepted by Twilio", channel, response.sid);

        Ok(())
    }
}
