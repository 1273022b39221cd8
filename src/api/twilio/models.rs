use serde::{Deserialize, Serialize};

/// Delivery channel for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Channel {
    Sms,
    #[value(name = "whatsapp")]
    WhatsApp,
}

impl Channel {
    /// Address in the form Twilio expects for this channel
    pub fn address(&self, number: &str) -> String {
        match self {
            Channel::Sms => number.to_string(),
            Channel::WhatsApp => format!("whatsapp:{}", number),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Sms => write!(f, "SMS"),
            Channel::WhatsApp => write!(f, "WhatsApp"),
        }
    }
}

/// Form body for POST /Accounts/{sid}/Messages.json
#[derive(Debug, Clone, Serialize)]
pub struct CreateMessageRequest<'a> {
    #[serde(rename = "From")]
    pub from: &'a str,
    #[serde(rename = "To")]
    pub to: &'a str,
    #[serde(rename = "Body")]
    pub body: &'a str,
}

/// Subset of the message resource returned after creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub sid: String,
    pub status: Option<String>,
    pub to: Option<String>,
}
