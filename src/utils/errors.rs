use thiserror::Error;

use crate::api::ApiError;

/// Errors raised by the price models and the performance calculators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    #[error("Malformed observation: {0}")]
    MalformedObservation(String),
    #[error("Cannot compute a percentage against a zero {0} price")]
    DivisionByZeroPrice(&'static str),
}

/// Errors surfaced while building and delivering a performance report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Price data unavailable: {0}")]
    DataUnavailable(ApiError),
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
    #[error("Failed to deliver {channel} notification: {source}")]
    Notification {
        channel: crate::api::twilio::Channel,
        source: ApiError,
    },
}
