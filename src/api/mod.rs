//! HTTP collaborators: Nasdaq for prices, Twilio for delivery

pub mod error;
pub mod nasdaq;
pub mod twilio;

pub use error::ApiError;

#[cfg(test)]
pub(crate) mod test_server;
