pub mod client;
pub mod models;

pub use client::TwilioNotifier;
pub use models::Channel;
