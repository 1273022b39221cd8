//! Data models for the performance report
//!
//! Price observations flow in from the data source, reports flow out to the
//! notification layer.

pub mod price;
pub mod report;

pub use price::{PriceObservation, PriceSeries};
pub use report::{DrawdownOrder, PerformanceReport};
