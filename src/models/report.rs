//! Performance report models

use chrono::NaiveDate;

/// Order in which the drawdown scan walks a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawdownOrder {
    /// Scan the series as stored, most recent date first
    #[default]
    NewestFirst,
    /// Scan from the oldest date to the most recent
    Chronological,
}

/// Both performance statistics for one stock over one date range
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub simple_return: f64,
    pub max_drawdown: f64,
    pub observations: usize,
}
