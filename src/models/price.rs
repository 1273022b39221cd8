//! Daily price observations for a single stock

use chrono::NaiveDate;

use crate::utils::errors::AnalyticsError;

/// Date format used by the data source and the CLI
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single (date, price) point. Validated on construction, immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceObservation {
    date: NaiveDate,
    price: f64,
}

impl PriceObservation {
    /// Parse an ISO 8601 date (`YYYY-MM-DD`) and pair it with a price.
    ///
    /// Rejects unparsable dates and prices that are negative, NaN or infinite.
    pub fn new(date: &str, price: f64) -> Result<Self, AnalyticsError> {
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|e| {
            AnalyticsError::MalformedObservation(format!("invalid date '{}': {}", date, e))
        })?;
        Self::from_parts(date, price)
    }

    pub fn from_parts(date: NaiveDate, price: f64) -> Result<Self, AnalyticsError> {
        if !price.is_finite() || price < 0.0 {
            return Err(AnalyticsError::MalformedObservation(format!(
                "invalid price {} on {}",
                price, date
            )));
        }

        Ok(Self { date, price })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Observations for one stock over a requested range, always ordered newest-first.
///
/// Index 0 is the most recent date and the last index the oldest. The
/// constructor sorts, so every `PriceSeries` upholds the ordering regardless of
/// what the data source returned. Observations sharing a date keep their input
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    observations: Vec<PriceObservation>,
}

impl PriceSeries {
    pub fn new(mut observations: Vec<PriceObservation>) -> Self {
        observations.sort_by(|a, b| b.date.cmp(&a.date));
        Self { observations }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Most recent observation
    pub fn newest(&self) -> Option<&PriceObservation> {
        self.observations.first()
    }

    /// Earliest observation in the range
    pub fn oldest(&self) -> Option<&PriceObservation> {
        self.observations.last()
    }

    pub fn prices_newest_first(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(PriceObservation::price)
    }

    pub fn prices_chronological(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().rev().map(PriceObservation::price)
    }
}

impl FromIterator<PriceObservation> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PriceObservation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
