use crate::models::PriceSeries;
use crate::utils::errors::AnalyticsError;

/// Percentage change from the oldest to the newest observation.
///
/// An empty series has no change and yields `0`. A zero oldest price is
/// rejected with `DivisionByZeroPrice` instead of producing an infinity.
pub fn simple_return_percentage(series: &PriceSeries) -> Result<f64, AnalyticsError> {
    let (newest, oldest) = match (series.newest(), series.oldest()) {
        (Some(newest), Some(oldest)) => (newest.price(), oldest.price()),
        _ => return Ok(0.0),
    };

    if oldest == 0.0 {
        return Err(AnalyticsError::DivisionByZeroPrice("oldest"));
    }

    Ok(((newest - oldest) / oldest) * 100.0)
}
