use serde::{Deserialize, Serialize};

use crate::api::ApiError;
use crate::models::{PriceObservation, PriceSeries};

/// One `[date, adjusted close]` row. The price is null on days the column has no value.
pub type DailyPriceRow = (String, Option<f64>);

/// Response body of `GET /datasets/WIKI/{symbol}.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetResponse {
    pub dataset: Option<Dataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub dataset_code: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<DailyPriceRow>>,
}

impl DatasetResponse {
    /// Validate every row and build a newest-first series.
    ///
    /// A response without a dataset or without rows is an empty range, not an error.
    pub fn into_series(self) -> Result<PriceSeries, ApiError> {
        let rows = self.dataset.and_then(|d| d.data).unwrap_or_default();

        rows.into_iter()
            .map(|(date, price)| {
                let price = price.ok_or_else(|| {
                    ApiError::MalformedData(format!("missing price for {}", date))
                })?;
                PriceObservation::new(&date, price)
                    .map_err(|e| ApiError::MalformedData(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PriceSeries::new)
    }
}
