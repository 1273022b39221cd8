use chrono::NaiveDate;
use reqwest::Client as HttpClient;
use tracing::debug;

use super::models::DatasetResponse;
use crate::api::error::handle_error_response;
use crate::api::ApiError;
use crate::models::price::DATE_FORMAT;
use crate::models::PriceSeries;
use crate::services::report_service::PriceSource;

/// Nasdaq Data Link client for daily stock prices
pub struct NasdaqClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl NasdaqClient {
    const DEFAULT_BASE_URL: &'static str = "https://data.nasdaq.com/api/v3";

    /// Column of the WIKI dataset holding the adjusted close price
    const ADJUSTED_CLOSE_COLUMN: u8 = 11;

    /// Create a new Nasdaq API client
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Dataset endpoint for a symbol, restricted to the adjusted close column
    pub fn build_endpoint(&self, symbol: &str) -> String {
        format!(
            "{}/datasets/WIKI/{}.json?column_index={}&api_key={}",
            self.base_url,
            symbol,
            Self::ADJUSTED_CLOSE_COLUMN,
            self.api_key
        )
    }

    /// GET /datasets/WIKI/{symbol}.json
    ///
    /// Retrieves the daily adjusted close prices between `start_date` and
    /// `end_date` (inclusive).
    ///
    /// # Returns
    /// * `Ok(PriceSeries)` - Prices ordered newest-first, empty when the range has no trading days
    /// * `Err(ApiError)` - Transport, HTTP status, or malformed body
    pub async fn get_daily_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        // The URL carries the API key; errors built from it must drop the URL.
        let url = format!(
            "{}&start_date={}&end_date={}",
            self.build_endpoint(symbol),
            start_date.format(DATE_FORMAT),
            end_date.format(DATE_FORMAT)
        );
        debug!(
            "Fetching daily prices for {} from {} to {}",
            symbol, start_date, end_date
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        let body = response
            .json::<DatasetResponse>()
            .await
            .map_err(|e| {
                ApiError::DeserializationError(format!("Failed to parse response: {}", e.without_url()))
            })?;

        let series = body.into_series()?;
        debug!("Received {} daily prices for {}", series.len(), symbol);
        Ok(series)
    }
}

impl PriceSource for NasdaqClient {
    async fn fetch(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, ApiError> {
        self.get_daily_prices(symbol, start_date, end_date).await
    }
}
