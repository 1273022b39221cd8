use chrono::NaiveDate;
use tracing::{debug, info};

use crate::api::twilio::Channel;
use crate::api::ApiError;
use crate::models::{DrawdownOrder, PerformanceReport, PriceSeries};
use crate::services::{drawdown_service, return_service};
use crate::utils::errors::ReportError;

/// Supplies daily prices for a symbol over an inclusive date range
#[allow(async_fn_in_trait)]
pub trait PriceSource {
    async fn fetch(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, ApiError>;
}

/// Delivers a pre-formatted text message over a channel
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn notify(&self, channel: Channel, body: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub drawdown_order: DrawdownOrder,
}

/// Fetch the series once and run both calculators over it
pub async fn build_report<S: PriceSource>(
    source: &S,
    request: &ReportRequest,
) -> Result<PerformanceReport, ReportError> {
    let series = source
        .fetch(&request.symbol, request.start_date, request.end_date)
        .await
        .map_err(ReportError::DataUnavailable)?;

    match (series.oldest(), series.newest()) {
        (Some(oldest), Some(newest)) => debug!(
            "{}: prices from {} to {}",
            request.symbol,
            oldest.date(),
            newest.date()
        ),
        _ => info!(
            "No trading data for {} between {} and {}",
            request.symbol, request.start_date, request.end_date
        ),
    }

    let simple_return = return_service::simple_return_percentage(&series)?;
    let max_drawdown = match request.drawdown_order {
        DrawdownOrder::NewestFirst => drawdown_service::maximum_drawdown_percentage(&series),
        DrawdownOrder::Chronological => {
            drawdown_service::chronological_maximum_drawdown_percentage(&series)
        }
    };
    debug!(
        "{}: {} observations, return {}%, drawdown {}%",
        request.symbol,
        series.len(),
        simple_return,
        max_drawdown
    );

    Ok(PerformanceReport {
        symbol: request.symbol.clone(),
        start_date: request.start_date,
        end_date: request.end_date,
        simple_return,
        max_drawdown,
        observations: series.len(),
    })
}

/// Human-readable notification text, percentages rounded to two decimals
pub fn format_message(report: &PerformanceReport) -> String {
    format!(
        "The stock return percentage for {} between {} and {} is {:.2}%. \n\
         The maximum drawdown is {:.2}%.",
        report.symbol,
        report.start_date,
        report.end_date,
        report.simple_return,
        report.max_drawdown
    )
}

/// Send the message on each channel in order, stopping at the first failure
pub async fn dispatch<N: Notifier>(
    notifier: &N,
    channels: &[Channel],
    message: &str,
) -> Result<(), ReportError> {
    for &channel in channels {
        notifier
            .notify(channel, message)
            .await
            .map_err(|source| ReportError::Notification { channel, source })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceObservation;
    use crate::utils::errors::AnalyticsError;
    use std::sync::Mutex;

    struct FakeSource {
        result: Result<PriceSeries, ApiError>,
        calls: Mutex<Vec<(String, NaiveDate, NaiveDate)>>,
    }

    impl FakeSource {
        fn new(result: Result<PriceSeries, ApiError>) -> Self {
            Self {
                result,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl PriceSource for FakeSource {
        async fn fetch(
            &self,
            symbol: &str,
            start_date: NaiveDate,
            end_date: NaiveDate,
        ) -> Result<PriceSeries, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push((symbol.to_string(), start_date, end_date));
            self.result.clone()
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        fail_on: Option<Channel>,
        sent: Mutex<Vec<(Channel, String)>>,
    }

    impl Notifier for RecordingNotifier {
        async fn notify(&self, channel: Channel, body: &str) -> Result<(), ApiError> {
            if self.fail_on == Some(channel) {
                return Err(ApiError::ServerError(500, "unavailable".to_string()));
            }
            self.sent.lock().unwrap().push((channel, body.to_string()));
            Ok(())
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn request(order: DrawdownOrder) -> ReportRequest {
        ReportRequest {
            symbol: "FB".to_string(),
            start_date: date("2021-01-01"),
            end_date: date("2021-01-08"),
            drawdown_order: order,
        }
    }

    fn series(points: &[(&str, f64)]) -> PriceSeries {
        points
            .iter()
            .map(|(d, p)| PriceObservation::new(d, *p).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_empty_series_reports_zeroes() {
        let source = FakeSource::new(Ok(PriceSeries::empty()));
        let report = build_report(&source, &request(DrawdownOrder::NewestFirst))
            .await
            .unwrap();

        assert_eq!(report.simple_return, 0.0);
        assert_eq!(report.max_drawdown, 0.0);
        assert_eq!(report.observations, 0);
        assert_eq!(
            *source.calls.lock().unwrap(),
            vec![("FB".to_string(), date("2021-01-01"), date("2021-01-08"))]
        );
    }

    #[tokio::test]
    async fn test_both_statistics_from_one_fetch() {
        let source = FakeSource::new(Ok(series(&[
            ("2021-01-06", 5.0),
            ("2021-01-05", 4.0),
            ("2021-01-04", 3.0),
            ("2021-01-03", 2.0),
            ("2021-01-02", 1.0),
        ])));

        let newest_first = build_report(&source, &request(DrawdownOrder::NewestFirst))
            .await
            .unwrap();
        assert_eq!(newest_first.simple_return, 400.0);
        assert!((newest_first.max_drawdown + 80.0).abs() < 1e-9);
        assert_eq!(newest_first.observations, 5);

        let chronological = build_report(&source, &request(DrawdownOrder::Chronological))
            .await
            .unwrap();
        assert_eq!(chronological.max_drawdown, 0.0);

        assert_eq!(source.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_data_source_failure_is_data_unavailable() {
        let source = FakeSource::new(Err(ApiError::NotFound("no such dataset".to_string())));
        let result = build_report(&source, &request(DrawdownOrder::NewestFirst)).await;
        assert!(matches!(
            result,
            Err(ReportError::DataUnavailable(ApiError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_zero_oldest_price_propagates() {
        let source = FakeSource::new(Ok(series(&[("2021-01-02", 4.0), ("2021-01-01", 0.0)])));
        let result = build_report(&source, &request(DrawdownOrder::NewestFirst)).await;
        assert!(matches!(
            result,
            Err(ReportError::Analytics(AnalyticsError::DivisionByZeroPrice(_)))
        ));
    }

    #[test]
    fn test_format_message_rounds_to_two_decimals() {
        let report = PerformanceReport {
            symbol: "FB".to_string(),
            start_date: date("2021-01-01"),
            end_date: date("2021-01-08"),
            simple_return: 12.3456,
            max_drawdown: -91.66666666666666,
            observations: 7,
        };

        assert_eq!(
            format_message(&report),
            "The stock return percentage for FB between 2021-01-01 and 2021-01-08 is 12.35%. \n\
             The maximum drawdown is -91.67%."
        );
    }

    #[tokio::test]
    async fn test_dispatch_sends_to_every_channel_in_order() {
        let notifier = RecordingNotifier::default();
        dispatch(&notifier, &[Channel::Sms, Channel::WhatsApp], "hello")
            .await
            .unwrap();

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(
            *sent,
            vec![
                (Channel::Sms, "hello".to_string()),
                (Channel::WhatsApp, "hello".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_dispatch_stops_at_first_failure() {
        let notifier = RecordingNotifier {
            fail_on: Some(Channel::Sms),
            ..Default::default()
        };
        let result = dispatch(&notifier, &[Channel::Sms, Channel::WhatsApp], "hello").await;

        assert!(matches!(
            result,
            Err(ReportError::Notification {
                channel: Channel::Sms,
                ..
            })
        ));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }
}
