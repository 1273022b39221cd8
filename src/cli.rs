//! Command-line arguments

use chrono::NaiveDate;
use clap::Parser;

use crate::api::twilio::Channel;
use crate::models::price::DATE_FORMAT;
use crate::models::DrawdownOrder;
use crate::services::report_service::ReportRequest;

/// Report a stock's simple return and maximum drawdown over a date range
/// and send it by SMS and WhatsApp.
#[derive(Parser, Debug)]
#[command(name = "stock-report")]
#[command(author, version, about)]
#[command(after_help = "EXAMPLES:\n  \
    stock-report FB 2014-11-30 2014-12-31\n  \
    stock-report AAPL 2016-01-01 2016-12-31 --channel sms\n  \
    stock-report MSFT 2015-01-01 2015-06-30 --dry-run")]
pub struct Cli {
    /// Stock symbol, e.g. FB
    #[arg(value_name = "SYMBOL", value_parser = parse_symbol)]
    pub symbol: String,

    /// First day of the range (YYYY-MM-DD)
    #[arg(value_name = "START_DATE", value_parser = parse_date)]
    pub start_date: NaiveDate,

    /// Last day of the range (YYYY-MM-DD)
    #[arg(value_name = "END_DATE", value_parser = parse_date)]
    pub end_date: NaiveDate,

    /// Delivery channel; repeat for several (defaults to SMS and WhatsApp)
    #[arg(short, long = "channel", value_enum)]
    pub channels: Vec<Channel>,

    /// Scan the drawdown from the oldest price to the newest
    #[arg(long)]
    pub chronological_drawdown: bool,

    /// Log the report instead of sending it
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Channels to deliver on, empty for a dry run
    pub fn delivery_channels(&self) -> Vec<Channel> {
        if self.dry_run {
            return Vec::new();
        }

        if self.channels.is_empty() {
            return vec![Channel::Sms, Channel::WhatsApp];
        }

        let mut channels = Vec::with_capacity(self.channels.len());
        for &channel in &self.channels {
            if !channels.contains(&channel) {
                channels.push(channel);
            }
        }
        channels
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.start_date > self.end_date {
            return Err(format!(
                "START_DATE {} is after END_DATE {}",
                self.start_date, self.end_date
            ));
        }
        Ok(())
    }

    pub fn report_request(&self) -> ReportRequest {
        ReportRequest {
            symbol: self.symbol.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            drawdown_order: if self.chronological_drawdown {
                DrawdownOrder::Chronological
            } else {
                DrawdownOrder::NewestFirst
            },
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}': {}", s, e))
}

fn parse_symbol(s: &str) -> Result<String, String> {
    let symbol = s.trim().to_uppercase();

    if symbol.is_empty() {
        return Err("symbol cannot be empty".to_string());
    }

    if !symbol
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
    {
        return Err(format!("invalid symbol '{}'", s));
    }

    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("stock-report").chain(args.iter().copied()))
    }

    #[test]
    fn test_positional_arguments() {
        let cli = parse(&["fb", "2014-11-30", "2014-12-31"]).unwrap();
        assert_eq!(cli.symbol, "FB");
        assert_eq!(cli.start_date, NaiveDate::from_ymd_opt(2014, 11, 30).unwrap());
        assert_eq!(cli.end_date, NaiveDate::from_ymd_opt(2014, 12, 31).unwrap());
        assert!(cli.validate().is_ok());
        assert_eq!(cli.delivery_channels(), vec![Channel::Sms, Channel::WhatsApp]);
        assert_eq!(cli.report_request().drawdown_order, DrawdownOrder::NewestFirst);
    }

    #[test]
    fn test_rejects_bad_dates_and_symbols() {
        assert!(parse(&["FB", "2014-11-31", "2014-12-31"]).is_err());
        assert!(parse(&["FB", "30/11/2014", "2014-12-31"]).is_err());
        assert!(parse(&["F B", "2014-11-30", "2014-12-31"]).is_err());
        assert!(parse(&["FB", "2014-11-30"]).is_err());
    }

    #[test]
    fn test_reversed_range_fails_validation() {
        let cli = parse(&["FB", "2021-01-02", "2021-01-01"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_channel_selection() {
        let cli = parse(&[
            "FB", "2021-01-01", "2021-01-02", "-c", "whatsapp", "--channel", "whatsapp",
        ])
        .unwrap();
        assert_eq!(cli.delivery_channels(), vec![Channel::WhatsApp]);

        let dry = parse(&["FB", "2021-01-01", "2021-01-02", "--dry-run"]).unwrap();
        assert!(dry.delivery_channels().is_empty());
    }

    #[test]
    fn test_chronological_flag() {
        let cli = parse(&["FB", "2021-01-01", "2021-01-02", "--chronological-drawdown"]).unwrap();
        assert_eq!(
            cli.report_request().drawdown_order,
            DrawdownOrder::Chronological
        );
    }
}
