use crate::models::PriceSeries;

/// Single-pass peak-to-trough scanner.
///
/// The running peak starts at `0`, so the first positive price always becomes
/// the first peak. Only a strictly larger drop replaces the recorded one, which
/// keeps the earliest scanned trough on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawdownScan {
    running_peak: f64,
    max_drop: f64,
    peak_at_max_drop: f64,
    trough_at_max_drop: Option<f64>,
}

impl DrawdownScan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, price: f64) {
        if self.trough_at_max_drop.is_none() {
            self.trough_at_max_drop = Some(price);
        }

        if price > self.running_peak {
            self.running_peak = price;
        } else if self.running_peak - price > self.max_drop {
            self.max_drop = self.running_peak - price;
            self.peak_at_max_drop = self.running_peak;
            self.trough_at_max_drop = Some(price);
        }
    }

    /// Worst decline seen so far as a non-positive percentage of its peak.
    ///
    /// A recorded drop is measured against the peak in effect when it was
    /// recorded, which is strictly above a non-negative trough. Without a
    /// recorded drop the trough is still the first scanned price: a first
    /// price of `0` under a later positive peak is a fall to zero and yields
    /// `-100`, anything else yields `0`.
    pub fn percentage(&self) -> f64 {
        match self.trough_at_max_drop {
            Some(trough) if self.max_drop > 0.0 => {
                ((trough - self.peak_at_max_drop) / self.peak_at_max_drop) * 100.0
            }
            Some(trough) if trough == 0.0 && self.running_peak > 0.0 => -100.0,
            _ => 0.0,
        }
    }
}

impl Extend<f64> for DrawdownScan {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, prices: I) {
        for price in prices {
            self.push(price);
        }
    }
}

/// Maximum drawdown scanning the series as stored (newest-first).
pub fn maximum_drawdown_percentage(series: &PriceSeries) -> f64 {
    let mut scan = DrawdownScan::new();
    scan.extend(series.prices_newest_first());
    scan.percentage()
}

/// Maximum drawdown scanning from the oldest observation to the newest.
pub fn chronological_maximum_drawdown_percentage(series: &PriceSeries) -> f64 {
    let mut scan = DrawdownScan::new();
    scan.extend(series.prices_chronological());
    scan.percentage()
}
