//! Statistical price aggregation
//!
//! Converts valid listings into a single trustworthy CAD market price:
//! currency normalization, IQR outlier rejection, then the median.

use crate::shared::types::Listing;

/// Aggregation result: the working median and the samples that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub median: f64,
    pub cleaned_samples: Vec<f64>,
}

/// Pure, deterministic price aggregator
pub struct PriceAggregator {
    usd_to_cad: f64,
}

impl PriceAggregator {
    pub fn new(usd_to_cad: f64) -> Self {
        Self { usd_to_cad }
    }

    /// Aggregate listing prices into a CAD median; never fails.
    ///
    /// If outlier rejection would empty a non-empty sample set, the
    /// pre-rejection samples are used instead.
    pub fn aggregate(&self, listings: &[Listing]) -> Aggregate {
        let samples: Vec<f64> = listings.iter().map(|l| self.to_cad(l)).collect();

        let cleaned = remove_outliers(&samples);
        let working = if cleaned.is_empty() && !samples.is_empty() {
            samples
        } else {
            cleaned
        };

        Aggregate {
            median: median(&working),
            cleaned_samples: working,
        }
    }

    /// Fixed-rate conversion; any non-USD price passes through unchanged
    fn to_cad(&self, listing: &Listing) -> f64 {
        if listing.currency == "USD" {
            listing.sold_price * self.usd_to_cad
        } else {
            listing.sold_price
        }
    }
}

/// Drop samples outside [Q1 - 1.5*IQR, Q3 + 1.5*IQR].
///
/// Fewer than 4 samples are returned unchanged: too few to characterize
/// a distribution. Quartiles are taken at floor(n*0.25) and floor(n*0.75)
/// of the sorted samples.
pub fn remove_outliers(prices: &[f64]) -> Vec<f64> {
    if prices.len() < 4 {
        return prices.to_vec();
    }

    let mut sorted = prices.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = sorted[(sorted.len() as f64 * 0.25).floor() as usize];
    let q3 = sorted[(sorted.len() as f64 * 0.75).floor() as usize];
    let iqr = q3 - q1;

    let low = q1 - 1.5 * iqr;
    let high = q3 + 1.5 * iqr;

    prices
        .iter()
        .copied()
        .filter(|p| *p >= low && *p <= high)
        .collect()
}

/// Median of a price sequence; empty input yields 0
pub fn median(prices: &[f64]) -> f64 {
    if prices.is_empty() {
        return 0.0;
    }

    let mut sorted = prices.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 != 0 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
