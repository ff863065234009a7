//! Common types used across the valuation pipeline

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw marketplace listing, untrusted until it passes the listing filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub item_id: String,
    pub title: String,
    pub sold_price: f64,
    pub currency: String,
    pub listing_url: String,
    pub shipping_cost: Option<f64>,
}

impl Listing {
    pub fn new(item_id: &str, title: &str, sold_price: f64, currency: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            title: title.to_string(),
            sold_price,
            currency: currency.to_string(),
            listing_url: String::new(),
            shipping_cost: None,
        }
    }
}

/// Condition grades accepted on the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    NewUnworn,
    Excellent,
    VeryGood,
    Good,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::NewUnworn => "NEW_UNWORN",
            Condition::Excellent => "EXCELLENT",
            Condition::VeryGood => "VERY_GOOD",
            Condition::Good => "GOOD",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "NEW_UNWORN" => Ok(Condition::NewUnworn),
            "EXCELLENT" => Ok(Condition::Excellent),
            "VERY_GOOD" => Ok(Condition::VeryGood),
            "GOOD" => Ok(Condition::Good),
            other => Err(format!(
                "Unknown condition '{}' (expected NEW_UNWORN, EXCELLENT, VERY_GOOD or GOOD)",
                other
            )),
        }
    }
}

/// Incoming valuation request, validated by the application layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub brand: String,
    pub reference_number: String,
    pub condition: Condition,
    pub has_box: bool,
    pub has_papers: bool,
    #[serde(default = "default_true")]
    pub has_original_bracelet: bool,
    pub year_of_manufacture: i32,
    #[serde(default)]
    pub dial_type: Option<String>,
    #[serde(default)]
    pub bezel_type: Option<String>,
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_round_trip() {
        for (text, expected) in [
            ("NEW_UNWORN", Condition::NewUnworn),
            ("excellent", Condition::Excellent),
            ("very-good", Condition::VeryGood),
            ("GOOD", Condition::Good),
        ] {
            assert_eq!(text.parse::<Condition>().unwrap(), expected);
        }
        assert!("MINT".parse::<Condition>().is_err());
    }

    #[test]
    fn test_quote_request_defaults() {
        let request: QuoteRequest = serde_json::from_str(
            r#"{
                "brand": "Rolex",
                "reference_number": "126610LN",
                "condition": "EXCELLENT",
                "has_box": true,
                "has_papers": false,
                "year_of_manufacture": 2022
            }"#,
        )
        .unwrap();

        assert!(request.has_original_bracelet);
        assert!(request.dial_type.is_none());
    }
}
