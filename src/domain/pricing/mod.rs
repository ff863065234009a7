//! Pricing domain - aggregation, cross-validation and the offer calculator

mod price_aggregator;
mod pricing_engine;
mod reference_validator;

pub use price_aggregator::{median, remove_outliers, Aggregate, PriceAggregator};
pub use pricing_engine::{PricingBreakdown, PricingEngine, PricingInput};
pub use reference_validator::{ReferencePriceValidator, Validation};

use crate::shared::types::Condition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quote lifecycle status; the engine only ever issues Active quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    Active,
    Expired,
    Accepted,
    Declined,
}

/// An issued purchase offer. Immutable once produced; it carries its
/// validity window but expiry enforcement is a caller concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub reference_number: String,
    pub condition: Condition,
    pub base_market_price: f64,
    pub breakdown: PricingBreakdown,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

/// Outcome of one valuation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum QuoteDecision {
    /// Too few comparable sales to price with confidence
    InsufficientData { valid_listing_count: usize },
    /// A priced, time-limited purchase offer
    Offer(Box<Quote>),
}
