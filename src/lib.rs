//! Watchvalue - market valuation engine for luxury watch buyback offers
//! Built with Domain-Driven Design principles

pub mod domain;
pub mod infrastructure;
pub mod application;
pub mod shared;

// Re-export main types for convenience
pub use application::ValuationService;
pub use domain::listing::ListingFilter;
pub use domain::pricing::{
    PriceAggregator, PricingBreakdown, PricingEngine, PricingInput, Quote, QuoteDecision,
    ReferencePriceValidator,
};
pub use infrastructure::marketplace::{EbayBrowseClient, ListingSource, SearchQuery};
pub use shared::config::{ConfigLoader, EngineConfig};
pub use shared::types::{Condition, Listing, QuoteRequest};
