//! Listing-source seam
//!
//! The engine's only suspension point. A single search call must be
//! idempotent and free of side effects beyond the network request;
//! retries and timeouts are the caller's concern, not the engine's.

use crate::shared::errors::SourceError;
use crate::shared::types::Listing;
use async_trait::async_trait;

/// Keyword/reference query for comparable sales
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub brand: String,
    pub reference_number: String,
}

impl SearchQuery {
    pub fn keywords(&self) -> String {
        format!("{} {}", self.brand, self.reference_number)
    }
}

/// Supplier of raw listings for a query
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch raw listings; transport or auth failure is fatal to the
    /// current valuation attempt and surfaced unmodified.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Listing>, SourceError>;
}
