//! Marketplace access - the listing source collaborator

mod ebay_client;
mod traits;

pub use ebay_client::EbayBrowseClient;
pub use traits::{ListingSource, SearchQuery};
