//! Listing domain - validity screening of raw marketplace listings

mod listing_filter;

pub use listing_filter::ListingFilter;
