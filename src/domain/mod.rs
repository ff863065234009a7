//! Domain layer - core valuation logic

pub mod catalog;
pub mod listing;
pub mod pricing;
