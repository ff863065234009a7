//! Infrastructure layer - external collaborators

pub mod marketplace;
pub mod notify;
