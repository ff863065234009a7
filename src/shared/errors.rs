//! Error handling for the application

use thiserror::Error;

/// Listing-source errors (marketplace transport and auth)
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Marketplace authentication failed: {0}")]
    AuthFailed(String),

    #[error("Marketplace request failed: {0}")]
    RequestFailed(String),

    #[error("Marketplace unavailable: {0}")]
    Unavailable(String),
}

/// Notification errors (post-offer side effects, never fatal)
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification failed: {0}")]
    Failed(String),
}

/// Valuation errors surfaced to the caller
#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid quote request: {0}")]
    InvalidRequest(String),

    #[error("Listing source error: {0}")]
    Source(#[from] SourceError),
}
