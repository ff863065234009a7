//! Post-offer notification seam
//!
//! Side effects that run strictly after a successful offer. Their failure
//! must never invalidate an already-computed quote: the application layer
//! logs and swallows notification errors.

use crate::domain::pricing::Quote;
use crate::shared::errors::NotifyError;
use async_trait::async_trait;
use tracing::info;

/// Recipient of quote-created events (email, audit history, ...)
#[async_trait]
pub trait QuoteNotifier: Send + Sync {
    async fn quote_created(&self, quote: &Quote) -> Result<(), NotifyError>;
}

/// Default notifier: logs the offer and does nothing else
pub struct LogNotifier;

#[async_trait]
impl QuoteNotifier for LogNotifier {
    async fn quote_created(&self, quote: &Quote) -> Result<(), NotifyError> {
        info!(
            "📬 Quote {} created: {} {} at {:.2} CAD, valid until {}",
            quote.id,
            quote.brand,
            quote.reference_number,
            quote.breakdown.final_quote,
            quote.valid_until
        );
        Ok(())
    }
}
