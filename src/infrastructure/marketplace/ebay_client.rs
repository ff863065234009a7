//! eBay Browse API client
//!
//! OAuth client-credentials flow with a cached access token, then keyword
//! search over item summaries. Zero-priced items are dropped at parse.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::shared::config::MarketplaceConfig;
use crate::shared::errors::{SourceError, ValuationError};
use crate::shared::types::Listing;

use super::traits::{ListingSource, SearchQuery};

const OAUTH_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";
const SEARCH_FILTER: &str = "buyingOptions:{FIXED_PRICE},itemLocationCountry:US";
// Refresh the cached token a minute before the marketplace expires it
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct BrowseResponse {
    #[serde(rename = "itemSummaries", default)]
    item_summaries: Vec<ItemSummary>,
}

#[derive(Debug, Deserialize)]
struct ItemSummary {
    #[serde(rename = "itemId", default)]
    item_id: String,
    #[serde(default)]
    title: String,
    price: Option<ItemPrice>,
    #[serde(rename = "itemWebUrl", default)]
    item_web_url: String,
    #[serde(rename = "shippingOptions", default)]
    shipping_options: Vec<ShippingOption>,
}

#[derive(Debug, Deserialize)]
struct ItemPrice {
    #[serde(default)]
    value: String,
    #[serde(default = "default_currency")]
    currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize)]
struct ShippingOption {
    #[serde(rename = "shippingCost")]
    shipping_cost: Option<ItemPrice>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Listing source backed by the eBay Browse API
pub struct EbayBrowseClient {
    http_client: Client,
    config: MarketplaceConfig,
    app_id: String,
    cert_id: String,
    token: Mutex<Option<CachedToken>>,
}

impl EbayBrowseClient {
    pub fn new(config: MarketplaceConfig, app_id: String, cert_id: String) -> Self {
        Self {
            http_client: Client::new(),
            config,
            app_id,
            cert_id,
            token: Mutex::new(None),
        }
    }

    /// Build a client with credentials from EBAY_APP_ID / EBAY_CERT_ID
    pub fn from_env(config: MarketplaceConfig) -> Result<Self, ValuationError> {
        let app_id = env::var("EBAY_APP_ID")
            .map_err(|_| ValuationError::Config("EBAY_APP_ID is not set".to_string()))?;
        let cert_id = env::var("EBAY_CERT_ID")
            .map_err(|_| ValuationError::Config("EBAY_CERT_ID is not set".to_string()))?;

        Ok(Self::new(config, app_id, cert_id))
    }

    /// Get a cached OAuth access token, refreshing it when near expiry
    async fn access_token(&self) -> Result<String, SourceError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        info!("🔑 Requesting marketplace access token");

        let response = self
            .http_client
            .post(&self.config.auth_url)
            .basic_auth(&self.app_id, Some(&self.cert_id))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", OAUTH_SCOPE),
            ])
            .send()
            .await
            .map_err(|e| SourceError::AuthFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::AuthFailed(format!(
                "Token endpoint returned status {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SourceError::AuthFailed(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }

    fn parse_browse_response(response: BrowseResponse) -> Vec<Listing> {
        let mut listings = Vec::with_capacity(response.item_summaries.len());

        for item in response.item_summaries {
            let (sold_price, currency) = match &item.price {
                Some(price) => (
                    price.value.parse::<f64>().unwrap_or(0.0),
                    price.currency.clone(),
                ),
                None => (0.0, default_currency()),
            };
            if sold_price == 0.0 {
                continue;
            }

            let shipping_cost = item
                .shipping_options
                .first()
                .and_then(|option| option.shipping_cost.as_ref())
                .and_then(|cost| cost.value.parse::<f64>().ok());

            listings.push(Listing {
                item_id: item.item_id,
                title: item.title,
                sold_price,
                currency,
                listing_url: item.item_web_url,
                shipping_cost,
            });
        }

        listings
    }
}

#[async_trait]
impl ListingSource for EbayBrowseClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Listing>, SourceError> {
        let token = self.access_token().await?;
        let keywords = query.keywords();

        info!("🔍 Searching marketplace for: {}", keywords);

        let response = self
            .http_client
            .get(&self.config.browse_url)
            .query(&[
                ("q", keywords.as_str()),
                ("filter", SEARCH_FILTER),
                ("limit", &self.config.listing_limit.to_string()),
            ])
            .bearer_auth(&token)
            .header("X-EBAY-C-MARKETPLACE-ID", &self.config.marketplace_id)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            warn!("⚠️ Marketplace search returned status {}", response.status());
            return Err(SourceError::RequestFailed(format!(
                "Search returned status {}",
                response.status()
            )));
        }

        let browse: BrowseResponse = response
            .json()
            .await
            .map_err(|e| SourceError::RequestFailed(e.to_string()))?;

        let listings = Self::parse_browse_response(browse);
        info!("✅ Marketplace returned {} priced listings", listings.len());

        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_browse_response_drops_unpriced_items() {
        let response: BrowseResponse = serde_json::from_str(
            r#"{
                "itemSummaries": [
                    {
                        "itemId": "v1|1001|0",
                        "title": "Rolex Submariner 126610LN",
                        "price": { "value": "13500.00", "currency": "USD" },
                        "itemWebUrl": "https://example.com/1001",
                        "shippingOptions": [
                            { "shippingCost": { "value": "40.00", "currency": "USD" } }
                        ]
                    },
                    {
                        "itemId": "v1|1002|0",
                        "title": "Rolex Submariner no price",
                        "price": { "value": "0", "currency": "USD" }
                    },
                    {
                        "itemId": "v1|1003|0",
                        "title": "Rolex Submariner missing price"
                    }
                ]
            }"#,
        )
        .unwrap();

        let listings = EbayBrowseClient::parse_browse_response(response);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].item_id, "v1|1001|0");
        assert_eq!(listings[0].sold_price, 13_500.0);
        assert_eq!(listings[0].currency, "USD");
        assert_eq!(listings[0].shipping_cost, Some(40.0));
    }

    #[test]
    fn test_parse_browse_response_handles_empty_payload() {
        let response: BrowseResponse = serde_json::from_str("{}").unwrap();
        assert!(EbayBrowseClient::parse_browse_response(response).is_empty());
    }
}
