//! Engine configuration: every tunable table the pipeline depends on
//!
//! All lookup tables (price floors, multipliers, reference prices) are
//! immutable configuration injected into the components at construction,
//! loadable from a TOML file and swappable per deployment.

use crate::shared::errors::ValuationError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;

/// Marketplace (eBay Browse API) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    pub auth_url: String,
    pub browse_url: String,
    pub marketplace_id: String,
    pub listing_limit: u32,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            auth_url: "https://api.ebay.com/identity/v1/oauth2/token".to_string(),
            browse_url: "https://api.ebay.com/buy/browse/v1/item_summary/search".to_string(),
            marketplace_id: "EBAY_US".to_string(),
            listing_limit: 50,
        }
    }
}

/// Listing filter settings: title blacklist and plausibility price floors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Whole-word terms that disqualify a listing outright
    pub blacklist_terms: Vec<String>,
    /// Whole-word markers for ladies' models (smaller cases, lower floors)
    pub ladies_markers: Vec<String>,
    /// Floor for any brand without specific tiering, in listing currency
    pub default_floor: f64,
    pub rolex_floors: RolexFloors,
}

/// Rolex price floors keyed off the trailing character of the target reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolexFloors {
    /// Reference ends in '8' (solid gold tier)
    pub solid_gold: f64,
    /// Reference ends in '3' (two-tone tier)
    pub two_tone: f64,
    pub steel: f64,
    pub steel_ladies: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            blacklist_terms: [
                "parts",
                "repair",
                "broken",
                "box only",
                "papers only",
                "link",
                "bezel",
                "dial only",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ladies_markers: ["6917", "7917", "lady", "26mm", "28mm", "31mm"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            default_floor: 1000.0,
            rolex_floors: RolexFloors {
                solid_gold: 9000.0,
                two_tone: 3800.0,
                steel: 7000.0,
                steel_ladies: 2200.0,
            },
        }
    }
}

/// Price aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Fixed USD to CAD conversion rate (no live FX lookup by design)
    pub usd_to_cad: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { usd_to_cad: 1.35 }
    }
}

/// Reference-price cross-validation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceCheckConfig {
    /// Allowed divergence between observed and curated price, in percent
    pub tolerance_pct: f64,
    /// Curated reference code -> known-good USD price
    pub prices: HashMap<String, f64>,
}

impl Default for ReferenceCheckConfig {
    fn default() -> Self {
        // Conservative wholesale market prices based on recent sales
        let prices = [
            // Daytona
            ("116500LN", 30000.0),
            ("116500", 30000.0),
            ("126500LN", 32000.0),
            ("116523", 15000.0),
            ("116520", 18000.0),
            // Submariner
            ("116610LN", 11000.0),
            ("116610LV", 14000.0),
            ("126610LN", 12000.0),
            ("126610LV", 15000.0),
            ("114060", 9000.0),
            ("124060", 10000.0),
            // GMT-Master II
            ("126710BLRO", 16000.0),
            ("126710BLNR", 15000.0),
            ("116710LN", 10000.0),
            ("116710BLNR", 14000.0),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();

        Self {
            tolerance_pct: 30.0,
            prices,
        }
    }
}

/// Condition multipliers applied in the condition stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionMultipliers {
    pub new_unworn: f64,
    pub excellent: f64,
    pub very_good: f64,
    pub good: f64,
}

/// Box/papers multipliers applied in the completeness stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessMultipliers {
    pub full_set: f64,
    pub box_only: f64,
    pub papers_only: f64,
    pub none: f64,
}

/// Brand-demand multipliers applied in the liquidity stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidityMultipliers {
    pub high: f64,
    pub standard: f64,
    pub low: f64,
}

/// Pricing engine settings: every multiplier table plus the flat risk buffer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Trailing reference character -> material multiplier
    pub material_multipliers: HashMap<String, f64>,
    pub condition_multipliers: ConditionMultipliers,
    pub completeness_multipliers: CompletenessMultipliers,
    pub liquidity_multipliers: LiquidityMultipliers,
    /// Case-insensitive brand names classified as high demand
    pub high_demand_brands: Vec<String>,
    /// Flat deduction applied before finalizing an offer, in CAD
    pub risk_buffer: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        let material_multipliers = [
            ("0", 1.00), // Stainless Steel
            ("1", 1.30), // Everose Rolesor
            ("2", 1.35), // Rolesium
            ("3", 1.25), // Yellow Rolesor
            ("4", 1.10), // White Rolesor
            ("5", 1.90), // 18k Everose Gold
            ("6", 2.80), // Platinum
            ("8", 2.20), // 18k Yellow Gold
            ("9", 2.30), // 18k White Gold
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect();

        Self {
            material_multipliers,
            condition_multipliers: ConditionMultipliers {
                new_unworn: 1.00,
                excellent: 0.92,
                very_good: 0.82,
                good: 0.68,
            },
            completeness_multipliers: CompletenessMultipliers {
                full_set: 1.08,
                box_only: 1.03,
                papers_only: 1.04,
                none: 1.00,
            },
            liquidity_multipliers: LiquidityMultipliers {
                high: 1.05,
                standard: 1.00,
                low: 0.92,
            },
            high_demand_brands: ["rolex", "patek philippe", "audemars piguet", "richard mille"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            risk_buffer: 500.0,
        }
    }
}

/// Quote issuance policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotePolicyConfig {
    /// Minimum valid listings required before an offer is made
    pub min_valid_listings: usize,
    /// Offer validity window from creation; expiry is enforced by the caller
    pub validity_hours: i64,
    /// Earliest accepted year of manufacture
    pub min_year_of_manufacture: i32,
}

impl Default for QuotePolicyConfig {
    fn default() -> Self {
        Self {
            min_valid_listings: 5,
            validity_hours: 72,
            min_year_of_manufacture: 1950,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub marketplace: MarketplaceConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    #[serde(default)]
    pub reference_check: ReferenceCheckConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub quote: QuotePolicyConfig,
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file; missing sections fall back to defaults
    pub fn from_file(path: &str) -> Result<EngineConfig, ValuationError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ValuationError::Config(format!("Failed to read config file: {}", e)))?;

        let config: EngineConfig = toml::from_str(&content)
            .map_err(|e| ValuationError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }
}
