//! Staged multiplicative pricing calculator
//!
//! Applies a fixed sequence of adjustments to the base market price and
//! records every intermediate step, so the final offer is an auditable
//! ledger rather than a single opaque number. Pure: the evaluation year
//! is an explicit input, never read from the clock.

use crate::shared::config::PricingConfig;
use crate::shared::types::Condition;
use crate::shared::utils::{format_cad, round2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inputs to one quote calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingInput {
    pub base_market_price: f64,
    pub reference_number: String,
    pub condition: Condition,
    pub has_box: bool,
    pub has_papers: bool,
    pub has_original_bracelet: bool,
    pub year_of_manufacture: i32,
    pub evaluation_year: i32,
    pub is_high_demand: bool,
    pub is_low_demand: bool,
    pub dial_type: Option<String>,
    pub bezel_type: Option<String>,
}

/// Full calculation ledger.
///
/// Each adjustment is (post-stage value - pre-stage value); summing the
/// adjustments onto the base and subtracting the risk buffer and margin
/// amount reconstructs the final quote exactly (before rounding).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub base_market_price: f64,
    pub material_multiplier: f64,
    pub material_adjustment: f64,
    pub condition_multiplier: f64,
    pub condition_adjustment: f64,
    pub completeness_multiplier: f64,
    pub completeness_adjustment: f64,
    pub liquidity_multiplier: f64,
    pub liquidity_adjustment: f64,
    pub subtotal: f64,
    pub watch_age: i32,
    pub margin_percentage: f64,
    pub margin_amount: f64,
    pub risk_buffer: f64,
    pub final_quote: f64,
}

impl fmt::Display for PricingBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Base market price:   {}",
            format_cad(self.base_market_price)
        )?;
        writeln!(
            f,
            "Material:            x{:.2} ({:+.2})",
            self.material_multiplier, self.material_adjustment
        )?;
        writeln!(
            f,
            "Condition:           x{:.2} ({:+.2})",
            self.condition_multiplier, self.condition_adjustment
        )?;
        writeln!(
            f,
            "Box & papers:        x{:.2} ({:+.2})",
            self.completeness_multiplier, self.completeness_adjustment
        )?;
        writeln!(
            f,
            "Liquidity:           x{:.2} ({:+.2})",
            self.liquidity_multiplier, self.liquidity_adjustment
        )?;
        writeln!(f, "Subtotal:            {}", format_cad(self.subtotal))?;
        writeln!(
            f,
            "Margin:              {:.0}% ({} year{} old) -{}",
            self.margin_percentage,
            self.watch_age,
            if self.watch_age == 1 { "" } else { "s" },
            format_cad(self.margin_amount)
        )?;
        writeln!(f, "Risk buffer:         -{}", format_cad(self.risk_buffer))?;
        write!(f, "Final quote:         {}", format_cad(self.final_quote))
    }
}

/// Pricing engine over injected, immutable multiplier tables
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Calculate the final offer with a complete breakdown.
    ///
    /// Never fails for well-formed numeric input; does not validate input
    /// ranges. The result is NOT clamped at zero: an old, low-condition,
    /// low-value piece can legally yield a non-positive offer.
    pub fn calculate_quote(&self, input: &PricingInput) -> PricingBreakdown {
        let watch_age = input.evaluation_year - input.year_of_manufacture;

        // Stage 1: material, keyed off the trailing reference character
        let material_multiplier = self.material_multiplier(&input.reference_number);
        let material_base = input.base_market_price * material_multiplier;

        // Stage 2: condition
        let condition_multiplier = self.condition_multiplier(input.condition);
        let condition_base = material_base * condition_multiplier;

        // Stage 3: completeness (box & papers)
        let completeness_multiplier = self.completeness_multiplier(input.has_box, input.has_papers);
        let completeness_base = condition_base * completeness_multiplier;

        // Stage 4: liquidity (brand demand)
        let liquidity_multiplier =
            self.liquidity_multiplier(input.is_high_demand, input.is_low_demand);
        let subtotal = completeness_base * liquidity_multiplier;

        // Stage 5: age-based margin on the subtotal
        let margin_percentage = margin_percentage(watch_age, input.condition);
        let margin_amount = subtotal * margin_percentage / 100.0;

        // Stage 6: flat risk buffer, then the final offer
        let final_quote = round2(subtotal - self.config.risk_buffer - margin_amount);

        PricingBreakdown {
            base_market_price: input.base_market_price,
            material_multiplier,
            material_adjustment: material_base - input.base_market_price,
            condition_multiplier,
            condition_adjustment: condition_base - material_base,
            completeness_multiplier,
            completeness_adjustment: completeness_base - condition_base,
            liquidity_multiplier,
            liquidity_adjustment: subtotal - completeness_base,
            subtotal,
            watch_age,
            margin_percentage,
            margin_amount,
            risk_buffer: self.config.risk_buffer,
            final_quote,
        }
    }

    /// Material multiplier from the trailing character of the reference.
    ///
    /// An isolated, deliberately lossy lookup so it can later be replaced
    /// with a richer catalog without touching the pricing pipeline. Any
    /// unmatched character (including '7' and letters) defaults to 1.00.
    pub fn material_multiplier(&self, reference_number: &str) -> f64 {
        reference_number
            .trim()
            .chars()
            .last()
            .and_then(|c| self.config.material_multipliers.get(&c.to_string()))
            .copied()
            .unwrap_or(1.00)
    }

    fn condition_multiplier(&self, condition: Condition) -> f64 {
        let table = &self.config.condition_multipliers;
        match condition {
            Condition::NewUnworn => table.new_unworn,
            Condition::Excellent => table.excellent,
            Condition::VeryGood => table.very_good,
            Condition::Good => table.good,
        }
    }

    fn completeness_multiplier(&self, has_box: bool, has_papers: bool) -> f64 {
        let table = &self.config.completeness_multipliers;
        match (has_box, has_papers) {
            (true, true) => table.full_set,
            (true, false) => table.box_only,
            (false, true) => table.papers_only,
            (false, false) => table.none,
        }
    }

    fn liquidity_multiplier(&self, is_high_demand: bool, is_low_demand: bool) -> f64 {
        let table = &self.config.liquidity_multipliers;
        if is_high_demand {
            table.high
        } else if is_low_demand {
            table.low
        } else {
            table.standard
        }
    }

    /// Whether a brand belongs to the high-demand resale set
    pub fn is_high_demand_brand(&self, brand: &str) -> bool {
        let brand = brand.trim().to_lowercase();
        self.config
            .high_demand_brands
            .iter()
            .any(|b| b.as_str() == brand)
    }
}

/// Age-based margin percentage; like-new recent pieces carry the lowest margin
fn margin_percentage(watch_age: i32, condition: Condition) -> f64 {
    if condition == Condition::NewUnworn && watch_age <= 3 {
        return 15.0;
    }
    if watch_age <= 2 {
        15.0
    } else if watch_age <= 7 {
        20.0
    } else {
        30.0
    }
}
