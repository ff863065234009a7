//! Reference-price cross-validation
//!
//! Sanity-checks an observed market median against a curated table of
//! known-good USD prices and supplies the downward-only override policy.

use crate::shared::config::ReferenceCheckConfig;
use crate::shared::utils::normalize_reference;

/// Validation verdict for an observed median against the curated table
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub is_valid: bool,
    pub reference_price: Option<f64>,
    pub difference_pct: Option<f64>,
}

/// Validator over an injected, immutable reference-price table
pub struct ReferencePriceValidator {
    config: ReferenceCheckConfig,
}

impl ReferencePriceValidator {
    pub fn new(config: ReferenceCheckConfig) -> Self {
        Self { config }
    }

    /// Curated USD price for a reference code, if the table knows it
    pub fn reference_price(&self, reference: &str) -> Option<f64> {
        self.config
            .prices
            .get(&normalize_reference(reference))
            .copied()
    }

    /// Compare an observed USD median against the curated table.
    ///
    /// A reference absent from the table is no contradiction to flag:
    /// the verdict is valid with no reference price or difference.
    pub fn validate(&self, reference: &str, observed_median_usd: f64) -> Validation {
        let reference_price = match self.reference_price(reference) {
            Some(price) => price,
            None => {
                return Validation {
                    is_valid: true,
                    reference_price: None,
                    difference_pct: None,
                }
            }
        };

        let difference_pct = (observed_median_usd - reference_price) / reference_price * 100.0;

        Validation {
            is_valid: difference_pct.abs() <= self.config.tolerance_pct,
            reference_price: Some(reference_price),
            difference_pct: Some(difference_pct),
        }
    }

    /// Downward-only override policy.
    ///
    /// Returns the replacement base price in CAD when the observed median
    /// is suspiciously LOW against the curated price. An unusually high
    /// observed median is never overridden.
    pub fn override_base_price(&self, validation: &Validation, usd_to_cad: f64) -> Option<f64> {
        match (validation.reference_price, validation.difference_pct) {
            (Some(reference_price), Some(difference_pct))
                if !validation.is_valid && difference_pct < -self.config.tolerance_pct =>
            {
                Some(reference_price * usd_to_cad)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::ReferenceCheckConfig;

    fn validator() -> ReferencePriceValidator {
        ReferencePriceValidator::new(ReferenceCheckConfig::default())
    }

    #[test]
    fn test_unknown_reference_is_valid_with_no_data() {
        let verdict = validator().validate("999999XX", 5_000.0);
        assert_eq!(
            verdict,
            Validation {
                is_valid: true,
                reference_price: None,
                difference_pct: None,
            }
        );
    }

    #[test]
    fn test_reference_lookup_normalizes() {
        assert_eq!(validator().reference_price(" 126610 ln "), Some(12_000.0));
    }

    #[test]
    fn test_within_tolerance_is_valid() {
        // 126610LN curated at 12000; 13000 observed is +8.3%
        let verdict = validator().validate("126610LN", 13_000.0);
        assert!(verdict.is_valid);
        assert_eq!(verdict.reference_price, Some(12_000.0));
    }

    #[test]
    fn test_low_divergence_triggers_override() {
        let v = validator();
        // 6000 observed vs 12000 curated: -50%
        let verdict = v.validate("126610LN", 6_000.0);
        assert!(!verdict.is_valid);

        let replacement = v.override_base_price(&verdict, 1.35);
        assert_eq!(replacement, Some(12_000.0 * 1.35));
    }

    #[test]
    fn test_high_divergence_never_overrides() {
        let v = validator();
        // 24000 observed vs 12000 curated: +100%, invalid but not overridden
        let verdict = v.validate("126610LN", 24_000.0);
        assert!(!verdict.is_valid);
        assert_eq!(v.override_base_price(&verdict, 1.35), None);
    }

    #[test]
    fn test_unknown_reference_never_overrides() {
        let v = validator();
        let verdict = v.validate("999999XX", 10.0);
        assert_eq!(v.override_base_price(&verdict, 1.35), None);
    }
}
