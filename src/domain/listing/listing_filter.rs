//! Validity filtering for raw marketplace listings
//!
//! Screens out structurally invalid or implausible listings before any
//! price is computed: title blacklist, reference match, and brand-specific
//! price floors. Floors apply to the quoted price, before any conversion.

use crate::shared::config::FilterConfig;
use crate::shared::types::Listing;

/// Stateless listing filter built from injected configuration
pub struct ListingFilter {
    config: FilterConfig,
}

impl ListingFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Keep only plausible listings for the target reference.
    ///
    /// An empty target reference means "no reference constraint"; this
    /// never fails, it only narrows the input set.
    pub fn filter(&self, listings: &[Listing], target_reference: &str) -> Vec<Listing> {
        let target = target_reference.trim().to_lowercase();

        listings
            .iter()
            .filter(|listing| self.is_valid(listing, &target))
            .cloned()
            .collect()
    }

    fn is_valid(&self, listing: &Listing, target: &str) -> bool {
        if listing.title.trim().is_empty() {
            return false;
        }

        let title = listing.title.to_lowercase();

        if self
            .config
            .blacklist_terms
            .iter()
            .any(|term| contains_word(&title, term))
        {
            return false;
        }

        if !target.is_empty() && !title.contains(target) {
            return false;
        }

        listing.sold_price >= self.price_floor(&title, target)
    }

    /// Minimum plausible price for a listing, in the listing's own currency.
    ///
    /// The trailing character of the target reference is a cheap proxy for
    /// material tier: '8' solid gold, '3' two-tone, anything else steel.
    /// Brand-specific to Rolex; other brands get the generic floor.
    fn price_floor(&self, title: &str, target: &str) -> f64 {
        if !title.contains("rolex") {
            return self.config.default_floor;
        }

        let is_ladies = self
            .config
            .ladies_markers
            .iter()
            .any(|marker| contains_word(title, marker));

        let floors = &self.config.rolex_floors;
        match target.chars().last() {
            Some('8') => floors.solid_gold,
            Some('3') => floors.two_tone,
            _ if is_ladies => floors.steel_ladies,
            _ => floors.steel,
        }
    }
}

/// Whole-word containment check; the needle may itself contain spaces
fn contains_word(haystack: &str, needle: &str) -> bool {
    let mut search_from = 0;
    while let Some(offset) = haystack[search_from..].find(needle) {
        let start = search_from + offset;
        let end = start + needle.len();

        let boundary_before = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let boundary_after = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

        if boundary_before && boundary_after {
            return true;
        }
        search_from = start + 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::FilterConfig;

    fn filter() -> ListingFilter {
        ListingFilter::new(FilterConfig::default())
    }

    #[test]
    fn test_contains_word() {
        assert!(contains_word("rolex for parts", "parts"));
        assert!(contains_word("box only no watch", "box only"));
        assert!(!contains_word("sparts counter", "parts"));
        assert!(!contains_word("linked bracelet", "link"));
    }

    #[test]
    fn test_blacklist_rejects_regardless_of_price() {
        let listings = vec![
            Listing::new("1", "Rolex Submariner 126610LN parts", 50_000.0, "CAD"),
            Listing::new("2", "Rolex Submariner 126610LN bezel insert", 20_000.0, "CAD"),
            Listing::new("3", "Rolex Submariner 126610LN full set", 16_000.0, "CAD"),
        ];

        let valid = filter().filter(&listings, "126610LN");
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].item_id, "3");
    }

    #[test]
    fn test_empty_title_rejected() {
        let listings = vec![Listing::new("1", "   ", 16_000.0, "CAD")];
        assert!(filter().filter(&listings, "").is_empty());
    }

    #[test]
    fn test_reference_substring_required_when_given() {
        let listings = vec![Listing::new("1", "Rolex Submariner no ref", 16_000.0, "CAD")];
        assert!(filter().filter(&listings, "126610LN").is_empty());
        assert_eq!(filter().filter(&listings, "").len(), 1);
    }

    #[test]
    fn test_solid_gold_floor_boundary() {
        // Reference ending in '8' carries the solid-gold floor of 9000
        let below = vec![Listing::new("1", "Rolex Day-Date 228238", 8_999.99, "USD")];
        let at = vec![Listing::new("2", "Rolex Day-Date 228238", 9_000.0, "USD")];

        assert!(filter().filter(&below, "228238").is_empty());
        assert_eq!(filter().filter(&at, "228238").len(), 1);
    }

    #[test]
    fn test_two_tone_and_steel_floors() {
        let f = filter();

        let two_tone = vec![Listing::new("1", "Rolex Datejust 16233", 4_000.0, "USD")];
        assert_eq!(f.filter(&two_tone, "16233").len(), 1);

        let steel_low = vec![Listing::new("2", "Rolex Submariner 114060", 6_500.0, "USD")];
        assert!(f.filter(&steel_low, "114060").is_empty());

        let ladies = vec![Listing::new("3", "Rolex Lady Datejust 69174 26mm", 2_500.0, "USD")];
        assert_eq!(f.filter(&ladies, "69174").len(), 1);
    }

    #[test]
    fn test_non_rolex_generic_floor() {
        let listings = vec![
            Listing::new("1", "Omega Speedmaster 310.30.42", 900.0, "USD"),
            Listing::new("2", "Omega Speedmaster 310.30.42", 1_200.0, "USD"),
        ];

        let valid = filter().filter(&listings, "310.30.42");
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].item_id, "2");
    }
}
