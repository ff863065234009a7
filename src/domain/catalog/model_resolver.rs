//! Model-name resolution for well-known reference codes

use crate::shared::utils::normalize_reference;

/// Maps common Rolex references to their model names for display on
/// quotes and certificates. Unknown references pass through unchanged.
pub struct ModelCatalog;

impl ModelCatalog {
    pub fn resolve(brand: &str, reference_number: &str) -> String {
        if brand.trim().to_lowercase() != "rolex" {
            return reference_number.to_string();
        }

        let model = match normalize_reference(reference_number).as_str() {
            // Submariner
            "114060" | "124060" => "Submariner",
            "116610LN" | "116610LV" | "126610LN" | "126610LV" => "Submariner Date",
            // Daytona
            "116500LN" | "116500" | "126500LN" | "116520" | "116523" => "Daytona",
            // GMT-Master II
            "116710LN" | "116710BLNR" | "126710BLRO" | "126710BLNR" => "GMT-Master II",
            // Explorer
            "214270" => "Explorer",
            "226570" | "216570" => "Explorer II",
            // Datejust
            "126234" => "Datejust 36",
            "126300" => "Datejust 41",
            "69173" | "16233" | "16200" => "Datejust",
            // Sky-Dweller
            "326934" | "336935" => "Sky-Dweller",
            _ => return reference_number.to_string(),
        };

        model.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_references_resolve() {
        assert_eq!(ModelCatalog::resolve("Rolex", "126610LN"), "Submariner Date");
        assert_eq!(ModelCatalog::resolve("rolex", "116500ln"), "Daytona");
        assert_eq!(ModelCatalog::resolve("ROLEX", "126710blro"), "GMT-Master II");
        assert_eq!(ModelCatalog::resolve("Rolex", "326934"), "Sky-Dweller");
    }

    #[test]
    fn test_unknown_reference_passes_through() {
        assert_eq!(ModelCatalog::resolve("Rolex", "999999"), "999999");
    }

    #[test]
    fn test_other_brands_pass_through() {
        assert_eq!(ModelCatalog::resolve("Omega", "116500LN"), "116500LN");
    }
}
