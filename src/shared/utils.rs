//! Small helpers shared by the pipeline components

/// Normalize a reference code for table lookups: strip whitespace, uppercase
pub fn normalize_reference(reference: &str) -> String {
    reference
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Round a currency amount to two decimal places
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Format an amount as a CAD money string with thousands separators
pub fn format_cad(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as i64;
    let dollars = cents / 100;
    let fraction = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_reference() {
        assert_eq!(normalize_reference(" 126610 ln "), "126610LN");
        assert_eq!(normalize_reference("116508"), "116508");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(13020.9088), 13020.91);
        assert_eq!(round2(100.0), 100.0);
        assert_eq!(round2(-71.6088), -71.61);
    }

    #[test]
    fn test_format_cad() {
        assert_eq!(format_cad(13020.91), "$13,020.91");
        assert_eq!(format_cad(500.0), "$500.00");
        assert_eq!(format_cad(-71.6), "-$71.60");
        assert_eq!(format_cad(1_234_567.89), "$1,234,567.89");
    }
}
