//! Ingredient line parsing.
//!
//! Turns a free-form line such as `"1/2 cup flour"` into an [`Ingredient`].
//! Only a leading amount and an immediately following unit are recognised;
//! everything else is kept verbatim as the description.

use crate::model::Ingredient;

/// Units recognised right after the amount (lowercase, punctuation stripped)
pub const UNITS: &[&str] = &[
    "cup", "cups", "tbsp", "tsp", "oz", "ounce", "ounces", "lb", "pound", "pounds", "g", "kg",
    "ml", "l",
];

/// Parse a single ingredient line.
///
/// Lines without a leading amount become a bare description.
pub fn parse_ingredient(raw: &str) -> Ingredient {
    let tokens: Vec<&str> = raw.split_whitespace().collect();

    let Some(quantity) = tokens.first().and_then(|first| parse_quantity(first)) else {
        return Ingredient {
            quantity: None,
            unit: String::new(),
            description: tokens.join(" "),
        };
    };

    let mut rest = &tokens[1..];
    let mut unit = String::new();
    if let Some(first) = rest.first() {
        let candidate = normalize_unit(first);
        if UNITS.contains(&candidate.as_str()) {
            unit = candidate;
            rest = &rest[1..];
        }
    }

    Ingredient {
        quantity: Some(quantity),
        unit,
        description: rest.join(" "),
    }
}

/// Parse an amount such as `2`, `0.5`, `.5` or `1/2`.
pub fn parse_quantity(token: &str) -> Option<f64> {
    let token = token.trim();
    if let Some((numerator, denominator)) = token.split_once('/') {
        if !is_digits(numerator) || !is_digits(denominator) {
            return None;
        }
        let numerator: f64 = numerator.parse().ok()?;
        let denominator: f64 = denominator.parse().ok()?;
        if denominator == 0.0 {
            return None;
        }
        return Some(numerator / denominator);
    }

    // Rejects "inf", "nan", "1e3" and friends that f64::from_str would accept
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn normalize_unit(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
