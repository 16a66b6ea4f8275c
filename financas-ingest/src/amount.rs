//! Brazilian-format monetary amount extraction ("R$ 1.234,56").

use regex::Regex;

/// Compiled amount patterns, tried in priority order. The first pattern
/// that matches decides the amount; later patterns are never consulted,
/// even when another number elsewhere in the text would parse larger.
pub struct AmountMatcher {
    patterns: [Regex; 3],
}

impl AmountMatcher {
    pub fn new() -> Self {
        Self {
            patterns: [
                // R$ 1.000,00 or R$ 1000,00
                Regex::new(r"r\$\s*(\d+(?:[.,]\d{3})*[.,]\d{2})").unwrap(),
                // 1.000,00 or 1000,00 without the currency marker
                Regex::new(r"(\d+(?:[.,]\d{3})*[.,]\d{2})").unwrap(),
                // Loose two-decimal number: 100,00
                Regex::new(r"(\d+[.,]\d{2})").unwrap(),
            ],
        }
    }

    /// Extract a positive amount from lowercased notification text.
    /// Thousands dots are stripped and the decimal comma becomes a dot.
    pub fn extract(&self, text: &str) -> Option<f64> {
        let raw = self
            .patterns
            .iter()
            .find_map(|re| re.captures(text).and_then(|caps| caps.get(1)))?
            .as_str();
        let value: f64 = raw.replace('.', "").replace(',', ".").parse().ok()?;
        (value.is_finite() && value > 0.0).then_some(value)
    }
}

impl Default for AmountMatcher {
    fn default() -> Self {
        Self::new()
    }
}
