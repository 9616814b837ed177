//! ID card number detection.

use super::patterns::CARD_NUMBER;
use super::FieldRule;

/// Check if text is a card number: 1-2 capital letters then exactly 6 digits.
pub fn is_card_number(text: &str) -> bool {
    CARD_NUMBER.is_match(text)
}

/// Card number rule.
pub struct IdNumberRule;

impl IdNumberRule {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IdNumberRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for IdNumberRule {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        is_card_number(text).then(|| text.to_string())
    }
}
