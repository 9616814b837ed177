//! Rule-based fragment classifiers for ID cards.

pub mod dates;
pub mod id_number;
pub mod patterns;
pub mod place;

pub use dates::{format_card_date, resolve_dates, DateOrder, DateRule, ResolvedDates};
pub use id_number::{is_card_number, IdNumberRule};
pub use place::{PlaceOfBirthRule, DEFAULT_PLACE_PREFIXES};
pub use patterns::*;

/// Trait for single-fragment field rules.
///
/// A rule looks at one trimmed fragment text and either claims a value from
/// it or passes. Rules are independent: the same fragment may be claimed by
/// several of them.
pub trait FieldRule {
    /// The type of value this rule produces.
    type Output;

    /// Try to take a value from the fragment text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Whether the rule claims the fragment at all.
    fn matches(&self, text: &str) -> bool {
        self.extract(text).is_some()
    }
}
