//! Place of birth detection.
//!
//! The card prints the birthplace as a prepositional phrase (`à Paris`,
//! `a Bucuresti`), so the rule keys on the leading preposition.

use super::FieldRule;

/// Prefixes recognised when no configuration overrides them.
pub const DEFAULT_PLACE_PREFIXES: [&str; 2] = ["a ", "à "];

/// Strips a known prefix and keeps the remainder as the place of birth.
#[derive(Debug, Clone)]
pub struct PlaceOfBirthRule {
    prefixes: Vec<String>,
}

impl PlaceOfBirthRule {
    pub fn new() -> Self {
        Self::with_prefixes(DEFAULT_PLACE_PREFIXES)
    }

    /// Use a custom prefix list. Prefixes are tried in the given order.
    pub fn with_prefixes<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for PlaceOfBirthRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for PlaceOfBirthRule {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.prefixes
            .iter()
            .find_map(|prefix| text.strip_prefix(prefix.as_str()))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prefixes() {
        let rule = PlaceOfBirthRule::new();

        assert_eq!(rule.extract("à Bucuresti"), Some("Bucuresti".to_string()));
        assert_eq!(rule.extract("a Cluj Napoca"), Some("Cluj Napoca".to_string()));
    }

    #[test]
    fn test_prefix_is_case_and_space_sensitive() {
        let rule = PlaceOfBirthRule::new();

        assert_eq!(rule.extract("A Paris"), None);
        assert_eq!(rule.extract("alba"), None);
        assert_eq!(rule.extract("àParis"), None);
    }

    #[test]
    fn test_bare_prefix_yields_empty_place() {
        let rule = PlaceOfBirthRule::new();
        assert_eq!(rule.extract("a "), Some(String::new()));
    }

    #[test]
    fn test_custom_prefixes() {
        let rule = PlaceOfBirthRule::with_prefixes(["in ", "né à "]);

        assert_eq!(rule.extract("né à Lyon"), Some("Lyon".to_string()));
        assert_eq!(rule.extract("in Berlin"), Some("Berlin".to_string()));
        assert_eq!(rule.extract("a Roma"), None);
    }
}
