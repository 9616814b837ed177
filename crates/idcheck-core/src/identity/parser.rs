//! Fragment classifier and identity record builder.

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::identity::{
    ExtractionOutcome, IdentityRecord, TextFragment, VerificationStatus,
};

use super::layout::{CardLayout, NameField};
use super::rules::{
    dates::{resolve_dates, DateOrder, DateRule},
    id_number::IdNumberRule,
    place::PlaceOfBirthRule,
    FieldRule,
};
use super::IdentityExtractor;

/// What the rules made of a single fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub order: u32,
    /// Trimmed fragment text.
    pub text: String,
    /// Header fragment, no rule was consulted.
    pub skipped: bool,
    pub name_field: Option<NameField>,
    pub date: Option<String>,
    pub id_number: Option<String>,
    pub place_of_birth: Option<String>,
}

impl Classification {
    /// Whether any rule claimed the fragment.
    pub fn is_claimed(&self) -> bool {
        self.name_field.is_some()
            || self.date.is_some()
            || self.id_number.is_some()
            || self.place_of_birth.is_some()
    }
}

/// Candidate values gathered across all fragments.
#[derive(Debug, Default)]
struct CollectedFields {
    first_name: String,
    last_name: String,
    dates: Vec<String>,
    card_number: String,
    place_of_birth: String,
}

impl CollectedFields {
    fn absorb(&mut self, classification: Classification) {
        match classification.name_field {
            Some(NameField::FirstName) => self.first_name = classification.text,
            Some(NameField::LastName) => self.last_name = classification.text,
            None => {}
        }
        if let Some(date) = classification.date {
            self.dates.push(date);
        }
        if let Some(number) = classification.id_number {
            self.card_number = number;
        }
        if let Some(place) = classification.place_of_birth {
            self.place_of_birth = place;
        }
    }
}

/// Rule-based identity parser over OCR fragments.
#[derive(Debug, Clone)]
pub struct IdentityParser {
    layout: CardLayout,
    date_order: DateOrder,
    place_rule: PlaceOfBirthRule,
}

impl IdentityParser {
    /// Create a parser with the default card layout and lexicographic dates.
    pub fn new() -> Self {
        Self {
            layout: CardLayout::default(),
            date_order: DateOrder::default(),
            place_rule: PlaceOfBirthRule::new(),
        }
    }

    /// Build a parser from the extraction section of the configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_layout(config.layout.clone())
            .with_date_order(config.date_order)
            .with_place_prefixes(config.place_prefixes.iter().cloned())
    }

    /// Set the card layout.
    pub fn with_layout(mut self, layout: CardLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Set how birth and expiry dates are ordered.
    pub fn with_date_order(mut self, order: DateOrder) -> Self {
        self.date_order = order;
        self
    }

    /// Set the place-of-birth prefixes.
    pub fn with_place_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.place_rule = PlaceOfBirthRule::with_prefixes(prefixes);
        self
    }

    pub fn layout(&self) -> &CardLayout {
        &self.layout
    }

    pub fn date_order(&self) -> DateOrder {
        self.date_order
    }

    /// Run every rule against one fragment.
    pub fn classify(&self, fragment: &TextFragment) -> Classification {
        let text = fragment
            .text
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

        if self.layout.is_header(fragment.order) {
            return Classification {
                order: fragment.order,
                text: text.to_string(),
                skipped: true,
                ..Default::default()
            };
        }

        Classification {
            order: fragment.order,
            text: text.to_string(),
            skipped: false,
            name_field: self.layout.field_at(fragment.order),
            date: DateRule.extract(text),
            id_number: IdNumberRule.extract(text),
            place_of_birth: self.place_rule.extract(text),
        }
    }

    /// Extract and also return the per-fragment classification.
    pub fn extract_with_trace(
        &self,
        fragments: &[TextFragment],
    ) -> (ExtractionOutcome, Vec<Classification>) {
        let trace: Vec<Classification> = fragments.iter().map(|f| self.classify(f)).collect();

        let mut collected = CollectedFields::default();
        for classification in trace.iter().filter(|c| !c.skipped) {
            debug!(
                order = classification.order,
                claimed = classification.is_claimed(),
                "classified fragment"
            );
            collected.absorb(classification.clone());
        }

        let outcome = self.build_outcome(collected);

        info!(
            fragments = fragments.len(),
            status = %outcome.data.verification_status,
            "identity extraction finished"
        );

        (outcome, trace)
    }

    fn build_outcome(&self, collected: CollectedFields) -> ExtractionOutcome {
        let dates = resolve_dates(collected.dates, self.date_order);

        let success = !collected.first_name.is_empty()
            && !collected.last_name.is_empty()
            && !dates.date_of_birth.is_empty()
            && !collected.place_of_birth.is_empty()
            && !collected.card_number.is_empty();

        let verification_status = if success {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Incomplete
        };

        ExtractionOutcome {
            success,
            data: IdentityRecord {
                name: format!("{} {}", collected.first_name, collected.last_name),
                id_number: collected.card_number,
                date_of_birth: dates.date_of_birth,
                place_of_birth: collected.place_of_birth,
                expiry_date: dates.expiry_date,
                verification_status,
            },
        }
    }
}

impl Default for IdentityParser {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityExtractor for IdentityParser {
    fn extract(&self, fragments: &[TextFragment]) -> ExtractionOutcome {
        self.extract_with_trace(fragments).0
    }
}
