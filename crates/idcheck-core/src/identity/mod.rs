//! ID card field extraction from OCR fragments.

pub mod layout;
mod parser;
pub mod rules;

pub use layout::{CardLayout, NameField};
pub use parser::{Classification, IdentityParser};

use crate::models::identity::{ExtractionOutcome, OcrResponse, TextFragment};

/// Trait for identity field extractors.
///
/// Extraction never fails: missing fields show up as `success: false` with an
/// `incomplete` record.
pub trait IdentityExtractor {
    /// Extract identity data from ordered OCR fragments.
    fn extract(&self, fragments: &[TextFragment]) -> ExtractionOutcome;

    /// Extract identity data from a full OCR service response.
    fn extract_from_response(&self, response: &OcrResponse) -> ExtractionOutcome {
        self.extract(&response.extracted_text)
    }
}
