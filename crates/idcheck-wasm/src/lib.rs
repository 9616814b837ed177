//! WASM bindings for ID card field extraction.
//!
//! The browser wizard captures the images and calls the services itself;
//! these bindings turn the OCR service's fragments into an identity record.

use wasm_bindgen::prelude::*;

use idcheck_core::identity::rules::{format_card_date, is_card_number as matches_card_number};
use idcheck_core::models::identity::{OcrResponse, TextFragment};
use idcheck_core::{DateOrder, IdentityExtractor as _, IdentityParser, WizardStep};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Parse the `extracted_text` array of an OCR response.
///
/// Returns `{success, data}` where `data` is the identity record.
#[wasm_bindgen]
pub fn process_extracted_text(fragments: JsValue) -> Result<JsValue, JsValue> {
    IdentityExtractor::new().extract(fragments)
}

/// Parse a whole OCR response, `{success, extracted_text}`.
#[wasm_bindgen]
pub fn process_ocr_response(response: JsValue) -> Result<JsValue, JsValue> {
    IdentityExtractor::new().extract_response(response)
}

/// Check whether text looks like a card number.
#[wasm_bindgen]
pub fn is_card_number(text: &str) -> bool {
    matches_card_number(text.trim())
}

/// Re-pad a `D.M.YYYY` date to `DD.MM.YYYY`.
#[wasm_bindgen]
pub fn normalize_card_date(date: &str) -> String {
    format_card_date(date)
}

/// Title of a wizard step (1-5), empty for unknown steps.
#[wasm_bindgen]
pub fn wizard_step_title(step: u8) -> String {
    step_from_number(step)
        .map(|s| s.title().to_string())
        .unwrap_or_default()
}

/// Progress-line width in percent for a wizard step (1-5).
#[wasm_bindgen]
pub fn wizard_progress(step: u8) -> u8 {
    step_from_number(step)
        .map(|s| s.progress_percent())
        .unwrap_or(0)
}

fn step_from_number(step: u8) -> Option<WizardStep> {
    WizardStep::ALL.into_iter().find(|s| s.number() == step)
}

/// Identity extractor class for browser use.
#[wasm_bindgen]
pub struct IdentityExtractor {
    parser: IdentityParser,
}

#[wasm_bindgen]
impl IdentityExtractor {
    /// Create a new identity extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: IdentityParser::new(),
        }
    }

    /// Order birth/expiry dates by calendar instead of by text.
    #[wasm_bindgen]
    pub fn set_chronological_dates(&mut self, chronological: bool) {
        let order = if chronological {
            DateOrder::Chronological
        } else {
            DateOrder::Lexicographic
        };
        self.parser = self.parser.clone().with_date_order(order);
    }

    /// Extract identity data from a fragment array.
    #[wasm_bindgen]
    pub fn extract(&self, fragments: JsValue) -> Result<JsValue, JsValue> {
        let fragments: Vec<TextFragment> = serde_wasm_bindgen::from_value(fragments)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let outcome = self.parser.extract(&fragments);

        serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Extract identity data from a full OCR response.
    #[wasm_bindgen]
    pub fn extract_response(&self, response: JsValue) -> Result<JsValue, JsValue> {
        let response: OcrResponse = serde_wasm_bindgen::from_value(response)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let outcome = self.parser.extract_from_response(&response);

        serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl Default for IdentityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idcheck_core::models::identity::{ExtractionOutcome, VerificationStatus};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn romanian_card() -> Vec<TextFragment> {
        [
            (1, "ROMANIA"),
            (2, "CARTE DE IDENTITATE"),
            (3, "Maria"),
            (4, "Popescu"),
            (5, "AB123456"),
            (6, "à Bucuresti"),
            (7, "01.01.2000"),
            (8, "01.01.2030"),
        ]
        .into_iter()
        .map(|(order, text)| TextFragment::new(order, text))
        .collect()
    }

    #[wasm_bindgen_test]
    fn test_process_extracted_text() {
        let input = serde_wasm_bindgen::to_value(&romanian_card()).unwrap();

        let output = process_extracted_text(input).unwrap();
        let outcome: ExtractionOutcome = serde_wasm_bindgen::from_value(output).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.data.name, "Maria Popescu");
        assert_eq!(outcome.data.id_number, "AB123456");
        assert_eq!(outcome.data.place_of_birth, "Bucuresti");
        assert_eq!(outcome.data.verification_status, VerificationStatus::Verified);
    }

    #[wasm_bindgen_test]
    fn test_process_ocr_response() {
        let response = OcrResponse {
            success: true,
            extracted_text: romanian_card(),
        };
        let input = serde_wasm_bindgen::to_value(&response).unwrap();

        let output = process_ocr_response(input).unwrap();
        let outcome: ExtractionOutcome = serde_wasm_bindgen::from_value(output).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.data.date_of_birth, "01.01.2000");
        assert_eq!(outcome.data.expiry_date, "01.01.2030");
    }

    #[wasm_bindgen_test]
    fn test_is_card_number() {
        assert!(is_card_number("AB123456"));
        assert!(is_card_number(" X123456 "));
        assert!(!is_card_number("X1234567"));
    }

    #[wasm_bindgen_test]
    fn test_normalize_card_date() {
        assert_eq!(normalize_card_date("1.2.1990"), "01.02.1990");
    }

    #[wasm_bindgen_test]
    fn test_wizard_helpers() {
        assert_eq!(wizard_step_title(3), "Selfie");
        assert_eq!(wizard_step_title(9), "");
        assert_eq!(wizard_progress(5), 100);
    }
}
