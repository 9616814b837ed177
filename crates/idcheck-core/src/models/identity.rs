//! Identity record and service payload models.

use serde::{Deserialize, Serialize};

/// One OCR-recognised text span with its reading-order position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFragment {
    /// 1-based reading order assigned by the OCR engine.
    pub order: u32,

    /// Recognised text, untrimmed.
    pub text: String,
}

impl TextFragment {
    pub fn new(order: u32, text: impl Into<String>) -> Self {
        Self {
            order,
            text: text.into(),
        }
    }
}

/// Coarse verification label derived from field completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Verified,
    #[default]
    Incomplete,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Incomplete => "incomplete",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured data read from an ID card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// First and last name joined by a single space.
    pub name: String,

    /// Card number, e.g. `AB123456`.
    pub id_number: String,

    /// `DD.MM.YYYY`.
    pub date_of_birth: String,

    pub place_of_birth: String,

    /// `DD.MM.YYYY`.
    pub expiry_date: String,

    pub verification_status: VerificationStatus,
}

impl IdentityRecord {
    /// Field keys and values in display order.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("name", self.name.as_str()),
            ("id_number", self.id_number.as_str()),
            ("date_of_birth", self.date_of_birth.as_str()),
            ("place_of_birth", self.place_of_birth.as_str()),
            ("expiry_date", self.expiry_date.as_str()),
            ("verification_status", self.verification_status.as_str()),
        ]
    }

    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified
    }
}

/// Result of running the field extractor over one fragment list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// True when every required field was found.
    pub success: bool,

    /// The record, populated as far as extraction got.
    pub data: IdentityRecord,
}

/// Response body of the text-extraction service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub extracted_text: Vec<TextFragment>,
}

/// Response body of the face-comparison service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceMatchResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(rename = "match", default)]
    pub is_match: bool,
}

impl FaceMatchResponse {
    /// Both the call and the comparison succeeded.
    pub fn is_confirmed(&self) -> bool {
        self.success && self.is_match
    }
}
