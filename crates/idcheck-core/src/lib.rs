//! Core library for ID card verification.
//!
//! This crate provides:
//! - Identity field extraction from OCR fragments (names, card number, dates, place of birth)
//! - Card layouts mapping reading-order positions to name fields
//! - Captured image handling (files and `data:` URLs)
//! - The face-match / OCR / extraction verification flow

pub mod capture;
pub mod error;
pub mod identity;
pub mod models;
pub mod verify;

pub use capture::{CapturedImage, ImageRole};
pub use error::{CaptureError, IdCheckError, Result, VerificationError};
pub use identity::{CardLayout, Classification, IdentityExtractor, IdentityParser, NameField};
pub use identity::rules::DateOrder;
pub use models::config::IdCheckConfig;
pub use models::identity::{
    ExtractionOutcome, FaceMatchResponse, IdentityRecord, OcrResponse, TextFragment,
    VerificationStatus,
};
pub use models::wizard::WizardStep;
pub use verify::{FaceMatcher, TextExtractor, VerificationAttempt, Verifier};
