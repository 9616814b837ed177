//! Error types for the idcheck-core library.

use thiserror::Error;

/// Main error type for the idcheck library.
#[derive(Error, Debug)]
pub enum IdCheckError {
    /// Image capture or decoding error.
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Verification flow error.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to captured images.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The string is not a `data:` URL.
    #[error("not a data URL")]
    NotDataUrl,

    /// The data URL carries no MIME type.
    #[error("data URL has no MIME type")]
    MissingMime,

    /// Only base64 payloads are supported.
    #[error("data URL payload is not base64-encoded")]
    NotBase64,

    /// The base64 payload failed to decode.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The capture holds no bytes.
    #[error("image is empty")]
    Empty,

    /// The bytes are not a recognised image format.
    #[error("unsupported image: {0}")]
    UnsupportedImage(String),

    /// Reading the image file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that end a verification attempt.
///
/// The display strings are the messages shown to the person being verified.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// Face comparison failed or reported no match.
    #[error("Face verification failed. Please try again.")]
    FaceMismatch,

    /// Text extraction service reported failure.
    #[error("Failed to extract information from ID.")]
    TextExtractionFailed,

    /// Fields were missing after parsing the OCR output.
    #[error("Could not extract all required information from ID. Please try again with a clearer image.")]
    IncompleteExtraction,

    /// Transport or protocol failure talking to a service.
    #[error("{service} service error: {message}")]
    Service {
        service: &'static str,
        message: String,
    },
}

impl VerificationError {
    pub fn service(service: &'static str, message: impl Into<String>) -> Self {
        Self::Service {
            service,
            message: message.into(),
        }
    }
}

/// Result type for the idcheck library.
pub type Result<T> = std::result::Result<T, IdCheckError>;
