//! Captured ID and selfie images.
//!
//! Browser captures arrive as `data:` URLs; CLI captures are files on disk.
//! Both end up as a `CapturedImage` ready for a multipart upload.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::error::CaptureError;
use crate::identity::rules::patterns::DATA_URL;

/// Which picture of the attempt an image is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRole {
    Front,
    Back,
    Selfie,
}

impl ImageRole {
    /// File name used when uploading the image.
    pub fn upload_name(self) -> &'static str {
        match self {
            Self::Front => "front-id.jpg",
            Self::Back => "back-id.jpg",
            Self::Selfie => "selfie.jpg",
        }
    }
}

/// An image ready to be sent to a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    bytes: Vec<u8>,
    mime: String,
    file_name: String,
}

impl CapturedImage {
    /// Wrap raw bytes. Empty captures are rejected.
    pub fn new(
        bytes: Vec<u8>,
        mime: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Result<Self, CaptureError> {
        if bytes.is_empty() {
            return Err(CaptureError::Empty);
        }
        Ok(Self {
            bytes,
            mime: mime.into(),
            file_name: file_name.into(),
        })
    }

    /// Decode a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str, file_name: impl Into<String>) -> Result<Self, CaptureError> {
        let caps = DATA_URL.captures(url.trim()).ok_or(CaptureError::NotDataUrl)?;

        let mime = &caps[1];
        if mime.is_empty() {
            return Err(CaptureError::MissingMime);
        }
        if !caps[2].split(';').any(|param| param.eq_ignore_ascii_case("base64")) {
            return Err(CaptureError::NotBase64);
        }

        let bytes = STANDARD.decode(caps[3].trim())?;
        Self::new(bytes, mime, file_name)
    }

    /// Read an image file, sniffing the format from its content.
    #[cfg(feature = "native")]
    pub fn from_path(path: &std::path::Path) -> Result<Self, CaptureError> {
        let bytes = std::fs::read(path).map_err(|source| CaptureError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(CaptureError::Empty);
        }

        let format = image::guess_format(&bytes)
            .or_else(|_| image::ImageFormat::from_path(path))
            .map_err(|e| CaptureError::UnsupportedImage(e.to_string()))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();

        tracing::debug!(
            "Loaded {} ({:?}, {} bytes)",
            path.display(),
            format,
            bytes.len()
        );

        Self::new(bytes, format.to_mime_type(), file_name)
    }

    /// Encode back into a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// Replace the upload file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
