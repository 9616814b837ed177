//! Configuration structures for the verification pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{IdCheckError, Result};
use crate::identity::layout::CardLayout;
use crate::identity::rules::{DateOrder, DEFAULT_PLACE_PREFIXES};

/// Main configuration for idcheck.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdCheckConfig {
    /// Remote face-match and OCR services.
    pub services: ServiceConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Endpoints of the face-comparison and text-extraction services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL shared by both services.
    pub base_url: String,

    /// Path of the face-comparison endpoint.
    pub face_match_path: String,

    /// Path of the text-extraction endpoint.
    pub ocr_path: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            face_match_path: "/api/compare-faces".to_string(),
            ocr_path: "/api/extract-text".to_string(),
            timeout_secs: 30,
            user_agent: format!("idcheck/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ServiceConfig {
    /// Full URL of the face-comparison endpoint.
    pub fn face_match_url(&self) -> String {
        join_url(&self.base_url, &self.face_match_path)
    }

    /// Full URL of the text-extraction endpoint.
    pub fn ocr_url(&self) -> String {
        join_url(&self.base_url, &self.ocr_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Header cut-off and name positions.
    pub layout: CardLayout,

    /// Ordering applied before picking birth and expiry dates.
    pub date_order: DateOrder,

    /// Prefixes that introduce the place of birth.
    pub place_prefixes: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            layout: CardLayout::default(),
            date_order: DateOrder::Lexicographic,
            place_prefixes: DEFAULT_PLACE_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty_json: true }
    }
}

impl IdCheckConfig {
    /// Load and validate configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings that would make every extraction fail.
    pub fn validate(&self) -> Result<()> {
        if self.services.timeout_secs == 0 {
            return Err(IdCheckError::Config("services.timeout_secs must be positive".to_string()));
        }
        if self.extraction.place_prefixes.is_empty() {
            return Err(IdCheckError::Config(
                "extraction.place_prefixes needs at least one prefix".to_string(),
            ));
        }
        if self.extraction.place_prefixes.iter().any(|p| p.is_empty()) {
            return Err(IdCheckError::Config(
                "extraction.place_prefixes must not contain an empty prefix".to_string(),
            ));
        }
        let layout = &self.extraction.layout;
        if let Some(order) = layout.positions.keys().find(|o| layout.is_header(**o)) {
            return Err(IdCheckError::Config(format!(
                "extraction.layout position {} falls inside the header (skip_through = {})",
                order, layout.skip_through
            )));
        }
        Ok(())
    }
}
