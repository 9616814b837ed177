//! Subcommands of the idcheck CLI.

pub mod batch;
pub mod config;
pub mod parse;
pub mod verify;

use std::path::{Path, PathBuf};

use tracing::debug;

use idcheck_core::models::config::IdCheckConfig;
use idcheck_core::models::identity::{OcrResponse, TextFragment};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("idcheck")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<IdCheckConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(IdCheckConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(IdCheckConfig::from_file(&default_path)?)
    } else {
        Ok(IdCheckConfig::default())
    }
}

/// Read OCR output saved as JSON.
///
/// Accepts either the full service response or a bare fragment array. A bare
/// array is treated as a successful response.
pub fn read_ocr_file(path: &Path) -> anyhow::Result<OcrResponse> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    if value.is_array() {
        let fragments: Vec<TextFragment> = serde_json::from_value(value)?;
        Ok(OcrResponse {
            success: true,
            extracted_text: fragments,
        })
    } else {
        Ok(serde_json::from_value(value)?)
    }
}
