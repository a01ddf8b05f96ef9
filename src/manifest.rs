//! Manifest Loading and Validation
//!
//! The manifest is the top-level JSON configuration driving one full run.
//! Validation happens before any side effect: a run with a bad manifest
//! never touches the file system.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Conventional manifest file name, looked up next to the scene document.
pub const MANIFEST_FILE_NAME: &str = "screenshots.manifest.json";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Manifest is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Reported to the user as "No output folder defined".
    #[error("No output folder defined")]
    NoOutput,

    /// Reported to the user as "No languages defined".
    #[error("No languages defined")]
    NoLanguages,
}

/// One localized target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSpec {
    /// Relative path to a key-to-text JSON mapping file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strings: Option<PathBuf>,

    /// Relative path to a folder of replacement images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<PathBuf>,

    /// Second image folder, processed identically to `screenshots`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<PathBuf>,

    /// `output[0]` is the primary export destination; the rest are mirrors
    /// populated by verbatim copy of the primary after export.
    #[serde(default)]
    pub output: Vec<PathBuf>,
}

impl LanguageSpec {
    /// Declared image folders in processing order (screenshots, then images).
    pub fn image_folders(&self) -> impl Iterator<Item = &PathBuf> {
        self.screenshots.iter().chain(self.images.iter())
    }
}

/// Validated root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawManifest")]
pub struct Manifest {
    pub output: PathBuf,
    pub languages: Vec<LanguageSpec>,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    output: Option<PathBuf>,
    #[serde(default)]
    languages: Option<Vec<LanguageSpec>>,
}

impl TryFrom<RawManifest> for Manifest {
    type Error = ManifestError;

    fn try_from(raw: RawManifest) -> Result<Self, Self::Error> {
        let output = raw.output.ok_or(ManifestError::NoOutput)?;
        let languages = raw.languages.unwrap_or_default();
        if languages.is_empty() {
            return Err(ManifestError::NoLanguages);
        }
        Ok(Manifest { output, languages })
    }
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self, ManifestError> {
        let raw: RawManifest = serde_json::from_str(content)?;
        Manifest::try_from(raw)
    }
}
