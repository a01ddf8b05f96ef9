//! Resource Location
//!
//! Resolves a language's declared relative paths against the manifest's base
//! directory and loads the resources the substitutors consume. Absence of a
//! declared field is never an error; only failing to resolve a declared one
//! is worth a warning.

use log::debug;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::fs::FileStore;

/// Image file extensions eligible as replacements, matched
/// case-insensitively.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Placeholder key to replacement text. Arbitrary Unicode content, emoji
/// included; assigned verbatim.
pub type StringsTable = BTreeMap<String, String>;

/// A located replacement image: key is the file stem, path is resolvable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementImage {
    pub key: String,
    pub path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Failed to read strings file: {0}")]
    Io(#[from] io::Error),

    #[error("Strings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_strings(files: &dyn FileStore, path: &Path) -> Result<StringsTable, ResourceError> {
    let content = files.read_to_string(path)?;
    let table: StringsTable = serde_json::from_str(&content)?;
    debug!("loaded {} string keys from {}", table.len(), path.display());
    Ok(table)
}

/// List a replacement-image folder. Files with an unsupported extension are
/// silently ignored; order follows the store's deterministic listing.
pub fn scan_images(files: &dyn FileStore, folder: &Path) -> io::Result<Vec<ReplacementImage>> {
    let mut images = Vec::new();
    for path in files.list_dir(folder)? {
        if !has_supported_extension(&path) {
            debug!("ignoring unsupported file {}", path.display());
            continue;
        }
        let Some(stem) = path.file_stem() else { continue };
        images.push(ReplacementImage {
            key: stem.to_string_lossy().into_owned(),
            path,
        });
    }
    Ok(images)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy())
        .map(|ext| {
            SUPPORTED_IMAGE_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
        .unwrap_or(false)
}
