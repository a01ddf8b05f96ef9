//! Scene Model - Tagged Layer Variants
//!
//! The host document is an explicit, serde-loadable scene graph. Substitution
//! logic dispatches over layer variants instead of probing for fields.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Layer property name carrying image content in an override set.
pub const IMAGE_PROPERTY: &str = "image";

/// Minimal 1x1 transparent PNG, written when a layer has no bitmap of its own.
pub const PLACEHOLDER_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A,
    0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
    0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4,
    0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41,
    0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00,
    0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
    0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE,
    0x42, 0x60, 0x82,
];

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Failed to read scene document: {0}")]
    Io(#[from] io::Error),

    #[error("Scene document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Export-format rule declared on a layer. Presence of at least one rule
/// marks the layer exportable; the pipeline always emits PNG.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpg,
    Svg,
    Pdf,
}

/// One content override exposed by a group or symbol instance. Only
/// overrides whose `property` is [`IMAGE_PROPERTY`] are image-substitutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Override {
    pub property: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Layer {
    Text {
        name: String,
        text: String,
        #[serde(default)]
        export_formats: Vec<ExportFormat>,
    },
    Image {
        name: String,
        /// Path of the bitmap currently backing this layer, if any.
        #[serde(default)]
        image: Option<PathBuf>,
        #[serde(default)]
        export_formats: Vec<ExportFormat>,
    },
    Group {
        name: String,
        #[serde(default)]
        overrides: Vec<Override>,
        #[serde(default)]
        export_formats: Vec<ExportFormat>,
    },
    Other {
        name: String,
        #[serde(default)]
        export_formats: Vec<ExportFormat>,
    },
}

impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Layer::Text { name, .. }
            | Layer::Image { name, .. }
            | Layer::Group { name, .. }
            | Layer::Other { name, .. } => name,
        }
    }

    pub fn export_formats(&self) -> &[ExportFormat] {
        match self {
            Layer::Text { export_formats, .. }
            | Layer::Image { export_formats, .. }
            | Layer::Group { export_formats, .. }
            | Layer::Other { export_formats, .. } => export_formats,
        }
    }

    /// A layer is exportable iff it carries at least one export-format rule.
    pub fn is_exportable(&self) -> bool {
        !self.export_formats().is_empty()
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Layer::Text { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub name: String,
    /// Symbols pages hold reusable component definitions and are never
    /// export targets.
    #[serde(default)]
    pub is_symbols_page: bool,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// Scope filter for placeholder lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerScope {
    /// Text substitution only targets text-capable layers.
    TextOnly,
    /// Image substitution matches any layer kind.
    Any,
}

/// Queryable, mutable scene graph consumed by the pipeline. Implemented by
/// [`Document`]; substitutable with fakes in tests.
pub trait SceneGraph {
    /// All layers (page order, then layer order) whose name equals `name`,
    /// restricted by `scope`.
    fn find_named(&mut self, name: &str, scope: LayerScope) -> Vec<&mut Layer>;

    /// Pages in their natural order.
    fn pages(&self) -> &[Page];
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    pub fn load_from_file(path: &Path) -> Result<Self, SceneError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl SceneGraph for Document {
    fn find_named(&mut self, name: &str, scope: LayerScope) -> Vec<&mut Layer> {
        self.pages
            .iter_mut()
            .flat_map(|page| page.layers.iter_mut())
            .filter(|layer| layer.name() == name)
            .filter(|layer| match scope {
                LayerScope::TextOnly => layer.is_text(),
                LayerScope::Any => true,
            })
            .collect()
    }

    fn pages(&self) -> &[Page] {
        &self.pages
    }
}

/// Export operation consumed by the planner: produce one PNG named after the
/// layer inside `folder`, overwriting any existing file.
pub trait LayerExporter {
    fn export(&self, layer: &Layer, folder: &Path) -> io::Result<PathBuf>;
}

/// Default exporter. Writes the layer's backing bitmap verbatim when it has
/// one, the placeholder PNG otherwise. No transcoding is performed.
pub struct PngExporter;

impl LayerExporter for PngExporter {
    fn export(&self, layer: &Layer, folder: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(folder)?;
        let destination = folder.join(format!("{}.png", layer.name()));
        match layer {
            Layer::Image { image: Some(source), .. } if source.is_file() => {
                fs::copy(source, &destination)?;
            }
            _ => {
                fs::write(&destination, PLACEHOLDER_PNG)?;
            }
        }
        Ok(destination)
    }
}
