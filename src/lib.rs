//! LocShots Core - Localized Screenshot Batch Pipeline
//!
//! Manifest-driven substitution and export for localized marketing
//! screenshots:
//! 1. A JSON manifest declares an output root and a list of languages.
//! 2. Per language, placeholder layers named `[key]` receive replacement
//!    text and images.
//! 3. Exportable layers are exported as PNG to the language's primary
//!    destination and mirrored to every additional destination.
//!
//! The output root is cleaned once per run before any language is
//! processed; per-language resource problems are warnings, never batch
//! aborts.

pub mod export;
pub mod fs;
pub mod manifest;
pub mod notice;
pub mod placeholder;
pub mod pipeline;
pub mod resources;
pub mod scene;
pub mod substitute;

pub use fs::{FileStore, OsFileStore};
pub use manifest::{LanguageSpec, Manifest, ManifestError, MANIFEST_FILE_NAME};
pub use notice::{ConsoleNotice, NoticeSink, RecordingNotice};
pub use pipeline::{Pipeline, PipelineError, RunOutcome, RunState};
pub use resources::{ReplacementImage, StringsTable, SUPPORTED_IMAGE_EXTENSIONS};
pub use scene::{
    Document, ExportFormat, Layer, LayerExporter, LayerScope, Override, Page, PngExporter,
    SceneGraph,
};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
