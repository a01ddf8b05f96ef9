//! Pipeline Orchestration - Single Entry Point
//!
//! Sequences manifest loading, output cleaning, per-language substitution,
//! export, and replication. Languages are isolated: one language's missing
//! resource never skips another language. No retries anywhere; failures are
//! either absorbed as warnings or abort the whole run at manifest level.

use log::{debug, info, warn};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::export;
use crate::fs::FileStore;
use crate::manifest::{LanguageSpec, Manifest, ManifestError};
use crate::notice::NoticeSink;
use crate::resources;
use crate::scene::{LayerExporter, SceneGraph};
use crate::substitute;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to read manifest: {0}")]
    ManifestRead(#[source] io::Error),

    #[error("Manifest is not valid JSON: {0}")]
    ManifestSyntax(#[source] serde_json::Error),

    #[error("Failed to clean output folder {0}: {1}")]
    CleanOutput(PathBuf, #[source] io::Error),
}

/// Orchestrator state, advanced strictly forward during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Loading,
    CleaningOutput,
    ProcessingLanguage(usize),
    Done,
    Aborted,
}

/// Terminal status of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// All languages processed; per-language warnings may have been issued.
    Completed { languages: usize, exported: usize },
    /// Configuration error; no side effect was performed.
    Aborted,
}

/// The pipeline - single entry point for a full generation run.
///
/// All collaborators are injected: the scene graph, the file store, the
/// export operation, and the notice channel.
pub struct Pipeline<'a> {
    scene: &'a mut dyn SceneGraph,
    files: &'a dyn FileStore,
    exporter: &'a dyn LayerExporter,
    notices: &'a mut dyn NoticeSink,
    state: RunState,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        scene: &'a mut dyn SceneGraph,
        files: &'a dyn FileStore,
        exporter: &'a dyn LayerExporter,
        notices: &'a mut dyn NoticeSink,
    ) -> Self {
        Self {
            scene,
            files,
            exporter,
            notices,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the full pipeline for the manifest at `manifest_path`. Relative
    /// paths inside the manifest resolve against the manifest's directory.
    pub fn run(&mut self, manifest_path: &Path) -> Result<RunOutcome, PipelineError> {
        self.state = RunState::Loading;

        let content = self
            .files
            .read_to_string(manifest_path)
            .map_err(PipelineError::ManifestRead)?;
        let manifest = match Manifest::parse(&content) {
            Ok(manifest) => manifest,
            Err(ManifestError::Json(e)) => return Err(PipelineError::ManifestSyntax(e)),
            Err(config @ (ManifestError::NoOutput | ManifestError::NoLanguages)) => {
                self.notices.message(&format!("⚠️ {config}"));
                self.state = RunState::Aborted;
                return Ok(RunOutcome::Aborted);
            }
        };

        let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));
        let output_root = base.join(&manifest.output);

        // Sole destructive side effect: recreate the output root exactly
        // once per run, only after validation passed.
        self.state = RunState::CleaningOutput;
        self.files
            .remove_dir_all(&output_root)
            .map_err(|e| PipelineError::CleanOutput(output_root.clone(), e))?;
        debug!("cleaned output root {}", output_root.display());

        let mut exported = 0;
        for (index, language) in manifest.languages.iter().enumerate() {
            self.state = RunState::ProcessingLanguage(index);
            exported += self.process_language(language, base, &output_root);
        }

        self.state = RunState::Done;
        self.notices.message("All done! 🚀");
        info!(
            "run complete: {} languages, {exported} exports",
            manifest.languages.len()
        );
        Ok(RunOutcome::Completed {
            languages: manifest.languages.len(),
            exported,
        })
    }

    fn process_language(
        &mut self,
        language: &LanguageSpec,
        base: &Path,
        output_root: &Path,
    ) -> usize {
        self.apply_strings(language, base);
        self.apply_images(language, base);

        let Some(primary) = language.output.first() else {
            self.notices.message("⚠️ No output defined for language");
            return 0;
        };
        let primary = output_root.join(primary);
        if let Err(e) = self.files.create_dir_all(&primary) {
            warn!("could not create {}: {e}", primary.display());
            self.notices.message(&format!(
                "⚠️ Could not create output folder {}",
                primary.display()
            ));
            return 0;
        }

        let exported =
            export::export_pages(&*self.scene, self.exporter, &primary, &mut *self.notices);
        export::replicate_outputs(self.files, output_root, &language.output, &mut *self.notices);
        exported
    }

    fn apply_strings(&mut self, language: &LanguageSpec, base: &Path) {
        let Some(relative) = &language.strings else {
            return;
        };
        let path = base.join(relative);
        if !self.files.exists(&path) {
            self.notices.message("⚠️ Language file not found!");
            return;
        }
        match resources::load_strings(self.files, &path) {
            Ok(table) => {
                let replaced = substitute::apply_strings(&mut *self.scene, &table);
                debug!("replaced {replaced} text layers from {}", path.display());
            }
            Err(e) => {
                warn!("strings file {} unusable: {e}", path.display());
                self.notices.message("⚠️ Language file could not be read!");
            }
        }
    }

    fn apply_images(&mut self, language: &LanguageSpec, base: &Path) {
        for relative in language.image_folders() {
            let folder = base.join(relative);
            match resources::scan_images(self.files, &folder) {
                Ok(images) => {
                    let replaced = substitute::apply_images(&mut *self.scene, &images);
                    debug!(
                        "replaced {replaced} image slots from {} candidates in {}",
                        images.len(),
                        folder.display()
                    );
                }
                Err(e) => {
                    warn!("image folder {} unusable: {e}", folder.display());
                    self.notices.message("⚠️ Image folder not found!");
                }
            }
        }
    }
}
