//! Export Planning and Output Replication
//!
//! Selects exportable layers per page, exports them as PNG into a language's
//! primary destination, then mirrors the primary to every additional
//! destination. Export and copy failures are best-effort: reported, then the
//! remaining layers and destinations are still attempted.

use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::fs::FileStore;
use crate::notice::NoticeSink;
use crate::scene::{LayerExporter, SceneGraph};

/// Export every exportable layer of every non-symbols page into `primary`,
/// in page-then-layer order. Returns the number of files exported.
pub fn export_pages(
    scene: &dyn SceneGraph,
    exporter: &dyn LayerExporter,
    primary: &Path,
    notices: &mut dyn NoticeSink,
) -> usize {
    let mut exported = 0;
    for page in scene.pages() {
        if page.is_symbols_page {
            debug!("skipping symbols page {:?}", page.name);
            continue;
        }
        for layer in &page.layers {
            if !layer.is_exportable() {
                continue;
            }
            match exporter.export(layer, primary) {
                Ok(path) => {
                    debug!("exported {:?} to {}", layer.name(), path.display());
                    exported += 1;
                }
                Err(e) => {
                    warn!("export of {:?} failed: {e}", layer.name());
                    notices.message(&format!("⚠️ Could not export {}", layer.name()));
                }
            }
        }
    }
    info!("exported {exported} layers to {}", primary.display());
    exported
}

/// Copy the primary destination's contents, recursively, to each mirror in
/// `outputs[1..]`. Each mirror is independent; a failed copy is reported and
/// the rest are still attempted.
pub fn replicate_outputs(
    files: &dyn FileStore,
    output_root: &Path,
    outputs: &[PathBuf],
    notices: &mut dyn NoticeSink,
) {
    let Some((primary, mirrors)) = outputs.split_first() else {
        return;
    };
    let source = output_root.join(primary);
    for mirror in mirrors {
        let destination = output_root.join(mirror);
        match files.copy_tree(&source, &destination) {
            Ok(()) => debug!("mirrored {} to {}", source.display(), destination.display()),
            Err(e) => {
                warn!("mirror copy to {} failed: {e}", destination.display());
                notices.message(&format!("⚠️ Could not copy output to {}", mirror.display()));
            }
        }
    }
}
