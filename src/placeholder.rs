//! Placeholder Resolution
//!
//! A manifest key `k` binds to every scene layer named exactly `[k]`. An
//! empty match set is legitimate: a manifest may declare more keys than the
//! design currently uses, or vice versa.

use crate::scene::{Layer, LayerScope, SceneGraph};

/// The literal layer-name pattern for a key: square-bracket wrapped.
pub fn pattern(key: &str) -> String {
    format!("[{key}]")
}

/// Layers bound to `key` under `scope`, in page-then-layer order.
pub fn resolve<'a>(
    scene: &'a mut dyn SceneGraph,
    key: &str,
    scope: LayerScope,
) -> Vec<&'a mut Layer> {
    scene.find_named(&pattern(key), scope)
}
