//! Text and Image Substitution
//!
//! Raw content replacement on placeholder-bound layers. No interpolation,
//! escaping, or formatting; the scene graph owns layer structure and only
//! content fields are mutated.

use log::debug;

use crate::placeholder;
use crate::resources::{ReplacementImage, StringsTable};
use crate::scene::{Layer, LayerScope, SceneGraph, IMAGE_PROPERTY};

/// Set every text layer named `[key]` to the table's value, for every key.
/// Returns the number of layers modified.
pub fn apply_strings(scene: &mut dyn SceneGraph, table: &StringsTable) -> usize {
    let mut replaced = 0;
    for (key, value) in table {
        for layer in placeholder::resolve(scene, key, LayerScope::TextOnly) {
            if let Layer::Text { text, .. } = layer {
                *text = value.clone();
                replaced += 1;
            }
        }
        debug!("text key {key:?} applied");
    }
    replaced
}

/// Apply each replacement image to its bound layers. Direct image slots are
/// replaced outright; group overrides are replaced only where the target
/// property is the image property. A coincidental match with neither is
/// left unmodified.
pub fn apply_images(scene: &mut dyn SceneGraph, images: &[ReplacementImage]) -> usize {
    let mut replaced = 0;
    for replacement in images {
        for layer in placeholder::resolve(scene, &replacement.key, LayerScope::Any) {
            match layer {
                Layer::Image { image, .. } => {
                    *image = Some(replacement.path.clone());
                    replaced += 1;
                }
                Layer::Group { overrides, .. } => {
                    for override_slot in overrides {
                        if override_slot.property != IMAGE_PROPERTY {
                            continue;
                        }
                        override_slot.value = replacement.path.to_string_lossy().into_owned();
                        replaced += 1;
                    }
                }
                Layer::Text { .. } | Layer::Other { .. } => {}
            }
        }
    }
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Document, Override, Page};
    use std::path::PathBuf;

    fn doc_with(layers: Vec<Layer>) -> Document {
        Document {
            pages: vec![Page {
                name: "Screens".to_string(),
                is_symbols_page: false,
                layers,
            }],
        }
    }

    fn text_layer(name: &str) -> Layer {
        Layer::Text {
            name: name.to_string(),
            text: "placeholder".to_string(),
            export_formats: vec![],
        }
    }

    #[test]
    fn strings_are_assigned_verbatim_including_emoji() {
        let mut doc = doc_with(vec![text_layer("[title]"), text_layer("[subtitle]")]);
        let mut table = StringsTable::new();
        table.insert("title".to_string(), "Hello 🚀 wörld".to_string());

        let replaced = apply_strings(&mut doc, &table);

        assert_eq!(replaced, 1);
        match &doc.pages[0].layers[0] {
            Layer::Text { text, .. } => assert_eq!(text, "Hello 🚀 wörld"),
            other => panic!("unexpected variant: {other:?}"),
        }
        match &doc.pages[0].layers[1] {
            Layer::Text { text, .. } => assert_eq!(text, "placeholder"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn image_replaces_direct_slot() {
        let mut doc = doc_with(vec![Layer::Image {
            name: "[hero]".to_string(),
            image: Some(PathBuf::from("old.png")),
            export_formats: vec![],
        }]);
        let images = [ReplacementImage {
            key: "hero".to_string(),
            path: PathBuf::from("/assets/de/hero.png"),
        }];

        assert_eq!(apply_images(&mut doc, &images), 1);
        match &doc.pages[0].layers[0] {
            Layer::Image { image, .. } => {
                assert_eq!(image.as_deref(), Some(PathBuf::from("/assets/de/hero.png").as_path()));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn image_replaces_only_image_overrides() {
        let mut doc = doc_with(vec![Layer::Group {
            name: "[hero]".to_string(),
            overrides: vec![
                Override { property: "image".to_string(), value: "old.png".to_string() },
                Override { property: "text".to_string(), value: "keep me".to_string() },
            ],
            export_formats: vec![],
        }]);
        let images = [ReplacementImage {
            key: "hero".to_string(),
            path: PathBuf::from("new.png"),
        }];

        assert_eq!(apply_images(&mut doc, &images), 1);
        match &doc.pages[0].layers[0] {
            Layer::Group { overrides, .. } => {
                assert_eq!(overrides[0].value, "new.png");
                assert_eq!(overrides[1].value, "keep me");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn coincidental_text_match_is_left_unmodified() {
        let mut doc = doc_with(vec![text_layer("[hero]")]);
        let images = [ReplacementImage {
            key: "hero".to_string(),
            path: PathBuf::from("new.png"),
        }];

        assert_eq!(apply_images(&mut doc, &images), 0);
        match &doc.pages[0].layers[0] {
            Layer::Text { text, .. } => assert_eq!(text, "placeholder"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
