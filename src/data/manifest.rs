//! Manifest loading: the image index and the class-to-species map.

use serde_json::Value;
use web_time::Instant;

use super::source::{DataSource, join_path};
use crate::constants::{CLASS_TO_SPECIES_FILE, IMAGES_INDEX_FILE};
use crate::error::{Result, ViewerError};
use crate::model::{ClassMap, ImageEntry};

/// Both manifests of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifests {
    /// Images in index order, each with a path and species
    pub images: Vec<ImageEntry>,
    /// Class-to-species mapping
    pub classes: ClassMap,
}

/// Parse the image index, dropping entries without a path or species.
pub fn parse_image_index(text: &str, path: &str) -> Result<Vec<ImageEntry>> {
    let raw: Vec<Value> = serde_json::from_str(text).map_err(|e| ViewerError::json(path, e))?;
    let total = raw.len();
    let images: Vec<ImageEntry> = raw.iter().filter_map(ImageEntry::from_value).collect();

    if images.len() < total {
        log::debug!(
            "Dropped {} of {} image index entries without image_path/species",
            total - images.len(),
            total
        );
    }

    Ok(images)
}

/// Parse the class-to-species map.
pub fn parse_class_map(text: &str, path: &str) -> Result<ClassMap> {
    serde_json::from_str(text).map_err(|e| ViewerError::json(path, e))
}

/// Fetch and parse both manifests from `data_dir`.
///
/// Any failure here is fatal for startup.
pub async fn load_manifests<S: DataSource>(source: &S, data_dir: &str) -> Result<Manifests> {
    let start = Instant::now();

    let index_path = join_path(data_dir, IMAGES_INDEX_FILE);
    let index_text = source.fetch_text(&index_path).await?;
    let images = parse_image_index(&index_text, &index_path)?;

    let classes_path = join_path(data_dir, CLASS_TO_SPECIES_FILE);
    let classes_text = source.fetch_text(&classes_path).await?;
    let classes = parse_class_map(&classes_text, &classes_path)?;

    log::info!(
        "Loaded {} images and {} classes in {:.1}ms",
        images.len(),
        classes.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(Manifests { images, classes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemorySource;

    const INDEX: &str = r#"[
        { "image_path": "img/1.jpg", "species": "barn_owl", "class_name": "0" },
        { "image_path": "img/2.jpg" },
        { "species": "snowy_owl" },
        { "image_path": "img/3.jpg", "species": "snowy_owl" }
    ]"#;

    const CLASSES: &str = r#"{ "0": ["barn_owl", "snowy_owl"] }"#;

    #[test]
    fn test_parse_image_index_drops_incomplete() {
        let images = parse_image_index(INDEX, "images_index.json").unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].species, "barn_owl");
        assert_eq!(images[0].class_name.as_deref(), Some("0"));
        assert_eq!(images[1].image_path, "img/3.jpg");
    }

    #[test]
    fn test_parse_image_index_rejects_non_array() {
        let err = parse_image_index(r#"{"image_path": "a"}"#, "images_index.json").unwrap_err();
        assert!(matches!(err, ViewerError::Json { .. }));
    }

    #[test]
    fn test_load_manifests() {
        let source = MemorySource::new()
            .with_file("data/images_index.json", INDEX)
            .with_file("data/class_to_species.json", CLASSES);

        let manifests = pollster::block_on(load_manifests(&source, "data")).unwrap();
        assert_eq!(manifests.images.len(), 2);
        assert_eq!(manifests.classes.len(), 1);
    }

    #[test]
    fn test_missing_class_map_is_fatal() {
        let source = MemorySource::new().with_file("data/images_index.json", INDEX);
        let err = pollster::block_on(load_manifests(&source, "data")).unwrap_err();
        assert!(matches!(err, ViewerError::Http { status: 404, .. }));
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        let source = MemorySource::new()
            .with_file("data/images_index.json", "[{")
            .with_file("data/class_to_species.json", CLASSES);
        let err = pollster::block_on(load_manifests(&source, "data")).unwrap_err();
        assert!(err.to_string().contains("data/images_index.json"));
    }
}
