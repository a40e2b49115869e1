//! Global constants for the viewer

/// Number of numbered jump buttons shown per page
pub const JUMP_PAGE_SIZE: usize = 9;

/// Placeholder row shown when a descriptor list is empty
pub const NO_DESCRIPTORS: &str = "No descriptors found.";

/// Object keys that may hold a descriptor list, checked in this order
pub const DESCRIPTOR_LIST_KEYS: &[&str] = &["descriptors", "attributes", "captions", "descriptor_list"];

/// Default directory holding the two manifests
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default directory holding one `<species>.json` per species
pub const DEFAULT_DESCRIPTOR_DIR: &str = "data/descriptors";

/// Image index manifest filename
pub const IMAGES_INDEX_FILE: &str = "images_index.json";

/// Class-to-species manifest filename
pub const CLASS_TO_SPECIES_FILE: &str = "class_to_species.json";
