//! Loading of the dataset manifests and per-species descriptor files.
//!
//! This module provides:
//! - `DataSource`: where JSON documents come from (HTTP fetch in the browser,
//!   the filesystem on native)
//! - `load_manifests`: the image index and class map, fetched once at startup
//! - `DescriptorLoader`: per-species descriptor lists behind a session cache
//!
//! ## Adding New Sources
//!
//! Implement `DataSource::fetch_text` and hand the source to the loaders:
//!
//! ```rust,ignore
//! use specview::data::{DataSource, DescriptorLoader};
//!
//! let loader = DescriptorLoader::new(MySource::new(), "data/descriptors");
//! let descriptors = loader.load("barn_owl").await;
//! ```

mod descriptors;
mod manifest;
mod source;

pub use descriptors::{
    DescriptorCache, DescriptorLoader, DescriptorShape, class_only_descriptors,
    dedupe_preserving_order, normalize_descriptor_list,
};
pub use manifest::{Manifests, load_manifests, parse_class_map, parse_image_index};
pub use source::{DataSource, join_path};

#[cfg(not(target_arch = "wasm32"))]
pub use source::FsSource;

#[cfg(target_arch = "wasm32")]
pub use source::FetchSource;

#[cfg(test)]
pub(crate) use source::MemorySource;
