//! Data models for the dataset manifests.

mod class_map;
mod image_entry;

pub use class_map::ClassMap;
pub use image_entry::ImageEntry;
