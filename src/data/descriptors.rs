//! Per-species descriptor lists.
//!
//! Descriptor files come in a few shapes. Normalization tries each
//! [`DescriptorShape`] in order and keeps the first match, then trims,
//! drops empty strings and removes duplicates.

use std::cell::RefCell;
use std::collections::HashMap;

use futures::future::join_all;
use serde_json::Value;

use super::source::{DataSource, join_path};
use crate::constants::DESCRIPTOR_LIST_KEYS;
use crate::model::{ClassMap, ImageEntry};

/// Accepted layouts of a descriptor file, in matching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorShape {
    /// `["spotted", "striped"]`
    List,
    /// `{"attributes": [...]}` under one of the known keys
    KeyedList,
    /// `{"a": "spotted", "b": "striped"}`
    StringValues,
}

impl DescriptorShape {
    /// All shapes in the order they are tried.
    pub const ALL: &'static [DescriptorShape] = &[
        DescriptorShape::List,
        DescriptorShape::KeyedList,
        DescriptorShape::StringValues,
    ];

    /// Extract the raw strings if the payload has this shape.
    pub fn extract(self, payload: &Value) -> Option<Vec<String>> {
        match self {
            DescriptorShape::List => payload.as_array().map(|items| stringify_all(items)),
            DescriptorShape::KeyedList => {
                let object = payload.as_object()?;
                DESCRIPTOR_LIST_KEYS
                    .iter()
                    .find_map(|key| object.get(*key).and_then(Value::as_array))
                    .map(|items| stringify_all(items))
            }
            DescriptorShape::StringValues => {
                let object = payload.as_object()?;
                if object.is_empty() {
                    return None;
                }
                object
                    .values()
                    .map(|v| v.as_str().map(str::to_string))
                    .collect()
            }
        }
    }
}

fn stringify_all(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .collect()
}

/// Remove duplicates, keeping the first occurrence of each string.
pub fn dedupe_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Normalize a descriptor payload into a clean list.
///
/// Unrecognized payloads yield an empty list.
pub fn normalize_descriptor_list(payload: &Value) -> Vec<String> {
    let raw = DescriptorShape::ALL
        .iter()
        .find_map(|shape| shape.extract(payload))
        .unwrap_or_default();

    dedupe_preserving_order(
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    )
}

/// Descriptors of the sibling union that the current species doesn't already list.
pub fn class_only_descriptors(own: &[String], sibling_union: &[String]) -> Vec<String> {
    sibling_union
        .iter()
        .filter(|d| !own.contains(d))
        .cloned()
        .collect()
}

/// Session cache of normalized descriptor lists, keyed by species.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    entries: HashMap<String, Vec<String>>,
}

impl DescriptorCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached list for a species.
    pub fn get(&self, species: &str) -> Option<&Vec<String>> {
        self.entries.get(species)
    }

    /// Store the list for a species.
    pub fn insert(&mut self, species: impl Into<String>, descriptors: Vec<String>) {
        self.entries.insert(species.into(), descriptors);
    }

    /// Number of cached species.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every cached list.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Loads descriptor files on demand through a [`DescriptorCache`].
///
/// Failures never propagate: a missing or malformed file is logged and
/// treated as an empty list, which is cached like any other result.
pub struct DescriptorLoader<S> {
    source: S,
    descriptor_dir: String,
    cache: RefCell<DescriptorCache>,
}

impl<S: DataSource> DescriptorLoader<S> {
    /// Create a loader reading `<descriptor_dir>/<species>.json` from `source`.
    pub fn new(source: S, descriptor_dir: impl Into<String>) -> Self {
        Self {
            source,
            descriptor_dir: descriptor_dir.into(),
            cache: RefCell::new(DescriptorCache::new()),
        }
    }

    /// Path of the descriptor file for a species.
    pub fn path_for(&self, species: &str) -> String {
        join_path(&self.descriptor_dir, &format!("{}.json", species))
    }

    /// Cached list for a species, without any I/O.
    pub fn cached(&self, species: &str) -> Option<Vec<String>> {
        self.cache.borrow().get(species).cloned()
    }

    /// Number of species cached so far.
    pub fn cached_count(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Forget all cached lists.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Descriptor list for a species, fetched at most once per session.
    pub async fn load(&self, species: &str) -> Vec<String> {
        if let Some(cached) = self.cached(species) {
            return cached;
        }

        let path = self.path_for(species);
        let descriptors = match self.source.fetch_text(&path).await {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(payload) => normalize_descriptor_list(&payload),
                Err(e) => {
                    log::warn!("Failed to parse descriptors {}: {}", path, e);
                    Vec::new()
                }
            },
            Err(e) => {
                log::warn!("Failed to load descriptors for {}: {}", species, e);
                Vec::new()
            }
        };

        log::debug!("Cached {} descriptors for {}", descriptors.len(), species);
        self.cache
            .borrow_mut()
            .insert(species.to_string(), descriptors.clone());
        descriptors
    }

    /// Union of the descriptors of every other species in the entry's class,
    /// minus the descriptors in `own`.
    ///
    /// Sibling files are requested together and joined before the union is taken.
    pub async fn class_descriptors(
        &self,
        classes: &ClassMap,
        entry: &ImageEntry,
        own: &[String],
    ) -> Vec<String> {
        let loads = classes
            .siblings_of(entry)
            .into_iter()
            .map(|sibling| self.load(sibling));
        let union = join_all(loads).await.into_iter().flatten();
        class_only_descriptors(own, &dedupe_preserving_order(union))
    }
}
