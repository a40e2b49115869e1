//! Class-to-species mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ImageEntry;

/// Mapping from class identifier to the species it groups.
///
/// Keys are kept sorted so that the fallback lookup in [`ClassMap::class_of`]
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassMap {
    classes: BTreeMap<String, Vec<String>>,
}

impl ClassMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class with its species.
    pub fn insert(&mut self, class: impl Into<String>, species: Vec<String>) {
        self.classes.insert(class.into(), species);
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the map has no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Species of a class, if the class exists.
    pub fn species_in(&self, class: &str) -> Option<&[String]> {
        self.classes.get(class).map(Vec::as_slice)
    }

    /// Resolve the class of an entry.
    ///
    /// The explicit `class_name` wins when it names a known class. Otherwise the
    /// first class (in key order) whose species list contains the entry's species.
    pub fn class_of(&self, entry: &ImageEntry) -> Option<&str> {
        if let Some(name) = entry.class_name.as_deref() {
            if let Some((key, _)) = self.classes.get_key_value(name) {
                return Some(key.as_str());
            }
        }

        self.classes
            .iter()
            .find(|(_, species)| species.iter().any(|s| *s == entry.species))
            .map(|(key, _)| key.as_str())
    }

    /// Other species sharing the entry's class, in class order, without duplicates.
    pub fn siblings_of(&self, entry: &ImageEntry) -> Vec<&str> {
        let Some(species) = self.class_of(entry).and_then(|c| self.species_in(c)) else {
            return Vec::new();
        };

        let mut siblings: Vec<&str> = Vec::with_capacity(species.len());
        for s in species {
            if *s != entry.species && !siblings.contains(&s.as_str()) {
                siblings.push(s.as_str());
            }
        }
        siblings
    }
}
