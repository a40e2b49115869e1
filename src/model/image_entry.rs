//! Image index entries.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One image of the dataset with its species label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Path of the image, relative to the image base URL
    pub image_path: String,
    /// Species identifier (lowercase, underscore-separated)
    pub species: String,
    /// Explicit class identifier, when the index carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl ImageEntry {
    /// Create a new entry without a class.
    pub fn new(image_path: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            species: species.into(),
            class_name: None,
        }
    }

    /// Set the explicit class identifier.
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Build an entry from one element of the image index.
    ///
    /// Returns None when `image_path` or `species` is missing, empty, or not a string.
    /// A numeric `class_name` is accepted and stringified.
    pub fn from_value(value: &Value) -> Option<Self> {
        let image_path = non_empty_str(value.get("image_path"))?;
        let species = non_empty_str(value.get("species"))?;
        let class_name = match value.get("class_name") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Some(Self {
            image_path: image_path.to_string(),
            species: species.to_string(),
            class_name,
        })
    }

    /// Species label for display, with underscores replaced by spaces.
    pub fn species_label(&self) -> String {
        self.species.replace('_', " ")
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_complete() {
        let value = json!({
            "image_path": "images/0001.jpg",
            "species": "barn_owl",
            "class_name": "owls"
        });
        let entry = ImageEntry::from_value(&value).unwrap();
        assert_eq!(entry, ImageEntry::new("images/0001.jpg", "barn_owl").with_class("owls"));
    }

    #[test]
    fn test_from_value_numeric_class() {
        let value = json!({ "image_path": "a.png", "species": "a", "class_name": 3 });
        let entry = ImageEntry::from_value(&value).unwrap();
        assert_eq!(entry.class_name.as_deref(), Some("3"));
    }

    #[test]
    fn test_from_value_rejects_incomplete() {
        assert!(ImageEntry::from_value(&json!({ "image_path": "a.png" })).is_none());
        assert!(ImageEntry::from_value(&json!({ "species": "a" })).is_none());
        assert!(ImageEntry::from_value(&json!({ "image_path": "", "species": "a" })).is_none());
        assert!(ImageEntry::from_value(&json!({ "image_path": "a.png", "species": 7 })).is_none());
        assert!(ImageEntry::from_value(&json!("a.png")).is_none());
    }

    #[test]
    fn test_species_label() {
        let entry = ImageEntry::new("x.jpg", "great_horned_owl");
        assert_eq!(entry.species_label(), "great horned owl");
    }
}
