//! Configuration file support for the viewer.
//!
//! The browser build runs with compiled defaults. The native build reads an
//! optional JSON file so the same dataset layout can be pointed at from anywhere.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DATA_DIR, DEFAULT_DESCRIPTOR_DIR};

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }

    /// Convert to log crate's Level, used by `console_log`.
    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Viewer configuration. Every field has a default, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Prefix prepended to every `image_path` (empty for same-origin hosting)
    pub image_base_url: String,

    /// Directory (or URL path) holding the two manifests
    pub data_dir: String,

    /// Directory (or URL path) holding the per-species descriptor files
    pub descriptor_dir: String,

    /// Show descriptors of the other species in the current image's class
    pub show_class_descriptors: bool,

    /// Allow the shuffle action
    pub shuffle_enabled: bool,

    /// Log verbosity level
    pub log_level: LogLevel,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            image_base_url: String::new(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            descriptor_dir: DEFAULT_DESCRIPTOR_DIR.to_string(),
            show_class_descriptors: true,
            shuffle_enabled: false,
            log_level: LogLevel::default(),
        }
    }
}

impl ViewerConfig {
    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "specview-config.json"
    }

    /// Get the default config file path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("specview").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("specview")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from an explicit path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Configuration for a native run: the file at `path` when one is given,
    /// otherwise the default path, falling back to defaults.
    ///
    /// Only an explicitly named file is an error when it can't be used.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: Option<&std::path::Path>) -> crate::Result<Self> {
        match path {
            Some(path) => Ok(Self::load_from_path(path)?),
            None => Ok(Self::load_from_default_path().unwrap_or_default()),
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from_path(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = ViewerConfig::from_json("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.descriptor_dir, "data/descriptors");
        assert!(config.show_class_descriptors);
        assert!(!config.shuffle_enabled);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{ "image_base_url": "https://cdn.example.org/birds/", "log_level": "debug" }"#;
        let config = ViewerConfig::from_json(json).unwrap();
        assert_eq!(config.image_base_url, "https://cdn.example.org/birds/");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.data_dir, "data");
    }

    #[test]
    fn test_version_too_new() {
        let json = format!(r#"{{ "version": {} }}"#, CONFIG_VERSION + 1);
        let err = ViewerConfig::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::VersionTooNew { .. }));
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ViewerConfig::default_filename());

        std::fs::write(&path, r#"{ "shuffle_enabled": true }"#).unwrap();
        let config = ViewerConfig::load(Some(&path)).unwrap();
        assert!(config.shuffle_enabled);

        std::fs::write(&path, format!(r#"{{ "version": {} }}"#, CONFIG_VERSION + 1)).unwrap();
        let err = ViewerConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            crate::ViewerError::Config(ConfigError::VersionTooNew { .. })
        ));
        assert!(err.to_string().contains("newer than supported"));

        let missing = dir.path().join("missing.json");
        let err = ViewerConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(
            err,
            crate::ViewerError::Config(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ViewerConfig {
            shuffle_enabled: true,
            ..ViewerConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(ViewerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Trace.to_level(), log::Level::Trace);
    }
}
