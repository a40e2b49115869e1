//! Species viewer - browse a labeled image dataset with per-species descriptors.
//!
//! The browser build fetches the dataset manifests and draws into the DOM.
//! The native build reads the same files from disk and prints to the terminal.

pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod model;
pub mod render;
pub mod viewer;

pub use config::ViewerConfig;
pub use error::{Result, ViewerError};
pub use viewer::{Viewer, ViewerAction};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
