//! Rendering of the current image and its descriptors.
//!
//! `view_model` decides what is shown; `text` (native) and `dom` (browser)
//! only decide how.

mod view_model;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(not(target_arch = "wasm32"))]
mod text;

pub use view_model::{DescriptorView, JumpButton, ViewModel, descriptor_rows, image_src};

#[cfg(target_arch = "wasm32")]
pub use dom::{DomView, JUMP_INDEX_ATTR};
#[cfg(not(target_arch = "wasm32"))]
pub use text::{describe_local_image, render_text};
