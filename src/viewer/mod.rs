//! Navigation state and the controller that owns it.

mod action;
mod controller;
mod pager;

pub use action::ViewerAction;
pub use controller::{RenderRequest, Viewer};
pub use pager::Pager;
