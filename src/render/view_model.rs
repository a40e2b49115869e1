//! Display-ready projection of the viewer state.
//!
//! Both front ends draw a [`ViewModel`] and nothing else, so building one is
//! the only place where display text is decided.

use crate::constants::NO_DESCRIPTORS;
use crate::model::ImageEntry;
use crate::viewer::Pager;

/// One numbered jump button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpButton {
    /// 0-based image index the button jumps to
    pub index: usize,
    /// Button text (1-based position)
    pub label: String,
    /// Whether this is the image on screen
    pub active: bool,
}

/// Descriptor lists for the image on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorView {
    /// Descriptors of the image's own species
    pub own: Vec<String>,
    /// Descriptors of sibling species not already in `own`; None when class
    /// descriptors are turned off
    pub class_only: Option<Vec<String>>,
}

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    /// Position and species label, e.g. `3 / 15: barn owl`
    pub meta: String,
    /// Image URL or path, with the base prefix applied
    pub image_src: String,
    /// Raw image path from the index
    pub image_caption: String,
    /// Jump buttons of the current page
    pub jump_buttons: Vec<JumpButton>,
    /// Page indicator, e.g. `Page 1/3`
    pub page_label: String,
    /// Whether the page-advance control does anything
    pub multiple_pages: bool,
    /// Whether the shuffle control is shown
    pub shuffle_enabled: bool,
    /// Rows of the own-species list
    pub descriptor_rows: Vec<String>,
    /// Rows of the class list; None hides the section
    pub class_rows: Option<Vec<String>>,
}

impl ViewModel {
    /// Build the view model for `entry`, which must be the pager's current image.
    pub fn build(
        entry: &ImageEntry,
        pager: &Pager,
        descriptors: &DescriptorView,
        image_base_url: &str,
        shuffle_enabled: bool,
    ) -> Self {
        let jump_buttons = pager
            .page_range()
            .map(|index| JumpButton {
                index,
                label: (index + 1).to_string(),
                active: index == pager.index(),
            })
            .collect();

        Self {
            meta: format!(
                "{} / {}: {}",
                pager.index() + 1,
                pager.len(),
                entry.species_label()
            ),
            image_src: image_src(image_base_url, &entry.image_path),
            image_caption: entry.image_path.clone(),
            jump_buttons,
            page_label: format!("Page {}/{}", pager.page() + 1, pager.page_count()),
            multiple_pages: pager.page_count() > 1,
            shuffle_enabled,
            descriptor_rows: descriptor_rows(&descriptors.own),
            class_rows: descriptors.class_only.as_deref().map(descriptor_rows),
        }
    }
}

/// Apply the base URL to an image path without doubling the separator.
pub fn image_src(base_url: &str, image_path: &str) -> String {
    if base_url.is_empty() {
        return image_path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        image_path.trim_start_matches('/')
    )
}

/// Rows for a descriptor list, with a placeholder row when it is empty.
pub fn descriptor_rows(descriptors: &[String]) -> Vec<String> {
    if descriptors.is_empty() {
        vec![NO_DESCRIPTORS.to_string()]
    } else {
        descriptors.to_vec()
    }
}
