//! Current-image pointer with wrap-around navigation.

use std::ops::Range;

use crate::constants::JUMP_PAGE_SIZE;

/// Index into the image list plus the derived jump-button page.
///
/// The index is always in `0..len`, or 0 when the list is empty.
/// The page is `index / JUMP_PAGE_SIZE`, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pager {
    index: usize,
    len: usize,
}

impl Pager {
    /// Create a pager over `len` images, starting at the first.
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if there are no images.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current image index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current jump-button page.
    pub fn page(&self) -> usize {
        self.index / JUMP_PAGE_SIZE
    }

    /// Number of jump-button pages.
    pub fn page_count(&self) -> usize {
        self.len.div_ceil(JUMP_PAGE_SIZE)
    }

    /// Image indices covered by the current page.
    pub fn page_range(&self) -> Range<usize> {
        let start = self.page() * JUMP_PAGE_SIZE;
        start..(start + JUMP_PAGE_SIZE).min(self.len)
    }

    /// Image index behind the `slot`-th button (0-based) of the current page.
    pub fn slot_index(&self, slot: usize) -> Option<usize> {
        if slot >= JUMP_PAGE_SIZE {
            return None;
        }
        let index = self.page_range().start + slot;
        (index < self.len).then_some(index)
    }

    /// Move to the next image, wrapping around.
    pub fn next(&mut self) {
        if self.len == 0 {
            self.index = 0;
            return;
        }
        self.index = (self.index + 1) % self.len;
    }

    /// Move to the previous image, wrapping around.
    pub fn prev(&mut self) {
        if self.len == 0 {
            self.index = 0;
            return;
        }
        self.index = if self.index == 0 {
            self.len - 1
        } else {
            self.index - 1
        };
    }

    /// Jump to an image, wrapping targets past the end.
    pub fn jump(&mut self, target: usize) {
        self.index = if self.len == 0 { 0 } else { target % self.len };
    }

    /// Move to the first image of the next page, wrapping to the first page.
    pub fn advance_page(&mut self) {
        let pages = self.page_count();
        if pages == 0 {
            self.index = 0;
            return;
        }
        let page = (self.page() + 1) % pages;
        self.index = page * JUMP_PAGE_SIZE;
    }

    /// Go back to the first image.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Get progress string like "3/15".
    pub fn progress(&self) -> String {
        if self.len == 0 {
            return "0/0".to_string();
        }
        format!("{}/{}", self.index + 1, self.len)
    }
}
