//! Navigation actions and their key/command bindings.

/// Every way the user can move through the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    /// Navigate to next image
    Next,
    /// Navigate to previous image
    Previous,
    /// Jump to an image by 0-based index
    Jump(usize),
    /// Jump to the image behind a 0-based button slot of the current page
    JumpSlot(usize),
    /// Show the next page of jump buttons
    AdvancePage,
    /// Randomly reorder the image list
    Shuffle,
}

impl ViewerAction {
    /// Action bound to a browser `KeyboardEvent.key` value.
    ///
    /// Digits mirror the on-screen controls: `1`-`9` are the jump buttons of
    /// the current page and `0` is the page-advance button.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" => Some(Self::Next),
            "ArrowLeft" => Some(Self::Previous),
            "0" => Some(Self::AdvancePage),
            _ => Self::digit_slot(key).map(Self::JumpSlot),
        }
    }

    /// Action for a line typed into the terminal viewer.
    ///
    /// `g <n>` jumps to the 1-based image `n`.
    pub fn from_command(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            "n" | "next" => return Some(Self::Next),
            "p" | "prev" => return Some(Self::Previous),
            "+" | "0" => return Some(Self::AdvancePage),
            "s" | "shuffle" => return Some(Self::Shuffle),
            _ => {}
        }

        if let Some(slot) = Self::digit_slot(line) {
            return Some(Self::JumpSlot(slot));
        }

        let target = line.strip_prefix("g ")?.trim().parse::<usize>().ok()?;
        target.checked_sub(1).map(Self::Jump)
    }

    fn digit_slot(key: &str) -> Option<usize> {
        let mut chars = key.chars();
        let digit = chars.next()?.to_digit(10)?;
        if chars.next().is_some() || digit == 0 {
            return None;
        }
        Some(digit as usize - 1)
    }
}
