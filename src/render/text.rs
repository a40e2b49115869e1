//! Plain-text renderer for the terminal viewer.

use std::fmt::Write;
use std::path::Path;

use super::ViewModel;

/// Render a view model as a block of text.
pub fn render_text(vm: &ViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", vm.meta);
    let _ = writeln!(out, "  image: {}", vm.image_src);

    let buttons: Vec<String> = vm
        .jump_buttons
        .iter()
        .map(|b| {
            if b.active {
                format!("[{}]", b.label)
            } else {
                format!(" {} ", b.label)
            }
        })
        .collect();
    let _ = write!(out, "  {}", buttons.join(""));
    if vm.multiple_pages {
        let _ = write!(out, "  ({}, 0/+ for more)", vm.page_label);
    }
    out.push('\n');

    let _ = writeln!(out, "  Descriptors:");
    for row in &vm.descriptor_rows {
        let _ = writeln!(out, "    - {}", row);
    }

    if let Some(rows) = &vm.class_rows {
        let _ = writeln!(out, "  Also seen in this class:");
        for row in rows {
            let _ = writeln!(out, "    - {}", row);
        }
    }

    out
}

/// Short summary of a local image file, e.g. `640x480`.
///
/// Only the header is read. Returns None if the file is missing or not a
/// readable PNG/JPEG.
pub fn describe_local_image(path: &Path) -> Option<String> {
    match image::image_dimensions(path) {
        Ok((width, height)) => Some(format!("{}x{}", width, height)),
        Err(e) => {
            log::debug!("Could not read dimensions of {:?}: {}", path, e);
            None
        }
    }
}
