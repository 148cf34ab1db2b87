//! Arguments embedded in the executable.
//!
//! A PE image may carry trailing bytes after its last section (the overlay).
//! Distributors append a line of arguments there to build preconfigured
//! installers, e.g. `just-install.exe` + `"firefox 7zip"`.

use goblin::pe::PE;
use std::fs;
use std::path::Path;

/// Arguments stored in the overlay of the executable at `path`, if any.
pub fn embedded_arguments(path: &Path) -> Option<Vec<String>> {
    let data = fs::read(path).ok()?;
    let overlay = overlay_data(&data)?;
    parse_arguments(overlay)
}

/// Bytes past the end of the last PE section.
pub fn overlay_data(image: &[u8]) -> Option<&[u8]> {
    let pe = PE::parse(image).ok()?;

    let last_section_end = pe
        .sections
        .iter()
        .map(|section| {
            u64::from(section.pointer_to_raw_data) + u64::from(section.size_of_raw_data)
        })
        .max()?;
    let start = usize::try_from(last_section_end).ok()?;

    match image.get(start..) {
        Some(overlay) if !overlay.is_empty() => Some(overlay),
        _ => None,
    }
}

fn parse_arguments(overlay: &[u8]) -> Option<Vec<String>> {
    let text = String::from_utf8_lossy(overlay);
    let trimmed = text.trim_matches(|c| c == '\r' || c == '\n' || c == ' ' || c == '\0');
    if trimmed.is_empty() {
        return None;
    }

    Some(
        trimmed
            .split(' ')
            .filter(|arg| !arg.is_empty())
            .map(str::to_string)
            .collect(),
    )
}
