//! Retina (`@2x`) file classification and lookup.

use crate::layout::{IconSpec, RetinaSpec};

use super::collector::PNG_EXTENSION;

/// Marker between an icon name and its extension for retina files.
pub const RETINA_MARKER: &str = "@2x";

/// Split candidate file names into base icons and retina icons.
///
/// Classification is purely name based and keeps the input order in both
/// lists.
pub fn classify(files: &[String]) -> (Vec<String>, Vec<String>) {
    files.iter().cloned().partition(|f| !is_retina_file(f))
}

/// Check if a file name carries the retina marker.
pub fn is_retina_file(file_name: &str) -> bool {
    file_name
        .to_lowercase()
        .ends_with(&format!("{}{}", RETINA_MARKER, PNG_EXTENSION))
}

/// Icon name for a file: the basename without the extension, and without
/// the retina marker for retina files.
pub fn icon_name(file_name: &str) -> &str {
    let stem = strip_suffix_ignore_case(file_name, PNG_EXTENSION);
    if is_retina_file(file_name) {
        strip_suffix_ignore_case(stem, RETINA_MARKER)
    } else {
        stem
    }
}

/// Find the retina counterpart of a base icon.
pub fn find_retina<'a>(icon: &IconSpec, retinas: &'a [RetinaSpec]) -> Option<&'a RetinaSpec> {
    retinas.iter().find(|r| r.name == icon.name)
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> &'a str {
    match s.len().checked_sub(suffix.len()) {
        Some(at) if s.is_char_boundary(at) && s[at..].eq_ignore_ascii_case(suffix) => &s[..at],
        _ => s,
    }
}
