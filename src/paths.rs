//! Path helpers for output naming and stylesheet URLs.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use crate::discovery::RETINA_MARKER;

/// Lexically normalize a path, dropping `.` and folding `..` into the
/// preceding component.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Path of `to` relative to the directory `from`. Both must be absolute and
/// normalized.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component> = from.components().collect();
    let to: Vec<Component> = to.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for component in &to[common..] {
        out.push(component.as_os_str());
    }
    out
}

/// Render a relative path with `/` separators for use in a URL.
pub fn url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Insert `suffix` between the file stem and the extension.
///
/// `with_stem_suffix("img/sprite.png", "@2x")` is `img/sprite@2x.png`.
pub fn with_stem_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::new();
    if let Some(stem) = path.file_stem() {
        name.push(stem);
    }
    name.push(suffix);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

/// Whether `name` is a versioned composite of `sprite`: `<stem>-<digits>.<ext>`
/// or its retina twin `<stem>-<digits>@2x.<ext>`.
pub fn is_versioned_name(name: &str, sprite: &Path) -> bool {
    let (Some(stem), Some(ext)) = (
        sprite.file_stem().and_then(|s| s.to_str()),
        sprite.extension().and_then(|e| e.to_str()),
    ) else {
        return false;
    };

    let Some(rest) = name.strip_prefix(stem).and_then(|r| r.strip_prefix('-')) else {
        return false;
    };
    let Some(rest) = rest.strip_suffix(ext).and_then(|r| r.strip_suffix('.')) else {
        return false;
    };
    let token = rest.strip_suffix(RETINA_MARKER).unwrap_or(rest);
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// File name component as a string, or empty when there is none.
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
