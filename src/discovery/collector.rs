//! Candidate icon file collection.
//!
//! Resolves the ordered list of PNG file names that make up a sprite, either
//! from an explicit list or by listing the source directory.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, SpriteError};

/// Extension of the only supported raster format.
pub const PNG_EXTENSION: &str = ".png";

/// Collect candidate file names for a sprite.
///
/// A non-empty `explicit` list is used verbatim (reduced to basenames) and
/// keeps its order. Otherwise the direct entries of `source_dir` are listed
/// in filesystem order. Only `.png` files are kept, and any file for which
/// `is_output` holds (a composite written by this or an earlier build) is
/// skipped.
pub fn collect<F>(source_dir: &Path, explicit: &[String], is_output: F) -> Result<Vec<String>>
where
    F: Fn(&str) -> bool,
{
    let names = if explicit.is_empty() {
        list_directory(source_dir)?
    } else {
        explicit.iter().filter_map(|f| basename(f)).collect()
    };

    let files: Vec<String> = names
        .into_iter()
        .filter(|name| is_png(name) && !is_output(name))
        .collect();

    if files.is_empty() {
        return Err(SpriteError::config_with_help(
            "No valid source files were provided",
            format!("Add .png icons to {}", source_dir.display()),
        ));
    }

    Ok(files)
}

/// Check if a file name has the supported extension.
pub fn is_png(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(PNG_EXTENSION)
}

fn list_directory(source_dir: &Path) -> Result<Vec<String>> {
    if !source_dir.exists() {
        return Err(SpriteError::config(format!(
            "Source directory \"{}\" does not exist",
            source_dir.display()
        )));
    }
    if !source_dir.is_dir() {
        return Err(SpriteError::config(format!(
            "\"{}\" is not a directory",
            source_dir.display()
        )));
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(source_dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            SpriteError::config(format!(
                "Failed to read source directory \"{}\": {}",
                source_dir.display(),
                e
            ))
        })?;
        if entry.file_type().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

fn basename(file: &str) -> Option<String> {
    Path::new(file)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
}
