//! Sprite spec file parsing.
//!
//! A spec file describes one sprite: where the icons live, where the
//! composite and stylesheet go, and how the stylesheet refers to them.
//! JSON is the default format; `.yaml`/`.yml` files are read as YAML.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SpriteError};
use crate::layout::Direction;
use crate::paths::{normalize, resolve};

/// Padding around every tile when the spec does not set `border`.
pub const DEFAULT_BORDER: u32 = 2;

/// Raw spec file contents. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpriteConfig {
    /// Source directory, relative to the spec file.
    pub dir: Option<PathBuf>,

    /// Explicit ordered icon list; overrides the directory listing.
    pub files: Option<Vec<String>>,

    /// Output composite path. Defaults to `<spec name>.png`.
    pub sprite: Option<PathBuf>,

    /// Output stylesheet path. Defaults to `<spec name>.less`.
    pub less: Option<PathBuf>,

    /// Prefix for image URLs in the stylesheet.
    pub base_url: Option<String>,

    /// Prefix for mixin names.
    pub prefix: Option<String>,

    pub direction: Option<Direction>,

    /// Padding in pixels around every tile.
    pub border: Option<u32>,

    /// Append a timestamp query to image URLs.
    pub nocache: bool,

    /// Append a timestamp to the composite file name.
    pub versioning: bool,

    /// Directory for versioned composites.
    pub output_dir: Option<PathBuf>,
}

impl SpriteConfig {
    /// Load a spec file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SpriteError::config_with_help(
                format!("Specs file \"{}\" does not exist", path.display()),
                "Usage: less-sprites sprite-specs.json",
            ));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            SpriteError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::parse_yaml(&content),
            _ => Self::parse_json(&content),
        }
    }

    /// Parse a spec from JSON.
    pub fn parse_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            SpriteError::config_with_help(
                format!("Invalid sprite spec: {}", e),
                "Check the JSON syntax and that \"direction\" is \"right\" or \"down\"",
            )
        })
    }

    /// Parse a spec from YAML.
    pub fn parse_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| {
            SpriteError::config_with_help(
                format!("Invalid sprite spec: {}", e),
                "Check the YAML syntax and that \"direction\" is \"right\" or \"down\"",
            )
        })
    }
}

/// Fully resolved settings for one build. All paths are absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub source_dir: PathBuf,
    pub files: Vec<String>,
    pub sprite_path: PathBuf,
    pub less_path: PathBuf,
    pub base_url: String,
    pub prefix: String,
    pub direction: Direction,
    pub border: u32,
    pub nocache: bool,
    pub versioning: bool,
    pub output_dir: Option<PathBuf>,
}

impl BuildSettings {
    /// Resolve a spec against the location of its file.
    ///
    /// Relative paths are taken from the spec file's directory and the
    /// default output names are derived from the spec file's name.
    pub fn resolve(config: SpriteConfig, spec_path: &Path) -> Result<Self> {
        let files = config.files.unwrap_or_default();
        if files.is_empty() && config.dir.is_none() {
            return Err(SpriteError::config_with_help(
                "Missing \"files\" or \"dir\" property",
                "Set \"dir\" to the icon directory or list the icons in \"files\"",
            ));
        }

        let spec_path = absolute(spec_path)?;
        let spec_dir = spec_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        let spec_stem = spec_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sprite")
            .to_string();

        let source_dir = resolve(&spec_dir, &config.dir.unwrap_or_else(|| PathBuf::from(".")));
        let sprite = config
            .sprite
            .unwrap_or_else(|| PathBuf::from(format!("{}.png", spec_stem)));
        let less = config
            .less
            .unwrap_or_else(|| PathBuf::from(format!("{}.less", spec_stem)));

        Ok(Self {
            source_dir,
            files,
            sprite_path: resolve(&spec_dir, &sprite),
            less_path: resolve(&spec_dir, &less),
            base_url: config.base_url.unwrap_or_default(),
            prefix: config.prefix.unwrap_or_default(),
            direction: config.direction.unwrap_or_default(),
            border: config.border.unwrap_or(DEFAULT_BORDER),
            nocache: config.nocache,
            versioning: config.versioning,
            output_dir: config.output_dir.map(|d| resolve(&spec_dir, &d)),
        })
    }

    /// Load and resolve a spec file in one step.
    pub fn from_spec_file(spec_path: &Path) -> Result<Self> {
        let config = SpriteConfig::load(spec_path)?;
        Self::resolve(config, spec_path)
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    let cwd = std::env::current_dir()
        .map_err(|e| SpriteError::config(format!("Failed to read current directory: {}", e)))?;
    Ok(normalize(&cwd.join(path)))
}
