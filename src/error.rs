use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for sprite builds
#[derive(Error, Diagnostic, Debug)]
pub enum SpriteError {
    #[error("Config error: {message}")]
    #[diagnostic(code(less_sprites::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Source file \"{}\" does not exist", path.display())]
    #[diagnostic(code(less_sprites::source))]
    SourceFile {
        path: PathBuf,
        #[help]
        help: Option<String>,
    },

    #[error("Image backend error with {}: {message}", path.display())]
    #[diagnostic(code(less_sprites::backend))]
    Backend { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", path.display())]
    #[diagnostic(code(less_sprites::write))]
    Write { path: PathBuf, message: String },
}

impl SpriteError {
    pub fn config(message: impl Into<String>) -> Self {
        SpriteError::Config {
            message: message.into(),
            help: None,
        }
    }

    pub fn config_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        SpriteError::Config {
            message: message.into(),
            help: Some(help.into()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpriteError>;
