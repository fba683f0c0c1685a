pub mod build;
pub mod completions;

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

/// less-sprites - Pack PNG icons into a sprite sheet and LESS stylesheet
#[derive(Parser, Debug)]
#[command(name = "less-sprites")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Sprite spec file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(required_unless_present = "completions")]
    pub spec: Option<PathBuf>,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}
