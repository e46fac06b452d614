pub mod check;
pub mod completions;
pub mod convert;
pub mod init;

use clap::{Parser, Subcommand};

/// reflexpx - Pixel art to Reflex map converter
#[derive(Parser, Debug)]
#[command(name = "reflexpx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an image (or a directory of images) to map text
    Convert(convert::ConvertArgs),

    /// Write a starter reflexpx.yaml
    Init(init::InitArgs),

    /// Validate a configuration without converting anything
    Check(check::CheckArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
