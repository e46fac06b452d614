//! Init command implementation.
//!
//! Writes a commented `reflexpx.yaml` holding every default.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{starter_yaml, CONFIG_FILENAME};
use crate::error::{ReflexError, Result};
use crate::output::{display_path, Printer};

/// Write a starter reflexpx.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing reflexpx.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(ReflexError::Config {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::create_dir_all(&args.path).map_err(|e| ReflexError::Io {
        path: args.path.clone(),
        message: format!("Failed to create directory: {}", e),
    })?;

    fs::write(&config_path, starter_yaml()).map_err(|e| ReflexError::Io {
        path: config_path.clone(),
        message: format!("Failed to write config: {}", e),
    })?;

    printer.success("Created", &display_path(&config_path));
    Ok(())
}
