//! Check command implementation.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::ConvertConfig;
use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::validation::{print_diagnostics, validate_config};

/// Validate a configuration without converting anything
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Configuration file (default: ./reflexpx.yaml if present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    let (config, path) = ConvertConfig::resolve(args.config.as_deref(), Path::new("."))?;
    match &path {
        Some(p) => printer.status("Checking", &display_path(p)),
        None => printer.status("Checking", "built-in defaults"),
    }

    let result = validate_config(&config);
    print_diagnostics(&result, printer);
    result.into_result().map(|_| ())
}
