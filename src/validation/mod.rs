//! Validation system for conversion configurations.
//!
//! Runs a suite of checks against a configuration and reports errors and
//! warnings. Errors are fatal and stop a conversion before the image is
//! decoded or any output is written. Used by both `reflexpx check` and
//! `reflexpx convert`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::config::ConvertConfig;
use crate::output::Printer;

/// Run all validation checks against the configuration.
pub fn validate_config(config: &ConvertConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_cell_size(config));
    result.merge(checks::check_finite_values(config));
    result.merge(checks::check_materials(config));
    result.merge(checks::check_transparent_colors(config));
    result.merge(checks::check_flips(config));
    result.merge(checks::check_effect(config));
    result.merge(checks::check_source(config));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("  {}[{}]: {}", label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("    {}", printer.dim(&format!("help: {}", help)));
        }
    }

    let errors = result.error_count();
    let warnings = result.warning_count();

    if errors > 0 {
        printer.error(
            "Failed",
            &format!("{} error(s), {} warning(s)", errors, warnings),
        );
    } else if warnings > 0 {
        printer.warning("Checked", &format!("passed with {} warning(s)", warnings));
    } else {
        printer.success("Checked", "configuration is valid");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EffectConfig;

    #[test]
    fn test_validate_default_config() {
        let result = validate_config(&ConvertConfig::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_collects_across_checks() {
        let config = ConvertConfig {
            cell_size: -1.0,
            rotate: 10,
            effect: Some(EffectConfig {
                material_slots: 0,
                ..EffectConfig::new("fx/dot")
            }),
            flip_xy: true,
            ..Default::default()
        };
        let result = validate_config(&config);

        assert_eq!(result.error_count(), 3);
        assert_eq!(result.warning_count(), 1);
        assert!(result.into_result().is_err());
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let config = ConvertConfig {
            flip_xz: true,
            flip_yz: true,
            ..Default::default()
        };
        assert!(validate_config(&config).into_result().is_ok());
    }
}
