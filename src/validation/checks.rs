//! Validation checks for a conversion configuration.
//!
//! Each check takes a `&ConvertConfig` and returns a `ValidationResult`.

use std::collections::HashSet;

use crate::config::ConvertConfig;

use super::warning::{Diagnostic, ValidationResult};

/// Check the brush cell size.
pub fn check_cell_size(config: &ConvertConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !config.cell_size.is_finite() || config.cell_size <= 0.0 {
        result.push(
            Diagnostic::error(
                "reflexpx::config::cell-size",
                format!("cell_size must be a positive number, got {}", config.cell_size),
            )
            .with_help("Use the size of one pixel in world units, e.g. 16"),
        );
    }

    result
}

/// Check origin, clip padding and effect angles for NaN/infinity.
pub fn check_finite_values(config: &ConvertConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if config.origin.iter().any(|v| !v.is_finite()) {
        result.error(
            "reflexpx::config::origin",
            format!("origin must be finite, got {:?}", config.origin),
        );
    }

    if !config.clip_padding.is_finite() {
        result.push(
            Diagnostic::error(
                "reflexpx::config::clip-padding",
                format!("clip_padding must be finite, got {}", config.clip_padding),
            )
            .with_help("Use a negative number to disable the clip brush"),
        );
    }

    if let Some(effect) = &config.effect {
        if effect.angles.iter().any(|v| !v.is_finite()) {
            result.error(
                "reflexpx::config::effect-angles",
                format!("effect angles must be finite, got {:?}", effect.angles),
            );
        }
    }

    result
}

/// Check material names and override ranges.
pub fn check_materials(config: &ConvertConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if config.material.trim().is_empty() {
        result.error("reflexpx::config::material", "Default material name is empty");
    }

    for (i, entry) in config.material_overrides.iter().enumerate() {
        if entry.material.trim().is_empty() {
            result.error(
                "reflexpx::config::material",
                format!("Material override #{} has an empty material name", i + 1),
            );
        }

        if entry.ranges.is_empty() {
            result.warning(
                "reflexpx::config::empty-override",
                format!("Material override '{}' has no ranges and never matches", entry.material),
            );
        }

        for (j, range) in entry.ranges.iter().enumerate() {
            let inverted = range.inverted_channels();
            if !inverted.is_empty() {
                result.push(
                    Diagnostic::error(
                        "reflexpx::config::inverted-range",
                        format!(
                            "Range #{} of material override '{}' has lower bound above upper bound on {}",
                            j + 1,
                            entry.material,
                            inverted.join(", ")
                        ),
                    )
                    .with_help("Ranges are written [r_lo, g_lo, b_lo, r_hi, g_hi, b_hi]"),
                );
            }
        }
    }

    result
}

/// Check for repeated entries in the transparent colour list.
pub fn check_transparent_colors(config: &ConvertConfig) -> ValidationResult {
    let mut result = ValidationResult::new();
    let mut seen = HashSet::new();

    for colour in &config.transparent_colors {
        if !seen.insert(*colour) {
            result.warning(
                "reflexpx::config::duplicate-transparent",
                format!("Transparent colour {} is listed more than once", colour),
            );
        }
    }

    result
}

/// Check axis flip combinations.
pub fn check_flips(config: &ConvertConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if config.is_effect_mode() {
        if config.flip_xy {
            result.warning(
                "reflexpx::config::flip-ignored",
                "flip_xy has no effect in effect mode and is ignored",
            );
        }
        return result;
    }

    let active = [config.flip_xy, config.flip_xz, config.flip_yz]
        .iter()
        .filter(|&&f| f)
        .count();
    if active > 1 {
        result.push(
            Diagnostic::warning(
                "reflexpx::config::multiple-flips",
                format!("{} axis flips are active; they are applied as X/Y, then X/Z, then Y/Z", active),
            )
            .with_help("Usually only one flip is wanted"),
        );
    }

    result
}

/// Check the effect-mode block.
pub fn check_effect(config: &ConvertConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(effect) = &config.effect else {
        return result;
    };

    if effect.name.trim().is_empty() {
        result.error("reflexpx::config::effect-name", "Effect name is empty");
    }

    if effect.material_slots == 0 {
        result.push(
            Diagnostic::error(
                "reflexpx::config::material-slots",
                "Effect mode needs at least one material slot",
            )
            .with_help("Set effect.material_slots to 1 or more"),
        );
    }

    if !effect.scale.is_finite() || effect.scale <= 0.0 {
        result.error(
            "reflexpx::config::effect-scale",
            format!("Effect scale must be a positive number, got {}", effect.scale),
        );
    }

    if let Some(offset) = effect.offset {
        if offset.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            result.error(
                "reflexpx::config::effect-offset",
                format!("Effect offset must be positive on both axes, got {:?}", offset),
            );
        }
    }

    result
}

/// Check the image rotation and resize settings.
pub fn check_source(config: &ConvertConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !matches!(config.rotate, 0 | 90 | 180 | 270) {
        result.push(
            Diagnostic::error(
                "reflexpx::config::rotate",
                format!("rotate must be 0, 90, 180 or 270, got {}", config.rotate),
            )
            .with_help("Rotation is clockwise in whole quarter turns"),
        );
    }

    if let Some([w, h]) = config.resize {
        if w == 0 || h == 0 {
            result.error(
                "reflexpx::config::resize",
                format!("resize dimensions must be non-zero, got {}x{}", w, h),
            );
        }
    }

    if config.prefab_prefix.trim().is_empty() && config.use_prefabs {
        result.error("reflexpx::config::prefab-prefix", "prefab_prefix is empty");
    }

    result
}
