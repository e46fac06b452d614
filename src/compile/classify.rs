//! Pixel visibility and material resolution.

use std::collections::HashSet;

use crate::config::ConvertConfig;
use crate::types::{MaterialOverride, Rgb, Sample};

/// Outcome of classifying one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub visible: bool,
    pub material: &'a str,
}

/// Decides which pixels are converted and which material they use.
#[derive(Debug, Clone)]
pub struct ColorClassifier<'a> {
    transparent: HashSet<Rgb>,
    alpha_threshold: u8,
    default_material: &'a str,
    overrides: &'a [MaterialOverride],
}

impl<'a> ColorClassifier<'a> {
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self {
            transparent: config.transparent_colors.iter().copied().collect(),
            alpha_threshold: config.alpha_threshold,
            default_material: &config.material,
            overrides: &config.material_overrides,
        }
    }

    pub fn classify(&self, sample: Sample) -> Classification<'a> {
        Classification {
            visible: self.is_visible(sample),
            material: self.material(sample),
        }
    }

    /// A sample is hidden when its RGB is listed as transparent or its
    /// alpha is under the threshold.
    pub fn is_visible(&self, sample: Sample) -> bool {
        !self.transparent.contains(&sample.rgb_triple()) && sample.a >= self.alpha_threshold
    }

    /// First override, in declaration order, with a range containing the
    /// sample. Falls back to the default material.
    pub fn material(&self, sample: Sample) -> &'a str {
        self.overrides
            .iter()
            .find(|entry| entry.matches(sample))
            .map_or(self.default_material, |entry| entry.material.as_str())
    }
}
