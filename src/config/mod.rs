//! Conversion configuration (reflexpx.yaml) parsing.
//!
//! The configuration fixes everything about a run: cell size, world origin,
//! materials, transparency rules, axis flips, effect mode and prefab
//! deduplication. It is loaded once and never mutated during a conversion.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReflexError, Result};
use crate::types::{MaterialOverride, Rgb};

/// Default configuration filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "reflexpx.yaml";

/// Material used when no override matches.
pub const DEFAULT_MATERIAL: &str = "common/materials/effects/glow2";

/// Settings for a single image-to-map conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Size of one pixel in world units.
    pub cell_size: f64,

    /// World position of the top-left corner of the image, in the unflipped frame.
    pub origin: [f64; 3],

    /// Default material name.
    pub material: String,

    /// Ordered override list; the first matching range wins.
    pub material_overrides: Vec<MaterialOverride>,

    /// Colours never converted.
    pub transparent_colors: Vec<Rgb>,

    /// Pixels with alpha below this value are skipped.
    pub alpha_threshold: u8,

    /// Padding around the clip brush. Negative disables the clip.
    pub clip_padding: f64,

    pub flip_xy: bool,
    pub flip_xz: bool,
    pub flip_yz: bool,

    /// Emit effect entities instead of brushes.
    pub effect: Option<EffectConfig>,

    /// Deduplicate repeated colours into prefabs.
    pub use_prefabs: bool,

    /// Prefix for generated prefab names.
    pub prefab_prefix: String,

    /// Resize the decoded image to exactly `[width, height]`.
    pub resize: Option<[u32; 2]>,

    /// Clockwise rotation in degrees applied after decoding (0, 90, 180, 270).
    pub rotate: u32,

    /// Append to existing output files instead of replacing them.
    pub append: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            cell_size: 16.0,
            origin: [0.0, 0.0, 0.0],
            material: DEFAULT_MATERIAL.to_string(),
            material_overrides: vec![],
            transparent_colors: vec![],
            alpha_threshold: 0,
            clip_padding: 1.0,
            flip_xy: false,
            flip_xz: false,
            flip_yz: false,
            effect: None,
            use_prefabs: false,
            prefab_prefix: "pixel".to_string(),
            resize: None,
            rotate: 0,
            append: false,
        }
    }
}

/// Effect-mode settings. Each pixel becomes a point entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectConfig {
    /// Effect asset name.
    pub name: String,

    #[serde(default = "default_effect_scale")]
    pub scale: f64,

    /// Spacing between neighbouring points on the X and Y grid axes.
    /// Defaults to `cell_size` on both.
    #[serde(default)]
    pub offset: Option<[f64; 2]>,

    /// Orientation angles written on every effect.
    #[serde(default)]
    pub angles: [f64; 3],

    /// Number of material slots filled with the pixel's material and colour.
    #[serde(default = "default_material_slots")]
    pub material_slots: u32,
}

fn default_effect_scale() -> f64 {
    1.0
}

fn default_material_slots() -> u32 {
    1
}

impl EffectConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scale: default_effect_scale(),
            offset: None,
            angles: [0.0; 3],
            material_slots: default_material_slots(),
        }
    }
}

impl ConvertConfig {
    /// Load configuration from a YAML or JSON file (chosen by extension).
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReflexError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse(&content)
        }
    }

    /// Load an explicit config file, or `reflexpx.yaml` from `dir` if present,
    /// or fall back to defaults. Returns the path that was read, if any.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Ok((Self::load(&candidate)?, Some(candidate)));
        }

        Ok((Self::default(), None))
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document for a struct
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| ReflexError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Parse configuration from a JSON string.
    pub fn parse_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| ReflexError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some("Check the JSON syntax".to_string()),
        })
    }

    /// Check if each pixel becomes an effect entity rather than a brush.
    pub fn is_effect_mode(&self) -> bool {
        self.effect.is_some()
    }

    /// Point spacing in effect mode as (x, y).
    pub fn effect_offset(&self) -> (f64, f64) {
        match self.effect.as_ref().and_then(|e| e.offset) {
            Some([x, y]) => (x, y),
            None => (self.cell_size, self.cell_size),
        }
    }

    /// Check whether the clip brush should be emitted at all.
    pub fn clip_enabled(&self) -> bool {
        self.clip_padding >= 0.0
    }
}

/// Commented starter configuration written by `reflexpx init`.
pub fn starter_yaml() -> String {
    format!(
        r##"# reflexpx configuration
# Size per pixel in world units.
cell_size: 16
# x, y, z offset of the top-left pixel.
origin: [0, 0, 0]
# Material used for every pixel unless an override matches.
material: {material}
# Ordered list; the first matching range wins.
# material_overrides:
#   - material: common/materials/effects/glow_red
#     ranges:
#       - [200, 0, 0, 255, 60, 60]
material_overrides: []
# Pixels with these colours are not converted, e.g. [[56, 62, 23], "#ff0000"].
transparent_colors: []
# Pixels with alpha below this value are not converted.
alpha_threshold: 0
# Add a clip extending this many units around the image. Negative disables it.
clip_padding: 1
flip_xy: false
flip_xz: false
flip_yz: false
# Uncomment to place effects instead of brushes.
# effect:
#   name: fx/pixel
#   scale: 1
#   offset: [16, 16]
#   angles: [0, 0, 0]
#   material_slots: 1
# Share one prefab per repeated colour.
use_prefabs: false
prefab_prefix: pixel
"##,
        material = DEFAULT_MATERIAL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RgbRange;

    #[test]
    fn test_parse_minimal_config() {
        let config = ConvertConfig::parse("cell_size: 8").unwrap();

        assert_eq!(config.cell_size, 8.0);
        assert_eq!(config.material, DEFAULT_MATERIAL);
        assert_eq!(config.clip_padding, 1.0);
        assert!(!config.is_effect_mode());
    }

    #[test]
    fn test_parse_empty_config() {
        let config = ConvertConfig::parse("").unwrap();
        assert_eq!(config, ConvertConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r##"
cell_size: 8
origin: [100, 200, -50]
material: base/mat
material_overrides:
  - material: red
    ranges:
      - [200, 0, 0, 255, 60, 60]
  - material: dark
    ranges:
      - [0, 0, 0, 40, 40, 40]
      - [90, 90, 90, 110, 110, 110]
transparent_colors:
  - [56, 62, 23]
  - "#ff0000"
alpha_threshold: 128
clip_padding: -1
flip_xz: true
effect:
  name: fx/dot
  scale: 0.5
  offset: [4, 6]
  angles: [90, 0, 0]
  material_slots: 2
use_prefabs: true
prefab_prefix: px
resize: [32, 16]
rotate: 90
append: true
"##;
        let config = ConvertConfig::parse(yaml).unwrap();

        assert_eq!(config.origin, [100.0, 200.0, -50.0]);
        assert_eq!(config.material_overrides.len(), 2);
        assert_eq!(config.material_overrides[0].material, "red");
        assert_eq!(
            config.material_overrides[1].ranges[1],
            RgbRange::new([90, 90, 90], [110, 110, 110])
        );
        assert_eq!(
            config.transparent_colors,
            vec![Rgb::new(56, 62, 23), Rgb::new(255, 0, 0)]
        );
        assert_eq!(config.alpha_threshold, 128);
        assert!(!config.clip_enabled());
        assert!(config.flip_xz);
        assert!(config.is_effect_mode());
        assert_eq!(config.effect_offset(), (4.0, 6.0));
        assert_eq!(config.effect.as_ref().unwrap().material_slots, 2);
        assert!(config.use_prefabs);
        assert_eq!(config.resize, Some([32, 16]));
        assert_eq!(config.rotate, 90);
        assert!(config.append);
    }

    #[test]
    fn test_effect_defaults() {
        let config = ConvertConfig::parse("cell_size: 10\neffect:\n  name: fx/dot\n").unwrap();
        let effect = config.effect.as_ref().unwrap();

        assert_eq!(effect.scale, 1.0);
        assert_eq!(effect.material_slots, 1);
        assert_eq!(effect.angles, [0.0; 3]);
        assert_eq!(config.effect_offset(), (10.0, 10.0));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ConvertConfig::parse("cell_sise: 8").is_err());
    }

    #[test]
    fn test_parse_json() {
        let config = ConvertConfig::parse_json(r#"{"cell_size": 4, "use_prefabs": true}"#).unwrap();
        assert_eq!(config.cell_size, 4.0);
        assert!(config.use_prefabs);
    }

    #[test]
    fn test_starter_yaml_parses_to_defaults() {
        let config = ConvertConfig::parse(&starter_yaml()).unwrap();
        assert_eq!(config, ConvertConfig::default());
    }

    #[test]
    fn test_starter_yaml_documents_hex_colours() {
        assert!(starter_yaml().contains(r##"[[56, 62, 23], "#ff0000"]"##));
    }

    #[test]
    fn test_load_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reflexpx.json");
        std::fs::write(&path, r##"{"cell_size": 4, "transparent_colors": ["#ff0000"]}"##).unwrap();

        let config = ConvertConfig::load(&path).unwrap();
        assert_eq!(config.cell_size, 4.0);
        assert_eq!(config.transparent_colors, vec![Rgb::new(255, 0, 0)]);
    }

    #[test]
    fn test_load_json_rejects_yaml_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reflexpx.json");
        std::fs::write(&path, "cell_size: 4\n").unwrap();

        assert!(matches!(ConvertConfig::load(&path), Err(ReflexError::Parse { .. })));
    }

    #[test]
    fn test_resolve_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, path) = ConvertConfig::resolve(None, dir.path()).unwrap();
        assert_eq!(config, ConvertConfig::default());
        assert!(path.is_none());
    }

    #[test]
    fn test_resolve_picks_up_local_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "cell_size: 2\n").unwrap();

        let (config, path) = ConvertConfig::resolve(None, dir.path()).unwrap();
        assert_eq!(config.cell_size, 2.0);
        assert_eq!(path, Some(dir.path().join(CONFIG_FILENAME)));
    }
}
