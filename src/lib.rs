//! reflexpx - Pixel art to Reflex map converter
//!
//! Turns every visible pixel of an image into a cube brush, an effect
//! entity or a shared prefab instance in the Reflex map text format, with
//! an optional clip brush enclosing the result.

pub mod cli;
pub mod compile;
pub mod config;
pub mod error;
pub mod output;
pub mod render;
pub mod source;
pub mod types;
pub mod validation;

pub use compile::{compile, CompileStats, CompiledMap};
pub use config::{ConvertConfig, EffectConfig};
pub use error::{ReflexError, Result};
pub use render::{BrushRecord, EffectRecord, PrefabDefinition, PrefabInstance, Record};
pub use source::{load_grid, SourceOptions};
pub use types::{Bounds, ColorKey, Cuboid, MaterialOverride, PixelGrid, Point3, Rgb, RgbRange, Sample};
pub use validation::{validate_config, Diagnostic, Severity, ValidationResult};
