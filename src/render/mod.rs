//! Rendering module for reflexpx.
//!
//! This module turns compiled records into map text and writes the text
//! files the editor imports.

mod record;
mod text;

pub use record::{BrushRecord, EffectRecord, PrefabDefinition, PrefabInstance, Record, CLIP_MATERIAL};
pub use text::{default_prefab_output, write_text};
