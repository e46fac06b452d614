//! Prefab deduplication index.
//!
//! Before the grid pass, every colour occurring more than once in the image
//! is collected into the repeat set. During the pass the first cell of such
//! a colour resolves its shared prefab definition; every cell of that colour
//! (the first included) is then emitted as a lightweight prefab instance.

use std::collections::{HashMap, HashSet};

use crate::types::{ColorKey, PixelGrid};

/// Resolution state of one repeating colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefabRecord {
    /// No definition emitted yet.
    Unresolved,
    /// Definition emitted under this name.
    Resolved(String),
}

/// Result of registering a cell's colour with the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// True only for the first cell of this colour; the caller emits the
    /// shared definition exactly then.
    pub is_first_occurrence: bool,
    pub definition_name: String,
}

/// Tracks which repeating colours already have a shared definition.
#[derive(Debug, Clone, Default)]
pub struct PrefabIndex {
    prefix: String,
    repeats: HashSet<ColorKey>,
    resolved: HashMap<ColorKey, String>,
}

impl PrefabIndex {
    /// Scan the whole grid once and keep colours seen more than once.
    ///
    /// Grouping uses raw RGB; alpha and resolved material play no part.
    pub fn build(grid: &PixelGrid, prefix: impl Into<String>) -> Self {
        let mut counts: HashMap<ColorKey, usize> = HashMap::new();
        for sample in grid.samples() {
            *counts.entry(sample.key()).or_insert(0) += 1;
        }

        let repeats = counts
            .into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(key, _)| key)
            .collect();

        Self {
            prefix: prefix.into(),
            repeats,
            resolved: HashMap::new(),
        }
    }

    /// Check if a colour takes part in deduplication.
    pub fn qualifies(&self, key: ColorKey) -> bool {
        self.repeats.contains(&key)
    }

    /// Number of colours in the repeat set.
    pub fn repeat_count(&self) -> usize {
        self.repeats.len()
    }

    /// Number of definitions resolved so far.
    pub fn resolved_count(&self) -> usize {
        self.resolved.len()
    }

    pub fn state(&self, key: ColorKey) -> PrefabRecord {
        match self.resolved.get(&key) {
            Some(name) => PrefabRecord::Resolved(name.clone()),
            None => PrefabRecord::Unresolved,
        }
    }

    /// Prefab name for a colour, e.g. `pixel_0a141e`.
    pub fn definition_name(&self, key: ColorKey) -> String {
        format!("{}_{}", self.prefix, key.rgb_hex())
    }

    /// Register one occurrence of `key`.
    ///
    /// Returns `None` for colours outside the repeat set; those bypass
    /// deduplication and are emitted as ordinary records.
    pub fn register(&mut self, key: ColorKey) -> Option<Registration> {
        if !self.qualifies(key) {
            return None;
        }

        if let Some(name) = self.resolved.get(&key) {
            return Some(Registration {
                is_first_occurrence: false,
                definition_name: name.clone(),
            });
        }

        let name = self.definition_name(key);
        self.resolved.insert(key, name.clone());
        Some(Registration {
            is_first_occurrence: true,
            definition_name: name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sample;

    fn grid(samples: Vec<Sample>) -> PixelGrid {
        let width = samples.len();
        PixelGrid::new(width, 1, samples).unwrap()
    }

    #[test]
    fn test_repeat_set_keeps_only_repeats() {
        let a = Sample::rgb(10, 20, 30);
        let b = Sample::rgb(40, 50, 60);
        let index = PrefabIndex::build(&grid(vec![a, b, a, a]), "pixel");

        assert!(index.qualifies(a.key()));
        assert!(!index.qualifies(b.key()));
        assert_eq!(index.repeat_count(), 1);
    }

    #[test]
    fn test_grouping_ignores_alpha() {
        let index = PrefabIndex::build(
            &grid(vec![Sample::new(1, 2, 3, 255), Sample::new(1, 2, 3, 10)]),
            "pixel",
        );
        assert!(index.qualifies(ColorKey::from_rgb(1, 2, 3)));
    }

    #[test]
    fn test_register_first_then_repeat() {
        let a = Sample::rgb(10, 20, 30);
        let mut index = PrefabIndex::build(&grid(vec![a, a, a]), "pixel");

        assert_eq!(index.state(a.key()), PrefabRecord::Unresolved);

        let first = index.register(a.key()).unwrap();
        assert!(first.is_first_occurrence);
        assert_eq!(first.definition_name, "pixel_0a141e");

        let second = index.register(a.key()).unwrap();
        assert!(!second.is_first_occurrence);
        assert_eq!(second.definition_name, "pixel_0a141e");

        assert_eq!(
            index.state(a.key()),
            PrefabRecord::Resolved("pixel_0a141e".to_string())
        );
        assert_eq!(index.resolved_count(), 1);
    }

    #[test]
    fn test_register_unknown_colour_bypasses() {
        let a = Sample::rgb(10, 20, 30);
        let mut index = PrefabIndex::build(&grid(vec![a, a]), "pixel");

        assert!(index.register(ColorKey::from_rgb(40, 50, 60)).is_none());
        assert_eq!(index.resolved_count(), 0);
    }

    #[test]
    fn test_custom_prefix() {
        let index = PrefabIndex::build(&grid(vec![]), "tile");
        assert_eq!(index.definition_name(ColorKey::from_rgb(255, 0, 128)), "tile_ff0080");
    }
}
