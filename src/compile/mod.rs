//! Pixel-to-geometry compiler.
//!
//! Walks the grid row-major. Each visible cell is placed in the world,
//! folded into the running bounds and emitted as a brush, effect or prefab
//! instance. After the last cell the clip brush closes the output.

mod classify;
mod clip;
mod geometry;
mod prefab;

pub use classify::{Classification, ColorClassifier};
pub use clip::build_clip;
pub use geometry::{AxisMap, GeometryMapper, Placement};
pub use prefab::{PrefabIndex, PrefabRecord, Registration};

use crate::config::ConvertConfig;
use crate::error::Result;
use crate::render::{BrushRecord, EffectRecord, PrefabDefinition, PrefabInstance, Record};
use crate::types::{Bounds, ColorKey, PixelGrid};
use crate::validation::validate_config;

/// Counters describing a finished compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompileStats {
    pub cells: usize,
    pub visible: usize,
    pub skipped: usize,
    pub brushes: usize,
    pub effects: usize,
    pub prefab_instances: usize,
    pub definitions: usize,
    pub clip: bool,
}

/// Output of one compile: the geometry stream and the prefab stream.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledMap {
    /// Geometry records in emission order, clip last.
    pub records: Vec<Record>,
    /// Shared prefab definitions in first-occurrence order.
    pub definitions: Vec<PrefabDefinition>,
    /// Bounds of all placed geometry, before clip padding.
    pub bounds: Bounds,
    pub stats: CompileStats,
}

impl CompiledMap {
    /// Geometry stream as map text.
    pub fn geometry_text(&self) -> String {
        self.records.iter().map(|r| r.to_string()).collect()
    }

    /// Prefab definition stream as map text.
    pub fn definitions_text(&self) -> String {
        self.definitions.iter().map(|d| d.to_string()).collect()
    }
}

/// Validate `config` and compile `grid` with it.
///
/// Configuration errors abort before any record is produced.
pub fn compile(grid: &PixelGrid, config: &ConvertConfig) -> Result<CompiledMap> {
    validate_config(config).into_result()?;
    Ok(Compiler::new(config).run(grid))
}

/// Single-pass compiler over one configuration.
pub struct Compiler<'a> {
    config: &'a ConvertConfig,
    classifier: ColorClassifier<'a>,
    mapper: GeometryMapper,
}

impl<'a> Compiler<'a> {
    /// Create a compiler. The configuration is assumed to be valid.
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self {
            config,
            classifier: ColorClassifier::new(config),
            mapper: GeometryMapper::new(config),
        }
    }

    /// Compile every cell of `grid`.
    pub fn run(&self, grid: &PixelGrid) -> CompiledMap {
        let mut prefabs = self
            .config
            .use_prefabs
            .then(|| PrefabIndex::build(grid, self.config.prefab_prefix.as_str()));

        let mut records = Vec::new();
        let mut definitions = Vec::new();
        let mut bounds = Bounds::new();
        let mut stats = CompileStats::default();

        for (col, row, sample) in grid.iter_cells() {
            stats.cells += 1;

            let Classification { visible, material } = self.classifier.classify(sample);
            if !visible {
                stats.skipped += 1;
                continue;
            }
            stats.visible += 1;

            let placement = self.mapper.place(col, row);
            bounds.include(&placement.bounds());

            let key = sample.key();
            let registration = prefabs.as_mut().and_then(|index| index.register(key));

            let record = match registration {
                Some(reg) => {
                    if reg.is_first_occurrence {
                        definitions.push(PrefabDefinition {
                            name: reg.definition_name.clone(),
                            body: self.emit(self.mapper.local(), key, material),
                        });
                        stats.definitions += 1;
                    }
                    stats.prefab_instances += 1;
                    Record::Prefab(PrefabInstance {
                        position: self.mapper.anchor(col, row),
                        name: reg.definition_name,
                    })
                }
                None => {
                    let record = self.emit(placement, key, material);
                    match record {
                        Record::Effect(_) => stats.effects += 1,
                        _ => stats.brushes += 1,
                    }
                    record
                }
            };
            records.push(record);
        }

        if let Some(clip) = build_clip(&bounds, self.config) {
            records.push(Record::Brush(clip));
            stats.clip = true;
        }

        CompiledMap {
            records,
            definitions,
            bounds,
            stats,
        }
    }

    /// Full geometry record for a placement.
    fn emit(&self, placement: Placement, colour: ColorKey, material: &str) -> Record {
        match (placement, &self.config.effect) {
            (Placement::Point(position), Some(effect)) => Record::Effect(EffectRecord {
                position,
                angles: effect.angles,
                name: effect.name.clone(),
                materials: (0..effect.material_slots)
                    .map(|_| (material.to_string(), colour))
                    .collect(),
                scale: effect.scale,
            }),
            (placement, _) => Record::Brush(BrushRecord::new(placement.bounds(), colour, material)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EffectConfig;
    use crate::types::{Axis, Cuboid, MaterialOverride, Point3, Rgb, RgbRange, Sample};

    fn row(samples: Vec<Sample>) -> PixelGrid {
        let width = samples.len();
        PixelGrid::new(width, 1, samples).unwrap()
    }

    fn brushes(map: &CompiledMap) -> Vec<&BrushRecord> {
        map.records
            .iter()
            .filter_map(|r| match r {
                Record::Brush(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_single_pixel_brush_and_clip() {
        let grid = row(vec![Sample::rgb(255, 0, 128)]);
        let map = compile(&grid, &ConvertConfig::default()).unwrap();

        assert_eq!(map.records.len(), 2);
        let all = brushes(&map);
        assert_eq!(all[0].cuboid, Cuboid::new([0.0, -16.0, 0.0], [16.0, 0.0, 16.0]));
        assert_eq!(all[0].colour, ColorKey(0xFFFF0080));
        assert_eq!(all[1].cuboid.min, [-1.0, -17.0, -1.0]);
        assert_eq!(all[1].cuboid.max, [17.0, 1.0, 17.0]);
        assert!(map.stats.clip);
    }

    #[test]
    fn test_clip_disabled() {
        let grid = row(vec![Sample::rgb(1, 1, 1), Sample::rgb(2, 2, 2)]);
        let config = ConvertConfig {
            clip_padding: -1.0,
            ..Default::default()
        };
        let map = compile(&grid, &config).unwrap();

        assert_eq!(map.records.len(), 2);
        assert!(!map.stats.clip);
        assert_eq!(map.stats.brushes, 2);
    }

    #[test]
    fn test_visible_brushes_span_cell_size() {
        let grid = PixelGrid::from_rows(vec![
            vec![Sample::rgb(1, 0, 0), Sample::rgb(2, 0, 0), Sample::rgb(3, 0, 0)],
            vec![Sample::rgb(4, 0, 0), Sample::rgb(5, 0, 0), Sample::rgb(6, 0, 0)],
        ])
        .unwrap();
        let config = ConvertConfig {
            cell_size: 4.0,
            clip_padding: -1.0,
            ..Default::default()
        };
        let map = compile(&grid, &config).unwrap();

        for brush in brushes(&map) {
            for axis in Axis::ALL {
                assert_eq!(brush.cuboid.extent(axis), 4.0);
            }
        }
    }

    #[test]
    fn test_transparent_and_alpha_skipped() {
        let grid = row(vec![
            Sample::rgb(56, 62, 23),
            Sample::new(9, 9, 9, 10),
            Sample::rgb(9, 9, 9),
        ]);
        let config = ConvertConfig {
            transparent_colors: vec![Rgb::new(56, 62, 23)],
            alpha_threshold: 128,
            clip_padding: -1.0,
            ..Default::default()
        };
        let map = compile(&grid, &config).unwrap();

        assert_eq!(map.stats.skipped, 2);
        assert_eq!(map.records.len(), 1);
        // Only the third cell is placed.
        assert_eq!(brushes(&map)[0].cuboid.min[0], 32.0);
    }

    #[test]
    fn test_bounds_follow_flipped_geometry() {
        let grid = row(vec![Sample::rgb(1, 1, 1), Sample::rgb(1, 1, 1)]);
        let config = ConvertConfig {
            flip_xz: true,
            clip_padding: 0.0,
            ..Default::default()
        };
        let map = compile(&grid, &config).unwrap();
        let bounds = map.bounds.to_cuboid().unwrap();

        assert_eq!(bounds.min, [0.0, -16.0, 0.0]);
        assert_eq!(bounds.max, [16.0, 0.0, 32.0]);
    }

    #[test]
    fn test_material_override_applied() {
        let grid = row(vec![Sample::rgb(220, 10, 10), Sample::rgb(10, 10, 10)]);
        let config = ConvertConfig {
            material: "base".to_string(),
            material_overrides: vec![MaterialOverride::new(
                "red",
                vec![RgbRange::new([200, 0, 0], [255, 60, 60])],
            )],
            clip_padding: -1.0,
            ..Default::default()
        };
        let map = compile(&grid, &config).unwrap();
        let all = brushes(&map);

        assert_eq!(all[0].material, "red");
        assert_eq!(all[1].material, "base");
    }

    #[test]
    fn test_prefab_dedup_counts() {
        let a = Sample::rgb(10, 20, 30);
        let b = Sample::rgb(40, 50, 60);
        let grid = row(vec![a, b, a, a]);
        let config = ConvertConfig {
            use_prefabs: true,
            clip_padding: -1.0,
            ..Default::default()
        };
        let map = compile(&grid, &config).unwrap();

        assert_eq!(map.definitions.len(), 1);
        assert_eq!(map.definitions[0].name, "pixel_0a141e");

        let instances: Vec<&PrefabInstance> = map
            .records
            .iter()
            .filter_map(|r| match r {
                Record::Prefab(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(instances.len(), 3);
        assert!(instances.iter().all(|p| p.name == "pixel_0a141e"));
        assert_eq!(instances[1].position, Point3::new(32.0, 0.0, 0.0));

        let full = brushes(&map);
        assert_eq!(full.len(), 1);
        assert_eq!(full[0].colour, ColorKey::from_rgb(40, 50, 60));

        assert_eq!(map.stats.prefab_instances, 3);
        assert_eq!(map.stats.definitions, 1);
        assert_eq!(map.stats.brushes, 1);
    }

    #[test]
    fn test_prefab_repeat_counts_hidden_samples() {
        // The second sample falls below the alpha threshold but still makes
        // the colour repeat, so the one visible cell becomes an instance.
        let grid = row(vec![Sample::new(10, 20, 30, 255), Sample::new(10, 20, 30, 8)]);
        let config = ConvertConfig {
            use_prefabs: true,
            alpha_threshold: 128,
            clip_padding: -1.0,
            ..Default::default()
        };
        let map = compile(&grid, &config).unwrap();

        assert_eq!(map.stats.visible, 1);
        assert_eq!(map.stats.skipped, 1);
        assert_eq!(map.stats.definitions, 1);
        assert_eq!(map.stats.prefab_instances, 1);
        assert_eq!(map.stats.brushes, 0);
    }

    #[test]
    fn test_prefab_definition_anchored_at_zero() {
        let a = Sample::rgb(10, 20, 30);
        let grid = row(vec![a, a]);
        let config = ConvertConfig {
            origin: [100.0, 100.0, 100.0],
            use_prefabs: true,
            ..Default::default()
        };
        let map = compile(&grid, &config).unwrap();

        let Record::Brush(body) = &map.definitions[0].body else {
            panic!("expected brush body");
        };
        assert_eq!(body.cuboid, Cuboid::new([0.0, -16.0, 0.0], [16.0, 0.0, 16.0]));

        // The clip still encloses the real cell positions.
        let bounds = map.bounds.to_cuboid().unwrap();
        assert_eq!(bounds.min, [100.0, 84.0, 100.0]);
        assert_eq!(bounds.max, [132.0, 100.0, 116.0]);
    }

    #[test]
    fn test_prefabs_disabled_by_default() {
        let a = Sample::rgb(10, 20, 30);
        let map = compile(&row(vec![a, a]), &ConvertConfig::default()).unwrap();
        assert!(map.definitions.is_empty());
        assert_eq!(map.stats.brushes, 2);
    }

    #[test]
    fn test_effect_mode_records() {
        let grid = row(vec![Sample::rgb(1, 2, 3), Sample::rgb(4, 5, 6)]);
        let config = ConvertConfig {
            effect: Some(EffectConfig {
                material_slots: 2,
                ..EffectConfig::new("fx/dot")
            }),
            ..Default::default()
        };
        let map = compile(&grid, &config).unwrap();

        let Record::Effect(second) = &map.records[1] else {
            panic!("expected effect");
        };
        assert_eq!(second.position, Point3::new(16.0, 0.0, 0.0));
        assert_eq!(second.materials.len(), 2);
        assert_eq!(second.materials[1].1, ColorKey::from_rgb(4, 5, 6));
        assert_eq!(map.stats.effects, 2);

        // Points span x 0..16, y 0; clip pads by 1 then shifts min X/Y by the spacing.
        let Record::Brush(clip) = &map.records[2] else {
            panic!("expected clip");
        };
        assert_eq!(clip.cuboid.min, [-17.0, -17.0, -1.0]);
        assert_eq!(clip.cuboid.max, [17.0, 1.0, 1.0]);
    }

    #[test]
    fn test_effect_prefab_definition_at_origin() {
        let a = Sample::rgb(1, 2, 3);
        let config = ConvertConfig {
            effect: Some(EffectConfig::new("fx/dot")),
            use_prefabs: true,
            ..Default::default()
        };
        let map = compile(&row(vec![a, a]), &config).unwrap();

        let Record::Effect(body) = &map.definitions[0].body else {
            panic!("expected effect body");
        };
        assert_eq!(body.position, Point3::ZERO);
        assert_eq!(map.stats.prefab_instances, 2);
    }

    #[test]
    fn test_invalid_config_produces_nothing() {
        let config = ConvertConfig {
            cell_size: 0.0,
            ..Default::default()
        };
        assert!(compile(&row(vec![Sample::rgb(1, 1, 1)]), &config).is_err());
    }

    #[test]
    fn test_all_transparent_emits_nothing() {
        let grid = row(vec![Sample::new(0, 0, 0, 0); 3]);
        let config = ConvertConfig {
            alpha_threshold: 1,
            ..Default::default()
        };
        let map = compile(&grid, &config).unwrap();
        assert!(map.records.is_empty());
        assert!(map.geometry_text().is_empty());
    }

    #[test]
    fn test_compile_is_deterministic() {
        let a = Sample::rgb(10, 20, 30);
        let b = Sample::rgb(40, 50, 60);
        let c = Sample::rgb(70, 80, 90);
        let grid = PixelGrid::from_rows(vec![vec![c, a, b, c], vec![b, a, c, a]]).unwrap();
        let config = ConvertConfig {
            use_prefabs: true,
            ..Default::default()
        };

        let first = compile(&grid, &config).unwrap();
        let second = compile(&grid, &config).unwrap();
        assert_eq!(first.geometry_text(), second.geometry_text());
        assert_eq!(first.definitions_text(), second.definitions_text());

        let names: Vec<&str> = first.definitions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["pixel_46505a", "pixel_0a141e", "pixel_28323c"]);
    }
}
