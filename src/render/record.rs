//! Map text records.
//!
//! Every record renders to the fixed, whitespace-significant layout the map
//! editor reads: four spaces per indent level, six-decimal floats and
//! `0xaarrggbb` colour literals.

use std::fmt;

use crate::types::{ColorKey, Cuboid, Point3};

/// Material applied to the enclosing clip brush.
pub const CLIP_MATERIAL: &str = "internal/editor/textures/editor_fullclip";

/// Face definitions as vertex-index quads into the eight brush vertices.
const FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [6, 5, 4, 7],
    [2, 1, 5, 6],
    [0, 3, 7, 4],
    [3, 2, 6, 7],
    [1, 0, 4, 5],
];

/// Texture offset, scale and rotation written before every face's indices.
const FACE_UV: &str = "0.000000 0.000000 1.000000 1.000000 0.000000";

/// An axis-aligned solid.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushRecord {
    pub cuboid: Cuboid,
    pub colour: ColorKey,
    pub material: String,
}

impl BrushRecord {
    pub fn new(cuboid: Cuboid, colour: ColorKey, material: impl Into<String>) -> Self {
        Self {
            cuboid,
            colour,
            material: material.into(),
        }
    }

    /// Invisible clip brush covering `cuboid`.
    pub fn clip(cuboid: Cuboid) -> Self {
        Self::new(cuboid, ColorKey::CLEAR, CLIP_MATERIAL)
    }

    /// The eight corners in output order: top face (max Y) first, then bottom.
    pub fn vertices(&self) -> [[f64; 3]; 8] {
        let c = &self.cuboid;
        let (x0, x1) = (c.x_min(), c.x_max());
        let (y0, y1) = (c.y_min(), c.y_max());
        let (z0, z1) = (c.z_min(), c.z_max());
        [
            [x0, y1, z1],
            [x1, y1, z1],
            [x1, y1, z0],
            [x0, y1, z0],
            [x0, y0, z1],
            [x1, y0, z1],
            [x1, y0, z0],
            [x0, y0, z0],
        ]
    }
}

/// A decorative effect entity at a point.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRecord {
    pub position: Point3,
    pub angles: [f64; 3],
    pub name: String,
    /// One (material, colour) pair per material slot.
    pub materials: Vec<(String, ColorKey)>,
    pub scale: f64,
}

/// A placement of a shared prefab definition.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabInstance {
    pub position: Point3,
    pub name: String,
}

/// One record in the geometry stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Brush(BrushRecord),
    Effect(EffectRecord),
    Prefab(PrefabInstance),
}

/// A named shared definition for the prefab stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefabDefinition {
    pub name: String,
    pub body: Record,
}

impl fmt::Display for BrushRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    brush")?;
        writeln!(f, "        vertices")?;
        for [x, y, z] in self.vertices() {
            writeln!(f, "            {:.6} {:.6} {:.6}", x, y, z)?;
        }
        writeln!(f, "        faces")?;
        for [a, b, c, d] in FACES {
            writeln!(
                f,
                "            {} {} {} {} {} {} {}",
                FACE_UV, a, b, c, d, self.colour, self.material
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for EffectRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point3 { x, y, z } = self.position;
        let [a, b, c] = self.angles;
        writeln!(f, "    entity")?;
        writeln!(f, "        type Effect")?;
        writeln!(f, "        Vector3 position {:.6} {:.6} {:.6}", x, y, z)?;
        writeln!(f, "        Vector3 angles {:.6} {:.6} {:.6}", a, b, c)?;
        writeln!(f, "        String64 effectName {}", self.name)?;
        for (i, (material, colour)) in self.materials.iter().enumerate() {
            writeln!(f, "        String64 material{}Name {}", i, material)?;
            writeln!(f, "        ColourXRGB32 material{}Albedo {}", i, colour)?;
        }
        writeln!(f, "        Float effectScale {:.6}", self.scale)
    }
}

impl fmt::Display for PrefabInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point3 { x, y, z } = self.position;
        writeln!(f, "    entity")?;
        writeln!(f, "        type Prefab")?;
        writeln!(f, "        Vector3 position {:.6} {:.6} {:.6}", x, y, z)?;
        writeln!(f, "        String64 prefabName {}", self.name)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Brush(r) => fmt::Display::fmt(r, f),
            Record::Effect(r) => fmt::Display::fmt(r, f),
            Record::Prefab(r) => fmt::Display::fmt(r, f),
        }
    }
}

impl fmt::Display for PrefabDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "prefab {}", self.name)?;
        fmt::Display::fmt(&self.body, f)
    }
}
