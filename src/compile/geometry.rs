//! Grid cell to world geometry mapping.
//!
//! A cell is first laid out in the image frame: columns run along +X, rows
//! run down -Y and the brush extends up +Z from the origin. The configured
//! flips are folded once into an [`AxisMap`] which then relabels every
//! cell's geometry (origin included) the same way for the whole run.

use crate::config::ConvertConfig;
use crate::types::{Axis, Cuboid, Point3};

/// Which image-frame axis feeds each world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisMap([Axis; 3]);

impl Default for AxisMap {
    fn default() -> Self {
        Self::identity()
    }
}

impl AxisMap {
    pub const fn identity() -> Self {
        Self([Axis::X, Axis::Y, Axis::Z])
    }

    /// Exchange two world axes on top of the current mapping.
    pub fn swap(mut self, a: Axis, b: Axis) -> Self {
        self.0.swap(a.index(), b.index());
        self
    }

    /// Fold the configured flips in fixed order: X/Y, then X/Z, then Y/Z.
    /// The X/Y flip only exists for brushes.
    pub fn from_config(config: &ConvertConfig) -> Self {
        let mut map = Self::identity();
        if config.flip_xy && !config.is_effect_mode() {
            map = map.swap(Axis::X, Axis::Y);
        }
        if config.flip_xz {
            map = map.swap(Axis::X, Axis::Z);
        }
        if config.flip_yz {
            map = map.swap(Axis::Y, Axis::Z);
        }
        map
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Image-frame axis feeding `world`.
    pub fn source(&self, world: Axis) -> Axis {
        self.0[world.index()]
    }

    pub fn apply_point(&self, p: Point3) -> Point3 {
        let src = p.to_array();
        Point3::from_array(self.0.map(|axis| src[axis.index()]))
    }

    /// Relabel whole min/max pairs so each axis stays ordered.
    pub fn apply_cuboid(&self, c: &Cuboid) -> Cuboid {
        Cuboid::new(
            self.0.map(|axis| c.min[axis.index()]),
            self.0.map(|axis| c.max[axis.index()]),
        )
    }
}

/// Where a single cell ended up in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// A solid occupying the cell.
    Brush(Cuboid),
    /// A zero-extent effect position.
    Point(Point3),
}

impl Placement {
    /// Volume folded into the running bounds.
    pub fn bounds(&self) -> Cuboid {
        match self {
            Placement::Brush(c) => *c,
            Placement::Point(p) => Cuboid::point(*p),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Layout {
    Brush { size: f64 },
    Point { dx: f64, dy: f64 },
}

/// Computes per-cell world geometry for a fixed configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMapper {
    layout: Layout,
    origin: Point3,
    axes: AxisMap,
}

impl GeometryMapper {
    pub fn new(config: &ConvertConfig) -> Self {
        let layout = if config.is_effect_mode() {
            let (dx, dy) = config.effect_offset();
            Layout::Point { dx, dy }
        } else {
            Layout::Brush {
                size: config.cell_size,
            }
        };

        Self {
            layout,
            origin: Point3::from_array(config.origin),
            axes: AxisMap::from_config(config),
        }
    }

    /// World geometry for the cell at `(col, row)`.
    pub fn place(&self, col: usize, row: usize) -> Placement {
        let Point3 {
            x: ox,
            y: oy,
            z: oz,
        } = self.origin;
        let (col, row) = (col as f64, row as f64);

        match self.layout {
            Layout::Brush { size } => {
                let cuboid = Cuboid::new(
                    [ox + col * size, oy - (row + 1.0) * size, oz],
                    [ox + (col + 1.0) * size, oy - row * size, oz + size],
                );
                Placement::Brush(self.axes.apply_cuboid(&cuboid))
            }
            Layout::Point { dx, dy } => {
                let point = Point3::new(ox + col * dx, oy - row * dy, oz);
                Placement::Point(self.axes.apply_point(point))
            }
        }
    }

    /// Reference point of a cell: its top-left corner at the origin plane,
    /// or the effect position itself.
    pub fn anchor(&self, col: usize, row: usize) -> Point3 {
        let Point3 {
            x: ox,
            y: oy,
            z: oz,
        } = self.origin;
        let (col, row) = (col as f64, row as f64);

        let point = match self.layout {
            Layout::Brush { size } => Point3::new(ox + col * size, oy - row * size, oz),
            Layout::Point { dx, dy } => Point3::new(ox + col * dx, oy - row * dy, oz),
        };
        self.axes.apply_point(point)
    }

    /// Cell geometry expressed relative to the cell's anchor. This is the
    /// same for every cell, so it serves as a shared prefab body.
    pub fn local(&self) -> Placement {
        let anchor = self.anchor(0, 0);
        match self.place(0, 0) {
            Placement::Brush(c) => Placement::Brush(c.relative_to(anchor)),
            Placement::Point(_) => Placement::Point(Point3::ZERO),
        }
    }
}
