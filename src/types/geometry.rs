//! World-space geometry primitives: points, cuboids and running bounds.

/// A world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A point in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_array(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn get(self, axis: Axis) -> f64 {
        self.to_array()[axis.index()]
    }
}

/// Axis-aligned box. `min[i] <= max[i]` on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Cuboid {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        debug_assert!((0..3).all(|i| min[i] <= max[i]), "inverted cuboid");
        Self { min, max }
    }

    /// Zero-extent cuboid at a point.
    pub fn point(p: Point3) -> Self {
        let a = p.to_array();
        Self { min: a, max: a }
    }

    pub fn x_min(&self) -> f64 {
        self.min[0]
    }

    pub fn x_max(&self) -> f64 {
        self.max[0]
    }

    pub fn y_min(&self) -> f64 {
        self.min[1]
    }

    pub fn y_max(&self) -> f64 {
        self.max[1]
    }

    pub fn z_min(&self) -> f64 {
        self.min[2]
    }

    pub fn z_max(&self) -> f64 {
        self.max[2]
    }

    /// Size along an axis.
    pub fn extent(&self, axis: Axis) -> f64 {
        self.max[axis.index()] - self.min[axis.index()]
    }

    /// Move the whole box by `-offset`.
    pub fn relative_to(&self, offset: Point3) -> Self {
        let o = offset.to_array();
        Self {
            min: [self.min[0] - o[0], self.min[1] - o[1], self.min[2] - o[2]],
            max: [self.max[0] - o[0], self.max[1] - o[1], self.max[2] - o[2]],
        }
    }

    /// Expand outward by `amount` on every side.
    pub fn padded(&self, amount: f64) -> Self {
        Self {
            min: self.min.map(|v| v - amount),
            max: self.max.map(|v| v + amount),
        }
    }
}

/// Running bounding volume over everything placed so far.
///
/// Starts inverted at `+inf/-inf` so the first `include` sets it exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: [f64; 3],
    max: [f64; 3],
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    pub fn new() -> Self {
        Self {
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
        }
    }

    /// Widen to cover `cuboid`.
    pub fn include(&mut self, cuboid: &Cuboid) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(cuboid.min[i]);
            self.max[i] = self.max[i].max(cuboid.max[i]);
        }
    }

    /// Union of two accumulators.
    pub fn merge(&mut self, other: &Bounds) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(other.min[i]);
            self.max[i] = self.max[i].max(other.max[i]);
        }
    }

    /// True until something has been included.
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// The covered volume, or `None` if nothing was included.
    pub fn to_cuboid(&self) -> Option<Cuboid> {
        if self.is_empty() {
            None
        } else {
            Some(Cuboid {
                min: self.min,
                max: self.max,
            })
        }
    }
}
