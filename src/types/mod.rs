//! Core domain types for reflexpx.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Sample` / `Rgb` / `ColorKey` - pixel colours and packed colour literals
//! - `PixelGrid` - the decoded image as a row-major grid of samples
//! - `Cuboid` / `Bounds` - world-space boxes and the running bounding volume
//! - `MaterialOverride` - colour ranges remapped to other materials

mod colour;
mod geometry;
mod grid;
mod material;

pub use colour::{ColorKey, Rgb, Sample};
pub use geometry::{Axis, Bounds, Cuboid, Point3};
pub use grid::PixelGrid;
pub use material::{MaterialOverride, RgbRange};
