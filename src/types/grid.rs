//! Decoded pixel grid.

use crate::error::{ReflexError, Result};

use super::Sample;

/// A rectangular row-major grid of samples. Row 0 is the top of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    samples: Vec<Sample>,
}

impl PixelGrid {
    /// Build a grid from a flat row-major sample buffer.
    pub fn new(width: usize, height: usize, samples: Vec<Sample>) -> Result<Self> {
        if samples.len() != width * height {
            return Err(ReflexError::Config {
                message: format!(
                    "Pixel buffer holds {} samples, expected {}x{} = {}",
                    samples.len(),
                    width,
                    height,
                    width * height
                ),
                help: None,
            });
        }

        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Build a grid from rows. All rows must be the same length.
    pub fn from_rows(rows: Vec<Vec<Sample>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());

        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(ReflexError::Config {
                message: format!(
                    "Row {} has {} samples but row 0 has {}",
                    y,
                    row.len(),
                    width
                ),
                help: Some("Pixel grids must be rectangular".to_string()),
            });
        }

        Self::new(width, height, rows.into_iter().flatten().collect())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the sample at the given cell.
    pub fn get(&self, col: usize, row: usize) -> Option<Sample> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.samples.get(row * self.width + col).copied()
    }

    /// Iterate over all cells as (col, row, sample) in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Sample)> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(move |(i, &s)| (i % self.width, i / self.width, s))
    }

    /// All samples in row-major order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}
