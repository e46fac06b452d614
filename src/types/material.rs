//! Material override rules.
//!
//! An override remaps every pixel whose colour falls inside one of its
//! inclusive RGB ranges to a different surface material.
//!
//! # Example
//!
//! ```yaml
//! material_overrides:
//!   - material: common/materials/effects/glow_red
//!     ranges:
//!       - [200, 0, 0, 255, 60, 60]
//!   - material: common/materials/floor/concrete
//!     ranges:
//!       - [0, 0, 0, 40, 40, 40]
//!       - [90, 90, 90, 110, 110, 110]
//! ```

use serde::{Deserialize, Serialize};

use super::Sample;

/// Inclusive RGB box `[r_lo, g_lo, b_lo, r_hi, g_hi, b_hi]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct RgbRange {
    pub lo: [u8; 3],
    pub hi: [u8; 3],
}

impl RgbRange {
    pub const fn new(lo: [u8; 3], hi: [u8; 3]) -> Self {
        Self { lo, hi }
    }

    /// Check whether every channel of the sample lies within the range.
    pub fn contains(&self, sample: Sample) -> bool {
        let rgb = [sample.r, sample.g, sample.b];
        (0..3).all(|i| self.lo[i] <= rgb[i] && rgb[i] <= self.hi[i])
    }

    /// Channels whose lower bound exceeds the upper bound ("r", "g", "b").
    pub fn inverted_channels(&self) -> Vec<&'static str> {
        ["r", "g", "b"]
            .into_iter()
            .enumerate()
            .filter(|&(i, _)| self.lo[i] > self.hi[i])
            .map(|(_, name)| name)
            .collect()
    }
}

impl TryFrom<Vec<u8>> for RgbRange {
    type Error = String;

    fn try_from(v: Vec<u8>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            &[r_lo, g_lo, b_lo, r_hi, g_hi, b_hi] => {
                Ok(Self::new([r_lo, g_lo, b_lo], [r_hi, g_hi, b_hi]))
            }
            other => Err(format!(
                "colour range needs 6 values [r_lo, g_lo, b_lo, r_hi, g_hi, b_hi], got {}",
                other.len()
            )),
        }
    }
}

impl From<RgbRange> for Vec<u8> {
    fn from(r: RgbRange) -> Self {
        vec![r.lo[0], r.lo[1], r.lo[2], r.hi[0], r.hi[1], r.hi[2]]
    }
}

/// A material name and the colour ranges that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialOverride {
    pub material: String,
    #[serde(default)]
    pub ranges: Vec<RgbRange>,
}

impl MaterialOverride {
    pub fn new(material: impl Into<String>, ranges: Vec<RgbRange>) -> Self {
        Self {
            material: material.into(),
            ranges,
        }
    }

    /// Check whether any of the ranges contains the sample.
    pub fn matches(&self, sample: Sample) -> bool {
        self.ranges.iter().any(|range| range.contains(sample))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_inclusive() {
        let range = RgbRange::new([10, 20, 30], [10, 40, 50]);
        assert!(range.contains(Sample::rgb(10, 20, 30)));
        assert!(range.contains(Sample::rgb(10, 40, 50)));
        assert!(!range.contains(Sample::rgb(11, 30, 40)));
        assert!(!range.contains(Sample::rgb(10, 41, 40)));
    }

    #[test]
    fn test_range_from_vec() {
        let range = RgbRange::try_from(vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(range, RgbRange::new([1, 2, 3], [4, 5, 6]));
        assert!(RgbRange::try_from(vec![1, 2, 3]).is_err());
    }

    #[test]
    fn test_inverted_channels() {
        let range = RgbRange::new([200, 0, 5], [100, 255, 4]);
        assert_eq!(range.inverted_channels(), vec!["r", "b"]);
        assert!(RgbRange::new([0; 3], [255; 3]).inverted_channels().is_empty());
    }

    #[test]
    fn test_parse_override_yaml() {
        let yaml = "material: floor\nranges:\n  - [0, 0, 0, 40, 40, 40]\n";
        let entry: MaterialOverride = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entry.material, "floor");
        assert_eq!(entry.ranges.len(), 1);
        assert!(entry.matches(Sample::rgb(20, 20, 20)));
    }

    #[test]
    fn test_parse_override_bad_arity() {
        let yaml = "material: floor\nranges:\n  - [0, 0, 0, 40]\n";
        assert!(serde_yaml::from_str::<MaterialOverride>(yaml).is_err());
    }
}
