//! Image decoding into a pixel grid.
//!
//! Decodes any format the `image` crate handles, applies the configured
//! rotation and resize, and flattens the result into `Sample`s. Images
//! without an alpha channel come out fully opaque.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::config::ConvertConfig;
use crate::error::{ReflexError, Result};
use crate::types::{PixelGrid, Sample};

/// File extensions picked up when converting a directory.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tga"];

/// Pre-processing applied after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceOptions {
    /// Clockwise rotation in degrees (0, 90, 180, 270).
    pub rotate: u32,
    /// Exact output size, nearest-neighbour filtered.
    pub resize: Option<[u32; 2]>,
}

impl SourceOptions {
    pub fn from_config(config: &ConvertConfig) -> Self {
        Self {
            rotate: config.rotate,
            resize: config.resize,
        }
    }
}

/// Check whether a path looks like a supported image.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

/// Decode an image file into a grid.
pub fn load_grid(path: &Path, options: &SourceOptions) -> Result<PixelGrid> {
    let img = image::open(path).map_err(|e| ReflexError::Image {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    grid_from_image(img, options)
}

/// Convert an already decoded image into a grid.
pub fn grid_from_image(img: DynamicImage, options: &SourceOptions) -> Result<PixelGrid> {
    let img = match options.rotate {
        0 => img,
        90 => img.rotate90(),
        180 => img.rotate180(),
        270 => img.rotate270(),
        other => {
            return Err(ReflexError::Config {
                message: format!("Unsupported rotation: {} degrees", other),
                help: Some("Use 0, 90, 180 or 270".to_string()),
            })
        }
    };

    let img = match options.resize {
        Some([w, h]) if (w, h) != img.dimensions() => img.resize_exact(w, h, FilterType::Nearest),
        _ => img,
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let samples = rgba
        .pixels()
        .map(|p| Sample::new(p[0], p[1], p[2], p[3]))
        .collect();

    PixelGrid::new(width as usize, height as usize, samples)
}
