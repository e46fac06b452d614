//! Enclosing clip brush.

use crate::config::ConvertConfig;
use crate::render::BrushRecord;
use crate::types::Bounds;

/// Build the clip brush around everything placed.
///
/// Returns `None` when the clip is disabled or nothing was placed. In effect
/// mode the minimum X and Y are widened by one point spacing step, since
/// points have no extent of their own.
pub fn build_clip(bounds: &Bounds, config: &ConvertConfig) -> Option<BrushRecord> {
    if !config.clip_enabled() {
        return None;
    }

    let mut cuboid = bounds.to_cuboid()?.padded(config.clip_padding);
    if config.is_effect_mode() {
        let (dx, dy) = config.effect_offset();
        cuboid.min[0] -= dx;
        cuboid.min[1] -= dy;
    }

    Some(BrushRecord::clip(cuboid))
}
