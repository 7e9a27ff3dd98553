//! Backdrop derivation
//!
//! The backdrop behind a sheet has no state of its own. Opacity, visibility
//! and tint are recomputed from the sheet offset on every change.

use glide_core::Color;

use crate::config::BackdropConfig;

/// Opacity of the backdrop for a sheet at `offset` with `height`.
///
/// Linear from 1 at offset 0 to 0 at offset `height`, clamped. An
/// unmeasured height (zero, negative, NaN) yields 1 instead of NaN.
pub fn backdrop_opacity(offset: f32, height: f32) -> f32 {
    if !(height.is_finite() && height > 0.0) || offset.is_nan() {
        return 1.0;
    }
    (1.0 - offset / height).clamp(0.0, 1.0)
}

/// Whether the backdrop should be laid out at all
pub fn backdrop_visible(opacity: f32) -> bool {
    !opacity.is_nan() && opacity > 0.0
}

/// Backdrop color for an opacity: `base` with alpha scaled by `max_dim`
pub fn backdrop_tint(base: Color, opacity: f32, max_dim: f32) -> Color {
    let opacity = if opacity.is_nan() { 0.0 } else { opacity };
    base.with_alpha((base.a * opacity * max_dim).clamp(0.0, 1.0))
}

/// Resolved backdrop appearance for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropStyle {
    pub opacity: f32,
    pub visible: bool,
    pub tint: Color,
}

impl BackdropStyle {
    pub fn compute(offset: f32, height: f32, config: &BackdropConfig) -> Self {
        let opacity = backdrop_opacity(offset, height);
        Self {
            opacity,
            visible: backdrop_visible(opacity),
            tint: backdrop_tint(config.color(), opacity, config.max_dim),
        }
    }
}
