use crate::foundation::core::{Affine, Size};

/// Window state that drives surface layout.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Logical (CSS) width.
    pub width: f64,
    /// Logical (CSS) height.
    pub height: f64,
    /// Physical pixels per logical pixel.
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Viewport of `width x height` logical pixels at `device_pixel_ratio`.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// Surface geometry derived from a [`Viewport`].
///
/// Backing store is `floor(logical * dpr)` physical pixels (at least 1x1). Draw calls are issued
/// in logical units under [`SurfaceLayout::transform`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceLayout {
    /// Logical size used for clearing and placement.
    pub logical: Size,
    /// Backing-store width in physical pixels.
    pub backing_width: u32,
    /// Backing-store height in physical pixels.
    pub backing_height: u32,
    /// Effective device pixel ratio.
    pub device_pixel_ratio: f64,
}

impl SurfaceLayout {
    /// Compute layout for `viewport`.
    ///
    /// A non-finite or non-positive pixel ratio falls back to 1; negative or non-finite
    /// dimensions collapse to 0.
    pub fn from_viewport(viewport: &Viewport) -> Self {
        let dpr = if viewport.device_pixel_ratio.is_finite() && viewport.device_pixel_ratio > 0.0
        {
            viewport.device_pixel_ratio
        } else {
            1.0
        };
        let w = sanitize_len(viewport.width);
        let h = sanitize_len(viewport.height);
        Self {
            logical: Size::new(w, h),
            backing_width: backing_len(w, dpr),
            backing_height: backing_len(h, dpr),
            device_pixel_ratio: dpr,
        }
    }

    /// Logical-to-physical transform, `scale(dpr)`.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.device_pixel_ratio)
    }
}

fn sanitize_len(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

fn backing_len(logical: f64, dpr: f64) -> u32 {
    let px = (logical * dpr).floor();
    if px < 1.0 {
        1
    } else {
        px.min(f64::from(u32::MAX)) as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/viewport.rs"]
mod tests;
