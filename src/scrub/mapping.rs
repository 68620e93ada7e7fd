use crate::foundation::core::clamp01;

/// Document scroll position and extent, in logical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset.
    pub scroll_top: f64,
    /// Total document height.
    pub document_height: f64,
    /// Visible viewport height.
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Metrics for a document scrolled to `fraction` of its scrollable range.
    pub fn at_fraction(fraction: f64, document_height: f64, viewport_height: f64) -> Self {
        let scrollable = (document_height - viewport_height).max(0.0);
        Self {
            scroll_top: clamp01(fraction) * scrollable,
            document_height,
            viewport_height,
        }
    }

    /// Distance the document can scroll, `document_height - viewport_height`.
    pub fn scrollable_height(&self) -> f64 {
        self.document_height - self.viewport_height
    }

    /// Scroll progress in `[0, 1]`.
    ///
    /// A document that cannot scroll (or carries non-finite metrics) reports 0.
    pub fn fraction(&self) -> f64 {
        let scrollable = self.scrollable_height();
        if !scrollable.is_finite() || scrollable <= 0.0 || !self.scroll_top.is_finite() {
            return 0.0;
        }
        clamp01(self.scroll_top / scrollable)
    }
}

/// Map scroll progress to the target frame position for a sequence of `total_frames`.
///
/// Returns `clamp(floor(fraction * N), 0, N - 1)`. Pure: depends on nothing but its inputs.
pub fn target_frame_for_fraction(fraction: f64, total_frames: u32) -> f64 {
    if total_frames == 0 {
        return 0.0;
    }
    let n = f64::from(total_frames);
    let last = n - 1.0;
    (clamp01(fraction) * n).floor().min(last)
}

#[cfg(test)]
#[path = "../../tests/unit/scrub/mapping.rs"]
mod tests;
