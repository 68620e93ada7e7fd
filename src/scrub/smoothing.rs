use crate::{
    foundation::core::FrameIndex,
    scrub::mapping::{ScrollMetrics, target_frame_for_fraction},
};

/// Default per-tick smoothing rate.
pub const DEFAULT_EASE: f64 = 0.06;

/// Continuous scrub position: where scrolling wants to be and what is on screen.
///
/// Both positions stay inside `[0, N - 1]`. `current` chases `target` with a first-order
/// low-pass filter, so it never overshoots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubState {
    len: u32,
    target: f64,
    current: f64,
}

impl ScrubState {
    /// Rest state at frame 0 for a sequence of `len` frames (at least 1).
    pub fn new(len: u32) -> Self {
        Self {
            len: len.max(1),
            target: 0.0,
            current: 0.0,
        }
    }

    /// Sequence length `N`.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Always `false`; a scrub state covers at least one frame.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Target position derived from the latest scroll input.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Smoothed on-screen position.
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Frame the renderer shows, `floor(current)`.
    pub fn displayed(&self) -> FrameIndex {
        FrameIndex::from_position(self.current).min(FrameIndex(self.len - 1))
    }

    fn last(&self) -> f64 {
        f64::from(self.len - 1)
    }

    /// Retarget from scroll metrics; returns the new target.
    pub fn apply_scroll_target(&mut self, metrics: &ScrollMetrics) -> f64 {
        self.set_target(target_frame_for_fraction(metrics.fraction(), self.len))
    }

    /// Set the target position directly, clamped into `[0, N - 1]`.
    pub fn set_target(&mut self, frame: f64) -> f64 {
        self.target = if frame.is_nan() {
            0.0
        } else {
            frame.clamp(0.0, self.last())
        };
        self.target
    }

    /// One smoothing step, `current += (target - current) * ease`.
    ///
    /// `ease` is clamped into `[0, 1]`. Returns the frame to display.
    pub fn advance_smoothing(&mut self, ease: f64) -> FrameIndex {
        let ease = if ease.is_nan() { 0.0 } else { ease.clamp(0.0, 1.0) };
        self.current += (self.target - self.current) * ease;
        self.current = self.current.clamp(0.0, self.last());
        self.displayed()
    }

    /// Return `true` once `current` is within `epsilon` of `target`.
    pub fn is_settled(&self, epsilon: f64) -> bool {
        (self.target - self.current).abs() <= epsilon
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scrub/smoothing.rs"]
mod tests;
