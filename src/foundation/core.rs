use std::fmt;

pub use kurbo::{Affine, Rect, Size};

/// Zero-based index into a frame sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

impl FrameIndex {
    /// Displayed frame for a continuous sequence position.
    ///
    /// Uses floor semantics. Negative and non-finite positions map to frame 0.
    pub fn from_position(pos: f64) -> Self {
        if !pos.is_finite() || pos <= 0.0 {
            return Self(0);
        }
        Self(pos.floor().min(f64::from(u32::MAX)) as u32)
    }

    /// Index as a `usize`, for slot lookups.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Clamp `v` into `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
