use crate::foundation::core::FrameIndex;

/// Default number of trailing frames over which the sequence fades out.
pub const DEFAULT_FADE_THRESHOLD: u32 = 8;

/// Surface opacity for frame `index` of a `total`-frame sequence.
///
/// Within the last `threshold` frames opacity ramps linearly, `(N - index) / threshold`; earlier
/// frames are fully opaque. A zero threshold disables the fade.
pub fn edge_fade_opacity(total: u32, index: FrameIndex, threshold: u32) -> f32 {
    if threshold == 0 {
        return 1.0;
    }
    let remaining = total.saturating_sub(index.0);
    if remaining > threshold {
        return 1.0;
    }
    (remaining as f32 / threshold as f32).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fade.rs"]
mod tests;
