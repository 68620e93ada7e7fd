use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    assets::sequence::{FrameSequence, FrameTemplate},
    foundation::error::{ScrubError, ScrubResult},
    layout::fit::FitMode,
    render::fade::DEFAULT_FADE_THRESHOLD,
    scrub::smoothing::DEFAULT_EASE,
};

fn default_ease() -> f64 {
    DEFAULT_EASE
}

fn default_fade_threshold() -> u32 {
    DEFAULT_FADE_THRESHOLD
}

fn default_end_signal_offset() -> f64 {
    2.0
}

/// Scrubber construction parameters.
///
/// JSON form:
///
/// ```json
/// {
///   "total_frames": 248,
///   "frames": { "base": "frames/hero_", "digits": 4, "extension": "png" },
///   "ease": 0.06,
///   "fade_threshold": 8,
///   "end_signal_offset": 2.0,
///   "fit": "cover"
/// }
/// ```
///
/// Everything except `total_frames` and `frames.base` has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrubConfig {
    /// Sequence length `N`.
    pub total_frames: u32,
    /// Naming scheme for frame assets.
    pub frames: FrameTemplate,
    /// Per-tick smoothing rate in `(0, 1)`.
    #[serde(default = "default_ease")]
    pub ease: f64,
    /// Frames over which end-of-sequence opacity ramps to zero.
    #[serde(default = "default_fade_threshold")]
    pub fade_threshold: u32,
    /// The end hook fires once the smoothed position reaches `N - end_signal_offset`.
    #[serde(default = "default_end_signal_offset")]
    pub end_signal_offset: f64,
    /// Placement rule for mismatched aspect ratios.
    #[serde(default)]
    pub fit: FitMode,
}

impl ScrubConfig {
    /// Config with default constants.
    pub fn new(total_frames: u32, frames: FrameTemplate) -> Self {
        Self {
            total_frames,
            frames,
            ease: default_ease(),
            fade_threshold: default_fade_threshold(),
            end_signal_offset: default_end_signal_offset(),
            fit: FitMode::default(),
        }
    }

    /// Parse a config from a JSON reader. The result is validated.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrubResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ScrubError::serde(format!("parse scrub config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON string. The result is validated.
    pub fn from_json_str(s: &str) -> ScrubResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a config from a JSON file on disk. The result is validated.
    pub fn from_path(path: impl AsRef<Path>) -> ScrubResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrubError::validation(format!("open scrub config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every constant is in range.
    pub fn validate(&self) -> ScrubResult<()> {
        if self.total_frames == 0 {
            return Err(ScrubError::validation("total_frames must be >= 1"));
        }
        if !(self.ease.is_finite() && self.ease > 0.0 && self.ease < 1.0) {
            return Err(ScrubError::validation("ease must be in (0, 1)"));
        }
        if self.fade_threshold == 0 {
            return Err(ScrubError::validation("fade_threshold must be >= 1"));
        }
        if !(self.end_signal_offset.is_finite() && self.end_signal_offset >= 0.0) {
            return Err(ScrubError::validation(
                "end_signal_offset must be finite and >= 0",
            ));
        }
        self.frames.validate()
    }

    /// Frame sequence described by this config.
    pub fn sequence(&self) -> ScrubResult<FrameSequence> {
        FrameSequence::new(self.total_frames, self.frames.clone())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
