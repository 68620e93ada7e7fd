use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ScrubError, ScrubResult};

fn default_digits() -> u8 {
    4
}

fn default_extension() -> String {
    "png".to_owned()
}

/// Naming scheme that resolves a frame index to an asset location.
///
/// A location is `base + zero_pad(index, digits) + "." + extension`, e.g.
/// `frames/hero_0042.png`. `base` may be a relative path, an absolute path, a `file://` URL or a
/// remote URL; interpreting it is up to the injected [`FrameFetcher`](crate::FrameFetcher).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameTemplate {
    /// Prefix placed before the padded index.
    pub base: String,
    /// Zero-padding width of the index.
    #[serde(default = "default_digits")]
    pub digits: u8,
    /// File extension without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl FrameTemplate {
    /// Template with the default 4-digit padding and `png` extension.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            digits: default_digits(),
            extension: default_extension(),
        }
    }

    /// Check the template can produce well-formed locations.
    pub fn validate(&self) -> ScrubResult<()> {
        if !(1..=9).contains(&self.digits) {
            return Err(ScrubError::validation(
                "frame template digits must be in 1..=9",
            ));
        }
        let ext = self.extension.trim_start_matches('.');
        if ext.is_empty() {
            return Err(ScrubError::validation(
                "frame template extension must be non-empty",
            ));
        }
        if ext.contains('/') || ext.contains('\\') {
            return Err(ScrubError::validation(
                "frame template extension must not contain path separators",
            ));
        }
        Ok(())
    }

    /// Resolve `index` to its asset location.
    pub fn location(&self, index: FrameIndex) -> String {
        format!(
            "{}{:0width$}.{}",
            self.base,
            index.0,
            self.extension.trim_start_matches('.'),
            width = usize::from(self.digits),
        )
    }
}

/// Fixed-length ordered frame sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSequence {
    len: u32,
    template: FrameTemplate,
}

impl FrameSequence {
    /// Create a validated sequence of `len >= 1` frames.
    pub fn new(len: u32, template: FrameTemplate) -> ScrubResult<Self> {
        if len == 0 {
            return Err(ScrubError::validation(
                "frame sequence must contain at least one frame",
            ));
        }
        template.validate()?;
        Ok(Self { len, template })
    }

    /// Number of frames `N`.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Always `false`; sequences hold at least one frame.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the final frame, `N - 1`.
    pub fn last(&self) -> FrameIndex {
        FrameIndex(self.len - 1)
    }

    /// Clamp an index into `[0, N - 1]`.
    pub fn clamp(&self, index: FrameIndex) -> FrameIndex {
        FrameIndex(index.0.min(self.len - 1))
    }

    /// Naming scheme used by this sequence.
    pub fn template(&self) -> &FrameTemplate {
        &self.template
    }

    /// Location of the (clamped) frame at `index`.
    pub fn location(&self, index: FrameIndex) -> String {
        self.template.location(self.clamp(index))
    }

    /// All frame indices in order.
    pub fn indices(&self) -> impl Iterator<Item = FrameIndex> + '_ {
        (0..self.len).map(FrameIndex)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sequence.rs"]
mod tests;
