/// Convenience result type used across framescrub.
pub type ScrubResult<T> = Result<T, ScrubError>;

/// Top-level error taxonomy used by scrubber APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrubError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame could not be fetched or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// The drawing surface rejected a layout or draw request.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrubError {
    /// Build a [`ScrubError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrubError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ScrubError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScrubError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
