use crate::foundation::error::{ScrubError, ScrubResult};

/// Default visible fraction a section must reach to be revealed.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.18;

/// Latches page sections as revealed once they scroll sufficiently into view.
///
/// Reveal is permanent: later observations never hide a section again.
#[derive(Clone, Debug)]
pub struct RevealController {
    threshold: f64,
    sections: Vec<(String, bool)>,
}

impl Default for RevealController {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_THRESHOLD)
    }
}

impl RevealController {
    /// Controller revealing at `threshold` visible fraction (clamped into `[0, 1]`).
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: if threshold.is_nan() {
                DEFAULT_REVEAL_THRESHOLD
            } else {
                threshold.clamp(0.0, 1.0)
            },
            sections: Vec::new(),
        }
    }

    /// Start observing section `id`. Registering twice is a no-op.
    pub fn register(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.position(&id).is_none() {
            self.sections.push((id, false));
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|(s, _)| s == id)
    }

    /// Report an intersection change for `id`. Returns `true` when this call revealed it.
    pub fn observe(&mut self, id: &str, visible_fraction: f64, entering: bool) -> ScrubResult<bool> {
        let pos = self
            .position(id)
            .ok_or_else(|| ScrubError::validation(format!("unknown reveal section '{id}'")))?;
        let revealed = &mut self.sections[pos].1;
        let below = visible_fraction.is_nan() || visible_fraction < self.threshold;
        if *revealed || !entering || below {
            return Ok(false);
        }
        *revealed = true;
        tracing::trace!(section = id, visible_fraction, "section revealed");
        Ok(true)
    }

    /// Whether `id` has been revealed.
    pub fn is_revealed(&self, id: &str) -> bool {
        self.position(id).is_some_and(|i| self.sections[i].1)
    }

    /// Revealed section ids in registration order.
    pub fn revealed(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .filter(|(_, r)| *r)
            .map(|(id, _)| id.as_str())
    }

    /// Return `true` once every registered section is revealed.
    pub fn all_revealed(&self) -> bool {
        self.sections.iter().all(|(_, r)| *r)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/reveal.rs"]
mod tests;
