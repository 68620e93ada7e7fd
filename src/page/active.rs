use crate::foundation::error::{ScrubError, ScrubResult};

/// Default intersection ratio at which an item becomes active.
pub const DEFAULT_ACTIVE_THRESHOLD: f64 = 0.5;

/// Sticky highlighter: at most one item is active, and it stays active until another item
/// enters past the threshold.
#[derive(Clone, Debug)]
pub struct ActiveSpecTracker {
    threshold: f64,
    items: Vec<String>,
    active: Option<usize>,
}

impl Default for ActiveSpecTracker {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVE_THRESHOLD)
    }
}

impl ActiveSpecTracker {
    /// Tracker activating at `threshold` intersection ratio.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: if threshold.is_nan() {
                DEFAULT_ACTIVE_THRESHOLD
            } else {
                threshold.clamp(0.0, 1.0)
            },
            items: Vec::new(),
            active: None,
        }
    }

    /// Add item `id`; registering twice is a no-op.
    pub fn register(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.items.contains(&id) {
            self.items.push(id);
        }
    }

    /// Report an intersection change. Returns `true` when the active item changed.
    pub fn observe(&mut self, id: &str, ratio: f64, entering: bool) -> ScrubResult<bool> {
        let pos = self
            .items
            .iter()
            .position(|i| i == id)
            .ok_or_else(|| ScrubError::validation(format!("unknown spec item '{id}'")))?;
        let below = ratio.is_nan() || ratio < self.threshold;
        if !entering || below || self.active == Some(pos) {
            return Ok(false);
        }
        self.active = Some(pos);
        Ok(true)
    }

    /// Currently highlighted item.
    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.items[i].as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/active.rs"]
mod tests;
