use crate::foundation::error::{ScrubError, ScrubResult};

/// Element translated vertically in proportion to scroll.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallaxLayer {
    /// Element identifier.
    pub id: String,
    /// Offset per scrolled pixel; the element moves by `-scroll_y * speed`.
    pub speed: f64,
}

/// Computes parallax offsets for a set of layers.
#[derive(Clone, Debug, Default)]
pub struct ParallaxController {
    layers: Vec<ParallaxLayer>,
}

impl ParallaxController {
    /// Empty controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update layer `id`.
    pub fn register(&mut self, id: impl Into<String>, speed: f64) -> ScrubResult<()> {
        if !speed.is_finite() {
            return Err(ScrubError::validation("parallax speed must be finite"));
        }
        let id = id.into();
        match self.layers.iter_mut().find(|l| l.id == id) {
            Some(layer) => layer.speed = speed,
            None => self.layers.push(ParallaxLayer { id, speed }),
        }
        Ok(())
    }

    /// Registered layers.
    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    /// Vertical offset of layer `id` at `scroll_y`.
    pub fn offset_for(&self, id: &str, scroll_y: f64) -> Option<f64> {
        self.layers
            .iter()
            .find(|l| l.id == id)
            .map(|l| offset(scroll_y, l.speed))
    }

    /// Offsets for every layer at `scroll_y`, in registration order.
    pub fn offsets(&self, scroll_y: f64) -> Vec<(&str, f64)> {
        self.layers
            .iter()
            .map(|l| (l.id.as_str(), offset(scroll_y, l.speed)))
            .collect()
    }
}

fn offset(scroll_y: f64, speed: f64) -> f64 {
    if scroll_y.is_finite() {
        -scroll_y * speed
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/parallax.rs"]
mod tests;
