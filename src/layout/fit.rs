use crate::foundation::core::{Rect, Size};

/// Placement rule used when image and canvas aspect ratios differ.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMode {
    /// Relatively wider canvas: fit to width, center vertically; otherwise fit to height,
    /// center horizontally. The image always spans the canvas along the fitted axis.
    #[default]
    Cover,
    /// Inverse comparison: the whole image stays visible (letterbox/pillarbox).
    Contain,
}

/// Place an `image`-sized picture onto a `canvas`-sized area without distortion.
///
/// Degenerate sizes (zero, negative or non-finite) produce an empty rectangle at the origin.
pub fn aspect_fit(canvas: Size, image: Size, mode: FitMode) -> Rect {
    let usable =
        |s: Size| s.width.is_finite() && s.height.is_finite() && s.width > 0.0 && s.height > 0.0;
    if !usable(canvas) || !usable(image) {
        return Rect::ZERO;
    }

    let canvas_ratio = canvas.width / canvas.height;
    let image_ratio = image.width / image.height;
    let canvas_wider = canvas_ratio > image_ratio;
    let fit_width = match mode {
        FitMode::Cover => canvas_wider,
        FitMode::Contain => !canvas_wider,
    };

    if fit_width {
        let draw_w = canvas.width;
        let draw_h = canvas.width / image_ratio;
        let y = (canvas.height - draw_h) / 2.0;
        Rect::new(0.0, y, draw_w, y + draw_h)
    } else {
        let draw_h = canvas.height;
        let draw_w = canvas.height * image_ratio;
        let x = (canvas.width - draw_w) / 2.0;
        Rect::new(x, 0.0, x + draw_w, draw_h)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
