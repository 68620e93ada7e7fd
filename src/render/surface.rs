use crate::{
    assets::cache::PreparedFrame,
    foundation::core::{Affine, Rect, Size},
    foundation::error::ScrubResult,
    layout::viewport::SurfaceLayout,
};

/// A rendered surface as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA of pixel `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Copy with straight (non-premultiplied) alpha, as image encoders expect.
    pub fn to_unpremultiplied(&self) -> FrameRGBA {
        let mut data = self.data.clone();
        if self.premultiplied {
            for px in data.chunks_exact_mut(4) {
                let a = u16::from(px[3]);
                if a == 0 {
                    px[..3].fill(0);
                } else if a < 255 {
                    for c in &mut px[..3] {
                        *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
                    }
                }
            }
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }
}

/// 2D drawing target the scrubber renders into.
///
/// Only the render path mutates a surface; input handlers never draw. All geometry passed to
/// [`Surface::draw_frame`] and [`Surface::clear`] is in logical units.
pub trait Surface {
    /// Apply a new layout: resize the backing store and reset the transform to
    /// [`SurfaceLayout::transform`]. Resizing discards previous contents.
    fn configure(&mut self, layout: &SurfaceLayout) -> ScrubResult<()>;

    /// Clear the full logical area to transparent.
    fn clear(&mut self);

    /// Set the opacity the surface is composited with, in `[0, 1]`.
    fn set_opacity(&mut self, opacity: f32);

    /// Draw `frame` scaled into `dest`.
    fn draw_frame(&mut self, frame: &PreparedFrame, dest: Rect) -> ScrubResult<()>;

    /// Show or hide the surface.
    fn set_visible(&mut self, visible: bool);
}

/// One call issued against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// [`Surface::configure`].
    Configure {
        /// Logical size.
        logical: Size,
        /// Backing-store size in physical pixels.
        backing: (u32, u32),
        /// Transform reset to on configure.
        transform: Affine,
    },
    /// [`Surface::clear`].
    Clear,
    /// [`Surface::set_opacity`].
    SetOpacity(f32),
    /// [`Surface::draw_frame`].
    DrawFrame {
        /// Source frame size in pixels.
        frame_size: (u32, u32),
        /// Placement in logical units.
        dest: Rect,
    },
    /// [`Surface::set_visible`].
    SetVisible(bool),
}

/// Surface that records every call instead of rasterizing.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    opacity: f32,
    visible: bool,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// Create an empty, hidden recorder.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            opacity: 1.0,
            visible: false,
        }
    }

    /// Every call recorded so far, in order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain recorded calls.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of [`DrawCommand::DrawFrame`] calls recorded.
    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawFrame { .. }))
            .count()
    }

    /// Last opacity set.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Surface for RecordingSurface {
    fn configure(&mut self, layout: &SurfaceLayout) -> ScrubResult<()> {
        self.commands.push(DrawCommand::Configure {
            logical: layout.logical,
            backing: (layout.backing_width, layout.backing_height),
            transform: layout.transform(),
        });
        Ok(())
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.commands.push(DrawCommand::SetOpacity(opacity));
    }

    fn draw_frame(&mut self, frame: &PreparedFrame, dest: Rect) -> ScrubResult<()> {
        self.commands.push(DrawCommand::DrawFrame {
            frame_size: (frame.width, frame.height),
            dest,
        });
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.commands.push(DrawCommand::SetVisible(visible));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
