use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::{
    assets::cache::PreparedFrame,
    foundation::core::{Affine, Rect},
    foundation::error::{ScrubError, ScrubResult},
    layout::viewport::{SurfaceLayout, Viewport},
    render::surface::{FrameRGBA, Surface},
};

const DEFAULT_PAINT_CACHE_CAPACITY: usize = 16;

/// CPU raster surface backed by a `vello_cpu` pixmap.
///
/// The pixmap holds the backing store at physical resolution. Opacity and visibility are
/// composition state, applied when reading pixels back with [`CpuSurface::snapshot`].
pub struct CpuSurface {
    layout: SurfaceLayout,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    opacity: f32,
    visible: bool,
    paints: PaintCache,
}

impl Default for CpuSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuSurface {
    /// Hidden 1x1 surface; call [`Surface::configure`] before drawing.
    pub fn new() -> Self {
        Self {
            layout: SurfaceLayout::from_viewport(&Viewport::new(1.0, 1.0, 1.0)),
            width: 1,
            height: 1,
            pixmap: vello_cpu::Pixmap::new(1, 1),
            opacity: 1.0,
            visible: false,
            paints: PaintCache::new(DEFAULT_PAINT_CACHE_CAPACITY),
        }
    }

    /// Layout applied by the last [`Surface::configure`].
    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    /// Current composition opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Raw backing-store pixels (premultiplied, before opacity).
    pub fn raw(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Pixels as composited onto the page: scaled by opacity, transparent when hidden.
    pub fn snapshot(&self) -> FrameRGBA {
        let mut frame = self.raw();
        let alpha = if self.visible {
            self.opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if alpha < 1.0 {
            for c in &mut frame.data {
                *c = (f32::from(*c) * alpha).round() as u8;
            }
        }
        frame
    }
}

impl Surface for CpuSurface {
    fn configure(&mut self, layout: &SurfaceLayout) -> ScrubResult<()> {
        let w: u16 = layout.backing_width.try_into().map_err(|_| {
            ScrubError::render(format!(
                "backing width {} exceeds u16",
                layout.backing_width
            ))
        })?;
        let h: u16 = layout.backing_height.try_into().map_err(|_| {
            ScrubError::render(format!(
                "backing height {} exceeds u16",
                layout.backing_height
            ))
        })?;
        self.pixmap = vello_cpu::Pixmap::new(w, h);
        self.width = w;
        self.height = h;
        self.layout = *layout;
        Ok(())
    }

    fn clear(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    fn draw_frame(&mut self, frame: &PreparedFrame, dest: Rect) -> ScrubResult<()> {
        if dest.width() <= 0.0 || dest.height() <= 0.0 {
            return Ok(());
        }
        let paint = self.paints.paint_for(frame)?;
        let iw = f64::from(frame.width);
        let ih = f64::from(frame.height);
        let transform = self.layout.transform()
            * Affine::translate((dest.x0, dest.y0))
            * Affine::scale_non_uniform(dest.width() / iw, dest.height() / ih);

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Bounded cache of frame paints keyed by pixel buffer identity.
///
/// Scrubbing revisits neighbouring frames constantly, so recently drawn frames keep their
/// converted pixmaps.
struct PaintCache {
    // The pixel buffer is held alongside its paint so the key address stays unique.
    paints: HashMap<usize, (Arc<Vec<u8>>, vello_cpu::Image)>,
    lru: VecDeque<usize>,
    capacity: usize,
}

impl PaintCache {
    fn new(capacity: usize) -> Self {
        Self {
            paints: HashMap::new(),
            lru: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    fn paint_for(&mut self, frame: &PreparedFrame) -> ScrubResult<vello_cpu::Image> {
        let key = Arc::as_ptr(&frame.rgba8_premul) as usize;
        if let Some((_, paint)) = self.paints.get(&key) {
            let paint = paint.clone();
            self.touch(key);
            return Ok(paint);
        }

        let pixmap =
            premul_bytes_to_pixmap(frame.rgba8_premul.as_slice(), frame.width, frame.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.paints
            .insert(key, (Arc::clone(&frame.rgba8_premul), paint.clone()));
        self.touch(key);
        while self.lru.len() > self.capacity {
            if let Some(old) = self.lru.pop_front() {
                self.paints.remove(&old);
            }
        }
        Ok(paint)
    }

    fn touch(&mut self, key: usize) {
        if let Some(pos) = self.lru.iter().position(|k| *k == key) {
            self.lru.remove(pos);
        }
        self.lru.push_back(key);
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> ScrubResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ScrubError::render("frame width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ScrubError::render("frame height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(ScrubError::render("prepared frame byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels: Vec<vello_cpu::peniko::color::PremulRgba8> = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
