use std::sync::Arc;

use anyhow::Context;

use crate::{
    assets::cache::PreparedFrame,
    foundation::error::{ScrubError, ScrubResult},
};

/// Decode encoded frame bytes and convert to premultiplied RGBA8.
pub fn decode_frame(bytes: &[u8]) -> ScrubResult<PreparedFrame> {
    let dyn_img = image::load_from_memory(bytes).context("decode frame from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ScrubError::asset("decoded frame has zero area"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedFrame {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
