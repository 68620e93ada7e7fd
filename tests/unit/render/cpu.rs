use super::*;

fn solid_frame(w: u32, h: u32, rgba: [u8; 4]) -> PreparedFrame {
    let data: Vec<u8> = (0..w * h).flat_map(|_| rgba).collect();
    PreparedFrame {
        width: w,
        height: h,
        rgba8_premul: Arc::new(data),
    }
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
}

fn configured(width: f64, height: f64, dpr: f64) -> CpuSurface {
    let mut s = CpuSurface::new();
    s.configure(&SurfaceLayout::from_viewport(&Viewport::new(width, height, dpr)))
        .unwrap();
    s
}

#[test]
fn configure_sizes_backing_store_at_physical_resolution() {
    let s = configured(3.0, 2.0, 2.0);
    let raw = s.raw();
    assert_eq!((raw.width, raw.height), (6, 4));
    assert_eq!(raw.data.len(), 6 * 4 * 4);
    assert!(raw.data.iter().all(|&b| b == 0));
}

#[test]
fn configure_rejects_oversized_backing_store() {
    let mut s = CpuSurface::new();
    let layout = SurfaceLayout::from_viewport(&Viewport::new(70_000.0, 10.0, 1.0));
    assert!(matches!(s.configure(&layout), Err(ScrubError::Render(_))));
}

#[test]
fn draw_fills_destination_only() {
    let mut s = configured(4.0, 4.0, 1.0);
    let red = [255, 0, 0, 255];
    s.draw_frame(&solid_frame(2, 2, red), Rect::new(0.0, 0.0, 2.0, 4.0))
        .unwrap();
    let raw = s.raw();
    assert!(close(raw.pixel(0, 1).unwrap(), red));
    assert!(close(raw.pixel(1, 3).unwrap(), red));
    assert_eq!(raw.pixel(3, 1).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn draw_uses_logical_units_under_pixel_ratio() {
    let mut s = configured(2.0, 2.0, 2.0);
    let green = [0, 255, 0, 255];
    s.draw_frame(&solid_frame(1, 1, green), Rect::new(0.0, 0.0, 1.0, 2.0))
        .unwrap();
    let raw = s.raw();
    assert!(close(raw.pixel(1, 1).unwrap(), green));
    assert_eq!(raw.pixel(3, 1).unwrap(), [0, 0, 0, 0]);
}

#[test]
fn clear_discards_previous_frame() {
    let mut s = configured(2.0, 2.0, 1.0);
    s.draw_frame(
        &solid_frame(1, 1, [0, 0, 255, 255]),
        Rect::new(0.0, 0.0, 2.0, 2.0),
    )
    .unwrap();
    s.clear();
    assert!(s.raw().data.iter().all(|&b| b == 0));
}

#[test]
fn snapshot_applies_opacity_and_visibility() {
    let mut s = configured(1.0, 1.0, 1.0);
    s.draw_frame(
        &solid_frame(1, 1, [200, 100, 50, 255]),
        Rect::new(0.0, 0.0, 1.0, 1.0),
    )
    .unwrap();

    assert_eq!(s.snapshot().pixel(0, 0).unwrap(), [0, 0, 0, 0]);

    s.set_visible(true);
    s.set_opacity(0.5);
    let px = s.snapshot().pixel(0, 0).unwrap();
    let raw = s.raw().pixel(0, 0).unwrap();
    for (c, r) in px.iter().zip(raw) {
        assert!(c.abs_diff(r / 2) <= 1);
    }
}

#[test]
fn repeated_draws_reuse_cached_paint() {
    let mut s = configured(2.0, 2.0, 1.0);
    let frame = solid_frame(1, 1, [1, 2, 3, 255]);
    for _ in 0..3 {
        s.draw_frame(&frame, Rect::new(0.0, 0.0, 2.0, 2.0)).unwrap();
    }
    assert_eq!(s.paints.paints.len(), 1);
    assert_eq!(s.paints.lru.len(), 1);
}

#[test]
fn paint_cache_evicts_least_recent() {
    let mut cache = PaintCache::new(2);
    let a = solid_frame(1, 1, [1, 0, 0, 255]);
    let b = solid_frame(1, 1, [2, 0, 0, 255]);
    let c = solid_frame(1, 1, [3, 0, 0, 255]);
    cache.paint_for(&a).unwrap();
    cache.paint_for(&b).unwrap();
    cache.paint_for(&a).unwrap();
    cache.paint_for(&c).unwrap();
    assert_eq!(cache.paints.len(), 2);
    assert!(cache.paints.contains_key(&(Arc::as_ptr(&a.rgba8_premul) as usize)));
    assert!(!cache.paints.contains_key(&(Arc::as_ptr(&b.rgba8_premul) as usize)));
}

#[test]
fn mismatched_buffer_length_is_rejected() {
    let bad = PreparedFrame {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new(vec![0; 3]),
    };
    let mut s = configured(2.0, 2.0, 1.0);
    assert!(s.draw_frame(&bad, Rect::new(0.0, 0.0, 2.0, 2.0)).is_err());
}
