use super::*;
use crate::layout::viewport::Viewport;
use std::sync::Arc;

#[test]
fn pixel_reads_rgba_and_rejects_out_of_bounds() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        premultiplied: false,
    };
    assert_eq!(frame.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(frame.pixel(2, 0), None);
    assert_eq!(frame.pixel(0, 1), None);
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let frame = FrameRGBA {
        width: 3,
        height: 1,
        data: vec![100, 50, 0, 128, 9, 9, 9, 0, 10, 20, 30, 255],
        premultiplied: true,
    };
    let straight = frame.to_unpremultiplied();
    assert!(!straight.premultiplied);
    assert_eq!(straight.pixel(0, 0), Some([199, 100, 0, 128]));
    assert_eq!(straight.pixel(1, 0), Some([0, 0, 0, 0]));
    assert_eq!(straight.pixel(2, 0), Some([10, 20, 30, 255]));
}

#[test]
fn unpremultiply_is_identity_for_straight_data() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![200, 100, 50, 10],
        premultiplied: false,
    };
    assert_eq!(frame.to_unpremultiplied().data, frame.data);
}

#[test]
fn recording_surface_tracks_state_and_commands() {
    let mut s = RecordingSurface::new();
    assert!(!s.is_visible());
    assert_eq!(s.opacity(), 1.0);

    let layout = SurfaceLayout::from_viewport(&Viewport::new(100.0, 50.0, 2.0));
    s.configure(&layout).unwrap();
    s.clear();
    s.set_opacity(0.25);
    let frame = PreparedFrame {
        width: 4,
        height: 2,
        rgba8_premul: Arc::new(vec![0; 32]),
    };
    s.draw_frame(&frame, Rect::new(0.0, 0.0, 100.0, 50.0)).unwrap();
    s.set_visible(true);

    assert_eq!(s.draw_count(), 1);
    assert_eq!(s.opacity(), 0.25);
    assert!(s.is_visible());
    assert_eq!(
        s.commands()[0],
        DrawCommand::Configure {
            logical: Size::new(100.0, 50.0),
            backing: (200, 100),
            transform: Affine::scale(2.0),
        }
    );

    let taken = s.take_commands();
    assert_eq!(taken.len(), 5);
    assert!(s.commands().is_empty());
}
