use super::*;

#[test]
fn halfway_through_the_ramp() {
    assert_eq!(edge_fade_opacity(248, FrameIndex(244), 8), 0.5);
}

#[test]
fn ramp_covers_last_threshold_frames() {
    assert_eq!(edge_fade_opacity(248, FrameIndex(239), 8), 1.0);
    assert_eq!(edge_fade_opacity(248, FrameIndex(240), 8), 1.0);
    assert_eq!(edge_fade_opacity(248, FrameIndex(241), 8), 7.0 / 8.0);
    assert_eq!(edge_fade_opacity(248, FrameIndex(247), 8), 1.0 / 8.0);
}

#[test]
fn early_frames_are_opaque() {
    for i in [0u32, 1, 100, 200] {
        assert_eq!(edge_fade_opacity(248, FrameIndex(i), 8), 1.0);
    }
}

#[test]
fn indices_past_the_end_are_transparent() {
    assert_eq!(edge_fade_opacity(10, FrameIndex(10), 8), 0.0);
    assert_eq!(edge_fade_opacity(10, FrameIndex(50), 8), 0.0);
}

#[test]
fn threshold_longer_than_sequence_fades_from_the_start() {
    assert_eq!(edge_fade_opacity(4, FrameIndex(0), 8), 0.5);
    assert_eq!(edge_fade_opacity(4, FrameIndex(3), 8), 1.0 / 8.0);
}

#[test]
fn zero_threshold_disables_fade() {
    assert_eq!(edge_fade_opacity(10, FrameIndex(9), 0), 1.0);
}
