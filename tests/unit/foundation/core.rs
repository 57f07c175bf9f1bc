use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(3), FrameIndex(1)).is_err());
}

#[test]
fn fps_rejects_zero_terms() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn frame_to_ms_uses_rational_rate() {
    let fps = Fps::new(25, 1).unwrap();
    assert_eq!(fps.frame_to_ms(FrameIndex(0)), 0.0);
    assert_eq!(fps.frame_to_ms(FrameIndex(5)), 200.0);

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert!((ntsc.frame_to_ms(FrameIndex(30)) - 1001.0).abs() < 1e-9);
}

#[test]
fn frames_covering_includes_the_final_instant() {
    let fps = Fps::new(10, 1).unwrap();
    assert_eq!(fps.frames_covering(0.0), 1);
    assert_eq!(fps.frames_covering(1000.0), 11);
    assert_eq!(fps.frames_covering(1050.0), 11);
}

#[test]
fn frames_covering_saturates_for_huge_durations() {
    let fps = Fps::new(60, 1).unwrap();
    assert_eq!(fps.checked_frames_covering(1e300), None);
    assert_eq!(fps.frames_covering(1e300), u64::MAX);
    assert_eq!(fps.checked_frames_covering(1000.0), Some(61));
}
