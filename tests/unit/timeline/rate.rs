use super::*;

#[test]
fn hundred_ms_frames_play_at_ten_fps() {
    assert_eq!(select_rate(&[100; 10]).unwrap().fps(), 10);
}

#[test]
fn merged_durations_after_reduction() {
    // 200 x 33ms halved twice: 50 x 66ms.
    assert_eq!(select_rate(&[66; 50]).unwrap().fps(), 15);
}

#[test]
fn empty_durations_fail() {
    let err = select_rate(&[]).unwrap_err();
    assert!(matches!(err, SheetError::Input(_)));
}

#[test]
fn zero_total_uses_default() {
    assert_eq!(select_rate(&[0, 0, 0]).unwrap(), PlaybackRate::DEFAULT);
    assert_eq!(PlaybackRate::DEFAULT.fps(), 24);
}

#[test]
fn output_is_clamped_to_engine_range() {
    // 1ms frames would be 1000 fps.
    assert_eq!(select_rate(&[1, 1, 1]).unwrap(), PlaybackRate::MAX);
    // 5s frames would be 0.2 fps.
    assert_eq!(select_rate(&[5_000, 5_000]).unwrap(), PlaybackRate::MIN);
    assert_eq!(select_rate(&[u32::MAX; 4]).unwrap(), PlaybackRate::MIN);
}

#[test]
fn uses_mean_not_first_duration() {
    // mean 40ms -> 25 fps
    assert_eq!(select_rate(&[20, 60, 40]).unwrap().fps(), 25);
}

#[test]
fn halfway_rates_round_to_even() {
    // 80ms -> 12.5 fps -> 12
    assert_eq!(select_rate(&[80]).unwrap().fps(), 12);
    // 16ms -> 62.5 fps -> 62
    assert_eq!(select_rate(&[16]).unwrap().fps(), 62);
}

#[test]
fn result_always_in_range() {
    for d in 0..3_000u32 {
        let fps = select_rate(&[d, d + 1]).unwrap().fps();
        assert!((1..=64).contains(&fps), "d={d} gave {fps}");
    }
}
