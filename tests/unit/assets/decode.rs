use std::io::Cursor;

use image::{Frame, Rgba, RgbaImage, codecs::gif::GifEncoder};

use super::*;

fn encode_gif(delays_ms: &[u32]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        let frames = delays_ms.iter().enumerate().map(|(i, &ms)| {
            let shade = (i as u8).wrapping_mul(40);
            Frame::from_parts(
                RgbaImage::from_pixel(6, 4, Rgba([shade, 0, 255 - shade, 255])),
                0,
                0,
                Delay::from_numer_denom_ms(ms, 1),
            )
        });
        encoder.encode_frames(frames).unwrap();
    }
    buf
}

#[test]
fn gif_frames_keep_order_dimensions_and_delays() {
    let bytes = encode_gif(&[100, 50, 200]);
    let seq = decode_animation(Cursor::new(bytes), SourceKind::Gif).unwrap();

    assert_eq!(seq.len(), 3);
    assert_eq!(seq.durations_ms(), &[100, 50, 200]);
    assert!(seq.frames().iter().all(|f| f.dimensions() == (6, 4)));
    assert_eq!(seq.frames()[0].get_pixel(0, 0).0[3], 255);
}

#[test]
fn zero_delay_is_clamped_to_one_ms() {
    let bytes = encode_gif(&[0, 0]);
    let seq = decode_animation(Cursor::new(bytes), SourceKind::Gif).unwrap();
    assert_eq!(seq.durations_ms(), &[1, 1]);
}

#[test]
fn delay_rounds_to_whole_milliseconds() {
    assert_eq!(delay_to_ms(Delay::from_numer_denom_ms(100, 1)), 100);
    assert_eq!(delay_to_ms(Delay::from_numer_denom_ms(100, 3)), 33);
    assert_eq!(delay_to_ms(Delay::from_numer_denom_ms(0, 1)), 1);
}

#[test]
fn corrupt_gif_is_a_decode_error() {
    let err =
        decode_animation(Cursor::new(b"not a gif".to_vec()), SourceKind::Gif).unwrap_err();
    assert!(matches!(err, SheetError::Decode(_)));
}

#[test]
fn video_kind_is_not_an_animated_image() {
    let err = decode_animation(Cursor::new(Vec::new()), SourceKind::Video).unwrap_err();
    assert!(matches!(err, SheetError::UnsupportedFormat(_)));
}

#[test]
fn still_webp_is_a_single_frame() {
    let img = RgbaImage::from_pixel(3, 3, Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::WebP)
        .unwrap();

    let seq = decode_animation(Cursor::new(buf), SourceKind::WebP).unwrap();
    assert_eq!(seq.len(), 1);
    assert_eq!(seq.durations_ms(), &[STILL_FRAME_MS]);
    assert_eq!(seq.frames()[0].get_pixel(1, 1).0, [10, 20, 30, 255]);
}

#[test]
fn missing_file_reports_path() {
    let err = AnimatedImageSource::new(SourceKind::Gif)
        .read_frames(Path::new("target/definitely-missing.gif"))
        .unwrap_err();
    assert!(err.to_string().contains("definitely-missing.gif"));
}

/// 1x1 two-colour GIF whose image blocks have no Graphic Control Extension when `timed` is false.
fn gif_with_control(timed: &[bool]) -> Vec<u8> {
    let mut bytes = b"GIF89a".to_vec();
    bytes.extend_from_slice(&[1, 0, 1, 0, 0x80, 0, 0]);
    bytes.extend_from_slice(&[0, 0, 0, 255, 255, 255]);
    for &has_control in timed {
        if has_control {
            // 250 ms delay
            bytes.extend_from_slice(&[0x21, 0xF9, 4, 0, 25, 0, 0, 0]);
        }
        bytes.extend_from_slice(&[0x2C, 0, 0, 0, 0, 1, 0, 1, 0, 0]);
        bytes.extend_from_slice(&[2, 2, 0x44, 0x01, 0]);
    }
    bytes.push(0x3B);
    bytes
}

#[test]
fn gif_without_control_extension_gets_default_delay() {
    let bytes = gif_with_control(&[false, false]);
    let seq = decode_animation(Cursor::new(bytes), SourceKind::Gif).unwrap();

    assert_eq!(seq.durations_ms(), &[UNTIMED_FRAME_MS, UNTIMED_FRAME_MS]);
    assert_eq!(crate::timeline::rate::select_rate(seq.durations_ms()).unwrap().fps(), 10);
}

#[test]
fn control_extension_is_tracked_per_frame() {
    let bytes = gif_with_control(&[true, false, true]);
    let seq = decode_animation(Cursor::new(bytes), SourceKind::Gif).unwrap();
    assert_eq!(seq.durations_ms(), &[250, UNTIMED_FRAME_MS, 250]);
}

#[test]
fn timed_frame_scan_matches_encoder_output() {
    let bytes = encode_gif(&[0, 30, 0]);
    let timed = gif_timed_frames(&mut Cursor::new(bytes)).unwrap();
    assert_eq!(timed, vec![true, true, true]);
}
