//! Decoder tests: validation, sentinels, malformed frames

use burble::error::CodecError;
use burble::{Decoder, Encoder, SILENT_MAGIC};

fn sine(frame_size: usize, amplitude: f32) -> Vec<f32> {
    (0..frame_size)
        .map(|n| amplitude * (n as f32 * std::f32::consts::TAU * 440.0 / 16000.0).sin())
        .collect()
}

fn voiced_frame(order: usize, frame_size: usize) -> Vec<u8> {
    let mut enc = Encoder::new(order, frame_size).unwrap();
    let mut out = Vec::new();
    enc.encode(&sine(frame_size, 0.5), &mut out).unwrap();
    out
}

#[test]
fn test_construction_limits() {
    assert!(Decoder::new(10, 320).is_ok());
    assert!(matches!(
        Decoder::new(10, 10).unwrap_err(),
        CodecError::InvalidConfiguration { .. }
    ));
}

#[test]
fn test_garbage_magic_is_rejected() {
    let mut dec = Decoder::new(10, 320).unwrap();
    let mut out = vec![0.0f32; 320];

    let err = dec.decode(b"XXXX", &mut out).unwrap_err();
    assert!(matches!(err, CodecError::BadMagic { found } if found == *b"XXXX"));
}

#[test]
fn test_too_short_frame_is_rejected() {
    let mut dec = Decoder::new(10, 320).unwrap();
    let mut out = vec![0.0f32; 320];

    for frame in [&[][..], &[0x42][..], &[0x42, 0x42, 0x52][..]] {
        let err = dec.decode(frame, &mut out).unwrap_err();
        assert!(matches!(err, CodecError::TruncatedFrame { .. }));
    }
}

#[test]
fn test_silent_frame_zero_fills_output() {
    let mut dec = Decoder::new(10, 320).unwrap();
    let mut out = vec![1.0f32; 320];

    dec.decode(&SILENT_MAGIC, &mut out).unwrap();
    assert!(out.iter().all(|&s| s == 0.0));
}

#[test]
fn test_silent_frame_leaves_history_untouched() {
    let mut dec = Decoder::new(10, 320).unwrap();
    let mut out = vec![0.0f32; 320];

    dec.decode(&voiced_frame(10, 320), &mut out).unwrap();
    let history = dec.history().to_vec();

    dec.decode(&SILENT_MAGIC, &mut out).unwrap();
    assert_eq!(dec.history(), &history[..]);
}

#[test]
fn test_declared_order_must_match_stream_order() {
    let frame = voiced_frame(10, 320);

    let mut dec = Decoder::new(8, 320).unwrap();
    let mut out = vec![0.0f32; 320];
    let err = dec.decode(&frame, &mut out).unwrap_err();
    assert!(matches!(
        err,
        CodecError::OrderMismatch {
            expected: 8,
            actual: 10
        }
    ));
}

#[test]
fn test_truncated_payload_is_rejected() {
    let frame = voiced_frame(10, 320);

    let mut dec = Decoder::new(10, 320).unwrap();
    let mut out = vec![0.0f32; 320];
    let err = dec.decode(&frame[..frame.len() - 3], &mut out).unwrap_err();
    assert!(matches!(err, CodecError::TruncatedFrame { needed: 3 }));
}

#[test]
fn test_corrupt_payload_is_rejected() {
    let mut frame = voiced_frame(10, 320);

    // stomp the compressed residual; the header stays intact
    for b in frame.iter_mut().skip(39) {
        *b = 0xFF;
    }

    let mut dec = Decoder::new(10, 320).unwrap();
    let mut out = vec![0.0f32; 320];
    let err = dec.decode(&frame, &mut out).unwrap_err();
    assert!(matches!(err, CodecError::EntropyDecodeFailure { .. }));
}

#[test]
fn test_failed_frame_does_not_advance_history() {
    let mut dec = Decoder::new(10, 320).unwrap();
    let mut out = vec![0.0f32; 320];

    dec.decode(&voiced_frame(10, 320), &mut out).unwrap();
    let history = dec.history().to_vec();

    let mut bad = voiced_frame(10, 320);
    for b in bad.iter_mut().skip(39) {
        *b = 0xFF;
    }
    assert!(dec.decode(&bad, &mut out).is_err());
    assert_eq!(dec.history(), &history[..]);
}

#[test]
fn test_wrong_output_buffer_length() {
    let mut dec = Decoder::new(10, 320).unwrap();
    let mut out = vec![0.0f32; 100];
    let err = dec.decode(&SILENT_MAGIC, &mut out).unwrap_err();
    assert!(matches!(err, CodecError::FrameSizeMismatch { .. }));
}

#[test]
fn test_reset_clears_history() {
    let mut dec = Decoder::new(10, 320).unwrap();
    let mut out = vec![0.0f32; 320];

    dec.decode(&voiced_frame(10, 320), &mut out).unwrap();
    assert!(dec.history().iter().any(|&h| h != 0.0));

    dec.reset();
    assert!(dec.history().iter().all(|&h| h == 0.0));
}
