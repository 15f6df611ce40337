//! Test corpus: malformed inputs, edge sizes, limits, and decode policies.

use enough::{Stop, StopReason, Unstoppable};
use zenpgm::{
    DecodeRequest, EncodeRequest, EncodingMode, FormatError, Image, Limits, PgmError, Precision,
    SampleParsing, decode, encode,
};

fn noise_image(w: u32, h: u32) -> Image {
    let mut state: u32 = 0xDEAD_BEEF;
    let pixels = (0..w * h)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            f64::from(state & 0xffff) / 65535.0
        })
        .collect();
    Image::from_buffer(w, h, pixels).unwrap()
}

fn format_error(data: &[u8]) -> FormatError {
    match decode(data, Unstoppable) {
        Err(PgmError::Format(e)) => e,
        other => panic!("expected format error, got {other:?}"),
    }
}

struct AlwaysStop;

impl Stop for AlwaysStop {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

// ── Malformed headers ────────────────────────────────────────────────

#[test]
fn unrecognized_magic() {
    for data in [
        &b"P6\n#\n1 1\n255\n\0\0\0"[..],
        b"P1\n#\n1 1\n1\n",
        b"GIF89a\n",
        b"\n",
    ] {
        assert!(
            matches!(format_error(data), FormatError::UnrecognizedMagic(_)),
            "{data:?}"
        );
    }
}

#[test]
fn truncated_header() {
    assert_eq!(format_error(b""), FormatError::TruncatedHeader);
    assert_eq!(format_error(b"P5\n# only a comment\n"), FormatError::TruncatedHeader);
}

#[test]
fn zero_or_garbage_dimensions() {
    assert_eq!(
        format_error(b"P2\n#\n0 3\n255\n"),
        FormatError::InvalidDimensions {
            width: 0,
            height: 3
        }
    );
    assert_eq!(
        format_error(b"P5\n#\nwide tall\n255\n"),
        FormatError::InvalidDimensions {
            width: 0,
            height: 0
        }
    );
}

#[test]
fn invalid_precision() {
    assert_eq!(format_error(b"P2\n#\n1 1\nnope\n0\n"), FormatError::InvalidPrecision(0));
    assert_eq!(
        format_error(b"P5\n#\n1 1\n70000\n\0\0"),
        FormatError::InvalidPrecision(70000)
    );
}

// ── Pixel data ───────────────────────────────────────────────────────

#[test]
fn truncated_binary_grid() {
    assert_eq!(
        format_error(b"P5\n#\n3 2\n255\n\x01\x02\x03"),
        FormatError::TruncatedPixelData {
            expected: 6,
            actual: 3
        }
    );
    assert_eq!(
        format_error(b"P5\n#\n2 1\n65535\n\x01\x02\x03"),
        FormatError::TruncatedPixelData {
            expected: 4,
            actual: 3
        }
    );
}

#[test]
#[cfg(target_pointer_width = "64")]
fn huge_declared_binary_grid_with_tiny_body() {
    assert_eq!(
        format_error(b"P5\n#\n200000 200000\n65535\n\x00\x00"),
        FormatError::TruncatedPixelData {
            expected: 80_000_000_000,
            actual: 2
        }
    );
}

#[test]
#[cfg(target_pointer_width = "64")]
fn huge_declared_ascii_grid_with_tiny_body() {
    assert_eq!(
        format_error(b"P2\n#\n200000 200000\n255\n1\n"),
        FormatError::PixelCountMismatch {
            expected: 40_000_000_000,
            actual: 1
        }
    );
}

#[test]
fn ascii_count_mismatch() {
    assert_eq!(
        format_error(b"P2\n#\n2 2\n255\n1\n2\n3\n"),
        FormatError::PixelCountMismatch {
            expected: 4,
            actual: 3
        }
    );
}

#[test]
fn ascii_garbage_strict_vs_lenient() {
    let data = b"P2\n#\n2 1\n255\n255\nabc\n";
    assert!(matches!(
        format_error(data),
        FormatError::InvalidSample { index: 1, .. }
    ));

    let decoded = DecodeRequest::new(data)
        .with_sample_parsing(SampleParsing::Lenient)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(decoded.image.pixels(), &[1.0, 0.0]);
}

#[test]
fn crlf_header_and_body() {
    let decoded = decode(b"P2\r\n# dos\r\n2 1\r\n4\r\n1\r\n3\r\n", Unstoppable).unwrap();
    assert_eq!(decoded.image.pixels(), &[0.25, 0.75]);
}

#[test]
fn binary_body_may_contain_newline_bytes() {
    let decoded = decode(b"P5\n#\n3 1\n255\n\n\n\x0a", Unstoppable).unwrap();
    assert_eq!(decoded.image.pixels(), &[10.0 / 255.0; 3]);
}

// ── Edge sizes ───────────────────────────────────────────────────────

#[test]
fn single_pixel_both_modes() {
    let image = Image::from_buffer(1, 1, vec![0.25]).unwrap();
    for mode in [EncodingMode::Ascii, EncodingMode::Binary] {
        let encoded = encode(&image, Precision::new(4).unwrap(), mode, Unstoppable).unwrap();
        let decoded = decode(&encoded, Unstoppable).unwrap();
        assert_eq!(decoded.image, image);
    }
}

#[test]
fn wide_and_tall_images() {
    for (w, h) in [(257, 1), (1, 300), (33, 17)] {
        let image = noise_image(w, h);
        let encoded = encode(&image, Precision::U16, EncodingMode::Binary, Unstoppable).unwrap();
        let decoded = decode(&encoded, Unstoppable).unwrap().into_image();
        assert_eq!(decoded.width(), w);
        assert_eq!(decoded.height(), h);
        assert_eq!(decoded.rows().count(), h as usize);
        // samples were generated on the 16-bit grid, so they survive exactly
        assert_eq!(decoded.pixels(), image.pixels());
    }
}

#[test]
fn zero_sized_image_is_not_encoded() {
    for image in [Image::new(0, 3).unwrap(), Image::from_buffer(4, 0, vec![]).unwrap()] {
        for mode in [EncodingMode::Ascii, EncodingMode::Binary] {
            let err = encode(&image, Precision::U8, mode, Unstoppable).unwrap_err();
            assert_eq!(
                err.format_error(),
                Some(&FormatError::InvalidDimensions {
                    width: image.width(),
                    height: image.height()
                })
            );
            let mut out = Vec::new();
            assert!(EncodeRequest::new(mode).encode_to(&mut out, &image, Unstoppable).is_err());
            assert!(out.is_empty());
        }
    }
}

// ── Image invariants ─────────────────────────────────────────────────

#[test]
fn image_buffer_length_is_enforced() {
    assert!(matches!(
        Image::from_buffer(2, 2, vec![0.0; 3]),
        Err(PgmError::BufferSizeMismatch {
            expected: 4,
            actual: 3
        })
    ));
    let image = Image::new(3, 2).unwrap();
    assert_eq!(image.pixels(), &[0.0; 6]);
    assert_eq!(image.get(2, 1), Some(0.0));
    assert_eq!(image.get(3, 0), None);
}

// ── Limits ───────────────────────────────────────────────────────────

#[test]
fn limits_max_width() {
    let encoded = encode(&noise_image(10, 2), Precision::U8, EncodingMode::Binary, Unstoppable)
        .unwrap();
    let limits = Limits {
        max_width: Some(5),
        ..Default::default()
    };
    let result = DecodeRequest::new(&encoded).with_limits(&limits).decode(Unstoppable);
    assert!(matches!(result, Err(PgmError::LimitExceeded(_))));
}

#[test]
fn limits_max_memory() {
    let encoded = encode(&noise_image(8, 8), Precision::U8, EncodingMode::Ascii, Unstoppable)
        .unwrap();
    let tight = Limits {
        max_memory_bytes: Some(8 * 8 * 8 - 1),
        ..Default::default()
    };
    let result = DecodeRequest::new(&encoded).with_limits(&tight).decode(Unstoppable);
    assert!(matches!(result, Err(PgmError::LimitExceeded(_))));

    let enough_room = Limits {
        max_memory_bytes: Some(8 * 8 * 8),
        max_pixels: Some(64),
        ..Default::default()
    };
    DecodeRequest::new(&encoded)
        .with_limits(&enough_room)
        .decode(Unstoppable)
        .unwrap();
}

#[test]
fn limits_max_memory_counts_raw_binary_grid() {
    // 16 samples: 128 bytes of f64 output plus 32 raw bytes at 16-bit
    let encoded = encode(&noise_image(4, 4), Precision::U16, EncodingMode::Binary, Unstoppable)
        .unwrap();
    let tight = Limits {
        max_memory_bytes: Some(159),
        ..Default::default()
    };
    let result = DecodeRequest::new(&encoded).with_limits(&tight).decode(Unstoppable);
    assert!(matches!(result, Err(PgmError::LimitExceeded(_))));

    let enough_room = Limits {
        max_memory_bytes: Some(160),
        ..Default::default()
    };
    DecodeRequest::new(&encoded)
        .with_limits(&enough_room)
        .decode(Unstoppable)
        .unwrap();
}

#[test]
fn limits_max_memory_caps_ascii_body_text() {
    // 2 samples fit the grid budget, the padded body does not
    let mut data = b"P2\n#\n2 1\n255\n1 2".to_vec();
    data.extend(std::iter::repeat_n(b' ', 64));
    let limits = Limits {
        max_memory_bytes: Some(32),
        ..Default::default()
    };
    let result = DecodeRequest::new(&data).with_limits(&limits).decode(Unstoppable);
    assert!(matches!(result, Err(PgmError::LimitExceeded(_))));

    let decoded = decode(&data, Unstoppable).unwrap();
    assert_eq!(decoded.image.pixels(), &[1.0 / 255.0, 2.0 / 255.0]);
}

// ── Cancellation ─────────────────────────────────────────────────────

#[test]
fn stop_token_cancels_decode_and_encode() {
    let image = noise_image(4, 4);
    let encoded = encode(&image, Precision::U8, EncodingMode::Binary, Unstoppable).unwrap();
    assert!(matches!(
        decode(&encoded, AlwaysStop),
        Err(PgmError::Cancelled(_))
    ));
    assert!(matches!(
        EncodeRequest::ascii().encode(&image, AlwaysStop),
        Err(PgmError::Cancelled(_))
    ));
}

#[test]
fn decode_reader_matches_slice_decode() {
    let encoded = encode(&noise_image(9, 4), Precision::U8, EncodingMode::Ascii, Unstoppable)
        .unwrap();
    let from_slice = decode(&encoded, Unstoppable).unwrap();
    let from_reader = DecodeRequest::new(&[])
        .decode_reader(std::io::Cursor::new(&encoded), Unstoppable)
        .unwrap();
    assert_eq!(from_slice, from_reader);
}
