use std::path::PathBuf;

use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_codec");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn two_pixel_bgra_round_trip_is_byte_exact() {
    let img = Image::new(1, 2, 4, vec![10, 20, 30, 255, 40, 50, 60, 128]).unwrap();
    let blob = encode_raw(&img).unwrap();
    assert_eq!(blob.len(), 16 + 8);
    assert_eq!(&blob[..4], b"CSAP");
    assert_eq!(&blob[4..8], b"BGRA");
    assert_eq!(&blob[16..], img.data());
    assert_eq!(decode_raw(&blob).unwrap(), img);
}

#[test]
fn file_round_trip_preserves_bgr_image() {
    let data: Vec<u8> = (0..3 * 4 * 3).map(|v| (v * 7) as u8).collect();
    let img = Image::new(3, 4, 3, data).unwrap();
    let path = scratch("round_trip_bgr.raw");
    write_raw_image(&path, &img).unwrap();
    let back = read_raw_image(&path).unwrap();
    assert_eq!(back, img);
    assert_eq!(std::fs::read(&path).unwrap(), encode_raw(&img).unwrap());
}

#[test]
fn short_payload_is_truncated_data() {
    let img = Image::filled(2, 2, &[1, 2, 3, 4]).unwrap();
    let blob = encode_raw(&img).unwrap();
    let err = decode_raw(&blob[..blob.len() - 3]).unwrap_err();
    assert!(matches!(
        err,
        CsapError::TruncatedData {
            expected: 16,
            actual: 13
        }
    ));
}

#[test]
fn short_stream_with_wrong_magic_reports_magic() {
    let err = decode_raw(b"PNG\x89abc").unwrap_err();
    assert!(matches!(err, CsapError::InvalidMagic { .. }));
}

#[test]
fn trailing_bytes_are_ignored() {
    let img = Image::filled(1, 1, &[7, 8, 9]).unwrap();
    let mut blob = encode_raw(&img).unwrap();
    blob.extend_from_slice(&[0xee; 5]);
    assert_eq!(decode_raw(&blob).unwrap(), img);
}

#[test]
fn writer_rejects_unsupported_channel_counts() {
    let img = Image::filled(2, 2, &[1, 2]).unwrap();
    assert!(matches!(
        encode_raw(&img).unwrap_err(),
        CsapError::InvalidFormat(_)
    ));

    let path = scratch("never_written.raw");
    let _ = std::fs::remove_file(&path);
    assert!(write_raw_image(&path, &img).is_err());
    assert!(!path.exists());
}

#[test]
fn missing_file_is_io_error() {
    let err = read_raw_image(&scratch("does_not_exist.raw")).unwrap_err();
    assert!(matches!(err, CsapError::Io(_)));
}
