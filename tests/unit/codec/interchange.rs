use std::path::PathBuf;

use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_interchange");
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn bgra_becomes_rgba_and_back() {
    let img = Image::new(1, 2, 4, vec![10, 20, 30, 255, 40, 50, 60, 128]).unwrap();
    let dyn_img = raw_to_dynamic(img.view()).unwrap();
    let rgba = dyn_img.to_rgba8();
    assert_eq!(rgba.get_pixel(0, 0).0, [30, 20, 10, 255]);
    assert_eq!(rgba.get_pixel(1, 0).0, [60, 50, 40, 128]);
    assert_eq!(dynamic_to_raw(&dyn_img).unwrap(), img);
}

#[test]
fn opaque_sources_become_three_channel() {
    let rgb = RgbImage::from_raw(1, 1, vec![1, 2, 3]).unwrap();
    let img = dynamic_to_raw(&DynamicImage::ImageRgb8(rgb)).unwrap();
    assert_eq!(img.channels(), 3);
    assert_eq!(img.data(), &[3, 2, 1]);
}

#[test]
fn png_round_trip_through_disk() {
    let data: Vec<u8> = (0..4 * 3 * 4).map(|v| (v * 5) as u8).collect();
    let img = Image::new(4, 3, 4, data).unwrap();
    let path = scratch("round_trip.png");
    save_image(&path, &img).unwrap();
    assert!(!is_raw_file(&path).unwrap());
    assert_eq!(load_image(&path).unwrap(), img);
}

#[test]
fn raw_files_are_detected_by_magic() {
    let path = scratch("detect.raw");
    let img = Image::filled(1, 1, &[0, 0, 0]).unwrap();
    crate::codec::file::write_raw_image(&path, &img).unwrap();
    assert!(is_raw_file(&path).unwrap());
}

#[test]
fn export_rejects_two_channel_images() {
    let img = Image::filled(1, 1, &[1, 2]).unwrap();
    assert!(matches!(
        raw_to_dynamic(img.view()).unwrap_err(),
        CsapError::ChannelMismatch { .. }
    ));
}
