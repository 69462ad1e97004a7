use super::*;
use crate::blend::fixed::blend_int;

fn xorshift(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

fn random_bgra(h: u32, w: u32, seed: u32) -> Image {
    let mut s = seed;
    let data = (0..h * w * 4).map(|_| xorshift(&mut s) as u8).collect();
    Image::new(h, w, 4, data).unwrap()
}

#[test]
fn matches_scalar_overlay_within_one() {
    let bg = random_bgra(24, 24, 0x2545_f491);
    let fg = random_bgra(24, 24, 0x9e37_79b9);
    for a in [0u16, 1, 64, 127, 128, 200, 255, 256] {
        let alpha = FixedAlpha::new(a).unwrap();
        let v = blend_vector(bg.view(), fg.view(), BlendMode::Overlay, alpha).unwrap();
        let s = blend_int(bg.view(), fg.view(), BlendMode::Overlay, alpha).unwrap();
        for (i, (x, y)) in v.data().iter().zip(s.data()).enumerate() {
            assert!(x.abs_diff(*y) <= 1, "alpha={a} byte {i}: {x} vs {y}");
        }
    }
}

#[test]
fn preserves_background_alpha_byte() {
    let out = overlay_pixel([10, 20, 30, 77], [200, 200, 200, 255], FixedAlpha::new(256).unwrap());
    assert_eq!(out[3], 77);
    for c in 0..3 {
        assert!(out[c].abs_diff(200) <= 1);
    }
}

#[test]
fn zero_weight_returns_background_colors() {
    let bg = [3, 128, 255, 9];
    assert_eq!(overlay_pixel(bg, [255, 0, 77, 255], FixedAlpha::new(0).unwrap()), bg);
    assert_eq!(overlay_pixel(bg, [255, 0, 77, 0], FixedAlpha::new(256).unwrap()), bg);
}

#[test]
fn merge_is_rejected() {
    let img = Image::filled(1, 1, &[0; 4]).unwrap();
    let err = blend_vector(img.view(), img.view(), BlendMode::Merge, FixedAlpha::new(1).unwrap())
        .unwrap_err();
    assert!(matches!(err, CsapError::InvalidArgument(_)));
    assert_eq!(err.status_code(), -1);
}
