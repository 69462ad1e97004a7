use super::*;
use crate::blend::float::blend_float;

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

fn alpha(a: u16) -> FixedAlpha {
    FixedAlpha::new(a).unwrap()
}

#[test]
fn merge_of_opaque_red_and_blue_at_128() {
    let bg = Image::filled(1, 1, &[200, 0, 0, 255]).unwrap();
    let fg = Image::filled(1, 1, &[0, 0, 200, 255]).unwrap();
    let out = blend_int(bg.view(), fg.view(), BlendMode::Merge, alpha(128)).unwrap();
    assert_eq!(out.data(), &[99, 0, 99, 255]);
}

#[test]
fn overlay_full_alpha_shows_opaque_foreground() {
    let bg = random_bgra(4, 4, 0x1234_5678);
    let mut fg = random_bgra(4, 4, 0x9abc_def0);
    for p in fg.data_mut().chunks_exact_mut(4) {
        p[3] = 255;
    }
    let out = blend_int(bg.view(), fg.view(), BlendMode::Overlay, alpha(256)).unwrap();
    for ((o, b), f) in out
        .data()
        .chunks_exact(4)
        .zip(bg.data().chunks_exact(4))
        .zip(fg.data().chunks_exact(4))
    {
        for c in 0..3 {
            assert!(o[c].abs_diff(f[c]) <= 1, "{o:?} vs {f:?}");
        }
        assert_eq!(o[3], b[3]);
    }
}

#[test]
fn zero_alpha_keeps_background() {
    let bg = random_bgra(3, 5, 7);
    let fg = random_bgra(3, 5, 11);
    let out = blend_int(bg.view(), fg.view(), BlendMode::Overlay, alpha(0)).unwrap();
    assert_eq!(out, bg);

    let merged = blend_int(bg.view(), fg.view(), BlendMode::Merge, alpha(0)).unwrap();
    for (o, b) in merged.data().chunks_exact(4).zip(bg.data().chunks_exact(4)) {
        assert_eq!(o[3], b[3]);
        for c in 0..3 {
            let premul = (u32::from(b[c]) * u32::from(b[3])) >> 8;
            assert_eq!(u32::from(o[c]), premul);
        }
    }
}

#[test]
fn merge_at_full_alpha_is_premultiplied_foreground() {
    let bg = random_bgra(4, 6, 0x5eed_0001);
    let fg = random_bgra(4, 6, 0x5eed_0002);
    let merged = blend_int(bg.view(), fg.view(), BlendMode::Merge, alpha(256)).unwrap();
    for (o, f) in merged.data().chunks_exact(4).zip(fg.data().chunks_exact(4)) {
        assert_eq!(o[3], f[3]);
        for c in 0..3 {
            let premul = (u32::from(f[c]) * u32::from(f[3])) >> 8;
            assert_eq!(u32::from(o[c]), premul);
        }
    }

    let bg = Image::filled(1, 1, &[10, 20, 30, 200]).unwrap();
    let fg = Image::filled(1, 1, &[200, 100, 50, 128]).unwrap();
    let out = blend_int(bg.view(), fg.view(), BlendMode::Merge, alpha(256)).unwrap();
    assert_eq!(out.data(), &[100, 50, 25, 128]);
}

#[test]
fn agrees_with_float_reference_at_half_alpha() {
    let bg = random_bgra(16, 16, 0xdead_beef);
    let fg = random_bgra(16, 16, 0x0bad_f00d);
    for mode in [BlendMode::Merge, BlendMode::Overlay] {
        let f = blend_float(bg.view(), fg.view(), mode, 0.5).unwrap();
        let i = blend_int(bg.view(), fg.view(), mode, alpha(127)).unwrap();
        for (a, b) in f.data().iter().zip(i.data()) {
            assert!(a.abs_diff(*b) <= 2, "{mode}: float {a} int {b}");
        }
    }
}

/// The 255-scaled user alpha and the truncated `αc` keep the integer path within 3 (merge) and
/// 4 (overlay) of the float reference over the whole alpha range.
#[test]
fn float_agreement_is_bounded_at_every_alpha() {
    let bg = random_bgra(32, 32, 0xdead_beef);
    let fg = random_bgra(32, 32, 0x0bad_f00d);
    for k in 0..=100u32 {
        let a = f64::from(k) / 100.0;
        let fixed = alpha((a * 255.0) as u16);
        for (mode, bound) in [(BlendMode::Merge, 3), (BlendMode::Overlay, 4)] {
            let f = blend_float(bg.view(), fg.view(), mode, a).unwrap();
            let i = blend_int(bg.view(), fg.view(), mode, fixed).unwrap();
            for (x, y) in f.data().iter().zip(i.data()) {
                assert!(x.abs_diff(*y) <= bound, "{mode} alpha={a}: float {x} int {y}");
            }
        }
    }
}

#[test]
fn combined_alpha_stays_in_byte_range() {
    assert_eq!(combined_alpha(255, alpha(256)), 255);
    assert_eq!(combined_alpha(255, alpha(128)), 127);
    assert_eq!(combined_alpha(0, alpha(256)), 0);
}
