//! Three 10-bit color lanes packed into one `u32`.
//!
//! ```text
//!  31 30 | 29 ......... 20 | 19 ......... 10 | 9 .......... 0
//!  unused|        R        |        G        |        B
//! ```
//!
//! Each lane holds an 8-bit intensity plus two guard bits. The guard bits absorb carries from
//! [`Vrgb::add`] / [`Vrgb::sub`] and the high part of a [`Vrgb::mul`] product before rescaling.
//! Every operation re-masks lanes from a full-width result, so no lane ever leaks into its
//! neighbor and bits 30-31 stay zero. Lanes above 255 are only saturated in [`Vrgb::pack`].

use std::ops::{Add, Mul, Sub};

/// Conventional `0xAARRGGBB` pixel word.
pub type Argb = u32;

const R_SHIFT: u32 = 20;
const G_SHIFT: u32 = 10;
const B_SHIFT: u32 = 0;
const LANE_BITS: u32 = 0x3ff;
const FRAC_BITS: u32 = 8;
const HALF: u32 = 1 << (FRAC_BITS - 1);

/// Red lane mask (bits 20-29).
pub const R_MASK: u32 = 0x3ff0_0000;
/// Green lane mask (bits 10-19).
pub const G_MASK: u32 = 0x000f_fc00;
/// Blue lane mask (bits 0-9).
pub const B_MASK: u32 = 0x0000_03ff;
/// Union of the three lanes.
pub const LANES_MASK: u32 = R_MASK | G_MASK | B_MASK;

/// Packed R, G, B lanes with guard bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vrgb(u32);

impl Vrgb {
    pub const ZERO: Self = Self(0);

    /// Reinterpret a raw word. Bits 30-31 are cleared.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & LANES_MASK)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Build from lane values; each is truncated to 10 bits.
    #[inline]
    pub const fn from_lanes(r: u16, g: u16, b: u16) -> Self {
        Self(
            ((r as u32 & LANE_BITS) << R_SHIFT)
                | ((g as u32 & LANE_BITS) << G_SHIFT)
                | ((b as u32 & LANE_BITS) << B_SHIFT),
        )
    }

    /// `[r, g, b]` lane values (0..=1023).
    #[inline]
    pub const fn lanes(self) -> [u16; 3] {
        [self.r(), self.g(), self.b()]
    }

    #[inline]
    pub const fn r(self) -> u16 {
        ((self.0 >> R_SHIFT) & LANE_BITS) as u16
    }

    #[inline]
    pub const fn g(self) -> u16 {
        ((self.0 >> G_SHIFT) & LANE_BITS) as u16
    }

    #[inline]
    pub const fn b(self) -> u16 {
        ((self.0 >> B_SHIFT) & LANE_BITS) as u16
    }

    /// Spread the color bytes of an `argb` word into lanes. Alpha is dropped.
    #[inline]
    pub const fn unpack(argb: Argb) -> Self {
        Self(((argb & 0x00ff_0000) << 4) | ((argb & 0x0000_ff00) << 2) | (argb & 0x0000_00ff))
    }

    /// Reassemble an `argb` word, saturating any lane >= 256 to 255.
    #[inline]
    pub const fn pack(self, alpha: u8) -> Argb {
        let r = saturate(self.r() as u32);
        let g = saturate(self.g() as u32);
        let b = saturate(self.b() as u32);
        ((alpha as u32) << 24) | (r << 16) | (g << 8) | b
    }

    /// Replicate `w` into all three lanes.
    ///
    /// The full lane width (10 bits) is kept so that the coefficient 256, which the blend
    /// engines use for "weight 1.0", survives the broadcast.
    #[inline]
    pub const fn broadcast(w: u32) -> Self {
        Self(((w << R_SHIFT) & R_MASK) | ((w << G_SHIFT) & G_MASK) | ((w << B_SHIFT) & B_MASK))
    }

    /// Lane-wise `a + b` modulo 1024.
    #[inline]
    pub const fn add(self, other: Self) -> Self {
        Self(
            (((self.0 & R_MASK) + (other.0 & R_MASK)) & R_MASK)
                | (((self.0 & G_MASK) + (other.0 & G_MASK)) & G_MASK)
                | (((self.0 & B_MASK) + (other.0 & B_MASK)) & B_MASK),
        )
    }

    /// Lane-wise `a - b` modulo 1024.
    #[inline]
    pub const fn sub(self, other: Self) -> Self {
        Self(
            ((self.0 & R_MASK).wrapping_sub(other.0 & R_MASK) & R_MASK)
                | ((self.0 & G_MASK).wrapping_sub(other.0 & G_MASK) & G_MASK)
                | ((self.0 & B_MASK).wrapping_sub(other.0 & B_MASK) & B_MASK),
        )
    }

    /// Add a signed immediate to every lane independently (modulo 1024).
    ///
    /// The immediate is meant to be a 12-bit signed value; wider values behave identically
    /// because only the low 10 bits of each lane survive.
    #[inline]
    pub const fn addi(self, imm: i16) -> Self {
        let i = imm as i32 as u32;
        Self(
            (self.0.wrapping_add(i << R_SHIFT) & R_MASK)
                | (self.0.wrapping_add(i << G_SHIFT) & G_MASK)
                | (self.0.wrapping_add(i << B_SHIFT) & B_MASK),
        )
    }

    /// Lane-wise fixed-point multiply with 8 fractional bits, rounding half up.
    ///
    /// Per lane: `p = a * b; (p >> 8) + ((p & 0xff) >= 128)`, masked back to 10 bits.
    #[inline]
    pub const fn mul(self, other: Self) -> Self {
        let r = round_q8(self.r() as u32 * other.r() as u32);
        let g = round_q8(self.g() as u32 * other.g() as u32);
        let b = round_q8(self.b() as u32 * other.b() as u32);
        Self(
            ((r & LANE_BITS) << R_SHIFT) | ((g & LANE_BITS) << G_SHIFT) | ((b & LANE_BITS) << B_SHIFT),
        )
    }
}

impl Add for Vrgb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vrgb::add(self, rhs)
    }
}

impl Sub for Vrgb {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Vrgb::sub(self, rhs)
    }
}

impl Mul for Vrgb {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Vrgb::mul(self, rhs)
    }
}

/// `argb` word for a BGRA byte quadruple as stored in CSAP RAW pixels.
#[inline]
pub const fn argb_from_bgra(px: [u8; 4]) -> Argb {
    u32::from_le_bytes(px)
}

/// Inverse of [`argb_from_bgra`].
#[inline]
pub const fn bgra_from_argb(argb: Argb) -> [u8; 4] {
    argb.to_le_bytes()
}

#[inline]
const fn round_q8(p: u32) -> u32 {
    (p >> FRAC_BITS) + if (p & 0xff) >= HALF { 1 } else { 0 }
}

#[inline]
const fn saturate(v: u32) -> u32 {
    if v >= 0x100 { 0xff } else { v }
}

#[cfg(test)]
#[path = "../../tests/unit/packed/vrgb.rs"]
mod tests;
