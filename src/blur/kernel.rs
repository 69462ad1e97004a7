use std::{fmt, str::FromStr};

use crate::foundation::error::{CsapError, CsapResult};

/// Supported box kernel edge lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelSize {
    /// 3x3 taps.
    K3,
    /// 5x5 taps.
    K5,
    /// 7x7 taps.
    K7,
}

impl KernelSize {
    pub const ALL: [Self; 3] = [Self::K3, Self::K5, Self::K7];

    pub fn new(n: u32) -> CsapResult<Self> {
        match n {
            3 => Ok(Self::K3),
            5 => Ok(Self::K5),
            7 => Ok(Self::K7),
            _ => Err(CsapError::invalid_argument(format!(
                "kernel size must be 3, 5 or 7, got {n}"
            ))),
        }
    }

    /// Edge length `N`.
    pub const fn n(self) -> u32 {
        match self {
            Self::K3 => 3,
            Self::K5 => 5,
            Self::K7 => 7,
        }
    }

    /// Number of taps `N * N`.
    pub const fn taps(self) -> u32 {
        self.n() * self.n()
    }
}

impl fmt::Display for KernelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.n())
    }
}

impl FromStr for KernelSize {
    type Err = CsapError;

    /// Accepts `"3x3"`, `"5x5"`, `"7x7"` as well as the bare edge length.
    fn from_str(s: &str) -> CsapResult<Self> {
        let s = s.trim();
        let n = match s.split_once(['x', 'X']) {
            Some((a, b)) if a == b => a,
            Some(_) => {
                return Err(CsapError::invalid_argument(format!(
                    "kernel '{s}' must be square"
                )));
            }
            None => s,
        };
        let n: u32 = n
            .parse()
            .map_err(|_| CsapError::invalid_argument(format!("invalid kernel '{s}'")))?;
        Self::new(n)
    }
}

/// Integer box kernel in Q8: every tap is `255 / N²` except the center, which absorbs the
/// remainder so that the taps sum to exactly 255.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedKernel {
    size: KernelSize,
    taps: Vec<i32>,
}

impl FixedKernel {
    pub fn new(size: KernelSize) -> Self {
        let n = size.n() as usize;
        let count = size.taps() as i32;
        let k = 255 / count;
        let mut taps = vec![k; n * n];
        taps[(n / 2) * n + n / 2] = 255 - (count - 1) * k;
        Self { size, taps }
    }

    pub fn size(&self) -> KernelSize {
        self.size
    }

    /// Row-major taps.
    pub fn taps(&self) -> &[i32] {
        &self.taps
    }

    /// Weight of every non-center tap.
    pub fn edge_tap(&self) -> i32 {
        self.taps[0]
    }

    pub fn center_tap(&self) -> i32 {
        let n = self.size.n() as usize;
        self.taps[(n / 2) * n + n / 2]
    }

    pub fn sum(&self) -> i32 {
        self.taps.iter().sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blur/kernel.rs"]
mod tests;
