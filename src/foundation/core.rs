use std::{fmt, str::FromStr};

use crate::foundation::error::{CsapError, CsapResult};

/// Numeric realization of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Precision {
    /// Double-precision reference.
    Float,
    /// Scalar 8-bit fixed point.
    Int,
    /// Fixed point on packed 10-bit lanes (overlay blending only).
    Vector,
}

impl Precision {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Int => "int",
            Self::Vector => "vector",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = CsapError;

    fn from_str(s: &str) -> CsapResult<Self> {
        match s {
            "float" => Ok(Self::Float),
            "int" => Ok(Self::Int),
            "vector" => Ok(Self::Vector),
            other => Err(CsapError::invalid_argument(format!(
                "unknown precision '{other}' (expected float, int or vector)"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
