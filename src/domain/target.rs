// ============================================================
// Layer 3 — Target Function
// ============================================================
// The closed-form function the PINN is meant to regress.
// The generator evaluates it to label every sampled point,
// so the dataset is exactly (x, f(x)) pairs with no noise.
//
// Two variants exist, selected by the dimensionality:
//
//   2-D:  f(x) = sin(x0) · sin(x1)
//   3-D:  f(x) = sin(x0) · sin(x1)^sin(x2)
//
// Note the 3-D form is NOT a symmetric extension of the 2-D
// product — the third coordinate enters only through the
// exponent. That asymmetry is part of the dataset definition
// and is kept verbatim here.
//
// All coordinates are drawn from [0,1), where sin is
// non-negative, so the real-valued power in the 3-D case is
// always well defined.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use anyhow::{bail, Result};
use ndarray::ArrayView1;

/// Spatial dimensionality of the sampled domain.
/// Doubles as the selector for the target function variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
    /// Points in [0,1)^2, labelled with sin(x0)·sin(x1)
    TwoD,
    /// Points in [0,1)^3, labelled with sin(x0)·sin(x1)^sin(x2)
    ThreeD,
}

impl Dimensionality {
    /// Parse a user-supplied dimension count.
    /// Anything other than 2 or 3 is a configuration error.
    pub fn from_dim(dim: usize) -> Result<Self> {
        match dim {
            2 => Ok(Self::TwoD),
            3 => Ok(Self::ThreeD),
            other => bail!("dimensionality must be 2 or 3, got {other}"),
        }
    }

    /// Number of coordinates per point — the width of the X arrays
    pub fn width(self) -> usize {
        match self {
            Self::TwoD   => 2,
            Self::ThreeD => 3,
        }
    }

    /// Evaluate the exact solution at one point.
    ///
    /// The caller guarantees `x.len() == self.width()`;
    /// the generator always samples points of the right width.
    pub fn evaluate(self, x: ArrayView1<'_, f64>) -> f64 {
        match self {
            Self::TwoD   => x[0].sin() * x[1].sin(),
            // Exponent form on purpose — see the module header
            Self::ThreeD => x[0].sin() * x[1].sin().powf(x[2].sin()),
        }
    }
}
