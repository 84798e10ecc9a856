/// Tolerances for approximate comparison of transforms
use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

/// Default relative precision for `f64` comparisons
pub const DEFAULT_RELATIVE: f64 = 1.0e-12;

/// Comparison settings used by [`crate::Transform::is_approx_with`].
///
/// Two homogeneous matrices `A`, `B` are close when
/// `|A - B| <= max(relative * min(|A|, |B|), absolute)` under the Frobenius norm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Tolerance {
    pub fn new(relative: f64, absolute: f64) -> Self {
        Self { relative, absolute }
    }

    pub fn relative(relative: f64) -> Self {
        Self {
            relative,
            ..Self::default()
        }
    }

    pub fn matrices_close(&self, lhs: &Matrix4<f64>, rhs: &Matrix4<f64>) -> bool {
        let diff = (lhs - rhs).norm();
        let scale = lhs.norm().min(rhs.norm());
        diff <= (self.relative * scale).max(self.absolute)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: DEFAULT_RELATIVE,
            absolute: 0.0,
        }
    }
}
