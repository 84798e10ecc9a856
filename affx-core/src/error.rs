/// Errors raised at the flat-form and text boundaries of a transform
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AffxError {
    #[error("failed to parse pose: {0}")]
    Parse(String),

    /// Flat pose slices must hold 6, 7 or 16 values.
    #[error("expected 6, 7 or 16 values, got {0}")]
    InvalidLength(usize),

    #[error("pose record has q_x but is missing {0}")]
    IncompleteQuaternion(&'static str),

    #[error("quaternion ({w}, {x}, {y}, {z}) cannot be normalized")]
    DegenerateQuaternion { w: f64, x: f64, y: f64, z: f64 },
}

pub type Result<T> = std::result::Result<T, AffxError>;
