//! affx core library - rigid-body transforms for robotics and vision code
//!
//! A [`Transform`] holds a rotation and a translation and exposes them as
//! Z-Y-X Euler angles, quaternions or homogeneous matrices, with composition,
//! inversion, interpolation and bounded random sampling.

pub mod error;
pub mod euler;
pub mod parse;
pub mod pose;
mod sampling;
pub mod tolerance;
pub mod transform;

// Re-export commonly used types
pub use error::{AffxError, Result};
pub use euler::{EulerAngles, ZyxRotation};
pub use pose::PoseRecord;
pub use tolerance::Tolerance;
pub use transform::Transform;

pub use nalgebra::{Matrix4, Point3, Rotation3, UnitQuaternion, Vector3};
