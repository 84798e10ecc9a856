/// Flat and keyed pose forms: vectors, homogeneous arrays and dictionary records
use log::warn;
use nalgebra::{Matrix3, Matrix4, Rotation3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{AffxError, Result};
use crate::euler::EulerAngles;
use crate::transform::Transform;

impl Transform {
    /// Build from `[x, y, z, a, b, c]`
    pub fn from_vector6(v: [f64; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }

    /// Build from `[x, y, z, q_w, q_x, q_y, q_z]`
    pub fn from_vector7(v: [f64; 7]) -> Self {
        Self::from_quaternion(v[0], v[1], v[2], v[3], v[4], v[5], v[6])
    }

    /// `[x, y, z, a, b, c]` with the canonical Euler angles
    pub fn vector(&self) -> [f64; 6] {
        let t = self.translation();
        let EulerAngles { a, b, c } = self.angles();
        [t.x, t.y, t.z, a, b, c]
    }

    /// [`Transform::vector`] followed by a robot elbow value
    pub fn vector_with_elbow(&self, elbow: f64) -> [f64; 7] {
        let [x, y, z, a, b, c] = self.vector();
        [x, y, z, a, b, c, elbow]
    }

    /// Build from a homogeneous 4x4 matrix stored column-major.
    ///
    /// The bottom row is ignored. The upper-left block is projected onto the
    /// nearest rotation, so a slightly skewed input still yields a rigid transform.
    pub fn from_array(array: &[f64; 16]) -> Self {
        let m = Matrix4::from_column_slice(array);
        let linear: Matrix3<f64> = m.fixed_view::<3, 3>(0, 0).into_owned();
        let translation = Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]);
        Self::from_parts(translation, nearest_rotation(&linear))
    }

    /// Homogeneous 4x4 matrix, column-major
    pub fn to_array(&self) -> [f64; 16] {
        let mut array = [0.0; 16];
        array.copy_from_slice(self.matrix().as_slice());
        array
    }

    pub fn to_record(&self) -> PoseRecord {
        PoseRecord::from(self)
    }
}

fn nearest_rotation(m: &Matrix3<f64>) -> Rotation3<f64> {
    if !m.iter().all(|v| v.is_finite()) {
        warn!("rotation block {:?} is not finite, using identity rotation", m);
        return Rotation3::identity();
    }

    let svd = m.svd(true, true);
    let smallest = svd.singular_values.imin();
    match (svd.u, svd.v_t) {
        (Some(mut u), Some(v_t)) => {
            // Reflections flip the axis with the smallest singular value
            if (u * v_t).determinant() < 0.0 {
                u.column_mut(smallest).neg_mut();
            }
            Rotation3::from_matrix_unchecked(u * v_t)
        }
        _ => {
            warn!("rotation block {:?} could not be decomposed, using identity rotation", m);
            Rotation3::identity()
        }
    }
}

/// Accepts 6 (Euler form), 7 (quaternion form) or 16 (column-major matrix) values
impl TryFrom<&[f64]> for Transform {
    type Error = AffxError;

    fn try_from(values: &[f64]) -> Result<Self> {
        let invalid = |_| AffxError::InvalidLength(values.len());
        match values.len() {
            6 => Ok(Self::from_vector6(values.try_into().map_err(invalid)?)),
            7 => Ok(Self::from_vector7(values.try_into().map_err(invalid)?)),
            16 => {
                let array: [f64; 16] = values.try_into().map_err(invalid)?;
                Ok(Self::from_array(&array))
            }
            n => Err(AffxError::InvalidLength(n)),
        }
    }
}

/// Keyed pose form with both rotation encodings.
///
/// When read back, the quaternion keys win if `q_x` is present, otherwise the
/// Euler angles are used (missing angles count as zero).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(default)]
    pub a: f64,
    #[serde(default)]
    pub b: f64,
    #[serde(default)]
    pub c: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_z: Option<f64>,
}

impl From<&Transform> for PoseRecord {
    fn from(t: &Transform) -> Self {
        let [x, y, z, a, b, c] = t.vector();
        let [q_x, q_y, q_z, q_w] = t.quaternion_coords();
        Self {
            x,
            y,
            z,
            a,
            b,
            c,
            q_w: Some(q_w),
            q_x: Some(q_x),
            q_y: Some(q_y),
            q_z: Some(q_z),
        }
    }
}

impl TryFrom<PoseRecord> for Transform {
    type Error = AffxError;

    fn try_from(r: PoseRecord) -> Result<Self> {
        let Some(q_x) = r.q_x else {
            return Ok(Transform::new(r.x, r.y, r.z, r.a, r.b, r.c));
        };
        let q_w = r.q_w.ok_or(AffxError::IncompleteQuaternion("q_w"))?;
        let q_y = r.q_y.ok_or(AffxError::IncompleteQuaternion("q_y"))?;
        let q_z = r.q_z.ok_or(AffxError::IncompleteQuaternion("q_z"))?;
        Transform::try_from_quaternion(r.x, r.y, r.z, q_w, q_x, q_y, q_z)
    }
}
