/// Rigid-body transforms: a rotation plus a translation in 3D
use std::fmt;
use std::ops::{Mul, MulAssign};

use log::{debug, warn};
use nalgebra::{
    IsometryMatrix3, Matrix4, Point3, Quaternion, Rotation3, Translation3, UnitQuaternion, Vector3,
};

use crate::error::{AffxError, Result};
use crate::euler::{EulerAngles, ZyxRotation};
use crate::sampling::sample_within;
use crate::tolerance::Tolerance;

/// A pose: orthonormal rotation plus translation.
///
/// The rotation can be read and written as Z-Y-X Euler angles `(a, b, c)` or as a
/// unit quaternion. Euler reads always report the canonical triple (see
/// [`EulerAngles::canonical`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    data: IsometryMatrix3<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            data: IsometryMatrix3::identity(),
        }
    }

    /// Create a transform from a translation and Z-Y-X Euler angles (in radians)
    pub fn new(x: f64, y: f64, z: f64, a: f64, b: f64, c: f64) -> Self {
        Self::from_parts(
            Vector3::new(x, y, z),
            Rotation3::from_zyx(EulerAngles::new(a, b, c)),
        )
    }

    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self::from_parts(Vector3::new(x, y, z), Rotation3::identity())
    }

    /// Create a transform from a translation and a quaternion `(w, x, y, z)`.
    ///
    /// The quaternion is normalized. One that cannot be normalized (zero or
    /// non-finite) is replaced by the identity rotation.
    pub fn from_quaternion(
        x: f64,
        y: f64,
        z: f64,
        q_w: f64,
        q_x: f64,
        q_y: f64,
        q_z: f64,
    ) -> Self {
        Self::from_parts(
            Vector3::new(x, y, z),
            rotation_or_identity(q_w, q_x, q_y, q_z),
        )
    }

    /// Like [`Transform::from_quaternion`], but rejects a quaternion that cannot be normalized
    pub fn try_from_quaternion(
        x: f64,
        y: f64,
        z: f64,
        q_w: f64,
        q_x: f64,
        q_y: f64,
        q_z: f64,
    ) -> Result<Self> {
        let rotation = normalized_rotation(q_w, q_x, q_y, q_z).ok_or(
            AffxError::DegenerateQuaternion {
                w: q_w,
                x: q_x,
                y: q_y,
                z: q_z,
            },
        )?;
        Ok(Self::from_parts(Vector3::new(x, y, z), rotation))
    }

    pub fn from_parts(translation: Vector3<f64>, rotation: Rotation3<f64>) -> Self {
        Self {
            data: IsometryMatrix3::from_parts(Translation3::from(translation), rotation),
        }
    }

    pub fn isometry(&self) -> &IsometryMatrix3<f64> {
        &self.data
    }

    /// Homogeneous 4x4 matrix
    pub fn matrix(&self) -> Matrix4<f64> {
        self.data.to_homogeneous()
    }

    pub fn inverse(&self) -> Self {
        Self {
            data: self.data.inverse(),
        }
    }

    /// Approximate equality under the default [`Tolerance`]
    pub fn is_approx(&self, other: &Transform) -> bool {
        self.is_approx_with(other, &Tolerance::default())
    }

    pub fn is_approx_with(&self, other: &Transform, tolerance: &Tolerance) -> bool {
        tolerance.matrices_close(&self.matrix(), &other.matrix())
    }

    pub fn translation(&self) -> Vector3<f64> {
        self.data.translation.vector
    }

    pub fn rotation(&self) -> Rotation3<f64> {
        self.data.rotation
    }

    pub fn quaternion(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_rotation_matrix(&self.data.rotation)
    }

    /// Quaternion components in `[x, y, z, w]` order
    pub fn quaternion_coords(&self) -> [f64; 4] {
        let q = self.quaternion();
        [q.coords.x, q.coords.y, q.coords.z, q.coords.w]
    }

    /// Canonical Z-Y-X Euler angles of the rotation
    pub fn angles(&self) -> EulerAngles {
        self.data.rotation.canonical_angles()
    }

    pub fn x(&self) -> f64 {
        self.data.translation.x
    }

    pub fn y(&self) -> f64 {
        self.data.translation.y
    }

    pub fn z(&self) -> f64 {
        self.data.translation.z
    }

    pub fn a(&self) -> f64 {
        self.angles().a
    }

    pub fn b(&self) -> f64 {
        self.angles().b
    }

    pub fn c(&self) -> f64 {
        self.angles().c
    }

    pub fn q_w(&self) -> f64 {
        self.quaternion().coords.w
    }

    pub fn q_x(&self) -> f64 {
        self.quaternion().coords.x
    }

    pub fn q_y(&self) -> f64 {
        self.quaternion().coords.y
    }

    pub fn q_z(&self) -> f64 {
        self.quaternion().coords.z
    }

    /// Translate along the transform's own (rotated) axes
    pub fn translate(&mut self, v: &Vector3<f64>) {
        self.data.translation.vector += self.data.rotation * v;
    }

    /// Translate along the fixed (world) axes
    pub fn pretranslate(&mut self, v: &Vector3<f64>) {
        self.data.append_translation_mut(&Translation3::from(*v));
    }

    /// Rotate about the transform's own origin and axes: `R <- R * r`
    pub fn rotate(&mut self, r: &Rotation3<f64>) {
        self.data.rotation = self.data.rotation * r;
    }

    /// Rotate about the world origin: rotation and translation are both premultiplied by `r`
    pub fn prerotate(&mut self, r: &Rotation3<f64>) {
        self.data.append_rotation_mut(r);
    }

    pub fn set_x(&mut self, x: f64) {
        self.data.translation.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.data.translation.y = y;
    }

    pub fn set_z(&mut self, z: f64) {
        self.data.translation.z = z;
    }

    pub fn set_angles(&mut self, angles: EulerAngles) {
        self.data.rotation = Rotation3::from_zyx(angles);
    }

    // The single-angle setters start from the canonical triple, so the other two
    // angles read back unchanged afterwards.
    pub fn set_a(&mut self, a: f64) {
        let angles = self.angles();
        self.set_angles(EulerAngles { a, ..angles });
    }

    pub fn set_b(&mut self, b: f64) {
        let angles = self.angles();
        self.set_angles(EulerAngles { b, ..angles });
    }

    pub fn set_c(&mut self, c: f64) {
        let angles = self.angles();
        self.set_angles(EulerAngles { c, ..angles });
    }

    /// Replace the rotation with the (normalized) quaternion `(w, x, y, z)`
    pub fn set_quaternion(&mut self, w: f64, x: f64, y: f64, z: f64) {
        self.data.rotation = rotation_or_identity(w, x, y, z);
    }

    /// Interpolate towards `other`.
    ///
    /// `t` is clamped into `[0, 1]` (NaN counts as 0). The translation is blended
    /// linearly and the rotation follows the shortest arc between the two quaternions.
    pub fn slerp(&self, other: &Transform, t: f64) -> Self {
        let clamped = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        if clamped != t {
            debug!("interpolation parameter {} clamped to {}", t, clamped);
        }

        let start = self.quaternion();
        let end = other.quaternion();
        let rotation = start
            .try_slerp(&end, clamped, f64::EPSILON)
            .unwrap_or_else(|| start.nlerp(&end, clamped));
        let translation = self.translation() + (other.translation() - self.translation()) * clamped;

        Self::from_parts(translation, rotation.to_rotation_matrix())
    }

    /// Random pose inside the box spanned by this pose's coordinates.
    ///
    /// Each of `x, y, z, a, b, c` is drawn uniformly from `(-|p|, |p|)` of the
    /// matching coordinate `p`. Every call uses fresh thread-local entropy.
    pub fn inner_random(&self) -> Self {
        let bounds = self.vector();
        Self::from_vector6(sample_within(&bounds, &mut rand::rng()))
    }

    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.data.transform_point(point)
    }

    pub fn transform_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.data.transform_vector(v)
    }
}

fn normalized_rotation(w: f64, x: f64, y: f64, z: f64) -> Option<Rotation3<f64>> {
    if ![w, x, y, z].iter().all(|v| v.is_finite()) {
        return None;
    }
    UnitQuaternion::try_new(Quaternion::new(w, x, y, z), f64::EPSILON)
        .map(|q| q.to_rotation_matrix())
}

fn rotation_or_identity(w: f64, x: f64, y: f64, z: f64) -> Rotation3<f64> {
    normalized_rotation(w, x, y, z).unwrap_or_else(|| {
        warn!(
            "quaternion ({}, {}, {}, {}) cannot be normalized, using identity rotation",
            w, x, y, z
        );
        Rotation3::identity()
    })
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<IsometryMatrix3<f64>> for Transform {
    fn from(data: IsometryMatrix3<f64>) -> Self {
        Self { data }
    }
}

/// `lhs * rhs` applies `rhs` first, then `lhs`
impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            data: self.data * rhs.data,
        }
    }
}

impl<'a> Mul<&'a Transform> for &'a Transform {
    type Output = Transform;

    fn mul(self, rhs: &'a Transform) -> Transform {
        *self * *rhs
    }
}

impl MulAssign for Transform {
    fn mul_assign(&mut self, rhs: Transform) {
        self.data *= rhs.data;
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // + 0.0 turns -0 into 0
        let [x, y, z, a, b, c] = self.vector().map(|v| v + 0.0);
        write!(f, "[{}, {}, {}, {}, {}, {}]", x, y, z, a, b, c)
    }
}
