/// Z-Y-X Euler triples and the canonical choice between twin decompositions
use std::f64::consts::PI;

use log::trace;
use nalgebra::{Rotation3, Vector3};

/// Intrinsic Z-Y-X Euler angles in radians, `R = Rz(a) * Ry(b) * Rx(c)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl EulerAngles {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn zero() -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            c: 0.0,
        }
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.a, self.b, self.c)
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Euclidean norm of the triple
    pub fn norm(&self) -> f64 {
        self.to_vector().norm()
    }

    /// The other triple that encodes the same rotation.
    ///
    /// `(a - π, π - b, c - π)`, with `b` and `c` folded back into `(-π, π]`.
    /// `a` is left unfolded.
    pub fn twin(&self) -> Self {
        let mut b = PI - self.b;
        if b > PI {
            b -= 2.0 * PI;
        }
        let mut c = self.c - PI;
        if c < -PI {
            c += 2.0 * PI;
        }
        Self::new(self.a - PI, b, c)
    }

    /// Chooses between this triple and its twin, keeping the one closer to the zero pose.
    ///
    /// This triple wins only with a strictly smaller norm; on a tie the twin is returned.
    pub fn canonical(self) -> Self {
        let twin = self.twin();
        if self.norm() < twin.norm() {
            self
        } else {
            twin
        }
    }
}

impl Default for EulerAngles {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<[f64; 3]> for EulerAngles {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<EulerAngles> for Vector3<f64> {
    fn from(angles: EulerAngles) -> Self {
        angles.to_vector()
    }
}

/// Rotation storage able to convert to and from Z-Y-X Euler triples.
///
/// This is the only contact point between the angle logic and the numeric backend.
pub trait ZyxRotation: Sized {
    fn from_zyx(angles: EulerAngles) -> Self;

    /// Raw decomposition as produced by the backend, before any disambiguation
    fn zyx_angles(&self) -> EulerAngles;

    fn canonical_angles(&self) -> EulerAngles {
        let raw = self.zyx_angles();
        let canonical = raw.canonical();
        trace!("euler angles {:?} -> canonical {:?}", raw, canonical);
        canonical
    }
}

impl ZyxRotation for Rotation3<f64> {
    fn from_zyx(angles: EulerAngles) -> Self {
        // nalgebra names the Z-Y-X triple (roll, pitch, yaw) = (c, b, a)
        Rotation3::from_euler_angles(angles.c, angles.b, angles.a)
    }

    fn zyx_angles(&self) -> EulerAngles {
        let (roll, pitch, yaw) = self.euler_angles();
        EulerAngles::new(yaw, pitch, roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Backend that hands back whatever triple it was built from
    struct Recorded(EulerAngles);

    impl ZyxRotation for Recorded {
        fn from_zyx(angles: EulerAngles) -> Self {
            Recorded(angles)
        }

        fn zyx_angles(&self) -> EulerAngles {
            self.0
        }
    }

    #[test]
    fn test_small_angles_are_kept() {
        let angles = EulerAngles::new(0.1, -0.2, 0.05);
        assert_eq!(angles.canonical(), angles);
        assert_eq!(Recorded::from_zyx(angles).canonical_angles(), angles);
    }

    #[test]
    fn test_twin_is_chosen_when_shorter() {
        let raw = EulerAngles::new(3.0, 0.1, 3.0);
        let canonical = Recorded(raw).canonical_angles();
        assert_relative_eq!(canonical.a, 3.0 - PI, epsilon = 1e-12);
        assert_relative_eq!(canonical.b, PI - 0.1, epsilon = 1e-12);
        assert_relative_eq!(canonical.c, 3.0 - PI, epsilon = 1e-12);
    }

    #[test]
    fn test_twin_wraps_b_and_c() {
        let twin = EulerAngles::new(0.3, -0.5, -0.2).twin();
        assert_relative_eq!(twin.a, 0.3 - PI, epsilon = 1e-12);
        assert_relative_eq!(twin.b, 0.5 - PI, epsilon = 1e-12);
        assert_relative_eq!(twin.c, PI - 0.2, epsilon = 1e-12);

        let twin = EulerAngles::new(0.3, 0.5, 0.2).twin();
        assert_relative_eq!(twin.b, PI - 0.5, epsilon = 1e-12);
        assert_relative_eq!(twin.c, 0.2 - PI, epsilon = 1e-12);
    }

    #[test]
    fn test_tie_returns_twin() {
        let half = PI / 2.0;
        let angles = EulerAngles::new(half, half, half);
        let twin = angles.twin();
        assert_relative_eq!(angles.norm(), twin.norm(), epsilon = 1e-12);
        assert_eq!(angles.canonical(), twin);
    }

    #[test]
    fn test_twin_encodes_same_rotation() {
        for angles in [
            EulerAngles::new(0.4, 0.3, -1.2),
            EulerAngles::new(-2.5, 1.1, 2.9),
            EulerAngles::new(1.0, -0.7, 0.0),
        ] {
            let r1 = Rotation3::from_zyx(angles);
            let r2 = Rotation3::from_zyx(angles.twin());
            assert_relative_eq!(r1, r2, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_nalgebra_backend_round_trip() {
        let angles = EulerAngles::new(0.7, -0.4, 1.3);
        let rotation = Rotation3::from_zyx(angles);
        let extracted = rotation.zyx_angles();
        assert_relative_eq!(extracted.a, angles.a, epsilon = 1e-12);
        assert_relative_eq!(extracted.b, angles.b, epsilon = 1e-12);
        assert_relative_eq!(extracted.c, angles.c, epsilon = 1e-12);
    }

    #[test]
    fn test_zyx_order() {
        // Pure yaw about Z maps X onto Y
        let rotation = Rotation3::from_zyx(EulerAngles::new(PI / 2.0, 0.0, 0.0));
        let v = rotation * Vector3::x();
        assert_relative_eq!(v, Vector3::y(), epsilon = 1e-12);
    }
}
