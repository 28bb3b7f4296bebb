use core::fmt;
use core::ops::{Mul, MulAssign};
use std::f32::consts::PI;

use crate::coords::Vec3;

/// A Tait-Bryan rotation (yaw about Y, then pitch about X, then roll about Z)
/// stored as a 3×3 matrix.
///
/// Storing the matrix rather than the angles keeps composition and point
/// rotation exact; the angle getters decompose the matrix and do not handle
/// gimbal lock.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rotation {
    // Row-major.
    m: [[f32; 3]; 3],
}

impl Rotation {
    /// Rotation from yaw/pitch/roll in degrees.
    pub fn new(yaw_degrees: f32, pitch_degrees: f32, roll_degrees: f32) -> Self {
        let (sy, cy) = degrees_to_radians(yaw_degrees).sin_cos();
        let (sp, cp) = degrees_to_radians(pitch_degrees).sin_cos();
        let (sr, cr) = degrees_to_radians(roll_degrees).sin_cos();

        // R = Y(yaw) * X(pitch) * Z(roll)
        Self {
            m: [
                [cy * cr + sy * sp * sr, -cy * sr + sy * sp * cr, sy * cp],
                [cp * sr, cp * cr, -sp],
                [-sy * cr + cy * sp * sr, sy * sr + cy * sp * cr, cy * cp],
            ],
        }
    }

    /// The flat, single-angle notion of rotation: yaw only.
    #[inline]
    pub fn from_yaw(degrees: f32) -> Self {
        Self::new(degrees, 0.0, 0.0)
    }

    #[inline]
    pub fn none() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Rotates `pt` around `around`.
    pub fn rotate_around(&self, around: Vec3, pt: Vec3) -> Vec3 {
        let p = pt - around;
        around + self.apply(p)
    }

    /// Rotates `pt` around the origin.
    #[inline]
    pub fn rotate(&self, pt: Vec3) -> Vec3 {
        self.apply(pt)
    }

    fn apply(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.m[0][0] * p.x + self.m[0][1] * p.y + self.m[0][2] * p.z,
            self.m[1][0] * p.x + self.m[1][1] * p.y + self.m[1][2] * p.z,
            self.m[2][0] * p.x + self.m[2][1] * p.y + self.m[2][2] * p.z,
        )
    }

    // Decomposition formulas for the Y-X-Z convention; valid away from
    // gimbal lock (|pitch| = 90 degrees).

    pub fn yaw(&self) -> f32 {
        radians_to_degrees((self.m[0][2] / self.m[2][2]).atan())
    }

    pub fn pitch(&self) -> f32 {
        let r12 = self.m[1][2];
        radians_to_degrees((-r12 / (1.0 - r12 * r12).sqrt()).atan())
    }

    pub fn roll(&self) -> f32 {
        radians_to_degrees((self.m[1][0] / self.m[1][1]).atan())
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::none()
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    fn mul(self, rhs: Rotation) -> Rotation {
        let mut m = [[0.0f32; 3]; 3];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Rotation { m }
    }
}

impl MulAssign for Rotation {
    fn mul_assign(&mut self, rhs: Rotation) {
        *self = *self * rhs;
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rotation(yaw: {}, pitch: {}, roll: {})",
            self.yaw(),
            self.pitch(),
            self.roll()
        )
    }
}

#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * PI / 180.0
}

#[inline]
pub fn radians_to_degrees(radians: f32) -> f32 {
    radians * 180.0 / PI
}
