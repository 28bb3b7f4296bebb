use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

use crate::coords::{Axis, Rotation, Vec3};

/// Axis-aligned bounding box `{base, end}`.
///
/// The all-zero box is treated as "no bounds yet": unioning it with another
/// box adopts the other box wholesale rather than pinning the base at the
/// origin.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Bounds {
    base: Vec3,
    end: Vec3,
}

impl Bounds {
    #[inline]
    pub const fn new(base: Vec3, end: Vec3) -> Self {
        Self { base, end }
    }

    /// A box of the given extents with its base at the origin.
    #[inline]
    pub fn from_lengths(width: f32, height: f32, depth: f32) -> Self {
        Self::new(Vec3::zero(), Vec3::new(width, height, depth))
    }

    #[inline]
    pub fn base(&self) -> Vec3 {
        self.base
    }

    #[inline]
    pub fn end(&self) -> Vec3 {
        self.end
    }

    pub fn center(&self) -> Vec3 {
        let (width, height, depth) = self.lengths();
        self.base + Vec3::new(width / 2.0, height / 2.0, depth / 2.0)
    }

    #[inline]
    pub fn bottom_left(&self) -> Vec3 {
        self.base
    }

    #[inline]
    pub fn bottom_right(&self) -> Vec3 {
        self.base + Vec3::new(self.width(), 0.0, 0.0)
    }

    /// The same extents re-based at the origin.
    pub fn strip_pos(&self) -> Bounds {
        let (width, height, depth) = self.lengths();
        Bounds::from_lengths(width, height, depth)
    }

    pub fn lengths(&self) -> (f32, f32, f32) {
        (self.width(), self.height(), self.depth())
    }

    pub fn axis_length(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width(),
            Axis::Y => self.height(),
            Axis::Z => self.depth(),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        (self.end.x - self.base.x).abs()
    }

    #[inline]
    pub fn height(&self) -> f32 {
        (self.end.y - self.base.y).abs()
    }

    #[inline]
    pub fn depth(&self) -> f32 {
        (self.end.z - self.base.z).abs()
    }

    /// The AABB of the eight corners rotated around `around`.
    ///
    /// Rotation moves the extremes off the original corners, so this
    /// recomputes per-axis minima and maxima from the rotated corner pair.
    pub fn rotate_around(&self, around: Vec3, rotation: &Rotation) -> Bounds {
        let base = rotation.rotate_around(around, self.base);
        let end = rotation.rotate_around(around, self.end);
        Bounds::new(base.min(end), base.max(end))
    }

    #[inline]
    pub fn is_nan(&self) -> bool {
        self.base.is_nan() || self.end.is_nan()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.base.is_finite() && self.end.is_finite()
    }
}

// Union; `{0,0,0}-{0,0,0}` is absorbing-empty.
impl AddAssign for Bounds {
    fn add_assign(&mut self, rhs: Bounds) {
        if self.base == Vec3::zero() && self.end == Vec3::zero() {
            *self = rhs;
            return;
        }
        self.base = self.base.min(rhs.base);
        self.end = self.end.max(rhs.end);
    }
}

impl Add for Bounds {
    type Output = Bounds;
    fn add(mut self, rhs: Bounds) -> Bounds {
        self += rhs;
        self
    }
}

// Offsetting by a point.
impl AddAssign<Vec3> for Bounds {
    fn add_assign(&mut self, offset: Vec3) {
        self.base += offset;
        self.end += offset;
    }
}

impl Add<Vec3> for Bounds {
    type Output = Bounds;
    fn add(mut self, offset: Vec3) -> Bounds {
        self += offset;
        self
    }
}

impl SubAssign<Vec3> for Bounds {
    fn sub_assign(&mut self, offset: Vec3) {
        self.base -= offset;
        self.end -= offset;
    }
}

impl Sub<Vec3> for Bounds {
    type Output = Bounds;
    fn sub(mut self, offset: Vec3) -> Bounds {
        self -= offset;
        self
    }
}

impl MulAssign<f32> for Bounds {
    fn mul_assign(&mut self, factor: f32) {
        self.base *= factor;
        self.end *= factor;
    }
}

impl Mul<f32> for Bounds {
    type Output = Bounds;
    fn mul(mut self, factor: f32) -> Bounds {
        self *= factor;
        self
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.base, self.end)
    }
}
