//! Integer 2D vectors used for grid coordinates and movement.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// An immutable pair of grid coordinates (or a displacement between two).
///
/// `x` grows to the east and `y` grows to the south, so "north" is
/// `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vector2D {
    pub x: i64,
    pub y: i64,
}

impl Vector2D {
    /// The origin `(0, 0)`.
    pub const ZERO: Vector2D = Vector2D { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Divide both components by two, rounding toward negative infinity.
    ///
    /// Used to turn the sum of two unit vectors into a single sideways step,
    /// e.g. `(-2, 0).half() == (-1, 0)` and `(-1, 1).half() == (-1, 0)`.
    pub fn half(self) -> Self {
        Self::new(self.x.div_euclid(2), self.y.div_euclid(2))
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> i64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the cross product `self × other`.
    pub fn cross(self, other: Self) -> i64 {
        self.x * other.y - self.y * other.x
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<i64> for Vector2D {
    type Output = Self;

    fn mul(self, factor: i64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Vector2D::new(3, -2);
        let b = Vector2D::new(-1, 5);
        assert_eq!(a + b, Vector2D::new(2, 3));
        assert_eq!(a - b, Vector2D::new(4, -7));
        assert_eq!(-a, Vector2D::new(-3, 2));
        assert_eq!(a * 3, Vector2D::new(9, -6));
    }

    #[test]
    fn half_rounds_toward_negative_infinity() {
        assert_eq!(Vector2D::new(-2, 0).half(), Vector2D::new(-1, 0));
        assert_eq!(Vector2D::new(-1, 1).half(), Vector2D::new(-1, 0));
        assert_eq!(Vector2D::new(0, 2).half(), Vector2D::new(0, 1));
        assert_eq!(Vector2D::new(-3, 3).half(), Vector2D::new(-2, 1));
    }

    #[test]
    fn dot_and_cross() {
        let a = Vector2D::new(1, -1);
        let b = Vector2D::new(2, 3);
        assert_eq!(a.dot(b), -1);
        assert_eq!(a.cross(b), 5);
    }

    #[test]
    fn display() {
        assert_eq!(Vector2D::new(4, -7).to_string(), "(4, -7)");
    }
}
