use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// Planar vector in the geocentric frame. Positions in meters, velocities in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Vector2D { x, y }
    }

    /// Vector of length `magnitude` at `angle` radians from the +x axis.
    pub fn from_polar(magnitude: f64, angle: f64) -> Self {
        Vector2D::new(magnitude * angle.cos(), magnitude * angle.sin())
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector, or `None` when the magnitude is at or below `min_magnitude`.
    pub fn unit(&self, min_magnitude: f64) -> Option<Self> {
        let mag = self.magnitude();
        if !mag.is_finite() || mag <= min_magnitude {
            None
        } else {
            Some(*self / mag)
        }
    }

    pub fn dot(&self, other: &Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3-D cross product; positive when `other` lies counter-clockwise.
    pub fn cross(&self, other: &Vector2D) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Rotated 90° counter-clockwise.
    pub fn perpendicular(&self) -> Self {
        Vector2D::new(-self.y, self.x)
    }

    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Vector2D::new(self.x + other.x, self.y + other.y)
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
        Vector2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Vector2D::new(self.x * scalar, self.y * scalar)
    }
}

impl Mul<Vector2D> for f64 {
    type Output = Vector2D;

    fn mul(self, vector: Vector2D) -> Vector2D {
        vector * self
    }
}

impl Div<f64> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f64) -> Self {
        Vector2D::new(self.x / scalar, self.y / scalar)
    }
}

impl Neg for Vector2D {
    type Output = Self;

    fn neg(self) -> Self {
        Vector2D::new(-self.x, -self.y)
    }
}
