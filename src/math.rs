use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[inline(always)]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    #[inline]
    pub fn distance_squared(self, other: Self) -> f32 {
        (other - self).length_squared()
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Rotates the vector 90 degrees counter-clockwise. Applied to an edge
    /// direction this yields the edge normal used as a candidate separating
    /// axis.
    #[inline]
    pub fn perp(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    /// Returns the unit vector with the same direction, or `Vec2::ZERO` if
    /// the input has zero length. Callers that require a unit-length result
    /// must check for the zero case themselves.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::ZERO;
        }
        Self {
            x: self.x / len,
            y: self.y / len,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, other: f32) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
        }
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;
    #[inline]
    fn mul(self, other: Vec2) -> Vec2 {
        Vec2 {
            x: self * other.x,
            y: self * other.y,
        }
    }
}

/// A rigid transform: a translation plus a rotation stored as a precomputed
/// cosine/sine pair, so mapping a vertex set into world space costs no
/// trigonometric calls per point.
#[derive(Copy, Clone, Debug)]
pub struct Transform {
    position: Vec2,
    cos: f32,
    sin: f32,
}

impl Transform {
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self {
            position,
            cos: angle.cos(),
            sin: angle.sin(),
        }
    }

    /// `R(cos, sin) * point + translation`
    #[inline]
    pub fn apply(&self, point: Vec2) -> Vec2 {
        Vec2 {
            x: point.x * self.cos - point.y * self.sin + self.position.x,
            y: point.x * self.sin + point.y * self.cos + self.position.y,
        }
    }
}

/// Min/max scalar extents of a vertex set projected onto `axis`.
///
/// `axis` must be unit length; depths derived from these extents are only
/// comparable across axes when every axis has the same scale.
pub fn project_vertices(vertices: &[Vec2], axis: Vec2) -> (f32, f32) {
    debug_assert!(
        (axis.length_squared() - 1.0).abs() < 1e-3,
        "projection axis must be unit length"
    );

    let mut min = f32::MAX;
    let mut max = f32::MIN;

    for vertex in vertices {
        let projection = vertex.dot(axis);
        min = min.min(projection);
        max = max.max(projection);
    }

    (min, max)
}

/// Min/max scalar extents of a circle projected onto `axis`: the projections
/// of `center ± radius * axis`.
///
/// `axis` must be unit length, same as [`project_vertices`].
pub fn project_circle(center: Vec2, radius: f32, axis: Vec2) -> (f32, f32) {
    debug_assert!(
        (axis.length_squared() - 1.0).abs() < 1e-3,
        "projection axis must be unit length"
    );

    let offset = axis * radius;
    let a = (center - offset).dot(axis);
    let b = (center + offset).dot(axis);

    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
