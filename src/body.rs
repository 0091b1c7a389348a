use std::f32::consts::PI;
use std::fmt;

use bitflags::bitflags;

use crate::aabb::Aabb;
use crate::common::{MAX_BODY_AREA, MAX_DENSITY, MIN_BODY_AREA, MIN_DENSITY};
use crate::math::{Transform, Vec2};

bitflags! {
    /// Per-body behavior flags.
    pub struct BodyFlags: u32 {
        /// The body never integrates and has zero inverse mass.
        const STATIC = 0x0001;
    }
}

/// Why a body could not be created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyError {
    /// A width, height or radius was zero, negative or non-finite.
    InvalidDimensions,
    /// The shape's area falls outside the configured bounds.
    AreaOutOfRange(f32),
    /// The density falls outside the configured bounds.
    DensityOutOfRange(f32),
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyError::InvalidDimensions => {
                write!(f, "body dimensions must be positive and finite")
            }
            BodyError::AreaOutOfRange(area) => write!(
                f,
                "body area {area} outside the allowed range [{MIN_BODY_AREA}, {MAX_BODY_AREA}]"
            ),
            BodyError::DensityOutOfRange(density) => write!(
                f,
                "density {density} outside the allowed range [{MIN_DENSITY}, {MAX_DENSITY}]"
            ),
        }
    }
}

impl std::error::Error for BodyError {}

/// Collision geometry of a body.
///
/// A box owns its four base vertices (axis-aligned, centered on the body's
/// position) and the four world-space vertices derived from them by the
/// body's current rotation. Cloning a body deep-copies both buffers.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Box {
        width: f32,
        height: f32,
        /// Axis-aligned corners around the current position, unrotated.
        vertices: [Vec2; 4],
        /// `vertices` rotated about the body position by the current
        /// rotation. Refreshed whenever position or rotation changes.
        transformed: [Vec2; 4],
    },
    Circle {
        radius: f32,
    },
}

/// A rigid body: a box or circle with kinematic state and material
/// properties.
///
/// Bodies are created through [`Body::new_box`] / [`Body::new_circle`] and
/// owned by value, usually inside a [`World`](crate::world::World).
#[derive(Debug, Clone)]
pub struct Body {
    position: Vec2,
    linear_velocity: Vec2,
    rotation: f32,
    rotation_velocity: f32,

    force: Vec2,

    density: f32,
    mass: f32,
    inv_mass: f32,
    area: f32,
    restitution: f32,

    flags: BodyFlags,
    shape: Shape,
}

impl Body {
    /// Creates an axis-aligned box body of `width` x `height` centered on
    /// `position`, rotated by `rotation` radians.
    ///
    /// Restitution is clamped to `[0, 1]`. Fails without side effects when
    /// the dimensions, area or density fall outside the configured bounds.
    pub fn new_box(
        position: Vec2,
        width: f32,
        height: f32,
        density: f32,
        restitution: f32,
        rotation: f32,
        is_static: bool,
    ) -> Result<Self, BodyError> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(BodyError::InvalidDimensions);
        }
        let area = width * height;
        let shape = Shape::Box {
            width,
            height,
            vertices: [Vec2::ZERO; 4],
            transformed: [Vec2::ZERO; 4],
        };
        Self::new(position, rotation, density, restitution, area, is_static, shape)
    }

    /// Creates a circle body of `radius` centered on `center`.
    ///
    /// Restitution is clamped to `[0, 1]`. Fails without side effects when
    /// the radius, area or density fall outside the configured bounds.
    pub fn new_circle(
        center: Vec2,
        radius: f32,
        density: f32,
        restitution: f32,
        rotation: f32,
        is_static: bool,
    ) -> Result<Self, BodyError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(BodyError::InvalidDimensions);
        }
        let area = PI * radius * radius;
        Self::new(
            center,
            rotation,
            density,
            restitution,
            area,
            is_static,
            Shape::Circle { radius },
        )
    }

    fn new(
        position: Vec2,
        rotation: f32,
        density: f32,
        restitution: f32,
        area: f32,
        is_static: bool,
        shape: Shape,
    ) -> Result<Self, BodyError> {
        if !(MIN_BODY_AREA..=MAX_BODY_AREA).contains(&area) {
            return Err(BodyError::AreaOutOfRange(area));
        }
        if !density.is_finite() || !(MIN_DENSITY..=MAX_DENSITY).contains(&density) {
            return Err(BodyError::DensityOutOfRange(density));
        }

        let mass = density * area;
        let inv_mass = if is_static { 0.0 } else { 1.0 / mass };
        let flags = if is_static {
            BodyFlags::STATIC
        } else {
            BodyFlags::empty()
        };

        let mut body = Self {
            position,
            linear_velocity: Vec2::ZERO,
            rotation,
            rotation_velocity: 0.0,
            force: Vec2::ZERO,
            density,
            mass,
            inv_mass,
            area,
            restitution: restitution.clamp(0.0, 1.0),
            flags,
            shape,
        };
        body.update_vertices();
        Ok(body)
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    #[inline]
    pub fn linear_velocity(&self) -> Vec2 {
        self.linear_velocity
    }

    #[inline]
    pub fn set_linear_velocity(&mut self, velocity: Vec2) {
        self.linear_velocity = velocity;
    }

    #[inline]
    pub fn rotation_velocity(&self) -> f32 {
        self.rotation_velocity
    }

    #[inline]
    pub fn set_rotation_velocity(&mut self, velocity: f32) {
        self.rotation_velocity = velocity;
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.flags.contains(BodyFlags::STATIC)
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// `1 / mass`, with `0` standing for infinite mass (static bodies).
    #[inline]
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.area
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Read-only view of the collision geometry, including the current
    /// world-space vertices of a box. This is the drawing snapshot.
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// The current world-space corners of a box body, `None` for circles.
    #[inline]
    pub fn transformed_vertices(&self) -> Option<&[Vec2; 4]> {
        match &self.shape {
            Shape::Box { transformed, .. } => Some(transformed),
            Shape::Circle { .. } => None,
        }
    }

    /// Replaces the force accumulator with `amount`.
    ///
    /// One force per step: this overwrites, it does not accumulate. Callers
    /// with multiple simultaneous forces must sum them before calling.
    #[inline]
    pub fn add_force(&mut self, amount: Vec2) {
        self.force = amount;
    }

    /// Applies an instantaneous positional offset (overlap correction).
    pub fn move_by(&mut self, amount: Vec2) {
        self.position += amount;
        self.update_vertices();
    }

    /// Teleports the body to `position`.
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
        self.update_vertices();
    }

    /// Sets the absolute rotation angle, in radians.
    pub fn rotate(&mut self, angle: f32) {
        self.rotation = angle;
        self.update_vertices();
    }

    /// Advances the body by one sub-step of duration `h` under `gravity`.
    ///
    /// Semi-implicit Euler: velocity picks up the acceleration first and the
    /// updated velocity moves the position. The force accumulator is spent
    /// and cleared. No-op for static bodies.
    pub fn step(&mut self, gravity: Vec2, h: f32) {
        if self.is_static() {
            return;
        }

        self.linear_velocity += (gravity + self.force * self.inv_mass) * h;
        self.position += self.linear_velocity * h;
        self.rotation += self.rotation_velocity * h;
        self.force = Vec2::ZERO;
        self.update_vertices();
    }

    /// Recomputes a box's base vertices from the current position and size,
    /// then derives the world-space vertices by rotating them about the
    /// position. Idempotent; no-op for circles.
    pub fn update_vertices(&mut self) {
        let position = self.position;
        let rotation = self.rotation;

        if let Shape::Box {
            width,
            height,
            vertices,
            transformed,
        } = &mut self.shape
        {
            let half_w = *width / 2.0;
            let half_h = *height / 2.0;

            *vertices = [
                Vec2::new(position.x - half_w, position.y - half_h),
                Vec2::new(position.x + half_w, position.y - half_h),
                Vec2::new(position.x + half_w, position.y + half_h),
                Vec2::new(position.x - half_w, position.y + half_h),
            ];

            let rotate = Transform::new(Vec2::ZERO, rotation);
            for (out, vertex) in transformed.iter_mut().zip(vertices.iter()) {
                *out = rotate.apply(*vertex - position) + position;
            }
        }
    }

    /// The tightest axis-aligned box enclosing the current transformed
    /// extent. Always computed fresh, never cached.
    pub fn aabb(&self) -> Aabb {
        match &self.shape {
            Shape::Box { transformed, .. } => {
                let mut min = Vec2::new(f32::MAX, f32::MAX);
                let mut max = Vec2::new(f32::MIN, f32::MIN);
                for vertex in transformed {
                    min.x = min.x.min(vertex.x);
                    min.y = min.y.min(vertex.y);
                    max.x = max.x.max(vertex.x);
                    max.y = max.y.max(vertex.y);
                }
                Aabb::new(min, max)
            }
            Shape::Circle { radius } => {
                let extent = Vec2::new(*radius, *radius);
                Aabb::new(self.position - extent, self.position + extent)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    fn dynamic_box() -> Body {
        Body::new_box(Vec2::new(100.0, 100.0), 10.0, 10.0, 1.0, 0.5, 0.0, false).unwrap()
    }

    #[test]
    fn creation_rejects_bad_dimensions() {
        let result = Body::new_box(Vec2::ZERO, -1.0, 10.0, 1.0, 0.5, 0.0, false);
        assert_eq!(result.unwrap_err(), BodyError::InvalidDimensions);

        let result = Body::new_circle(Vec2::ZERO, f32::NAN, 1.0, 0.5, 0.0, false);
        assert_eq!(result.unwrap_err(), BodyError::InvalidDimensions);

        let result = Body::new_box(Vec2::ZERO, 0.1, 0.1, 1.0, 0.5, 0.0, false);
        assert!(matches!(result.unwrap_err(), BodyError::AreaOutOfRange(_)));
    }

    #[test]
    fn creation_rejects_bad_density() {
        let result = Body::new_circle(Vec2::ZERO, 5.0, 0.0, 0.5, 0.0, false);
        assert!(matches!(result.unwrap_err(), BodyError::DensityOutOfRange(_)));
    }

    #[test]
    fn static_body_has_zero_inverse_mass() {
        let body = Body::new_box(Vec2::ZERO, 10.0, 10.0, 1.0, 0.5, 0.0, true).unwrap();
        assert!(body.is_static());
        assert_eq!(body.inv_mass(), 0.0);
        assert!(body.mass() > 0.0);

        let body = dynamic_box();
        assert!(!body.is_static());
        assert_relative_eq!(body.inv_mass(), 1.0 / body.mass());
    }

    #[test]
    fn circle_mass_uses_disc_area() {
        let body = Body::new_circle(Vec2::ZERO, 5.0, 2.0, 0.5, 0.0, false).unwrap();
        assert_relative_eq!(body.area(), PI * 25.0);
        assert_relative_eq!(body.mass(), 2.0 * PI * 25.0);
    }

    #[test]
    fn add_force_overwrites() {
        let mut body = dynamic_box();
        body.add_force(Vec2::new(10.0, 0.0));
        body.add_force(Vec2::new(0.0, 3.0));

        // only the last force counts for the upcoming step
        let gravity = Vec2::ZERO;
        body.step(gravity, 1.0);
        assert_relative_eq!(body.linear_velocity().x, 0.0);
        assert!(body.linear_velocity().y > 0.0);
    }

    #[test]
    fn integration_matches_closed_form() {
        let gravity = Vec2::new(0.0, 490.0);
        let h = 1.0 / 60.0;
        let n = 20;

        let mut body = dynamic_box();
        let start = body.position();
        for _ in 0..n {
            body.step(gravity, h);
        }

        // v_n = n*g*h; p_n = p_0 + g*h^2 * n(n+1)/2 for semi-implicit Euler
        let n_f = n as f32;
        assert_relative_eq!(body.linear_velocity().y, n_f * gravity.y * h, epsilon = 1e-3);
        let expected_y = start.y + gravity.y * h * h * n_f * (n_f + 1.0) / 2.0;
        assert_relative_eq!(body.position().y, expected_y, epsilon = 1e-2);
    }

    #[test]
    fn static_body_never_moves() {
        let mut body = Body::new_box(Vec2::new(50.0, 50.0), 10.0, 10.0, 1.0, 0.5, 0.0, true).unwrap();
        body.add_force(Vec2::new(1e6, 1e6));
        for _ in 0..100 {
            body.step(Vec2::new(0.0, 490.0), 1.0 / 60.0);
        }
        assert_eq!(body.position(), Vec2::new(50.0, 50.0));
        assert_eq!(body.linear_velocity(), Vec2::ZERO);
        assert_eq!(body.rotation(), 0.0);
    }

    #[test]
    fn aabb_round_trip_unrotated() {
        let mut body = dynamic_box();
        body.update_vertices();
        let aabb = body.aabb();
        assert_eq!(aabb.min, Vec2::new(95.0, 95.0));
        assert_eq!(aabb.max, Vec2::new(105.0, 105.0));
    }

    #[test]
    fn rotation_refreshes_transformed_vertices() {
        let mut body = dynamic_box();
        body.rotate(FRAC_PI_4);

        let vertices = body.transformed_vertices().unwrap();
        for vertex in vertices {
            // corners stay at the same distance from the center
            assert_relative_eq!(
                vertex.distance(body.position()),
                50.0f32.sqrt(),
                epsilon = 1e-4
            );
        }

        // a rotated square's AABB is wider than the square itself
        let aabb = body.aabb();
        assert_relative_eq!(aabb.extents().x, 50.0f32.sqrt(), epsilon = 1e-4);
        assert_relative_eq!(aabb.extents().y, 50.0f32.sqrt(), epsilon = 1e-4);
    }

    #[test]
    fn rotation_velocity_integrates_into_rotation() {
        let mut body = dynamic_box();
        body.set_rotation_velocity(2.0);
        body.step(Vec2::ZERO, 0.5);
        assert_relative_eq!(body.rotation(), 1.0);
        assert_relative_eq!(body.rotation_velocity(), 2.0);
    }

    #[test]
    fn move_to_teleports_the_box() {
        let mut body = dynamic_box();
        body.move_to(Vec2::ZERO);
        let aabb = body.aabb();
        assert_eq!(aabb.min, Vec2::new(-5.0, -5.0));
        assert_eq!(aabb.max, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn move_by_shifts_every_vertex() {
        let mut body = dynamic_box();
        let before = *body.transformed_vertices().unwrap();
        body.move_by(Vec2::new(3.0, -2.0));
        let after = body.transformed_vertices().unwrap();
        for (a, b) in after.iter().zip(before.iter()) {
            assert_relative_eq!(a.x, b.x + 3.0);
            assert_relative_eq!(a.y, b.y - 2.0);
        }
    }

    #[test]
    fn circle_aabb_is_center_plus_minus_radius() {
        let body = Body::new_circle(Vec2::new(10.0, 20.0), 5.0, 1.0, 0.5, 0.0, false).unwrap();
        let aabb = body.aabb();
        assert_eq!(aabb.min, Vec2::new(5.0, 15.0));
        assert_eq!(aabb.max, Vec2::new(15.0, 25.0));
    }
}
