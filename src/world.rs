use log::debug;

use crate::body::Body;
use crate::collision::{self, Contact};
use crate::common::{DEFAULT_GRAVITY, MAX_SUBSTEPS, MIN_SUBSTEPS};
use crate::math::Vec2;

/// The simulation container: gravity plus an ordered collection of bodies.
///
/// The world is the sole owner of its bodies. Bodies are addressed by their
/// insertion index; removing a body shifts the indices of everything after
/// it, so hold indices only between mutations.
#[derive(Debug, Clone)]
pub struct World {
    pub gravity: Vec2,
    bodies: Vec<Body>,
}

impl World {
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
        }
    }

    /// Moves `body` into the world and returns its index.
    pub fn add_body(&mut self, body: Body) -> usize {
        let index = self.bodies.len();
        debug!("adding body {} at {:?}", index, body.position());
        self.bodies.push(body);
        index
    }

    /// Removes and returns the body at `index`, or `None` if out of range.
    pub fn remove_body(&mut self, index: usize) -> Option<Body> {
        if index >= self.bodies.len() {
            return None;
        }
        debug!("removing body {}", index);
        Some(self.bodies.remove(index))
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    /// Read-only view of every body, in insertion order.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Advances the simulation by `dt` seconds in `substeps` equal
    /// sub-steps (clamped to the configured range).
    ///
    /// Each sub-step integrates every dynamic body, then scans every
    /// ordered body pair for overlap, pushes overlapping bodies apart and
    /// resolves their velocities. The scan is O(n^2) with no broad phase;
    /// fine at the body counts this engine targets.
    pub fn step(&mut self, dt: f32, substeps: u32) {
        let substeps = substeps.clamp(MIN_SUBSTEPS, MAX_SUBSTEPS);
        let h = dt / substeps as f32;

        for _ in 0..substeps {
            self.sub_step(h);
        }
    }

    fn sub_step(&mut self, h: f32) {
        let gravity = self.gravity;
        for body in &mut self.bodies {
            body.step(gravity, h);
        }

        for i in 0..self.bodies.len() {
            for j in 0..self.bodies.len() {
                if i == j {
                    continue;
                }
                if self.bodies[i].is_static() && self.bodies[j].is_static() {
                    continue;
                }

                let contact = match collision::collide(&self.bodies[i], &self.bodies[j]) {
                    Some(contact) => contact,
                    None => continue,
                };

                let (b0, b1) = pair_mut(&mut self.bodies, i, j);
                separate(b0, b1, contact);
                Self::resolve_collision(b0, b1, contact.normal);
            }
        }
    }

    /// Applies the restitution impulse along `normal` (pointing from `b0`
    /// toward `b1`).
    ///
    /// A pair already separating along the normal is left untouched, so a
    /// contact is never resolved twice and separating bodies never gain
    /// energy. At least one body must be dynamic.
    pub fn resolve_collision(b0: &mut Body, b1: &mut Body, normal: Vec2) {
        debug_assert!(
            b0.inv_mass() + b1.inv_mass() > 0.0,
            "cannot resolve a collision between two static bodies"
        );

        let relative_velocity = b1.linear_velocity() - b0.linear_velocity();
        let along_normal = relative_velocity.dot(normal);
        if along_normal >= 0.0 {
            return;
        }

        let e = b0.restitution().min(b1.restitution());
        let j = -(1.0 + e) * along_normal / (b0.inv_mass() + b1.inv_mass());

        b0.set_linear_velocity(b0.linear_velocity() - normal * (j * b0.inv_mass()));
        b1.set_linear_velocity(b1.linear_velocity() + normal * (j * b1.inv_mass()));
    }

    /// Removes every body whose bounding box lies entirely below `floor_y`
    /// and returns how many were removed.
    pub fn cull_below(&mut self, floor_y: f32) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|body| body.aabb().min.y <= floor_y);

        let removed = before - self.bodies.len();
        if removed > 0 {
            debug!("culled {} bodies below y = {}", removed, floor_y);
        }
        removed
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(Vec2::new(0.0, DEFAULT_GRAVITY))
    }
}

/// Pushes an overlapping pair apart along the contact normal. A static body
/// never moves; its partner absorbs the full correction.
fn separate(b0: &mut Body, b1: &mut Body, contact: Contact) {
    let offset = contact.normal * contact.depth;

    if b0.is_static() {
        b1.move_by(offset);
    } else if b1.is_static() {
        b0.move_by(-offset);
    } else {
        b0.move_by(offset * -0.5);
        b1.move_by(offset * 0.5);
    }
}

/// Disjoint mutable references to two bodies of the slice.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i != j);

    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
