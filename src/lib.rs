//! A small impulse-based 2D rigid body physics engine for axis-aligned
//! boxes and circles: sub-stepped semi-implicit Euler integration,
//! separating-axis collision detection, positional correction and
//! restitution impulses.

pub mod aabb;
pub mod body;
pub mod collision;
pub mod common;
pub mod math;
pub mod world;

pub use aabb::*;
pub use body::*;
pub use collision::*;
pub use math::*;
pub use world::*;
