//! Pure math/physics primitives for cart motion.
//!
//! This module has no dependencies on the rest of the crate.

mod curvature;
mod math;
mod physics_constants;

pub mod physics;

pub use curvature::Curvature;
pub use math::{Float2, Float3, Matrix3, Matrix4, Quaternion};
pub use physics::{
    energy_speed, kinetic_energy, progress_step, slope_speed, wrap_progress, DEFAULT_GRAVITY,
    DEFAULT_MASS, EPSILON,
};
pub use physics_constants::PhysicsConstants;
