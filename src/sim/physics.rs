//! Speed formulas and progress arithmetic for the cart.

/// Gravity in track units; tuned so heights in spline files give visible speeds.
pub const DEFAULT_GRAVITY: f32 = 100.0;
pub const DEFAULT_MASS: f32 = 1.0;
pub const EPSILON: f32 = 1.192_093e-7;

/// Kinetic energy left after paying for height `z`, never negative.
pub fn kinetic_energy(total_energy: f32, mass: f32, gravity: f32, z: f32) -> f32 {
    let potential = mass * gravity * z;
    (total_energy - potential).max(0.0)
}

/// Speed from energy conservation: `sqrt(2 * KE / m)`.
///
/// Returns zero for a non-positive mass instead of dividing by it.
pub fn energy_speed(total_energy: f32, mass: f32, gravity: f32, z: f32) -> f32 {
    if mass <= EPSILON {
        return 0.0;
    }
    let ke = kinetic_energy(total_energy, mass, gravity, z);
    (2.0 * ke / mass).sqrt()
}

/// Heuristic speed that drops while climbing and rises while descending.
///
/// # Arguments
/// * `base_speed` - Speed on a flat segment
/// * `gravity_factor` - Multiplier on `gravity * delta_z`
/// * `gravity` - Gravitational constant
/// * `delta_z` - Height change across the current segment
/// * `floor` - Lowest speed the heuristic will return
pub fn slope_speed(
    base_speed: f32,
    gravity_factor: f32,
    gravity: f32,
    delta_z: f32,
    floor: f32,
) -> f32 {
    (base_speed - gravity_factor * gravity * delta_z).max(floor)
}

/// Wraps a progress value into `[0, 1)`.
pub fn wrap_progress(progress: f32) -> f32 {
    let wrapped = progress.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if !wrapped.is_finite() || wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Fraction of the loop covered at `speed` over `dt` on a track of `arc_length`.
pub fn progress_step(speed: f32, dt: f32, arc_length: f32) -> f32 {
    if arc_length <= 0.0 {
        return 0.0;
    }
    speed * dt / arc_length
}
