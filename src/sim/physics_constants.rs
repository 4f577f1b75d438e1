use super::physics::{self, DEFAULT_GRAVITY, DEFAULT_MASS};

/// Energy budget for one loaded track.
///
/// `total_energy` is fixed when the track loads; the cart can never climb
/// above `initial_height` under the energy model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConstants {
    pub mass: f32,
    pub gravity: f32,
    pub initial_height: f32,
    pub total_energy: f32,
}

impl PhysicsConstants {
    pub fn new(mass: f32, gravity: f32, initial_height: f32) -> Self {
        Self {
            mass,
            gravity,
            initial_height,
            total_energy: mass * gravity * initial_height,
        }
    }

    pub fn potential_energy(&self, z: f32) -> f32 {
        self.mass * self.gravity * z
    }

    pub fn kinetic_energy(&self, z: f32) -> f32 {
        physics::kinetic_energy(self.total_energy, self.mass, self.gravity, z)
    }

    pub fn speed_at(&self, z: f32) -> f32 {
        physics::energy_speed(self.total_energy, self.mass, self.gravity, z)
    }
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self::new(DEFAULT_MASS, DEFAULT_GRAVITY, 0.0)
    }
}
