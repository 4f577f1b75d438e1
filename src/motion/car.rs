/// Per-frame mutable state of the single cart.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct CarState {
    /// Fraction of the loop travelled, in `[0, 1)`.
    pub progress: f32,
    /// Monotonic distance used only to spin the wheels.
    pub cumulative_distance: f32,
}

impl CarState {
    pub const START: Self = Self {
        progress: 0.0,
        cumulative_distance: 0.0,
    };

    /// Wheel rotation in degrees for wheels of `radius`.
    pub fn wheel_angle(&self, radius: f32) -> f32 {
        if radius <= 0.0 {
            return 0.0;
        }
        let circumference = 2.0 * std::f32::consts::PI * radius;
        self.cumulative_distance / circumference * 360.0
    }
}
