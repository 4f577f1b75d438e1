use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedometerConfig {
    /// Speed at which the needle reaches the end of its sweep.
    pub max_speed: f32,
    pub sweep_degrees: f32,
}

impl Default for SpeedometerConfig {
    fn default() -> Self {
        Self {
            max_speed: 400.0,
            sweep_degrees: 270.0,
        }
    }
}

impl SpeedometerConfig {
    pub fn read(&self, speed: f32) -> SpeedometerReading {
        let fraction = if self.max_speed > 0.0 && speed.is_finite() {
            (speed / self.max_speed).clamp(0.0, 1.0)
        } else {
            0.0
        };
        SpeedometerReading {
            speed: if speed.is_finite() { speed.max(0.0) } else { 0.0 },
            fraction,
            needle_degrees: fraction * self.sweep_degrees,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeedometerReading {
    pub speed: f32,
    /// `speed / max_speed`, clamped to `[0, 1]`.
    pub fraction: f32,
    pub needle_degrees: f32,
}
