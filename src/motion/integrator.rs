use super::car::CarState;
use crate::sim::{physics, Float3, PhysicsConstants};
use crate::track::{bracket, height_at, TrackBundle};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How the cart's speed is derived from its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum SpeedModel {
    /// Speed from conserving `m * g * initial_height` of mechanical energy.
    Energy,
    /// `max(base_speed - gravity_factor * g * dz, floor)` over the current segment.
    Slope {
        base_speed: f32,
        gravity_factor: f32,
        floor: f32,
    },
}

impl SpeedModel {
    pub const fn slope_default() -> Self {
        Self::Slope {
            base_speed: 50.0,
            gravity_factor: 3.0,
            floor: 20.0,
        }
    }

    /// Physical speed at `progress`; always finite and non-negative.
    pub fn speed(&self, curve: &[Float3], constants: &PhysicsConstants, progress: f32) -> f32 {
        if curve.is_empty() {
            return 0.0;
        }
        let speed = match *self {
            Self::Energy => {
                let z = height_at(curve, progress).unwrap_or(0.0);
                constants.speed_at(z)
            }
            Self::Slope {
                base_speed,
                gravity_factor,
                floor,
            } => {
                let (i, j, _) = bracket(progress, curve.len());
                let dz = curve[j].z - curve[i].z;
                physics::slope_speed(base_speed, gravity_factor, constants.gravity, dz, floor)
            }
        };
        if speed.is_finite() {
            speed.max(0.0)
        } else {
            0.0
        }
    }
}

impl Default for SpeedModel {
    fn default() -> Self {
        Self::Energy
    }
}

/// How far the wheels roll each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WheelSpin {
    /// Length of the track segment under the cart times `factor`, per moving frame.
    Fixed { factor: f32 },
    /// The distance actually covered this frame.
    Travelled,
}

impl Default for WheelSpin {
    fn default() -> Self {
        Self::Fixed { factor: 0.002 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub speed_model: SpeedModel,
    /// User-facing rate control; scales progress, not the physics.
    pub speed_multiplier: f32,
    /// Bounds applied before the multiplier. A positive `min_speed` keeps a
    /// cart that reaches the energy ceiling creeping over the crest.
    pub min_speed: f32,
    pub max_speed: f32,
    pub wheel_spin: WheelSpin,
    pub wheel_radius: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed_model: SpeedModel::Energy,
            speed_multiplier: 1.0,
            min_speed: 10.0,
            max_speed: 2000.0,
            wheel_spin: WheelSpin::default(),
            wheel_radius: 3.0,
        }
    }
}

/// Outcome of one integration step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionStep {
    /// Curve height under the cart before the step.
    pub height: f32,
    /// Speed from the physics model alone.
    pub physical_speed: f32,
    /// Clamped, multiplied speed that moved the cart.
    pub effective_speed: f32,
    /// Distance along the track covered this frame.
    pub distance: f32,
    pub moved: bool,
}

/// Advances a [`CarState`] along a [`TrackBundle`] each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionIntegrator {
    config: MotionConfig,
}

impl MotionIntegrator {
    pub fn new(config: MotionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.config.speed_multiplier = if multiplier.is_finite() {
            multiplier.max(0.0)
        } else {
            1.0
        };
    }

    /// Height and physical speed at `progress` without moving anything.
    pub fn sample(&self, bundle: &TrackBundle, progress: f32) -> (f32, f32) {
        let height = height_at(&bundle.curve, progress).unwrap_or(0.0);
        let speed = self
            .config
            .speed_model
            .speed(&bundle.curve, &bundle.physics, progress);
        (height, speed)
    }

    /// Applies bounds and the multiplier to a physical speed.
    pub fn effective_speed(&self, physical_speed: f32) -> f32 {
        let c = &self.config;
        let low = c.min_speed.max(0.0);
        let high = c.max_speed.max(low);
        physical_speed.clamp(low, high) * c.speed_multiplier.max(0.0)
    }

    /// Moves `state` forward by `dt` seconds.
    ///
    /// A bundle the cart cannot traverse leaves `state` untouched. Negative
    /// or non-finite `dt` counts as zero.
    pub fn step(&self, state: &mut CarState, bundle: &TrackBundle, dt: f32) -> MotionStep {
        if !bundle.is_traversable() {
            trace!("Track not traversable, skipping motion step");
            return MotionStep::default();
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let (height, physical_speed) = self.sample(bundle, state.progress);
        let effective_speed = self.effective_speed(physical_speed);

        let distance = effective_speed * dt;
        let fraction = physics::progress_step(effective_speed, dt, bundle.track.length);
        let from = state.progress;
        state.progress = physics::wrap_progress(state.progress + fraction);

        let moved = distance > 0.0;
        if moved {
            state.cumulative_distance += match self.config.wheel_spin {
                WheelSpin::Fixed { factor } => segment_under(bundle, from) * factor.max(0.0),
                WheelSpin::Travelled => distance,
            };
        }

        MotionStep {
            height,
            physical_speed,
            effective_speed,
            distance,
            moved,
        }
    }
}

/// Length of the track segment ending at the sample under `progress`.
fn segment_under(bundle: &TrackBundle, progress: f32) -> f32 {
    bundle
        .track
        .index_at(progress)
        .and_then(|i| bundle.track.neighbours(i))
        .map_or(0.0, |(prev, curr, _)| prev.distance(curr))
}
