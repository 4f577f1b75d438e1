//! Session configuration.
//!
//! Every section defaults to the values the coaster has always shipped with,
//! so an empty JSON object is a complete configuration.

use crate::error::{CoasterError, Result};
use crate::motion::{DeformationModel, MotionConfig, SpeedModel, SpeedometerConfig, WheelSpin};
use crate::sim::{DEFAULT_GRAVITY, DEFAULT_MASS};
use crate::track::{BundleParams, DisplayRegion, DEFAULT_SEGMENTS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub mass: f32,
    pub gravity: f32,
    /// Overrides the first control point's height as the energy reference.
    pub initial_height: Option<f32>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            gravity: DEFAULT_GRAVITY,
            initial_height: None,
        }
    }
}

/// Cart body and wheel placement, in cart units before `scale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    pub scale: f32,
    pub body_offset: f32,
    pub wheel_offsets: [[f32; 2]; 2],
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            scale: 2.5,
            body_offset: 7.5,
            wheel_offsets: [[-5.0, -7.5], [-5.0, 7.5]],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Samples per Catmull-Rom span, excluding the shared endpoint.
    pub segments: usize,
    pub region: DisplayRegion,
    pub physics: PhysicsConfig,
    pub motion: MotionConfig,
    pub deformation: DeformationModel,
    pub cart: CartConfig,
    pub speedometer: SpeedometerConfig,
}

impl SessionConfig {
    /// Decodes and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values the load pipeline or frame step cannot work with.
    ///
    /// # Errors
    /// `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.segments == 0 {
            return Err(CoasterError::invalid_config("segments must be at least 1"));
        }

        let (aw, ah) = self.region.available();
        if !(aw > 0.0 && ah > 0.0) {
            return Err(CoasterError::invalid_config(format!(
                "display region {}x{} leaves no room inside margin {}",
                self.region.width, self.region.height, self.region.margin
            )));
        }

        positive("physics.mass", self.physics.mass)?;
        finite("physics.gravity", self.physics.gravity)?;
        if let Some(h) = self.physics.initial_height {
            finite("physics.initial_height", h)?;
        }

        let m = &self.motion;
        non_negative("motion.speed_multiplier", m.speed_multiplier)?;
        non_negative("motion.min_speed", m.min_speed)?;
        finite("motion.max_speed", m.max_speed)?;
        if m.max_speed < m.min_speed {
            return Err(CoasterError::invalid_config(format!(
                "motion.max_speed ({}) is below motion.min_speed ({})",
                m.max_speed, m.min_speed
            )));
        }
        if let SpeedModel::Slope {
            base_speed,
            gravity_factor,
            floor,
        } = m.speed_model
        {
            finite("motion.speed_model.base_speed", base_speed)?;
            finite("motion.speed_model.gravity_factor", gravity_factor)?;
            non_negative("motion.speed_model.floor", floor)?;
        }
        if let WheelSpin::Fixed { factor } = m.wheel_spin {
            non_negative("motion.wheel_spin.factor", factor)?;
        }
        positive("motion.wheel_radius", m.wheel_radius)?;

        match self.deformation {
            DeformationModel::None => {}
            DeformationModel::Curvature { intensity } => {
                non_negative("deformation.intensity", intensity)?;
            }
            DeformationModel::Speed {
                low_ref,
                range,
                stretch_x,
                squash_y,
                ..
            } => {
                finite("deformation.low_ref", low_ref)?;
                positive("deformation.range", range)?;
                non_negative("deformation.stretch_x", stretch_x)?;
                non_negative("deformation.squash_y", squash_y)?;
                if squash_y >= 1.0 {
                    return Err(CoasterError::invalid_config(
                        "deformation.squash_y must be below 1",
                    ));
                }
            }
        }

        positive("cart.scale", self.cart.scale)?;
        positive("speedometer.max_speed", self.speedometer.max_speed)?;
        Ok(())
    }

    /// Load-time parameters for [`TrackBundle::build`](crate::track::TrackBundle::build).
    pub fn bundle_params(&self) -> BundleParams {
        BundleParams {
            segments: self.segments,
            region: self.region,
            mass: self.physics.mass,
            gravity: self.physics.gravity,
            initial_height: self.physics.initial_height,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            region: DisplayRegion::default(),
            physics: PhysicsConfig::default(),
            motion: MotionConfig::default(),
            deformation: DeformationModel::default(),
            cart: CartConfig::default(),
            speedometer: SpeedometerConfig::default(),
        }
    }
}

fn finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoasterError::invalid_config(format!("{name} must be finite, got {value}")))
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CoasterError::invalid_config(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoasterError::invalid_config(format!(
            "{name} must be non-negative, got {value}"
        )))
    }
}
