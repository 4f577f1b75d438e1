//! The running coaster: one loaded track and one cart.

use crate::config::SessionConfig;
use crate::error::Result;
use crate::motion::{
    CarState, Deformation, FrameClock, MotionIntegrator, RiderPose, SpeedometerReading,
};
use crate::persistence;
use crate::sim::{Float2, Matrix4, Quaternion};
use crate::track::{SplineDocument, TrackBundle};
use std::sync::Arc;
use tracing::{info, trace, warn};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub progress: f32,
    /// Cart position on the fitted track, in display units.
    pub position: Float2,
    pub orientation: Quaternion,
    /// `T(position) * R * T(0, body offset) * S(deformed cart scale)`.
    pub model_matrix: Matrix4,
    pub wheel_matrices: [Matrix4; 2],
    /// Degrees.
    pub wheel_angle: f32,
    pub deformation: Deformation,
    pub height: f32,
    pub physical_speed: f32,
    pub effective_speed: f32,
    pub kinetic_energy: f32,
    /// Track distance covered by this frame's step.
    pub distance: f32,
    pub speedometer: SpeedometerReading,
    /// In the cart's local frame; draw with `model_matrix`.
    pub rider: RiderPose,
}

/// Owns the loaded track and the cart riding it.
///
/// A load builds a complete [`TrackBundle`] before touching the session, so a
/// rejected file leaves the previous track and cart exactly as they were.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    integrator: MotionIntegrator,
    bundle: Option<Arc<TrackBundle>>,
    car: CarState,
    clock: FrameClock,
    elapsed: f32,
}

impl Session {
    /// # Errors
    /// `InvalidConfig` if `config` fails validation.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            integrator: MotionIntegrator::new(config.motion),
            config,
            bundle: None,
            car: CarState::START,
            clock: FrameClock::new(),
            elapsed: 0.0,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Builds a bundle from `document` with this configuration, without
    /// installing it.
    pub fn prepare(config: &SessionConfig, document: SplineDocument) -> Result<TrackBundle> {
        TrackBundle::build(document, &config.bundle_params())
    }

    /// Parses and installs spline text.
    ///
    /// # Errors
    /// `MalformedInput` or `DegenerateGeometry`; the session is unchanged.
    pub fn load_text(&mut self, text: &str) -> Result<Arc<TrackBundle>> {
        let result = persistence::parse(text).and_then(|doc| Self::prepare(&self.config, doc));
        self.finish_load(result)
    }

    /// Installs an already parsed document.
    pub fn load_document(&mut self, document: SplineDocument) -> Result<Arc<TrackBundle>> {
        let result = Self::prepare(&self.config, document);
        self.finish_load(result)
    }

    fn finish_load(&mut self, result: Result<TrackBundle>) -> Result<Arc<TrackBundle>> {
        match result {
            Ok(bundle) => Ok(self.install(bundle)),
            Err(err) => {
                warn!(error = %err, "Rejected spline load, keeping previous track");
                Err(err)
            }
        }
    }

    /// Swaps in `bundle` and puts the cart back at the start.
    pub fn install(&mut self, bundle: TrackBundle) -> Arc<TrackBundle> {
        let bundle = Arc::new(bundle);
        self.bundle = Some(Arc::clone(&bundle));
        self.car = CarState::START;
        self.clock.reset();
        self.elapsed = 0.0;
        info!(
            control_points = bundle.document.len(),
            track_length = bundle.track.length,
            "Installed track"
        );
        bundle
    }

    pub fn unload(&mut self) {
        self.bundle = None;
        self.car = CarState::START;
    }

    /// A snapshot of the current bundle; stays valid across later loads.
    pub fn bundle(&self) -> Option<Arc<TrackBundle>> {
        self.bundle.clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.bundle.is_some()
    }

    pub fn car(&self) -> CarState {
        self.car
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.integrator.config().speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.integrator.set_speed_multiplier(multiplier);
        self.config.motion.speed_multiplier = self.integrator.config().speed_multiplier;
    }

    /// Advances by the time since the previous `tick`; the first tick moves
    /// nothing.
    pub fn tick(&mut self, now_seconds: f64) -> Option<FrameOutput> {
        let dt = self.clock.tick(now_seconds);
        self.update(dt)
    }

    /// Advances the cart by `dt` seconds and poses it at its new position.
    ///
    /// Returns `None` while no track is loaded.
    pub fn update(&mut self, dt: f32) -> Option<FrameOutput> {
        let Some(bundle) = self.bundle.clone() else {
            trace!("No track loaded, skipping update");
            return None;
        };

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;
        let step = self.integrator.step(&mut self.car, &bundle, dt);
        Some(self.pose(&bundle, step.distance))
    }

    /// Frame output for the cart's current state without advancing it.
    pub fn current_frame(&self) -> Option<FrameOutput> {
        let bundle = self.bundle.as_ref()?;
        Some(self.pose(bundle, 0.0))
    }

    fn pose(&self, bundle: &TrackBundle, distance: f32) -> FrameOutput {
        let progress = self.car.progress;
        let (height, physical_speed) = self.integrator.sample(bundle, progress);
        let effective_speed = self.integrator.effective_speed(physical_speed);

        let position = bundle.track.sample(progress).unwrap_or(Float2::ZERO);
        let orientation = bundle.orientation.at(progress);
        let deformation = bundle.track.index_at(progress).map_or(Deformation::IDENTITY, |i| {
            self.config
                .deformation
                .evaluate(&bundle.track, i, effective_speed)
        });

        let cart = &self.config.cart;
        let s = cart.scale;
        let model_matrix = Matrix4::translation(position.x, position.y, 0.0)
            * Matrix4::from_rotation(orientation.to_matrix())
            * Matrix4::translation(0.0, cart.body_offset * s, 0.0)
            * Matrix4::scale(s * deformation.scale_x, s * deformation.scale_y, s);

        let wheel_angle = self.car.wheel_angle(self.integrator.config().wheel_radius);
        let spin = Matrix4::rotation_z_degrees(wheel_angle);
        let wheel_matrices = cart.wheel_offsets.map(|[dx, dy]| {
            model_matrix * Matrix4::translation(dx * s, dy * s, 0.0) * spin
        });

        FrameOutput {
            progress,
            position,
            orientation,
            model_matrix,
            wheel_matrices,
            wheel_angle,
            deformation,
            height,
            physical_speed,
            effective_speed,
            kinetic_energy: bundle.physics.kinetic_energy(height),
            distance,
            speedometer: self.config.speedometer.read(physical_speed),
            rider: RiderPose::at(self.elapsed),
        }
    }
}
