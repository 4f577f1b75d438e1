//! Per-frame cart motion and the data that poses it.

mod car;
mod clock;
mod deformation;
mod gauge;
mod integrator;
mod rider;

pub use car::CarState;
pub use clock::FrameClock;
pub use deformation::{speed_factor, Deformation, DeformationModel, Rgb};
pub use gauge::{SpeedometerConfig, SpeedometerReading};
pub use integrator::{MotionConfig, MotionIntegrator, MotionStep, SpeedModel, WheelSpin};
pub use rider::{BoneId, BoneSegment, RiderPose, HEAD_RADIUS, ROOT_POSITION};
