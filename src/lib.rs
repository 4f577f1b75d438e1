//! kexcoaster - a single-cart roller coaster driven by a Catmull-Rom spline.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **sim**: Math and physics primitives (Float2, Float3, Quaternion, Matrix4, energy)
//! - **track**: Spline document, curve sampling, 2D fitting, orientations, bundles
//! - **persistence**: Plain-text spline format
//! - **motion**: Cart state, speed strategies, deformation, rider pose
//! - **config**: Serde configuration for a session
//! - **session**: Load/swap of track bundles and the per-frame update
//! - **ffi**: C FFI bindings
//!
//! # Usage
//!
//! ```ignore
//! use kexcoaster::{Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default())?;
//! session.load_text(&std::fs::read_to_string("track.txt")?)?;
//! if let Some(frame) = session.update(1.0 / 60.0) {
//!     draw(&frame.model_matrix, &frame.rider);
//! }
//! ```
//!
//! For C hosts, build with the `ffi` feature, link the cdylib and use the
//! `kexc_*` functions.

pub mod config;
pub mod error;
pub mod motion;
pub mod persistence;
pub mod session;
pub mod sim;
pub mod track;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types at crate root
pub use config::SessionConfig;
pub use error::{CoasterError, Result};
pub use motion::{CarState, DeformationModel, MotionConfig, SpeedModel, WheelSpin};
pub use session::{FrameOutput, Session};
pub use sim::{Float2, Float3, Matrix4, Quaternion};
pub use track::{ControlPoint, SplineDocument, TrackBundle};
