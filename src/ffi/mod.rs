//! C FFI over [`Session`] for a host renderer.
//!
//! Functions:
//! - `kexc_session_new` / `kexc_session_free` - create from JSON config, destroy
//! - `kexc_session_load` - parse spline text and swap in the new track
//! - `kexc_session_update` - advance one frame and fill a `KexcFrame`
//! - `kexc_session_set_speed_multiplier` - user rate control
//! - `kexc_track_points` - copy the fitted 2D track polyline
//!
//! # Error Codes
//! - `0`: Success
//! - `-1`: Null pointer
//! - `-3`: Buffer overflow (resize and retry)
//! - `-5`: Invalid format (malformed spline text or non UTF-8 input)
//! - `-7`: Degenerate geometry
//! - `-8`: No track loaded

use crate::config::SessionConfig;
use crate::error::CoasterError;
use crate::motion::BoneId;
use crate::session::{FrameOutput, Session};
use crate::sim::{Float2, Quaternion};

pub const KEXC_OK: i32 = 0;
pub const KEXC_NULL_POINTER: i32 = -1;
pub const KEXC_BUFFER_OVERFLOW: i32 = -3;
pub const KEXC_INVALID_FORMAT: i32 = -5;
pub const KEXC_DEGENERATE_GEOMETRY: i32 = -7;
pub const KEXC_NOT_LOADED: i32 = -8;

/// Opaque handle to a session.
pub type KexcSessionHandle = *mut std::ffi::c_void;

/// One frame of renderer data. Matrices are column-major.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct KexcFrame {
    pub progress: f32,
    pub position: Float2,
    pub orientation: Quaternion,
    pub model_matrix: [f32; 16],
    pub wheel_matrices: [[f32; 16]; 2],
    pub wheel_angle: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Meaningful only when `has_color` is 1.
    pub color: [f32; 3],
    pub has_color: i32,
    pub height: f32,
    pub physical_speed: f32,
    pub effective_speed: f32,
    pub kinetic_energy: f32,
    pub needle_degrees: f32,
    /// Joint positions in `BoneId::ALL` order, cart-local.
    pub rider_joints: [Float2; 7],
}

impl From<&FrameOutput> for KexcFrame {
    fn from(frame: &FrameOutput) -> Self {
        Self {
            progress: frame.progress,
            position: frame.position,
            orientation: frame.orientation,
            model_matrix: frame.model_matrix.to_cols_array(),
            wheel_matrices: frame.wheel_matrices.map(|m| m.to_cols_array()),
            wheel_angle: frame.wheel_angle,
            scale_x: frame.deformation.scale_x,
            scale_y: frame.deformation.scale_y,
            color: frame.deformation.color.unwrap_or([0.0; 3]),
            has_color: i32::from(frame.deformation.color.is_some()),
            height: frame.height,
            physical_speed: frame.physical_speed,
            effective_speed: frame.effective_speed,
            kinetic_energy: frame.kinetic_energy,
            needle_degrees: frame.speedometer.needle_degrees,
            rider_joints: BoneId::ALL.map(|bone| frame.rider.joint(bone)),
        }
    }
}

fn error_code(err: &CoasterError) -> i32 {
    match err {
        CoasterError::MalformedInput { .. } => KEXC_INVALID_FORMAT,
        CoasterError::DegenerateGeometry(_) => KEXC_DEGENERATE_GEOMETRY,
        CoasterError::InvalidConfig(_) | CoasterError::ConfigParse(_) => KEXC_INVALID_FORMAT,
    }
}

unsafe fn utf8<'a>(data: *const u8, len: usize) -> Option<&'a str> {
    if len == 0 {
        return Some("");
    }
    std::str::from_utf8(std::slice::from_raw_parts(data, len)).ok()
}

/// Create a session from a JSON configuration.
///
/// A null or empty `config_json` uses the default configuration.
///
/// # Returns
/// - Valid handle on success (non-null)
/// - Null if the configuration is invalid
///
/// # Safety
/// - `config_json` must be null or point to at least `config_len` bytes
#[no_mangle]
pub unsafe extern "C" fn kexc_session_new(
    config_json: *const u8,
    config_len: usize,
) -> KexcSessionHandle {
    let config = if config_json.is_null() || config_len == 0 {
        SessionConfig::default()
    } else {
        let Some(json) = utf8(config_json, config_len) else {
            return std::ptr::null_mut();
        };
        match SessionConfig::from_json_str(json) {
            Ok(config) => config,
            Err(_) => return std::ptr::null_mut(),
        }
    };

    match Session::new(config) {
        Ok(session) => Box::into_raw(Box::new(session)) as KexcSessionHandle,
        Err(_) => std::ptr::null_mut(),
    }
}

/// Free a session handle.
///
/// # Safety
/// - `handle` must be a valid handle returned by `kexc_session_new`, or null
#[no_mangle]
pub unsafe extern "C" fn kexc_session_free(handle: KexcSessionHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut Session));
    }
}

/// Load spline text. On error the previous track stays loaded.
///
/// # Safety
/// - `handle` must be a valid handle from `kexc_session_new`
/// - `text` must point to at least `text_len` bytes
#[no_mangle]
pub unsafe extern "C" fn kexc_session_load(
    handle: KexcSessionHandle,
    text: *const u8,
    text_len: usize,
) -> i32 {
    if handle.is_null() || text.is_null() {
        return KEXC_NULL_POINTER;
    }
    let session = &mut *(handle as *mut Session);
    let Some(text) = utf8(text, text_len) else {
        return KEXC_INVALID_FORMAT;
    };

    match session.load_text(text) {
        Ok(_) => KEXC_OK,
        Err(err) => error_code(&err),
    }
}

/// Advance by `dt` seconds and write the resulting frame.
///
/// # Safety
/// - `handle` must be a valid handle from `kexc_session_new`
/// - `frame` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn kexc_session_update(
    handle: KexcSessionHandle,
    dt: f32,
    frame: *mut KexcFrame,
) -> i32 {
    if handle.is_null() || frame.is_null() {
        return KEXC_NULL_POINTER;
    }
    let session = &mut *(handle as *mut Session);
    match session.update(dt) {
        Some(output) => {
            *frame = KexcFrame::from(&output);
            KEXC_OK
        }
        None => KEXC_NOT_LOADED,
    }
}

/// # Safety
/// - `handle` must be a valid handle from `kexc_session_new`
#[no_mangle]
pub unsafe extern "C" fn kexc_session_set_speed_multiplier(
    handle: KexcSessionHandle,
    multiplier: f32,
) -> i32 {
    if handle.is_null() {
        return KEXC_NULL_POINTER;
    }
    let session = &mut *(handle as *mut Session);
    session.set_speed_multiplier(multiplier);
    KEXC_OK
}

/// Copy the fitted track into `points`.
///
/// `count` always receives the number of points; `-3` means `capacity` was
/// too small and nothing was copied.
///
/// # Safety
/// - `handle` must be a valid handle from `kexc_session_new`
/// - `points` must be valid for `capacity` writes, or null when `capacity` is 0
/// - `count` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn kexc_track_points(
    handle: KexcSessionHandle,
    points: *mut Float2,
    capacity: usize,
    count: *mut usize,
) -> i32 {
    if handle.is_null() || count.is_null() {
        return KEXC_NULL_POINTER;
    }
    let session = &*(handle as *const Session);
    let Some(bundle) = session.bundle() else {
        *count = 0;
        return KEXC_NOT_LOADED;
    };

    let track = &bundle.track.points;
    *count = track.len();
    if track.len() > capacity {
        return KEXC_BUFFER_OVERFLOW;
    }
    if points.is_null() {
        return if track.is_empty() {
            KEXC_OK
        } else {
            KEXC_NULL_POINTER
        };
    }
    std::ptr::copy_nonoverlapping(track.as_ptr(), points, track.len());
    KEXC_OK
}
