//! Track construction from a spline document.
//!
//! This module provides the load-time pipeline: Catmull-Rom sampling, 2D
//! fitting with arc length, and per-control-point orientations, gathered
//! into a [`TrackBundle`].

mod bundle;
mod document;
mod geometry;
mod orientation;
mod spline;

pub use bundle::{BundleParams, TrackBundle};
pub use document::{ControlPoint, SplineDocument};
pub use geometry::{arc_length, Bounds2, DisplayRegion, Track};
pub use orientation::OrientationTrack;
pub use spline::{
    basis_weights, bracket, catmull_rom_curve, evaluate_span, height_at, DEFAULT_SEGMENTS,
};
