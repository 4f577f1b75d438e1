use super::document::SplineDocument;
use super::geometry::{DisplayRegion, Track};
use super::orientation::OrientationTrack;
use super::spline::catmull_rom_curve;
use crate::error::{CoasterError, Result};
use crate::sim::{Float3, PhysicsConstants};
use tracing::info;

/// Parameters for turning a document into a bundle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BundleParams {
    pub segments: usize,
    pub region: DisplayRegion,
    pub mass: f32,
    pub gravity: f32,
    /// Starting height for the energy budget; the first control point's
    /// height when `None`.
    pub initial_height: Option<f32>,
}

/// Everything derived from one spline load.
///
/// Built completely before it is handed out, then only read. A session swaps
/// whole bundles, so curve, track and orientations always agree.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackBundle {
    pub document: SplineDocument,
    pub curve: Vec<Float3>,
    pub track: Track,
    pub orientation: OrientationTrack,
    pub physics: PhysicsConstants,
}

impl TrackBundle {
    /// Derives curve, fitted track, orientations and physics from `document`.
    ///
    /// # Errors
    /// `DegenerateGeometry` if the document has fewer than 4 control points
    /// or the curve cannot be fitted.
    pub fn build(document: SplineDocument, params: &BundleParams) -> Result<Self> {
        if document.len() < 4 {
            return Err(CoasterError::degenerate(format!(
                "need at least 4 control points for a curve, found {}",
                document.len()
            )));
        }

        let curve = catmull_rom_curve(&document.control_points, params.segments);
        let track = Track::fit(&curve, &params.region)?;
        let orientation = OrientationTrack::from_control_points(&document.control_points);

        let initial_height = params
            .initial_height
            .or_else(|| document.first_height())
            .unwrap_or(0.0);
        let physics = PhysicsConstants::new(params.mass, params.gravity, initial_height);

        info!(
            control_points = document.len(),
            samples = curve.len(),
            track_length = track.length,
            total_energy = physics.total_energy,
            "Built track bundle"
        );

        Ok(Self {
            document,
            curve,
            track,
            orientation,
            physics,
        })
    }

    /// Whether the per-frame step can move the cart on this bundle.
    pub fn is_traversable(&self) -> bool {
        self.curve.len() >= 2 && self.track.is_traversable()
    }
}
