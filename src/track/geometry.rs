use super::spline::bracket;
use crate::error::{CoasterError, Result};
use crate::sim::{Float2, Float3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Extents at or below this fraction of the coordinate magnitude count as
/// zero. Spline evaluation leaves a few ulps of noise on constant axes.
const RELATIVE_EXTENT_EPSILON: f32 = 1e-5;

/// Screen area the track is fitted into, in renderer units (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayRegion {
    pub width: f32,
    pub height: f32,
    /// Empty border kept on every side.
    pub margin: f32,
}

impl DisplayRegion {
    pub const fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Width and height left after removing the margin on both sides.
    pub fn available(&self) -> (f32, f32) {
        (
            self.width - 2.0 * self.margin,
            self.height - 2.0 * self.margin,
        )
    }
}

impl Default for DisplayRegion {
    fn default() -> Self {
        Self::new(512.0, 512.0, 40.0)
    }
}

/// Axis-aligned bounds of the curve's (x, y) projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    pub min: Float2,
    pub max: Float2,
}

impl Bounds2 {
    pub fn of(points: impl IntoIterator<Item = Float2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |b, p| Self {
            min: Float2::new(b.min.x.min(p.x), b.min.y.min(p.y)),
            max: Float2::new(b.max.x.max(p.x), b.max.y.max(p.y)),
        }))
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// The curve projected to 2D and fitted into a display region.
///
/// The scale and offset are chosen once from the whole curve, so every
/// point shares the same transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub points: Vec<Float2>,
    pub scale: f32,
    pub offset: Float2,
    /// Polyline arc length of `points`.
    pub length: f32,
}

impl Track {
    /// Fits `curve` into `region`, centred, with uniform scale.
    ///
    /// # Errors
    /// `DegenerateGeometry` if the curve is empty, its bounding box has zero
    /// width or height, or the region has no room inside its margin.
    pub fn fit(curve: &[Float3], region: &DisplayRegion) -> Result<Self> {
        let bounds = Bounds2::of(curve.iter().map(|p| p.xy()))
            .ok_or_else(|| CoasterError::degenerate("curve has no samples"))?;

        let (bw, bh) = (bounds.width(), bounds.height());
        if is_flat(bw, bounds.min.x, bounds.max.x) {
            return Err(CoasterError::degenerate(format!(
                "curve bounding box has zero width ({bw})"
            )));
        }
        if is_flat(bh, bounds.min.y, bounds.max.y) {
            return Err(CoasterError::degenerate(format!(
                "curve bounding box has zero height ({bh})"
            )));
        }

        let (aw, ah) = region.available();
        if aw <= 0.0 || ah <= 0.0 {
            return Err(CoasterError::degenerate(format!(
                "display region {}x{} has no room inside margin {}",
                region.width, region.height, region.margin
            )));
        }

        let scale = (aw / bw).min(ah / bh);
        let offset = Float2::new(
            (region.width - scale * bw) / 2.0 - scale * bounds.min.x,
            (region.height - scale * bh) / 2.0 - scale * bounds.min.y,
        );

        let points: Vec<Float2> = curve.iter().map(|p| p.xy() * scale + offset).collect();
        let length = arc_length(&points);

        debug!(
            samples = points.len(),
            scale, length, "Fitted track to display region"
        );

        Ok(Self {
            points,
            scale,
            offset,
            length,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the cart can move along this track at all.
    pub fn is_traversable(&self) -> bool {
        self.points.len() >= 2 && self.length > 0.0
    }

    /// Index of the sample at or before `progress`.
    pub fn index_at(&self, progress: f32) -> Option<usize> {
        if self.points.is_empty() {
            return None;
        }
        Some(bracket(progress, self.points.len()).0)
    }

    /// Position at `progress`, blended between the bracketing samples.
    pub fn sample(&self, progress: f32) -> Option<Float2> {
        if self.points.is_empty() {
            return None;
        }
        let (i, j, t) = bracket(progress, self.points.len());
        Some(self.points[i].lerp(self.points[j], t))
    }

    /// `(previous, current, next)` around `index`, wrapping at both ends.
    pub fn neighbours(&self, index: usize) -> Option<(Float2, Float2, Float2)> {
        let n = self.points.len();
        if index >= n {
            return None;
        }
        let prev = self.points[(index + n - 1) % n];
        let next = self.points[(index + 1) % n];
        Some((prev, self.points[index], next))
    }
}

fn is_flat(extent: f32, min: f32, max: f32) -> bool {
    let magnitude = min.abs().max(max.abs()).max(1.0);
    !extent.is_finite() || extent <= RELATIVE_EXTENT_EPSILON * magnitude
}

/// Sum of distances between consecutive points; 0 for fewer than two.
pub fn arc_length(points: &[Float2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
