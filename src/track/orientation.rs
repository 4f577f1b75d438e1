use super::document::ControlPoint;
use super::spline::bracket;
use crate::sim::{Matrix3, Quaternion};

/// One orientation per control point, interpolated by progress.
///
/// Indices line up with the document's control points, not with curve
/// samples.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrientationTrack {
    quaternions: Vec<Quaternion>,
}

impl OrientationTrack {
    pub fn new(quaternions: Vec<Quaternion>) -> Self {
        Self { quaternions }
    }

    pub fn from_control_points(points: &[ControlPoint]) -> Self {
        Self::new(points.iter().map(ControlPoint::orientation).collect())
    }

    pub fn quaternions(&self) -> &[Quaternion] {
        &self.quaternions
    }

    pub fn len(&self) -> usize {
        self.quaternions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quaternions.is_empty()
    }

    /// SLERP between the two control-point orientations bracketing `progress`.
    ///
    /// With `C` quaternions, `u = progress * (C - 1)`; the blend runs from
    /// `floor(u)` to the next index, wrapping to 0 after the last.
    ///
    /// There is no shortest-path flip: 350 degrees to 0 sweeps back through
    /// 175, not forward through 355. Keep adjacent control-point rotations
    /// within 180 degrees of each other.
    pub fn at(&self, progress: f32) -> Quaternion {
        match self.quaternions.len() {
            0 => Quaternion::IDENTITY,
            1 => self.quaternions[0],
            n => {
                let (i, j, t) = bracket(progress, n);
                self.quaternions[i].slerp(self.quaternions[j], t)
            }
        }
    }

    pub fn matrix_at(&self, progress: f32) -> Matrix3 {
        self.at(progress).to_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Float3;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-5;

    fn banked(degrees: &[f32]) -> Vec<ControlPoint> {
        degrees
            .iter()
            .enumerate()
            .map(|(i, &z)| {
                ControlPoint::new(Float3::new(i as f32, 0.0, 0.0), Float3::new(0.0, 0.0, z))
            })
            .collect()
    }

    #[test]
    fn aligned_with_control_points() {
        let points = banked(&[0.0, 30.0, 60.0, 90.0, 0.0]);
        let track = OrientationTrack::from_control_points(&points);
        assert_eq!(track.len(), points.len());
        for (q, cp) in track.quaternions().iter().zip(&points) {
            assert_eq!(*q, cp.orientation());
        }
    }

    #[test]
    fn at_control_point_progress_returns_that_orientation() {
        let points = banked(&[0.0, 30.0, 60.0, 90.0, 0.0]);
        let track = OrientationTrack::from_control_points(&points);
        // C = 5, so progress 0.25 lands exactly on index 1
        let q = track.at(0.25);
        let expected = points[1].orientation();
        assert_relative_eq!(q.z, expected.z, epsilon = TOLERANCE);
        assert_relative_eq!(q.w, expected.w, epsilon = TOLERANCE);
    }

    #[test]
    fn between_control_points_blends() {
        let points = banked(&[0.0, 90.0, 0.0]);
        let track = OrientationTrack::from_control_points(&points);
        // u = 0.25 * 2 = 0.5, halfway from 0 to 90 degrees
        let q = track.at(0.25);
        let expected = Quaternion::from_euler_degrees(0.0, 0.0, 45.0);
        assert_relative_eq!(q.z, expected.z, epsilon = TOLERANCE);
        assert_relative_eq!(q.w, expected.w, epsilon = TOLERANCE);
        assert_relative_eq!(q.magnitude(), 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn wrapped_bank_takes_the_long_way() {
        let track = OrientationTrack::from_control_points(&banked(&[350.0, 0.0]));
        let mid = track.at(0.5);
        let expected = Quaternion::from_euler_degrees(0.0, 0.0, 175.0);
        assert_relative_eq!(mid.z, expected.z, epsilon = 1e-4);
        assert_relative_eq!(mid.w, expected.w, epsilon = 1e-4);
    }

    #[test]
    fn empty_and_single() {
        assert_eq!(OrientationTrack::default().at(0.4), Quaternion::IDENTITY);
        let single = OrientationTrack::from_control_points(&banked(&[45.0]));
        assert_eq!(single.at(0.9), single.quaternions()[0]);
    }

    #[test]
    fn output_is_unit_everywhere() {
        let points = banked(&[0.0, 170.0, -170.0, 10.0, 359.0, 180.0]);
        let track = OrientationTrack::from_control_points(&points);
        for k in 0..100 {
            let q = track.at(k as f32 / 100.0);
            assert_relative_eq!(q.magnitude(), 1.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn matrix_at_identity_for_unrotated_points() {
        let track = OrientationTrack::from_control_points(&banked(&[0.0, 0.0, 0.0, 0.0]));
        let m = track.matrix_at(0.6);
        assert_relative_eq!(m.c0.x, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(m.c1.y, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(m.c2.z, 1.0, epsilon = TOLERANCE);
    }
}
