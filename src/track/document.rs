use crate::sim::{Float3, Quaternion};

/// One authored spline vertex: a position plus an Euler rotation in degrees.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ControlPoint {
    pub position: Float3,
    pub rotation: Float3,
}

impl ControlPoint {
    pub const fn new(position: Float3, rotation: Float3) -> Self {
        Self { position, rotation }
    }

    pub fn orientation(&self) -> Quaternion {
        Quaternion::from_euler_degrees(self.rotation.x, self.rotation.y, self.rotation.z)
    }
}

/// Parsed contents of a spline file.
///
/// `declared_spline_count` and `sample_time` are carried through from the
/// header but nothing downstream reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineDocument {
    pub control_points: Vec<ControlPoint>,
    pub declared_spline_count: i32,
    pub sample_time: f32,
}

impl SplineDocument {
    pub fn new(control_points: Vec<ControlPoint>) -> Self {
        Self {
            control_points,
            declared_spline_count: 1,
            sample_time: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    /// Height of the first authored point, where the ride starts its descent.
    pub fn first_height(&self) -> Option<f32> {
        self.control_points.first().map(|cp| cp.position.z)
    }
}

impl Default for SplineDocument {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn orientation_uses_degrees() {
        let cp = ControlPoint::new(Float3::ZERO, Float3::new(0.0, 0.0, 180.0));
        let q = cp.orientation();
        assert_relative_eq!(q.z, 1.0, epsilon = 1e-6);
        assert_relative_eq!(q.w, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn first_height_of_empty_document() {
        assert!(SplineDocument::default().first_height().is_none());
        assert!(SplineDocument::default().is_empty());
    }

    #[test]
    fn first_height_reads_z() {
        let doc = SplineDocument::new(vec![
            ControlPoint::new(Float3::new(1.0, 2.0, 7.5), Float3::ZERO),
            ControlPoint::new(Float3::new(3.0, 4.0, 1.0), Float3::ZERO),
        ]);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.first_height(), Some(7.5));
    }
}
