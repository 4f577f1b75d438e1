use super::math::Float2;
use super::physics;

/// Turning of a polyline at one vertex, from the angle between the incoming
/// and outgoing tangents.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Curvature {
    /// Angle between tangents in radians, in `[0, PI]`.
    pub turn_angle: f32,
    /// `turn_angle / PI`, in `[0, 1]`.
    pub normalized: f32,
}

impl Curvature {
    pub const fn new(turn_angle: f32, normalized: f32) -> Self {
        Self {
            turn_angle,
            normalized,
        }
    }

    /// Curvature at `curr` given its neighbours.
    ///
    /// Returns `None` when either neighbour coincides with `curr`, since a
    /// zero-length tangent has no direction.
    pub fn at_vertex(prev: Float2, curr: Float2, next: Float2) -> Option<Self> {
        let v1 = curr - prev;
        let v2 = next - curr;
        if v1.magnitude() < physics::EPSILON || v2.magnitude() < physics::EPSILON {
            return None;
        }

        let cos_angle = v1.normalize().dot(v2.normalize()).clamp(-1.0, 1.0);
        let turn_angle = cos_angle.acos();
        Some(Self::new(turn_angle, turn_angle / std::f32::consts::PI))
    }

    pub const ZERO: Self = Self::new(0.0, 0.0);
}

impl Default for Curvature {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn straight_line_has_zero_curvature() {
        let c = Curvature::at_vertex(
            Float2::new(0.0, 0.0),
            Float2::new(1.0, 0.0),
            Float2::new(2.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(c.turn_angle, 0.0, epsilon = 1e-3);
        assert_relative_eq!(c.normalized, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn right_angle_is_half() {
        let c = Curvature::at_vertex(
            Float2::new(0.0, 0.0),
            Float2::new(1.0, 0.0),
            Float2::new(1.0, 1.0),
        )
        .unwrap();
        assert_relative_eq!(c.turn_angle, FRAC_PI_2, epsilon = TOLERANCE);
        assert_relative_eq!(c.normalized, 0.5, epsilon = TOLERANCE);
    }

    #[test]
    fn reversal_is_one() {
        let c = Curvature::at_vertex(
            Float2::new(0.0, 0.0),
            Float2::new(1.0, 0.0),
            Float2::new(0.0, 0.0),
        )
        .unwrap();
        assert_relative_eq!(c.turn_angle, PI, epsilon = 1e-3);
        assert!(c.normalized <= 1.0);
    }

    #[test]
    fn coincident_neighbour_is_none() {
        let p = Float2::new(3.0, 4.0);
        assert!(Curvature::at_vertex(p, p, Float2::new(5.0, 4.0)).is_none());
        assert!(Curvature::at_vertex(Float2::new(1.0, 4.0), p, p).is_none());
    }
}
