use crate::sim::Curvature;
use crate::track::Track;
use serde::{Deserialize, Serialize};

pub type Rgb = [f32; 3];

/// Squash/stretch strategy for the cart body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum DeformationModel {
    None,
    /// Stretch along the cart's height as the track turns.
    Curvature { intensity: f32 },
    /// Stretch horizontally and flatten as the cart speeds up.
    Speed {
        low_ref: f32,
        range: f32,
        stretch_x: f32,
        squash_y: f32,
        slow_color: Rgb,
        fast_color: Rgb,
    },
}

impl DeformationModel {
    pub const fn speed_default() -> Self {
        Self::Speed {
            low_ref: 20.0,
            range: 80.0,
            stretch_x: 0.3,
            squash_y: 0.2,
            slow_color: [0.0, 0.0, 1.0],
            fast_color: [1.0, 0.0, 0.0],
        }
    }

    /// Deformation for a cart at track sample `index` moving at `speed`.
    pub fn evaluate(&self, track: &Track, index: usize, speed: f32) -> Deformation {
        match *self {
            Self::None => Deformation::IDENTITY,
            Self::Curvature { intensity } => {
                let curvature = track
                    .neighbours(index)
                    .and_then(|(prev, curr, next)| Curvature::at_vertex(prev, curr, next));
                Deformation::from_curvature(curvature, intensity)
            }
            Self::Speed {
                low_ref,
                range,
                stretch_x,
                squash_y,
                slow_color,
                fast_color,
            } => Deformation::from_speed(
                speed_factor(speed, low_ref, range),
                stretch_x,
                squash_y,
                slow_color,
                fast_color,
            ),
        }
    }
}

impl Default for DeformationModel {
    fn default() -> Self {
        Self::Curvature { intensity: 1.5 }
    }
}

/// Scale factors (and optional tint) applied to the cart model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deformation {
    pub scale_x: f32,
    pub scale_y: f32,
    pub color: Option<Rgb>,
}

impl Deformation {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        color: None,
    };

    /// `stretch = 1 + curvature * intensity` on y, its reciprocal on x.
    /// Missing curvature (a zero-length tangent) leaves the cart undeformed.
    pub fn from_curvature(curvature: Option<Curvature>, intensity: f32) -> Self {
        let Some(curvature) = curvature else {
            return Self::IDENTITY;
        };
        let stretch = 1.0 + curvature.normalized * intensity;
        if stretch <= 0.0 || !stretch.is_finite() {
            return Self::IDENTITY;
        }
        Self {
            scale_x: 1.0 / stretch,
            scale_y: stretch,
            color: None,
        }
    }

    pub fn from_speed(factor: f32, kx: f32, ky: f32, slow: Rgb, fast: Rgb) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            scale_x: 1.0 + f * kx,
            scale_y: 1.0 - f * ky,
            color: Some(lerp_rgb(slow, fast, f)),
        }
    }
}

impl Default for Deformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// `(speed - low_ref) / range`, clamped to `[0, 1]`.
pub fn speed_factor(speed: f32, low_ref: f32, range: f32) -> f32 {
    if range <= 0.0 {
        return if speed > low_ref { 1.0 } else { 0.0 };
    }
    ((speed - low_ref) / range).clamp(0.0, 1.0)
}

fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Float2, Float3};
    use crate::track::DisplayRegion;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-5;

    fn l_track() -> Track {
        let curve = vec![
            Float3::new(0.0, 0.0, 0.0),
            Float3::new(10.0, 0.0, 0.0),
            Float3::new(10.0, 10.0, 0.0),
            Float3::new(10.0, 10.0, 0.0),
        ];
        Track::fit(&curve, &DisplayRegion::new(100.0, 100.0, 0.0)).unwrap()
    }

    #[test]
    fn curvature_stretch_and_squash_are_reciprocal() {
        let d = DeformationModel::Curvature { intensity: 2.0 }.evaluate(&l_track(), 1, 0.0);
        // right angle: curvature 0.5, stretch 2
        assert_relative_eq!(d.scale_y, 2.0, epsilon = TOLERANCE);
        assert_relative_eq!(d.scale_x, 0.5, epsilon = TOLERANCE);
        assert_relative_eq!(d.scale_x * d.scale_y, 1.0, epsilon = TOLERANCE);
        assert!(d.color.is_none());
    }

    #[test]
    fn coincident_samples_skip_deformation() {
        // samples 2 and 3 coincide
        let d = DeformationModel::Curvature { intensity: 2.0 }.evaluate(&l_track(), 2, 0.0);
        assert_eq!(d, Deformation::IDENTITY);
    }

    #[test]
    fn out_of_range_index_is_identity() {
        let d = DeformationModel::default().evaluate(&l_track(), 99, 0.0);
        assert_eq!(d, Deformation::IDENTITY);
    }

    #[test]
    fn straight_segment_is_undeformed() {
        let c = Curvature::at_vertex(Float2::ZERO, Float2::new(1.0, 0.0), Float2::new(2.0, 0.0));
        let d = Deformation::from_curvature(c, 3.0);
        assert_relative_eq!(d.scale_x, 1.0, epsilon = 1e-3);
        assert_relative_eq!(d.scale_y, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn speed_factor_clamps() {
        assert_eq!(speed_factor(0.0, 20.0, 80.0), 0.0);
        assert_relative_eq!(speed_factor(60.0, 20.0, 80.0), 0.5, epsilon = TOLERANCE);
        assert_eq!(speed_factor(500.0, 20.0, 80.0), 1.0);
        assert_eq!(speed_factor(21.0, 20.0, 0.0), 1.0);
    }

    #[test]
    fn speed_model_stretches_and_tints() {
        let model = DeformationModel::speed_default();
        let slow = model.evaluate(&l_track(), 1, 0.0);
        let fast = model.evaluate(&l_track(), 1, 1000.0);
        let half = model.evaluate(&l_track(), 1, 60.0);

        assert_eq!(slow.scale_x, 1.0);
        assert_eq!(slow.color, Some([0.0, 0.0, 1.0]));
        assert_relative_eq!(fast.scale_x, 1.3, epsilon = TOLERANCE);
        assert_relative_eq!(fast.scale_y, 0.8, epsilon = TOLERANCE);
        assert_eq!(fast.color, Some([1.0, 0.0, 0.0]));

        let color = half.color.unwrap();
        assert_relative_eq!(color[0], 0.5, epsilon = TOLERANCE);
        assert_relative_eq!(color[2], 0.5, epsilon = TOLERANCE);
    }

    #[test]
    fn none_model_is_identity() {
        assert_eq!(
            DeformationModel::None.evaluate(&l_track(), 1, 500.0),
            Deformation::IDENTITY
        );
    }
}
