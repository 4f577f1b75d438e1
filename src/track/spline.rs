use super::document::ControlPoint;
use crate::sim::Float3;

/// Samples per span used when a caller does not choose one.
pub const DEFAULT_SEGMENTS: usize = 20;

/// Uniform Catmull-Rom basis; rows multiply `[t^3, t^2, t, 1]`.
const CATMULL_ROM_BASIS: [[f32; 4]; 4] = [
    [-0.5, 1.5, -1.5, 0.5],
    [1.0, -2.5, 2.0, -0.5],
    [-0.5, 0.0, 0.5, 0.0],
    [0.0, 1.0, 0.0, 0.0],
];

/// Basis weights for the four window points at parameter `t`.
pub fn basis_weights(t: f32) -> [f32; 4] {
    let powers = [t * t * t, t * t, t, 1.0];
    let mut weights = [0.0f32; 4];
    for (col, weight) in weights.iter_mut().enumerate() {
        for (row, power) in powers.iter().enumerate() {
            *weight += power * CATMULL_ROM_BASIS[row][col];
        }
    }
    weights
}

/// Evaluates one 4-point window. The curve runs from `window[1]` at t = 0
/// to `window[2]` at t = 1.
pub fn evaluate_span(window: [Float3; 4], t: f32) -> Float3 {
    let weights = basis_weights(t);
    let mut out = Float3::ZERO;
    for (p, w) in window.iter().zip(weights) {
        out.x += w * p.x;
        out.y += w * p.y;
        out.z += w * p.z;
    }
    out
}

/// Samples the Catmull-Rom curve through `points`.
///
/// Every 4-point window contributes `segments + 1` samples with both
/// endpoints included, so neighbouring spans share a sample at their common
/// control point. Fewer than 4 points yields an empty curve.
///
/// # Arguments
/// * `points` - Control points in traversal order
/// * `segments` - Subdivisions per span; 0 is treated as 1
pub fn catmull_rom_curve(points: &[ControlPoint], segments: usize) -> Vec<Float3> {
    if points.len() < 4 {
        return Vec::new();
    }

    let segments = segments.max(1);
    let mut curve = Vec::with_capacity((points.len() - 3) * (segments + 1));

    for window in points.windows(4) {
        let window = [
            window[0].position,
            window[1].position,
            window[2].position,
            window[3].position,
        ];
        for j in 0..=segments {
            let t = j as f32 / segments as f32;
            curve.push(evaluate_span(window, t));
        }
    }

    curve
}

/// Maps progress in `[0, 1)` to a bracketing sample pair `(i, j, t)` over a
/// sequence of `count` items, with `j` wrapping to 0 after the last item.
///
/// `count` must be non-zero.
pub fn bracket(progress: f32, count: usize) -> (usize, usize, f32) {
    debug_assert!(count > 0, "bracket called with zero count");
    let last = count.saturating_sub(1);
    let u = progress.clamp(0.0, 1.0) * last as f32;
    let i = (u.floor() as usize).min(last);
    let j = (i + 1) % count;
    let t = (u - i as f32).clamp(0.0, 1.0);
    (i, j, t)
}

/// Height along the curve at `progress`, linearly blended between samples.
pub fn height_at(curve: &[Float3], progress: f32) -> Option<f32> {
    if curve.is_empty() {
        return None;
    }
    let (i, j, t) = bracket(progress, curve.len());
    let z0 = curve[i].z;
    let z1 = curve[j].z;
    Some(z0 + (z1 - z0) * t)
}
