use std::ops::{Add, Mul, Sub};

/// Below this sine of the SLERP angle the arc is treated as degenerate.
const SLERP_SIN_EPSILON: f32 = 1e-3;

/// 2D vector with f32 components.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Float2 {
    pub x: f32,
    pub y: f32,
}

impl Float2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub fn magnitude(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag < f32::EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / mag)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).magnitude()
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl Add for Float2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Float2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Float2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl Default for Float2 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// 3D vector with f32 components.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Float3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Float3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag < f32::EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / mag)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Drops the height channel.
    pub fn xy(self) -> Float2 {
        Float2::new(self.x, self.y)
    }
}

impl Add for Float3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Float3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Float3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Default for Float3 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Unit quaternion for 3D rotations.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Builds a rotation from Euler angles in degrees, composed in XYZ order.
    pub fn from_euler_degrees(x: f32, y: f32, z: f32) -> Self {
        let (s1, c1) = (x.to_radians() * 0.5).sin_cos();
        let (s2, c2) = (y.to_radians() * 0.5).sin_cos();
        let (s3, c3) = (z.to_radians() * 0.5).sin_cos();

        Self::new(
            s1 * c2 * c3 + c1 * s2 * s3,
            c1 * s2 * c3 - s1 * c2 * s3,
            c1 * c2 * s3 + s1 * s2 * c3,
            c1 * c2 * c3 - s1 * s2 * s3,
        )
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn magnitude(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns the unit quaternion, or identity if the magnitude vanishes.
    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag < f32::EPSILON {
            return Self::IDENTITY;
        }
        let inv = 1.0 / mag;
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Spherical linear interpolation from `self` (t = 0) to `other` (t = 1).
    ///
    /// The dot product is clamped before `acos`. When the arc is too short
    /// (or antipodal) for the sine weights to be stable, falls back to a
    /// normalized linear blend.
    pub fn slerp(self, other: Self, t: f32) -> Self {
        let dot = self.dot(other).clamp(-1.0, 1.0);
        let theta = dot.acos();
        let sin_theta = theta.sin();

        if sin_theta.abs() < SLERP_SIN_EPSILON {
            return self.nlerp(other, t);
        }

        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;

        Self::new(
            a * self.x + b * other.x,
            a * self.y + b * other.y,
            a * self.z + b * other.z,
            a * self.w + b * other.w,
        )
    }

    /// Component-wise blend, renormalized.
    /// Antipodal inputs cancel near t = 0.5; the nearer endpoint is returned then.
    pub fn nlerp(self, other: Self, t: f32) -> Self {
        let blended = Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
            self.w + (other.w - self.w) * t,
        );
        if blended.magnitude() < SLERP_SIN_EPSILON {
            return if t < 0.5 { self } else { other };
        }
        blended.normalize()
    }

    /// Rotation matrix for a unit quaternion.
    pub fn to_matrix(self) -> Matrix3 {
        let Self { x, y, z, w } = self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Matrix3::from_columns(
            Float3::new(1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy)),
            Float3::new(2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx)),
            Float3::new(2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy)),
        )
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 3x3 matrix stored as three column vectors.
/// Used for rotation transformations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub c0: Float3,
    pub c1: Float3,
    pub c2: Float3,
}

impl Matrix3 {
    pub fn from_columns(c0: Float3, c1: Float3, c2: Float3) -> Self {
        Self { c0, c1, c2 }
    }
}

/// Column-major 4x4 affine matrix handed to the renderer.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    pub cols: [[f32; 4]; 4],
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = [x, y, z, 1.0];
        m
    }

    pub fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[0][0] = x;
        m.cols[1][1] = y;
        m.cols[2][2] = z;
        m
    }

    /// Rotation about +Z by `degrees`, counter-clockwise.
    pub fn rotation_z_degrees(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        let mut m = Self::IDENTITY;
        m.cols[0] = [c, s, 0.0, 0.0];
        m.cols[1] = [-s, c, 0.0, 0.0];
        m
    }

    pub fn from_rotation(r: Matrix3) -> Self {
        Self {
            cols: [
                [r.c0.x, r.c0.y, r.c0.z, 0.0],
                [r.c1.x, r.c1.y, r.c1.z, 0.0],
                [r.c2.x, r.c2.y, r.c2.z, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub fn transform_point(&self, p: Float3) -> Float3 {
        let c = &self.cols;
        Float3::new(
            c[0][0] * p.x + c[1][0] * p.y + c[2][0] * p.z + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[2][1] * p.z + c[3][1],
            c[0][2] * p.x + c[1][2] * p.y + c[2][2] * p.z + c[3][2],
        )
    }

    /// Flat column-major array, the layout `uniformMatrix4fv` expects.
    pub fn to_cols_array(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (i, col) in self.cols.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(col);
        }
        out
    }
}

impl Mul for Matrix4 {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        let mut out = [[0.0f32; 4]; 4];
        for (col, out_col) in out.iter_mut().enumerate() {
            for (row, cell) in out_col.iter_mut().enumerate() {
                *cell = (0..4)
                    .map(|k| self.cols[k][row] * other.cols[col][k])
                    .sum();
            }
        }
        Self { cols: out }
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-5;

    fn assert_quat_eq(a: Quaternion, b: Quaternion) {
        assert_relative_eq!(a.x, b.x, epsilon = TOLERANCE);
        assert_relative_eq!(a.y, b.y, epsilon = TOLERANCE);
        assert_relative_eq!(a.z, b.z, epsilon = TOLERANCE);
        assert_relative_eq!(a.w, b.w, epsilon = TOLERANCE);
    }

    #[test]
    fn test_float2_normalize() {
        let v = Float2::new(3.0, 4.0);
        let normalized = v.normalize();
        assert_relative_eq!(normalized.x, 0.6, epsilon = 1e-6);
        assert_relative_eq!(normalized.y, 0.8, epsilon = 1e-6);
        assert_eq!(Float2::ZERO.normalize(), Float2::ZERO);
    }

    #[test]
    fn euler_zero_is_identity() {
        assert_quat_eq(Quaternion::from_euler_degrees(0.0, 0.0, 0.0), Quaternion::IDENTITY);
    }

    #[test]
    fn euler_single_axis_is_half_angle() {
        // 90 degrees about z: (0, 0, sin 45, cos 45)
        let h = std::f32::consts::FRAC_1_SQRT_2;
        let q = Quaternion::from_euler_degrees(0.0, 0.0, 90.0);
        assert_quat_eq(q, Quaternion::new(0.0, 0.0, h, h));
    }

    #[test]
    fn euler_produces_unit_quaternion() {
        for (x, y, z) in [(10.0, 20.0, 30.0), (-45.0, 170.0, 5.0), (359.0, -721.0, 90.0)] {
            let q = Quaternion::from_euler_degrees(x, y, z);
            assert_relative_eq!(q.magnitude(), 1.0, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn slerp_endpoints() {
        let a = Quaternion::from_euler_degrees(0.0, 0.0, 10.0);
        let b = Quaternion::from_euler_degrees(30.0, 0.0, 80.0);
        assert_quat_eq(a.slerp(b, 0.0), a);
        assert_quat_eq(a.slerp(b, 1.0), b);
    }

    #[test]
    fn slerp_identical_is_stable() {
        let q = Quaternion::from_euler_degrees(12.0, -40.0, 77.0);
        for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
            let r = q.slerp(q, t);
            assert!(r.x.is_finite() && r.w.is_finite());
            assert_quat_eq(r, q);
        }
    }

    #[test]
    fn slerp_antipodal_does_not_produce_nan() {
        let q = Quaternion::from_euler_degrees(0.0, 0.0, 45.0);
        let neg = Quaternion::new(-q.x, -q.y, -q.z, -q.w);
        for t in [0.0, 0.3, 0.5, 0.7, 1.0] {
            let r = q.slerp(neg, t);
            assert!(r.x.is_finite() && r.y.is_finite() && r.z.is_finite() && r.w.is_finite());
            assert_relative_eq!(r.magnitude(), 1.0, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn slerp_halfway_rotation() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_euler_degrees(0.0, 0.0, 90.0);
        let mid = a.slerp(b, 0.5);
        assert_quat_eq(mid, Quaternion::from_euler_degrees(0.0, 0.0, 45.0));
        assert_relative_eq!(mid.magnitude(), 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn to_matrix_rotates_about_x() {
        // +y goes to +z under 90 degrees of roll
        let m = Quaternion::from_euler_degrees(90.0, 0.0, 0.0).to_matrix();
        assert_relative_eq!(m.c1.x, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(m.c1.y, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(m.c1.z, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(m.c0.x, 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn rotation_matrix_is_orthonormal() {
        let m = Quaternion::from_euler_degrees(33.0, 12.0, -70.0).to_matrix();
        for d in [m.c0.dot(m.c0), m.c1.dot(m.c1), m.c2.dot(m.c2)] {
            assert_relative_eq!(d, 1.0, epsilon = TOLERANCE);
        }
        assert_relative_eq!(m.c0.dot(m.c1), 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(m.c1.dot(m.c2), 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(m.c0.dot(m.c2), 0.0, epsilon = TOLERANCE);
    }

    #[test]
    fn matrix4_composition_order() {
        // translate * scale applies the scale first
        let m = Matrix4::translation(10.0, 0.0, 0.0) * Matrix4::scale(2.0, 3.0, 1.0);
        let p = m.transform_point(Float3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(p.x, 12.0, epsilon = TOLERANCE);
        assert_relative_eq!(p.y, 3.0, epsilon = TOLERANCE);
    }

    #[test]
    fn matrix4_rotation_z() {
        let p = Matrix4::rotation_z_degrees(90.0).transform_point(Float3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(p.y, 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn matrix4_flat_layout_is_column_major() {
        let flat = Matrix4::translation(4.0, 5.0, 6.0).to_cols_array();
        assert_eq!(&flat[12..16], &[4.0, 5.0, 6.0, 1.0]);
        assert_eq!(flat[0], 1.0);
    }

    #[test]
    fn from_rotation_embeds_matrix3() {
        let q = Quaternion::from_euler_degrees(0.0, 0.0, 90.0);
        let m = Matrix4::from_rotation(q.to_matrix());
        let p = m.transform_point(Float3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(p.y, 1.0, epsilon = TOLERANCE);
    }
}
