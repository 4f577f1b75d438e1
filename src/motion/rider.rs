use crate::sim::Float2;

pub const HEAD_RADIUS: f32 = 4.0;
pub const ROOT_POSITION: Float2 = Float2::new(0.0, 10.0);

const ARM_SWING_DEGREES: f32 = 45.0;
const HEAD_BOB_DEGREES: f32 = 10.0;
const ARM_REST_DEGREES: f32 = 60.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BoneId {
    Root,
    Torso,
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BoneId {
    pub const ALL: [BoneId; 7] = [
        BoneId::Root,
        BoneId::Torso,
        BoneId::Head,
        BoneId::LeftArm,
        BoneId::RightArm,
        BoneId::LeftLeg,
        BoneId::RightLeg,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Torso => "torso",
            Self::Head => "head",
            Self::LeftArm => "leftArm",
            Self::RightArm => "rightArm",
            Self::LeftLeg => "leftLeg",
            Self::RightLeg => "rightLeg",
        }
    }

    pub fn parent(self) -> Option<BoneId> {
        match self {
            Self::Root => None,
            Self::Torso | Self::LeftLeg | Self::RightLeg => Some(Self::Root),
            Self::Head | Self::LeftArm | Self::RightArm => Some(Self::Torso),
        }
    }

    pub fn length(self) -> f32 {
        match self {
            Self::Root => 0.0,
            Self::Torso => 20.0,
            Self::Head => 8.0,
            Self::LeftArm | Self::RightArm | Self::LeftLeg | Self::RightLeg => 15.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Angle relative to the parent bone at animation time `time`.
    pub fn local_angle(self, time: f32) -> f32 {
        let swing = (2.0 * time).sin();
        match self {
            Self::Root | Self::Torso => 0.0,
            Self::Head => swing * HEAD_BOB_DEGREES,
            Self::LeftArm => -ARM_REST_DEGREES + swing * ARM_SWING_DEGREES,
            Self::RightArm => ARM_REST_DEGREES - swing * ARM_SWING_DEGREES,
            Self::LeftLeg => 45.0,
            Self::RightLeg => -45.0,
        }
    }
}

/// A line from a bone's parent joint to its own joint, in cart-local units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoneSegment {
    pub bone: BoneId,
    pub start: Float2,
    pub end: Float2,
}

/// Stick-figure rider pose in the cart's local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RiderPose {
    joints: [Float2; 7],
    angles: [f32; 7],
}

impl RiderPose {
    /// Poses the skeleton at `time` seconds. Each bone's world angle is the
    /// sum of its own and its ancestors' local angles.
    pub fn at(time: f32) -> Self {
        let mut joints = [ROOT_POSITION; 7];
        let mut angles = [0.0; 7];

        // ALL lists parents before children
        for bone in BoneId::ALL {
            let i = bone.index();
            let local = bone.local_angle(time);
            match bone.parent() {
                None => {
                    angles[i] = local;
                    joints[i] = ROOT_POSITION;
                }
                Some(parent) => {
                    let p = parent.index();
                    angles[i] = angles[p] + local;
                    joints[i] = endpoint(joints[p], angles[i], bone.length());
                }
            }
        }

        Self { joints, angles }
    }

    pub fn joint(&self, bone: BoneId) -> Float2 {
        self.joints[bone.index()]
    }

    /// World angle of `bone` in degrees.
    pub fn angle(&self, bone: BoneId) -> f32 {
        self.angles[bone.index()]
    }

    pub fn head_center(&self) -> Float2 {
        self.joint(BoneId::Head)
    }

    pub fn segments(&self) -> Vec<BoneSegment> {
        BoneId::ALL
            .iter()
            .filter_map(|&bone| {
                bone.parent().map(|parent| BoneSegment {
                    bone,
                    start: self.joint(parent),
                    end: self.joint(bone),
                })
            })
            .collect()
    }
}

fn endpoint(start: Float2, degrees: f32, length: f32) -> Float2 {
    let rad = degrees.to_radians();
    Float2::new(start.x + length * rad.cos(), start.y + length * rad.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-4;

    #[test]
    fn rest_pose_at_time_zero() {
        let pose = RiderPose::at(0.0);
        assert_eq!(pose.joint(BoneId::Root), ROOT_POSITION);

        let torso = pose.joint(BoneId::Torso);
        assert_relative_eq!(torso.x, 20.0, epsilon = TOLERANCE);
        assert_relative_eq!(torso.y, 10.0, epsilon = TOLERANCE);

        let head = pose.head_center();
        assert_relative_eq!(head.x, 28.0, epsilon = TOLERANCE);
        assert_relative_eq!(head.y, 10.0, epsilon = TOLERANCE);

        assert_relative_eq!(pose.angle(BoneId::LeftArm), -60.0, epsilon = TOLERANCE);
        assert_relative_eq!(pose.angle(BoneId::RightArm), 60.0, epsilon = TOLERANCE);
    }

    #[test]
    fn legs_hang_from_root() {
        let pose = RiderPose::at(1.3);
        let half = 15.0 * std::f32::consts::FRAC_1_SQRT_2;
        let left = pose.joint(BoneId::LeftLeg);
        let right = pose.joint(BoneId::RightLeg);
        assert_relative_eq!(left.x, half, epsilon = TOLERANCE);
        assert_relative_eq!(left.y, 10.0 + half, epsilon = TOLERANCE);
        assert_relative_eq!(right.y, 10.0 - half, epsilon = TOLERANCE);
    }

    #[test]
    fn arms_swing_in_opposition() {
        // sin(2 * PI/4) = 1
        let pose = RiderPose::at(std::f32::consts::FRAC_PI_4);
        assert_relative_eq!(pose.angle(BoneId::LeftArm), -15.0, epsilon = TOLERANCE);
        assert_relative_eq!(pose.angle(BoneId::RightArm), 15.0, epsilon = TOLERANCE);
        assert_relative_eq!(pose.angle(BoneId::Head), 10.0, epsilon = TOLERANCE);
    }

    #[test]
    fn bone_lengths_are_preserved() {
        let pose = RiderPose::at(2.7);
        for seg in pose.segments() {
            assert_relative_eq!(
                seg.start.distance(seg.end),
                seg.bone.length(),
                epsilon = TOLERANCE
            );
        }
    }

    #[test]
    fn six_segments_connect_to_parents() {
        let pose = RiderPose::at(0.5);
        let segments = pose.segments();
        assert_eq!(segments.len(), 6);
        let head = segments.iter().find(|s| s.bone == BoneId::Head).unwrap();
        assert_eq!(head.start, pose.joint(BoneId::Torso));
        assert_eq!(BoneId::Head.name(), "head");
    }
}
