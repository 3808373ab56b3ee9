//! Hand-tracking snapshot types

use serde::{Deserialize, Serialize};

/// Pinch strength above this counts as an active pinch
pub const PINCH_THRESHOLD: f32 = 0.8;

/// Sensor-space position in millimeters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Which hand a pose or voice belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    /// OSC address prefix component
    pub fn token(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// One tracked finger
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FingerPose {
    pub tip_position: Vector3,
    pub dip_position: Vector3,
    pub pip_position: Vector3,
    pub knuckle_position: Vector3,
    pub is_extended: bool,
}

/// Snapshot of one hand for a single tick.
///
/// `fingers` always holds exactly 5 entries in thumb..pinky order. A
/// non-present hand keeps its last field values; consumers must check
/// `is_present` before reading anything else.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HandPose {
    pub is_present: bool,
    pub palm_position: Vector3,
    pub wrist_rotation: f32,
    pub grab_strength: f32,
    pub pinch_strength: f32,
    pub fingers: [FingerPose; 5],
}

impl HandPose {
    /// Derived pinch flag (strength above [`PINCH_THRESHOLD`])
    pub fn is_pinching(&self) -> bool {
        self.pinch_strength > PINCH_THRESHOLD
    }

    /// Bounds-checked finger access; out-of-range indices yield None
    pub fn finger(&self, index: usize) -> Option<&FingerPose> {
        self.fingers.get(index)
    }
}
