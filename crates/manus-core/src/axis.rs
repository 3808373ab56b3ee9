//! Gesture axes and pose-to-value extraction

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::Calibration;
use crate::hand::HandPose;

/// Sentinel for "hand not present — suppress output for this axis".
///
/// Any negative value means absent; zero is a valid in-range reading and
/// must never be used to signal a missing hand.
pub const ABSENT: f32 = -1.0;

pub fn is_absent(value: f32) -> bool {
    value < 0.0
}

/// One scalar gesture dimension extracted from a hand pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureAxis {
    X,
    Y,
    Z,
    WristRoll,
    Grab,
    Pinch,
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl GestureAxis {
    pub const COUNT: usize = 11;

    /// Fixed scan order; routing and last-writer-wins pitch selection
    /// both follow it.
    pub const ALL: [GestureAxis; Self::COUNT] = [
        GestureAxis::X,
        GestureAxis::Y,
        GestureAxis::Z,
        GestureAxis::WristRoll,
        GestureAxis::Grab,
        GestureAxis::Pinch,
        GestureAxis::Thumb,
        GestureAxis::Index,
        GestureAxis::Middle,
        GestureAxis::Ring,
        GestureAxis::Pinky,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Linear interpolation from one range to another, no clamping
pub fn map_range(v: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    out_min + (v - in_min) * (out_max - out_min) / (in_max - in_min)
}

fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Normalized values for every axis of one hand in one tick
#[derive(Debug, Clone, Copy)]
pub struct AxisValues {
    values: [f32; GestureAxis::COUNT],
}

impl AxisValues {
    /// All axes absent (hand outside the tracking volume)
    pub fn absent() -> Self {
        Self { values: [ABSENT; GestureAxis::COUNT] }
    }

    pub fn get(&self, axis: GestureAxis) -> f32 {
        self.values[axis.index()]
    }

    /// Extract per-axis normalized values from a pose.
    ///
    /// A non-present hand yields the absent sentinel on every axis.
    /// Degenerate calibration (sensitivity <= 0, max <= min) yields the
    /// sentinel for the affected axes instead of NaN or infinity.
    pub fn extract(pose: &HandPose, cal: &Calibration) -> Self {
        if !pose.is_present {
            return Self::absent();
        }

        let mut values = [ABSENT; GestureAxis::COUNT];

        if cal.sensitivity > 0.0 {
            // Higher sensitivity narrows the physical range mapped to [0,1]
            let range = 200.0 / cal.sensitivity;
            values[GestureAxis::X.index()] =
                clamp01(map_range(pose.palm_position.x, -range, range, 0.0, 1.0));
        }

        let height_ok = cal.max_height > cal.min_height;
        if height_ok {
            values[GestureAxis::Y.index()] = clamp01(map_range(
                pose.palm_position.y,
                cal.min_height,
                cal.max_height,
                0.0,
                1.0,
            ));
        }

        if cal.max_depth > cal.min_depth {
            values[GestureAxis::Z.index()] = clamp01(map_range(
                pose.palm_position.z,
                cal.min_depth,
                cal.max_depth,
                0.0,
                1.0,
            ));
        }

        values[GestureAxis::WristRoll.index()] =
            clamp01(map_range(pose.wrist_rotation, -PI, PI, 0.0, 1.0));

        // Strengths arrive already normalized from the sensor; forwarded
        // verbatim, no rescaling
        values[GestureAxis::Grab.index()] = pose.grab_strength;
        values[GestureAxis::Pinch.index()] = pose.pinch_strength;

        if height_ok {
            for (i, finger) in pose.fingers.iter().enumerate() {
                values[GestureAxis::Thumb.index() + i] = clamp01(map_range(
                    finger.tip_position.y,
                    cal.min_height,
                    cal.max_height,
                    0.0,
                    1.0,
                ));
            }
        }

        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::Vector3;

    fn present_pose() -> HandPose {
        let mut pose = HandPose::default();
        pose.is_present = true;
        pose
    }

    #[test]
    fn test_absent_hand_yields_sentinel_everywhere() {
        let pose = HandPose::default();
        let values = AxisValues::extract(&pose, &Calibration::default());
        for axis in GestureAxis::ALL {
            assert!(is_absent(values.get(axis)), "{axis:?} should be absent");
        }
    }

    #[test]
    fn test_y_axis_maps_height_range() {
        let cal = Calibration::default(); // 50..300 mm
        let mut pose = present_pose();
        pose.palm_position = Vector3::new(0.0, 175.0, 0.0);
        let values = AxisValues::extract(&pose, &cal);
        assert!((values.get(GestureAxis::Y) - 0.5).abs() < 1e-4);

        // Below the floor clamps to 0, not negative
        pose.palm_position.y = 10.0;
        let values = AxisValues::extract(&pose, &cal);
        assert_eq!(values.get(GestureAxis::Y), 0.0);
    }

    #[test]
    fn test_sensitivity_narrows_x_range() {
        let mut pose = present_pose();
        pose.palm_position = Vector3::new(100.0, 0.0, 0.0);

        let cal = Calibration { sensitivity: 1.0, ..Default::default() };
        let wide = AxisValues::extract(&pose, &cal).get(GestureAxis::X);
        assert!((wide - 0.75).abs() < 1e-4);

        let cal = Calibration { sensitivity: 2.0, ..Default::default() };
        let narrow = AxisValues::extract(&pose, &cal).get(GestureAxis::X);
        assert_eq!(narrow, 1.0); // 100 mm already past +/-100 mm range
    }

    #[test]
    fn test_grab_and_pinch_pass_through() {
        let mut pose = present_pose();
        pose.grab_strength = 0.4;
        pose.pinch_strength = 0.9;
        let values = AxisValues::extract(&pose, &Calibration::default());
        assert_eq!(values.get(GestureAxis::Grab), 0.4);
        assert_eq!(values.get(GestureAxis::Pinch), 0.9);

        // Forwarded verbatim, boundary included
        pose.grab_strength = 1.0;
        pose.pinch_strength = 0.0;
        let values = AxisValues::extract(&pose, &Calibration::default());
        assert_eq!(values.get(GestureAxis::Grab), 1.0);
        assert_eq!(values.get(GestureAxis::Pinch), 0.0);
    }

    #[test]
    fn test_finger_heights_independent() {
        let mut pose = present_pose();
        pose.fingers[1].tip_position = Vector3::new(0.0, 300.0, 0.0);
        pose.fingers[4].tip_position = Vector3::new(0.0, 50.0, 0.0);
        let values = AxisValues::extract(&pose, &Calibration::default());
        assert_eq!(values.get(GestureAxis::Index), 1.0);
        assert_eq!(values.get(GestureAxis::Pinky), 0.0);
    }

    #[test]
    fn test_degenerate_calibration_yields_absent() {
        let mut pose = present_pose();
        pose.palm_position = Vector3::new(0.0, 175.0, 0.0);

        let cal = Calibration { sensitivity: 0.0, ..Default::default() };
        let values = AxisValues::extract(&pose, &cal);
        assert!(is_absent(values.get(GestureAxis::X)));

        let cal = Calibration { min_height: 300.0, max_height: 50.0, ..Default::default() };
        let values = AxisValues::extract(&pose, &cal);
        assert!(is_absent(values.get(GestureAxis::Y)));
        assert!(is_absent(values.get(GestureAxis::Thumb)));
        // Other axes unaffected
        assert!(!is_absent(values.get(GestureAxis::Grab)));
    }
}
