//! Engine configuration: calibration, axis mapping, output modes

use serde::{Deserialize, Serialize};

use crate::axis::GestureAxis;
use crate::error::{ManusError, Result};
use crate::hand::HandSide;
use crate::scale::ScaleConfig;
use crate::target::GestureTarget;

/// Physical-range calibration for the extractor, millimeters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Calibration {
    /// X-range scale factor; higher values narrow the mapped range
    pub sensitivity: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            min_height: 50.0,
            max_height: 300.0,
            min_depth: -300.0,
            max_depth: 300.0,
        }
    }
}

impl Calibration {
    pub fn validate(&self) -> Result<()> {
        if self.sensitivity <= 0.0 {
            return Err(ManusError::InvalidCalibration(format!(
                "sensitivity must be > 0, got {}",
                self.sensitivity
            )));
        }
        if self.max_height <= self.min_height {
            return Err(ManusError::InvalidCalibration(format!(
                "max_height {} must exceed min_height {}",
                self.max_height, self.min_height
            )));
        }
        if self.max_depth <= self.min_depth {
            return Err(ManusError::InvalidCalibration(format!(
                "max_depth {} must exceed min_depth {}",
                self.max_depth, self.min_depth
            )));
        }
        Ok(())
    }
}

/// Axis-to-target assignments for one hand
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HandMapping {
    targets: [GestureTarget; GestureAxis::COUNT],
}

impl HandMapping {
    pub fn get(&self, axis: GestureAxis) -> GestureTarget {
        self.targets[axis.index()]
    }

    pub fn set(&mut self, axis: GestureAxis, target: GestureTarget) {
        self.targets[axis.index()] = target;
    }
}

/// Runtime-mutable mapping surface for both hands.
///
/// Defaults match the reference instrument: left-hand height drives
/// volume, right-hand sweep drives pitch, right index finger drives
/// vibrato.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AxisMapping {
    pub left: HandMapping,
    pub right: HandMapping,
}

impl Default for AxisMapping {
    fn default() -> Self {
        let mut left = HandMapping::default();
        left.set(GestureAxis::Y, GestureTarget::Volume);
        let mut right = HandMapping::default();
        right.set(GestureAxis::X, GestureTarget::Pitch);
        right.set(GestureAxis::Index, GestureTarget::Vibrato);
        Self { left, right }
    }
}

impl AxisMapping {
    pub fn hand(&self, side: HandSide) -> &HandMapping {
        match side {
            HandSide::Left => &self.left,
            HandSide::Right => &self.right,
        }
    }

    pub fn hand_mut(&mut self, side: HandSide) -> &mut HandMapping {
        match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        }
    }
}

/// Where routed events go; the modes are mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputMode {
    #[default]
    MidiOnly,
    OscOnly,
}

/// Voice/channel layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelMode {
    /// One shared pitch voice on channel 1
    #[default]
    Single,
    /// MPE-style: independent voices, left hand on channel 2, right on 3
    PerHand,
}

/// Complete engine configuration, cloned as a snapshot into each tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    pub calibration: Calibration,
    pub mapping: AxisMapping,
    pub scale: ScaleConfig,
    pub output_mode: OutputMode,
    pub channel_mode: ChannelMode,
    /// General MIDI program; a change is announced once, not every tick
    pub instrument: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            mapping: AxisMapping::default(),
            scale: ScaleConfig::default(),
            output_mode: OutputMode::default(),
            channel_mode: ChannelMode::default(),
            instrument: 90,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.calibration.validate()?;
        self.scale.validate()?;
        Ok(())
    }
}
