//! manus-core: Domain types and mapping engine for gesture-driven control

pub mod axis;
pub mod config;
pub mod engine;
mod error;
pub mod hand;
pub mod router;
pub mod scale;
pub mod target;
pub mod voice;

pub use axis::{is_absent, map_range, AxisValues, GestureAxis, ABSENT};
pub use config::{AxisMapping, Calibration, ChannelMode, EngineConfig, HandMapping, OutputMode};
pub use engine::GestureEngine;
pub use error::{ManusError, Result};
pub use hand::{FingerPose, HandPose, HandSide, Vector3, PINCH_THRESHOLD};
pub use router::{RoutedEvent, Router, CHANNEL_LEFT, CHANNEL_RIGHT, CHANNEL_SINGLE};
pub use scale::{quantize, ScaleConfig, ScaleType};
pub use target::{GestureTarget, TargetInfo};
pub use voice::{NoteTransition, NoteVoice, NOTE_VELOCITY, PITCH_ANCHOR_NOTE};
