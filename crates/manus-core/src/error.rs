//! Error types for manus

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManusError {
    #[error("Invalid calibration: {0}")]
    InvalidCalibration(String),
    #[error("Root note {0} out of range 0..=11")]
    RootNoteOutOfRange(u8),
    #[error("Octave range {0} out of range 1..=4")]
    OctaveRangeOutOfRange(u8),
}

pub type Result<T> = std::result::Result<T, ManusError>;
