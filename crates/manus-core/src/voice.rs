//! Per-voice note on/off tracking with anti-chatter hysteresis

use serde::{Deserialize, Serialize};

use crate::axis::{is_absent, map_range};
use crate::scale::{quantize, ScaleConfig};

/// Bottom of the pitch axis, MIDI note 48 (C3). The octave range in
/// [`ScaleConfig`] extends upward from here.
pub const PITCH_ANCHOR_NOTE: f32 = 48.0;

/// Fixed note-on velocity
pub const NOTE_VELOCITY: u8 = 100;

/// What a voice did this tick. A retrigger orders the note-off strictly
/// before the note-on for the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteTransition {
    None,
    NoteOn { note: u8 },
    Retrigger { off: u8, on: u8 },
    NoteOff { note: u8 },
}

/// One independently-pitched voice.
///
/// `last_note` survives a note-off so a returning hand that quantizes to
/// the same note still retriggers (the `is_note_on` check below).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NoteVoice {
    pub last_note: Option<u8>,
    pub is_note_on: bool,
}

impl NoteVoice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sounding_note(&self) -> Option<u8> {
        if self.is_note_on { self.last_note } else { None }
    }

    /// Advance one tick. Absent input forces a note-off if sounding;
    /// otherwise the pitch value is mapped onto the configured octave
    /// span, quantized, and compared against the held note. Equal notes
    /// emit nothing — jitter inside one quantization bucket never
    /// retriggers.
    pub fn advance(&mut self, pitch_value: f32, scale: &ScaleConfig) -> NoteTransition {
        if is_absent(pitch_value) {
            if self.is_note_on {
                self.is_note_on = false;
                let note = self.last_note.unwrap_or(0);
                return NoteTransition::NoteOff { note };
            }
            return NoteTransition::None;
        }

        let span = scale.octave_range as f32 * 12.0;
        let exact_note = map_range(pitch_value, 0.0, 1.0, PITCH_ANCHOR_NOTE, PITCH_ANCHOR_NOTE + span);
        let target = quantize(exact_note / 127.0, scale.root_note, scale.scale_type);

        if !self.is_note_on || self.last_note != Some(target) {
            let previous = self.sounding_note();
            self.last_note = Some(target);
            self.is_note_on = true;
            return match previous {
                Some(off) => NoteTransition::Retrigger { off, on: target },
                None => NoteTransition::NoteOn { note: target },
            };
        }

        NoteTransition::None
    }
}
