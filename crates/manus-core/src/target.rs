//! Musical destinations a gesture axis can drive

use serde::{Deserialize, Serialize};

/// Closed set of mapping destinations.
///
/// `Pitch` is structurally different from the rest: it feeds the note
/// state machine instead of a continuous controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestureTarget {
    #[default]
    None,

    // Essentials
    Volume,
    Pitch,
    NoteTrigger,

    // Modulation
    Modulation,
    Expression,
    Breath,

    // Shaping
    Cutoff,
    Resonance,
    Attack,
    Release,
    Vibrato,

    // Spatial
    Pan,
    Reverb,
    Chorus,

    // Switches
    Sustain,
    Portamento,

    // Custom macros
    Macro1,
    Macro2,
    Macro3,
    Macro4,
}

/// Per-target output metadata, consulted by both the MIDI and OSC
/// adapters so controller numbers and address tokens cannot drift apart.
#[derive(Debug, Clone, Copy)]
pub struct TargetInfo {
    /// MIDI continuous-controller number; None for targets with no CC
    /// representation (NoteTrigger).
    pub cc: Option<u8>,
    /// Binary switch: thresholded at 0.5 to 0 or 127 on the MIDI side
    pub is_switch: bool,
    /// Lowercase OSC parameter token
    pub osc_token: &'static str,
    /// Human-readable name for config and UI surfaces
    pub display_name: &'static str,
}

impl GestureTarget {
    /// Output metadata; None only for [`GestureTarget::None`].
    pub fn info(&self) -> Option<TargetInfo> {
        let (cc, is_switch, osc_token, display_name) = match self {
            Self::None => return None,
            Self::Volume => (Some(7), false, "volume", "Volume"),
            Self::Pitch => (None, false, "pitch", "Pitch"),
            Self::NoteTrigger => (None, false, "note", "Note Trigger"),
            Self::Modulation => (Some(1), false, "mod", "Mod Wheel"),
            Self::Expression => (Some(11), false, "expr", "Expression"),
            Self::Breath => (Some(2), false, "breath", "Breath"),
            Self::Cutoff => (Some(74), false, "cutoff", "Cutoff"),
            Self::Resonance => (Some(71), false, "res", "Resonance"),
            Self::Attack => (Some(73), false, "attack", "Attack"),
            Self::Release => (Some(72), false, "release", "Release"),
            Self::Vibrato => (Some(76), false, "vib", "Vibrato"),
            Self::Pan => (Some(10), false, "pan", "Pan"),
            Self::Reverb => (Some(91), false, "reverb", "Reverb"),
            Self::Chorus => (Some(93), false, "chorus", "Chorus"),
            Self::Sustain => (Some(64), true, "sustain", "Sustain"),
            Self::Portamento => (Some(65), true, "portamento", "Portamento"),
            Self::Macro1 => (Some(20), false, "macro1", "Macro 1"),
            Self::Macro2 => (Some(21), false, "macro2", "Macro 2"),
            Self::Macro3 => (Some(22), false, "macro3", "Macro 3"),
            Self::Macro4 => (Some(23), false, "macro4", "Macro 4"),
        };
        Some(TargetInfo { cc, is_switch, osc_token, display_name })
    }

    pub fn display_name(&self) -> &'static str {
        self.info().map(|i| i.display_name).unwrap_or("None")
    }
}
