//! Routing of extracted axis values to musical targets

use crate::axis::{is_absent, AxisValues, GestureAxis, ABSENT};
use crate::config::{ChannelMode, EngineConfig};
use crate::hand::HandSide;
use crate::scale::ScaleConfig;
use crate::target::GestureTarget;
use crate::voice::{NoteTransition, NoteVoice, NOTE_VELOCITY};

/// MIDI channel for single-voice mode
pub const CHANNEL_SINGLE: u8 = 1;
/// MIDI channels for per-hand (MPE-style) mode
pub const CHANNEL_LEFT: u8 = 2;
pub const CHANNEL_RIGHT: u8 = 3;

/// One routed output event. Channels are 1-based; the MIDI adapter
/// shifts to wire numbering. Control events keep the raw normalized
/// value — the adapters decide its wire representation from the shared
/// target table (7-bit scaling, switch thresholding, OSC float).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoutedEvent {
    NoteOn { hand: HandSide, channel: u8, note: u8, velocity: u8 },
    NoteOff { hand: HandSide, channel: u8, note: u8 },
    Control { hand: HandSide, channel: u8, target: GestureTarget, value: f32 },
    ProgramChange { channel: u8, program: u8 },
}

/// Dispatches axis values to note voices and continuous targets.
///
/// Owns every voice across both channel modes so a mid-session mode
/// switch cannot strand a sounding note: voices belonging to the
/// inactive mode are driven to silence each tick.
#[derive(Debug, Default)]
pub struct Router {
    shared_voice: NoteVoice,
    left_voice: NoteVoice,
    right_voice: NoteVoice,
    /// Hand that owns the shared voice's current note (OSC addressing)
    shared_hand: Option<HandSide>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one tick of axis values for both hands.
    ///
    /// Pitch is resolved first (note events precede controller events in
    /// the output buffer), then every present, mapped, non-pitch axis
    /// emits a control event.
    pub fn route(
        &mut self,
        left: &AxisValues,
        right: &AxisValues,
        config: &EngineConfig,
        out: &mut Vec<RoutedEvent>,
    ) {
        match config.channel_mode {
            ChannelMode::Single => {
                let mut pitch = ABSENT;
                let mut winner = None;
                // Last assignment in scan order wins; no arbitration
                for (side, values) in [(HandSide::Left, left), (HandSide::Right, right)] {
                    for axis in GestureAxis::ALL {
                        if config.mapping.hand(side).get(axis) == GestureTarget::Pitch {
                            pitch = values.get(axis);
                            winner = Some(side);
                        }
                    }
                }
                if winner.is_some() {
                    self.shared_hand = winner;
                }
                let hand = self.shared_hand.unwrap_or(HandSide::Right);
                let transition = self.shared_voice.advance(pitch, &config.scale);
                push_transition(out, transition, hand, CHANNEL_SINGLE);

                silence(&mut self.left_voice, HandSide::Left, CHANNEL_LEFT, &config.scale, out);
                silence(&mut self.right_voice, HandSide::Right, CHANNEL_RIGHT, &config.scale, out);
            }
            ChannelMode::PerHand => {
                for (side, values, voice, channel) in [
                    (HandSide::Left, left, &mut self.left_voice, CHANNEL_LEFT),
                    (HandSide::Right, right, &mut self.right_voice, CHANNEL_RIGHT),
                ] {
                    let mut pitch = ABSENT;
                    for axis in GestureAxis::ALL {
                        if config.mapping.hand(side).get(axis) == GestureTarget::Pitch {
                            pitch = values.get(axis);
                        }
                    }
                    let transition = voice.advance(pitch, &config.scale);
                    push_transition(out, transition, side, channel);
                }

                let hand = self.shared_hand.unwrap_or(HandSide::Right);
                silence(&mut self.shared_voice, hand, CHANNEL_SINGLE, &config.scale, out);
            }
        }

        for (side, values) in [(HandSide::Left, left), (HandSide::Right, right)] {
            let channel = match config.channel_mode {
                ChannelMode::Single => CHANNEL_SINGLE,
                ChannelMode::PerHand => match side {
                    HandSide::Left => CHANNEL_LEFT,
                    HandSide::Right => CHANNEL_RIGHT,
                },
            };
            for axis in GestureAxis::ALL {
                let target = config.mapping.hand(side).get(axis);
                if target == GestureTarget::None || target == GestureTarget::Pitch {
                    continue;
                }
                let value = values.get(axis);
                if is_absent(value) {
                    continue;
                }
                out.push(RoutedEvent::Control { hand: side, channel, target, value });
            }
        }
    }

    /// Force note-offs for anything still sounding (shutdown, sensor loss)
    pub fn all_notes_off(&mut self, config: &EngineConfig, out: &mut Vec<RoutedEvent>) {
        let hand = self.shared_hand.unwrap_or(HandSide::Right);
        silence(&mut self.shared_voice, hand, CHANNEL_SINGLE, &config.scale, out);
        silence(&mut self.left_voice, HandSide::Left, CHANNEL_LEFT, &config.scale, out);
        silence(&mut self.right_voice, HandSide::Right, CHANNEL_RIGHT, &config.scale, out);
    }
}

fn silence(
    voice: &mut NoteVoice,
    hand: HandSide,
    channel: u8,
    scale: &ScaleConfig,
    out: &mut Vec<RoutedEvent>,
) {
    if let NoteTransition::NoteOff { note } = voice.advance(ABSENT, scale) {
        out.push(RoutedEvent::NoteOff { hand, channel, note });
    }
}

fn push_transition(out: &mut Vec<RoutedEvent>, transition: NoteTransition, hand: HandSide, channel: u8) {
    match transition {
        NoteTransition::None => {}
        NoteTransition::NoteOn { note } => {
            out.push(RoutedEvent::NoteOn { hand, channel, note, velocity: NOTE_VELOCITY });
        }
        NoteTransition::Retrigger { off, on } => {
            out.push(RoutedEvent::NoteOff { hand, channel, note: off });
            out.push(RoutedEvent::NoteOn { hand, channel, note: on, velocity: NOTE_VELOCITY });
        }
        NoteTransition::NoteOff { note } => {
            out.push(RoutedEvent::NoteOff { hand, channel, note });
        }
    }
}
