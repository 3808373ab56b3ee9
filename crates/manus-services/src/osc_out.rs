//! OSC output: event-to-message translation and UDP delivery

use std::net::{SocketAddr, UdpSocket};

use manus_core::{HandSide, RoutedEvent};
use rosc::{encoder, OscMessage, OscPacket, OscType};
use thiserror::Error;
use tracing::{info, warn};

/// Default endpoint of the reference instrument
pub const DEFAULT_OSC_ADDR: &str = "127.0.0.1:9000";

#[derive(Debug, Error)]
pub enum OscOutError {
    #[error("OSC socket error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid OSC target address: {0}")]
    InvalidAddr(String),
    #[error("OSC encode error: {0}")]
    Encode(#[from] rosc::OscError),
}

/// Build the OSC message for a routed controller event, if it has one.
///
/// Addresses are `/<left|right>/<token>` with a single float argument,
/// the raw normalized value. Note events and program changes have no
/// per-event message; the pitch stream comes from the held-note state in
/// [`OscSink::send_events`].
pub fn message_for(event: &RoutedEvent) -> Option<OscMessage> {
    match *event {
        RoutedEvent::NoteOn { .. }
        | RoutedEvent::NoteOff { .. }
        | RoutedEvent::ProgramChange { .. } => None,
        RoutedEvent::Control { hand, target, value, .. } => {
            let info = target.info()?;
            Some(OscMessage {
                addr: format!("/{}/{}", hand.token(), info.osc_token),
                args: vec![OscType::Float(value)],
            })
        }
    }
}

/// Sounding note per hand. Receivers expect the quantized pitch restated
/// every tick while a note is held, not change events, so the sink tracks
/// what is sounding between ticks.
#[derive(Debug, Default)]
struct HeldNotes {
    left: Option<u8>,
    right: Option<u8>,
}

impl HeldNotes {
    fn observe(&mut self, event: &RoutedEvent) {
        match *event {
            RoutedEvent::NoteOn { hand, note, .. } => *self.slot(hand) = Some(note),
            RoutedEvent::NoteOff { hand, .. } => *self.slot(hand) = None,
            _ => {}
        }
    }

    fn slot(&mut self, hand: HandSide) -> &mut Option<u8> {
        match hand {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        }
    }
}

fn pitch_message(hand: HandSide, note: u8) -> OscMessage {
    OscMessage {
        addr: format!("/{}/pitch", hand.token()),
        args: vec![OscType::Float(note as f32)],
    }
}

/// Messages for one tick: controller events first, then `/<hand>/pitch`
/// for every hand with a sounding note.
fn tick_messages(held: &mut HeldNotes, events: &[RoutedEvent]) -> Vec<OscMessage> {
    let mut out = Vec::new();
    for event in events {
        held.observe(event);
        if let Some(message) = message_for(event) {
            out.push(message);
        }
    }
    for (hand, note) in [(HandSide::Left, held.left), (HandSide::Right, held.right)] {
        if let Some(note) = note {
            out.push(pitch_message(hand, note));
        }
    }
    out
}

/// OSC event sink bound to one UDP endpoint
pub struct OscSink {
    socket: UdpSocket,
    target: SocketAddr,
    held: HeldNotes,
}

impl OscSink {
    /// Bind an ephemeral local socket aimed at `target`
    pub fn connect(target: &str) -> Result<Self, OscOutError> {
        let target: SocketAddr = target
            .parse()
            .map_err(|_| OscOutError::InvalidAddr(target.to_string()))?;
        let socket = UdpSocket::bind("0.0.0.0:0")?;
        info!("OSC output aimed at {target}");
        Ok(Self { socket, target, held: HeldNotes::default() })
    }

    /// Retarget at runtime (settings change)
    pub fn retarget(&mut self, target: &str) -> Result<(), OscOutError> {
        self.target = target
            .parse()
            .map_err(|_| OscOutError::InvalidAddr(target.to_string()))?;
        info!("OSC output retargeted to {}", self.target);
        Ok(())
    }

    /// Deliver one tick's worth of events. Called every tick even when
    /// `events` is empty so a held note keeps streaming its pitch.
    pub fn send_events(&mut self, events: &[RoutedEvent]) {
        for message in tick_messages(&mut self.held, events) {
            match encoder::encode(&OscPacket::Message(message)) {
                Ok(bytes) => {
                    if let Err(e) = self.socket.send_to(&bytes, self.target) {
                        warn!("OSC send failed: {e}");
                    }
                }
                Err(e) => warn!("OSC encode failed: {e}"),
            }
        }
    }
}
