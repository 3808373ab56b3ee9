//! MIDI output: event-to-wire encoding and port delivery

use manus_core::RoutedEvent;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum MidiOutError {
    #[error("MIDI init error: {0}")]
    Init(#[from] midir::InitError),
    #[error("MIDI connect error: {0}")]
    Connect(String),
}

/// Encode a routed event as raw MIDI bytes.
///
/// Channels in events are 1-based and shifted to wire numbering here.
/// Control values are scaled to 7 bits; switch targets (per the shared
/// target table) threshold at 0.5 to exactly 0 or 127. Events with no
/// MIDI representation (NoteTrigger, targets without a CC) yield None.
pub fn encode_event(event: &RoutedEvent) -> Option<Vec<u8>> {
    fn wire_channel(channel: u8) -> u8 {
        channel.saturating_sub(1) & 0x0F
    }

    match *event {
        RoutedEvent::NoteOn { channel, note, velocity, .. } => {
            Some(vec![0x90 | wire_channel(channel), note & 0x7F, velocity & 0x7F])
        }
        RoutedEvent::NoteOff { channel, note, .. } => {
            Some(vec![0x80 | wire_channel(channel), note & 0x7F, 0])
        }
        RoutedEvent::Control { channel, target, value, .. } => {
            let info = target.info()?;
            let cc = info.cc?;
            let value7 = if info.is_switch {
                if value > 0.5 { 127 } else { 0 }
            } else {
                (value * 127.0).round() as u8
            };
            Some(vec![0xB0 | wire_channel(channel), cc & 0x7F, value7 & 0x7F])
        }
        RoutedEvent::ProgramChange { channel, program } => {
            Some(vec![0xC0 | wire_channel(channel), program & 0x7F])
        }
    }
}

/// Delivery backend. Real output goes through midir; the null port
/// swallows bytes when no MIDI destination exists.
pub trait MidiPort: Send {
    fn send(&mut self, bytes: &[u8]);
}

struct MidirPort {
    conn: midir::MidiOutputConnection,
}

impl MidiPort for MidirPort {
    fn send(&mut self, bytes: &[u8]) {
        if let Err(e) = self.conn.send(bytes) {
            warn!("MIDI send failed: {e}");
        }
    }
}

struct NullPort;

impl MidiPort for NullPort {
    fn send(&mut self, _bytes: &[u8]) {}
}

/// MIDI event sink bound to one output port
pub struct MidiSink {
    port: Box<dyn MidiPort>,
}

impl MidiSink {
    /// Open the first available MIDI output port, preferring a visible
    /// softsynth. Falls back to a null port with a warning so a missing
    /// synth never takes the engine down.
    pub fn connect(client_name: &str) -> Result<Self, MidiOutError> {
        let midi_out = midir::MidiOutput::new(client_name)?;

        let ports = midi_out.ports();
        if ports.is_empty() {
            warn!("No MIDI output ports found, using null output");
            return Ok(Self::null());
        }

        let port_idx = ports
            .iter()
            .position(|p| {
                midi_out
                    .port_name(p)
                    .map(|n| {
                        let n = n.to_lowercase();
                        n.contains("fluid") || n.contains("timidity") || n.contains("synth")
                    })
                    .unwrap_or(false)
            })
            .unwrap_or(0);

        let port = &ports[port_idx];
        let name = midi_out.port_name(port).unwrap_or_else(|_| "unknown".to_string());
        let conn = midi_out
            .connect(port, client_name)
            .map_err(|e| MidiOutError::Connect(e.to_string()))?;
        info!("MIDI output connected to {name}");

        Ok(Self { port: Box::new(MidirPort { conn }) })
    }

    /// Sink that discards everything
    pub fn null() -> Self {
        Self { port: Box::new(NullPort) }
    }

    /// Sink over a custom backend (tests)
    pub fn with_port(port: Box<dyn MidiPort>) -> Self {
        Self { port }
    }

    pub fn send_events(&mut self, events: &[RoutedEvent]) {
        for event in events {
            if let Some(bytes) = encode_event(event) {
                self.port.send(&bytes);
            }
        }
    }
}
