//! Session: config sharing, tick loop, and output dispatch

use std::sync::{Arc, Mutex};

use crossbeam_channel::Receiver;
use manus_core::{EngineConfig, GestureEngine, HandPose, OutputMode, RoutedEvent};
use thiserror::Error;
use tracing::{debug, info};

use crate::midi_out::{MidiOutError, MidiSink};
use crate::osc_out::{OscOutError, OscSink, DEFAULT_OSC_ADDR};
use crate::sensor::SensorFrame;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("MIDI output error: {0}")]
    Midi(#[from] MidiOutError),
    #[error("OSC output error: {0}")]
    Osc(#[from] OscOutError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] manus_core::ManusError),
}

/// Owns the engine and both output sinks; the active output mode picks
/// the sink per tick.
///
/// The configuration lives behind a mutex shared with the editing
/// context; each tick copies a whole snapshot under the lock, so the
/// engine never observes a half-written config.
pub struct Session {
    config: Arc<Mutex<EngineConfig>>,
    engine: GestureEngine,
    midi: MidiSink,
    osc: OscSink,
}

impl Session {
    pub fn new(config: EngineConfig) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(Mutex::new(config)),
            engine: GestureEngine::new(),
            midi: MidiSink::connect("manus")?,
            osc: OscSink::connect(DEFAULT_OSC_ADDR)?,
        })
    }

    /// Session with custom sinks (tests, alternate transports)
    pub fn with_sinks(config: EngineConfig, midi: MidiSink, osc: OscSink) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(Mutex::new(config)),
            engine: GestureEngine::new(),
            midi,
            osc,
        })
    }

    /// Shared handle for the editing context. Mutations replace fields
    /// under the lock; the tick path copies the struct whole.
    pub fn config_handle(&self) -> Arc<Mutex<EngineConfig>> {
        self.config.clone()
    }

    /// Re-aim the OSC sink (settings change)
    pub fn set_osc_target(&mut self, addr: &str) -> Result<(), SessionError> {
        self.osc.retarget(addr)?;
        Ok(())
    }

    fn snapshot(&self) -> EngineConfig {
        *self.config.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Process one sensor frame and deliver the resulting events.
    /// A disconnected sensor counts as both hands absent, which drains
    /// any sounding voices to note-off.
    pub fn process_frame(&mut self, frame: &SensorFrame) -> Vec<RoutedEvent> {
        let config = self.snapshot();

        let absent = HandPose::default();
        let (left, right) = if frame.connected {
            (&frame.left, &frame.right)
        } else {
            (&absent, &absent)
        };

        let events = self.engine.process_tick(left, right, &config);
        self.dispatch(&events, config.output_mode);
        events
    }

    /// Consume frames until the sensor channel closes, then release any
    /// held notes.
    pub fn run(&mut self, frames: Receiver<SensorFrame>) {
        info!("Session started");
        for frame in frames.iter() {
            let events = self.process_frame(&frame);
            if !events.is_empty() {
                debug!("Tick produced {} event(s)", events.len());
            }
        }

        let config = self.snapshot();
        let events = self.engine.all_notes_off(&config);
        self.dispatch(&events, config.output_mode);
        info!("Session stopped");
    }

    fn dispatch(&mut self, events: &[RoutedEvent], mode: OutputMode) {
        match mode {
            OutputMode::MidiOnly => self.midi.send_events(events),
            OutputMode::OscOnly => self.osc.send_events(events),
        }
    }
}
