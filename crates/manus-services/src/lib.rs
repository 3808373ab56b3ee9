//! manus-services: Sensor intake, output sinks, and session loop

pub mod midi_out;
pub mod osc_out;
pub mod sensor;
pub mod session;

pub use midi_out::{encode_event, MidiOutError, MidiPort, MidiSink};
pub use osc_out::{message_for, OscOutError, OscSink, DEFAULT_OSC_ADDR};
pub use sensor::{ScriptedSensor, SensorError, SensorFrame, SensorPump, SensorSource};
pub use session::{Session, SessionError};
