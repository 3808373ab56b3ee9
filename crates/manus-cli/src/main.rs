//! manus-cli: headless gesture-instrument runner
//!
//! Runs the mapping engine against a scripted hand sweep so the whole
//! pipeline is demonstrable without tracking hardware. Pass a TOML
//! config path as the first argument to override the defaults.

use std::time::Duration;

use anyhow::Context;
use manus_core::{EngineConfig, HandPose, Vector3};
use manus_services::{ScriptedSensor, SensorFrame, SensorPump, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("manus=debug".parse()?),
        )
        .init();

    tracing::info!("Starting manus");

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(&path)?,
        None => EngineConfig::default(),
    };

    let mut session = Session::new(config)?;
    let (pump, frames) = SensorPump::start(demo_sweep(), Duration::from_millis(10));
    session.run(frames);
    pump.stop()?;

    tracing::info!("Done");
    Ok(())
}

fn load_config(path: &str) -> anyhow::Result<EngineConfig> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
    let config = toml::from_str(&text).with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

/// Scripted stand-in for live tracking: the right hand sweeps across the
/// pitch range while the left hand rises through the volume range, then
/// both hands leave the tracking volume.
fn demo_sweep() -> ScriptedSensor {
    let steps = 400;
    let mut frames: Vec<SensorFrame> = (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;

            let mut right = HandPose::default();
            right.is_present = true;
            right.palm_position = Vector3::new(-200.0 + 400.0 * t, 175.0, 0.0);

            let mut left = HandPose::default();
            left.is_present = true;
            left.palm_position = Vector3::new(0.0, 50.0 + 250.0 * t, 0.0);

            SensorFrame { left, right, connected: true }
        })
        .collect();

    // A few empty ticks at the end let the note-off drain be visible
    frames.extend(std::iter::repeat_n(SensorFrame { connected: true, ..Default::default() }, 10));

    ScriptedSensor::new(frames)
}
