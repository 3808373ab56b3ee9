//! Sensor frame source and the pump thread feeding the session

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, TrySendError};
use manus_core::HandPose;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("Sensor pump not running")]
    NotRunning,
}

/// One tick's worth of hand-tracking data.
///
/// Either hand may be absent independently; `connected == false` means
/// no poses are available this tick regardless of the pose fields.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SensorFrame {
    pub left: HandPose,
    pub right: HandPose,
    pub connected: bool,
}

/// Anything that yields sensor frames, one per poll. Returning `None`
/// ends the stream. Hardware drivers live behind this seam; the crate
/// ships only scripted sources.
pub trait SensorSource: Send + 'static {
    fn poll(&mut self) -> Option<SensorFrame>;
}

/// Replays a fixed sequence of frames, then ends. Used by tests and the
/// headless demo runner.
#[derive(Debug, Default)]
pub struct ScriptedSensor {
    frames: VecDeque<SensorFrame>,
}

impl ScriptedSensor {
    pub fn new(frames: impl IntoIterator<Item = SensorFrame>) -> Self {
        Self { frames: frames.into_iter().collect() }
    }
}

impl SensorSource for ScriptedSensor {
    fn poll(&mut self) -> Option<SensorFrame> {
        self.frames.pop_front()
    }
}

/// Background thread that polls a source at a fixed tick interval and
/// forwards frames over a bounded channel. A full channel drops the
/// frame — the consumer always works on fresh data, never a backlog.
pub struct SensorPump {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl SensorPump {
    pub fn start<S: SensorSource>(mut source: S, tick: Duration) -> (Self, Receiver<SensorFrame>) {
        let (tx, rx) = bounded::<SensorFrame>(4);
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = thread::spawn(move || {
            info!("Sensor pump started, tick {:?}", tick);
            while !stop_flag.load(Ordering::Relaxed) {
                let Some(frame) = source.poll() else {
                    debug!("Sensor source ended");
                    break;
                };
                match tx.try_send(frame) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => warn!("Sensor channel full, dropping frame"),
                    Err(TrySendError::Disconnected(_)) => break,
                }
                thread::sleep(tick);
            }
            info!("Sensor pump stopped");
        });

        (Self { stop, handle: Some(handle) }, rx)
    }

    pub fn stop(mut self) -> Result<(), SensorError> {
        self.stop.store(true, Ordering::Relaxed);
        let handle = self.handle.take().ok_or(SensorError::NotRunning)?;
        let _ = handle.join();
        Ok(())
    }
}

impl Drop for SensorPump {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
