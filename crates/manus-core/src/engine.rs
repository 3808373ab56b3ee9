//! Per-tick gesture-to-control pipeline

use crate::axis::AxisValues;
use crate::config::EngineConfig;
use crate::hand::HandPose;
use crate::router::{RoutedEvent, Router, CHANNEL_SINGLE};

/// The mapping engine. Invoked strictly serially, once per processing
/// tick, on an immutable-for-the-tick pose snapshot and config snapshot.
#[derive(Debug, Default)]
pub struct GestureEngine {
    router: Router,
    last_instrument: Option<u8>,
}

impl GestureEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one tick: extract axis values for both hands, route them,
    /// and return the ordered event buffer. A program change is emitted
    /// only when the configured instrument differs from the last one
    /// announced.
    pub fn process_tick(
        &mut self,
        left: &HandPose,
        right: &HandPose,
        config: &EngineConfig,
    ) -> Vec<RoutedEvent> {
        let mut out = Vec::new();

        if self.last_instrument != Some(config.instrument) {
            self.last_instrument = Some(config.instrument);
            out.push(RoutedEvent::ProgramChange {
                channel: CHANNEL_SINGLE,
                program: config.instrument,
            });
        }

        let left_values = AxisValues::extract(left, &config.calibration);
        let right_values = AxisValues::extract(right, &config.calibration);
        self.router.route(&left_values, &right_values, config, &mut out);

        out
    }

    /// Release anything still sounding (shutdown, sensor disconnect)
    pub fn all_notes_off(&mut self, config: &EngineConfig) -> Vec<RoutedEvent> {
        let mut out = Vec::new();
        self.router.all_notes_off(config, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{HandSide, Vector3};
    use crate::scale::{ScaleConfig, ScaleType};
    use crate::target::GestureTarget;

    fn c_major_config() -> EngineConfig {
        EngineConfig {
            scale: ScaleConfig { root_note: 0, scale_type: ScaleType::Major, octave_range: 2 },
            ..Default::default()
        }
    }

    fn right_at_x(x: f32) -> HandPose {
        let mut pose = HandPose::default();
        pose.is_present = true;
        pose.palm_position = Vector3::new(x, 0.0, 0.0);
        pose
    }

    #[test]
    fn test_program_change_sent_once() {
        let mut engine = GestureEngine::new();
        let config = c_major_config();
        let absent = HandPose::default();

        let out = engine.process_tick(&absent, &absent, &config);
        assert_eq!(
            out,
            vec![RoutedEvent::ProgramChange { channel: CHANNEL_SINGLE, program: 90 }]
        );

        // Unchanged instrument: nothing further
        let out = engine.process_tick(&absent, &absent, &config);
        assert!(out.is_empty());

        // Changed instrument: announced exactly once more
        let mut config = config;
        config.instrument = 12;
        let out = engine.process_tick(&absent, &absent, &config);
        assert_eq!(
            out,
            vec![RoutedEvent::ProgramChange { channel: CHANNEL_SINGLE, program: 12 }]
        );
    }

    #[test]
    fn test_middle_c_scenario() {
        // Pitch axis at 0.5 over two octaves from 48: note 60, once
        let mut engine = GestureEngine::new();
        let config = c_major_config();
        let absent = HandPose::default();
        let right = right_at_x(0.0); // x = 0.5

        let out = engine.process_tick(&absent, &right, &config);
        assert!(out.contains(&RoutedEvent::NoteOn {
            hand: HandSide::Right,
            channel: CHANNEL_SINGLE,
            note: 60,
            velocity: 100
        }));

        // Held steady: no repeats
        for _ in 0..10 {
            let out = engine.process_tick(&absent, &right, &config);
            assert!(!out.iter().any(|e| matches!(e, RoutedEvent::NoteOn { .. })));
            assert!(!out.iter().any(|e| matches!(e, RoutedEvent::NoteOff { .. })));
        }
    }

    #[test]
    fn test_hand_loss_emits_single_note_off() {
        let mut engine = GestureEngine::new();
        let config = c_major_config();
        let absent = HandPose::default();

        engine.process_tick(&absent, &right_at_x(0.0), &config);
        let out = engine.process_tick(&absent, &absent, &config);
        assert_eq!(
            out,
            vec![RoutedEvent::NoteOff { hand: HandSide::Right, channel: CHANNEL_SINGLE, note: 60 }]
        );
        // Steady absent state stays silent
        assert!(engine.process_tick(&absent, &absent, &config).is_empty());
    }

    #[test]
    fn test_all_notes_off() {
        let mut engine = GestureEngine::new();
        let config = c_major_config();
        engine.process_tick(&HandPose::default(), &right_at_x(0.0), &config);

        let out = engine.all_notes_off(&config);
        assert_eq!(
            out,
            vec![RoutedEvent::NoteOff { hand: HandSide::Right, channel: CHANNEL_SINGLE, note: 60 }]
        );
        assert!(engine.all_notes_off(&config).is_empty());
    }

    #[test]
    fn test_both_hands_absent_is_steady_state() {
        let mut engine = GestureEngine::new();
        let mut config = c_major_config();
        config.mapping.left.set(crate::axis::GestureAxis::Grab, GestureTarget::Cutoff);
        let absent = HandPose::default();
        engine.process_tick(&absent, &absent, &config); // program change tick
        for _ in 0..5 {
            assert!(engine.process_tick(&absent, &absent, &config).is_empty());
        }
    }
}
