//! Track boundary and lap tracking by pixel color
//!
//! The track image is black road on a bright background. Three thin marker
//! lines are painted in near-black colors: the finish line and two
//! checkpoints. One pixel under the car is sampled each frame and drives the
//! state machine below.
//!
//! `over_checkpoint` is an edge-arming flag. It is set when a marker is
//! taken and cleared only by a pure-black sample, so a car sitting on a
//! marker for several frames triggers it once.

use serde::{Deserialize, Serialize};

use crate::consts::OFF_TRACK_THRESHOLD;
use crate::format_race_time;

/// One sampled pixel (alpha ignored)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex form, e.g. `#080000`
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn is_brighter_than(&self, threshold: u8) -> bool {
        self.r > threshold || self.g > threshold || self.b > threshold
    }
}

/// Anything that can report the color at a screen coordinate
pub trait PixelSource {
    /// `None` when the read-back itself failed
    fn pixel_at(&self, x: f32, y: f32) -> Option<Rgb>;
}

/// Colors and threshold the state machine matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackRules {
    pub off_track_threshold: u8,
    pub finish: Rgb,
    pub checkpoint_1: Rgb,
    pub checkpoint_2: Rgb,
}

impl Default for TrackRules {
    fn default() -> Self {
        Self {
            off_track_threshold: OFF_TRACK_THRESHOLD,
            finish: Rgb::new(8, 0, 0),
            checkpoint_1: Rgb::new(0, 8, 0),
            checkpoint_2: Rgb::new(0, 0, 8),
        }
    }
}

/// What a single sample did to the track state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEvent {
    /// Bright pixel: the car must stop
    OffTrack,
    Checkpoint1,
    Checkpoint2,
    /// Finish line crossed with both checkpoints; carries the new lap count
    LapCompleted(u32),
    /// Left a marker onto plain road
    Rearmed,
    None,
}

/// Lap progress for the session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackState {
    pub lap: u32,
    pub checkpoint_1: bool,
    pub checkpoint_2: bool,
    pub over_checkpoint: bool,
    pub finish_time: Option<String>,
    pub timer_stopped: bool,
}

impl TrackState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the state machine with one sampled color
    pub fn observe(&mut self, color: Rgb, rules: &TrackRules) -> TrackEvent {
        if color.is_brighter_than(rules.off_track_threshold) {
            return TrackEvent::OffTrack;
        }

        if color == rules.finish {
            if self.checkpoint_1 && self.checkpoint_2 && !self.over_checkpoint {
                self.lap += 1;
                self.checkpoint_1 = false;
                self.checkpoint_2 = false;
                self.over_checkpoint = true;
                return TrackEvent::LapCompleted(self.lap);
            }
        } else if color == rules.checkpoint_1 {
            if !self.over_checkpoint {
                self.checkpoint_1 = true;
                self.over_checkpoint = true;
                return TrackEvent::Checkpoint1;
            }
        } else if color == rules.checkpoint_2 {
            if self.checkpoint_1 && !self.over_checkpoint {
                self.checkpoint_2 = true;
                self.over_checkpoint = true;
                return TrackEvent::Checkpoint2;
            }
        } else if color == Rgb::BLACK && self.over_checkpoint {
            self.over_checkpoint = false;
            return TrackEvent::Rearmed;
        }

        TrackEvent::None
    }

    /// Stop the clock once `race_laps` are done. Returns true on the frame
    /// the finish time is captured; later calls never overwrite it.
    pub fn capture_finish(&mut self, race_laps: u32, elapsed_ms: f64) -> bool {
        if self.timer_stopped || self.lap < race_laps {
            return false;
        }
        self.finish_time = Some(format_race_time(elapsed_ms));
        self.timer_stopped = true;
        true
    }

    pub fn is_finished(&self) -> bool {
        self.timer_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Rgb = Rgb::new(8, 0, 0);
    const B: Rgb = Rgb::new(0, 8, 0);
    const C: Rgb = Rgb::new(0, 0, 8);

    fn feed(state: &mut TrackState, colors: &[Rgb]) -> Vec<TrackEvent> {
        let rules = TrackRules::default();
        colors.iter().map(|c| state.observe(*c, &rules)).collect()
    }

    #[test]
    fn test_full_lap_sequence() {
        let mut state = TrackState::new();
        let events = feed(&mut state, &[B, Rgb::BLACK, C, Rgb::BLACK, A]);
        assert_eq!(
            events,
            vec![
                TrackEvent::Checkpoint1,
                TrackEvent::Rearmed,
                TrackEvent::Checkpoint2,
                TrackEvent::Rearmed,
                TrackEvent::LapCompleted(1),
            ]
        );
        assert_eq!(state.lap, 1);
        assert!(!state.checkpoint_1);
        assert!(!state.checkpoint_2);
        assert!(state.over_checkpoint);
    }

    #[test]
    fn test_finish_without_checkpoints_does_not_count() {
        let mut state = TrackState::new();
        feed(&mut state, &[A, Rgb::BLACK, B, Rgb::BLACK, A]);
        assert_eq!(state.lap, 0);
        assert!(state.checkpoint_1);
        assert!(!state.checkpoint_2);
    }

    #[test]
    fn test_checkpoint_2_needs_checkpoint_1() {
        let mut state = TrackState::new();
        assert_eq!(feed(&mut state, &[C]), vec![TrackEvent::None]);
        assert!(!state.checkpoint_2);
        assert!(!state.over_checkpoint);
    }

    #[test]
    fn test_marker_is_idempotent_until_black() {
        let mut state = TrackState::new();
        let events = feed(&mut state, &[B, B, B]);
        assert_eq!(
            events,
            vec![TrackEvent::Checkpoint1, TrackEvent::None, TrackEvent::None]
        );

        // Sitting on checkpoint 2 right after checkpoint 1 does nothing either
        assert_eq!(feed(&mut state, &[C]), vec![TrackEvent::None]);
        assert!(!state.checkpoint_2);
    }

    #[test]
    fn test_finish_does_not_double_count() {
        let mut state = TrackState {
            checkpoint_1: true,
            checkpoint_2: true,
            ..TrackState::default()
        };
        feed(&mut state, &[A, A, A]);
        assert_eq!(state.lap, 1);
    }

    #[test]
    fn test_black_rearms() {
        let mut state = TrackState {
            over_checkpoint: true,
            ..TrackState::default()
        };
        assert_eq!(feed(&mut state, &[Rgb::BLACK]), vec![TrackEvent::Rearmed]);
        assert!(!state.over_checkpoint);
        assert_eq!(feed(&mut state, &[Rgb::BLACK]), vec![TrackEvent::None]);
    }

    #[test]
    fn test_bright_pixel_is_off_track_and_short_circuits() {
        let mut state = TrackState {
            over_checkpoint: true,
            ..TrackState::default()
        };
        let events = feed(&mut state, &[Rgb::new(11, 0, 0), Rgb::new(0, 0, 200)]);
        assert_eq!(events, vec![TrackEvent::OffTrack, TrackEvent::OffTrack]);
        assert!(state.over_checkpoint);
    }

    #[test]
    fn test_dark_unknown_color_is_ignored() {
        let mut state = TrackState {
            over_checkpoint: true,
            ..TrackState::default()
        };
        assert_eq!(feed(&mut state, &[Rgb::new(5, 5, 5)]), vec![TrackEvent::None]);
        assert!(state.over_checkpoint);
    }

    #[test]
    fn test_finish_time_captured_once() {
        let mut state = TrackState {
            lap: 3,
            ..TrackState::default()
        };
        assert!(!TrackState::new().capture_finish(3, 1_000.0));
        assert!(state.capture_finish(3, 65_400.0));
        assert_eq!(state.finish_time.as_deref(), Some("1:5:4"));
        assert!(!state.capture_finish(3, 99_000.0));
        assert_eq!(state.finish_time.as_deref(), Some("1:5:4"));
        assert!(state.is_finished());
    }

    #[test]
    fn test_rgb_to_css() {
        assert_eq!(Rgb::new(8, 0, 0).to_css(), "#080000");
        assert_eq!(Rgb::new(0, 255, 16).to_css(), "#00ff10");
    }
}
