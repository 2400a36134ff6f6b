//! One race session: car, lap tracking, forces and the stopwatch
//!
//! The browser loop calls `frame` once per animation frame with the frame
//! timestamp, then draws using `vehicle` and `hud`.

use super::forces::ForceRegistry;
use super::input::InputState;
use super::track::{PixelSource, TrackEvent, TrackState};
use super::vector::Vector;
use super::vehicle::Vehicle;
use crate::config::RaceConfig;
use crate::format_race_time;

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Seconds since the previous frame (0 on the first)
    pub dt: f32,
    pub event: TrackEvent,
    /// True only on the frame the finish time was captured
    pub finished: bool,
}

/// Text shown in the top-right corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    pub lap: u32,
    pub time: String,
    /// Display is frozen on the finish time
    pub finished: bool,
}

#[derive(Debug, Clone)]
pub struct Race {
    pub config: RaceConfig,
    pub vehicle: Vehicle,
    pub track: TrackState,
    pub forces: ForceRegistry,
    /// Stopwatch zero (ms)
    start_ms: f64,
    last_tick_ms: Option<f64>,
}

impl Race {
    pub fn new(config: RaceConfig, now_ms: f64) -> Self {
        let mut vehicle = Vehicle::new(config.start_position);
        vehicle.width = config.vehicle_width;
        vehicle.height = config.vehicle_height;
        vehicle.turn_rate = config.turn_rate;
        vehicle.accelerate = config.accelerate_force();
        vehicle.brake = config.brake_force();
        vehicle.damp = config.damp_force();

        let forces = ForceRegistry::from_config(&config.forces);
        log::debug!(
            "Race ready: {} laps, forces [{}]",
            config.race_laps,
            forces.names().collect::<Vec<_>>().join(", ")
        );

        Self {
            config,
            vehicle,
            track: TrackState::new(),
            forces,
            start_ms: now_ms,
            last_tick_ms: None,
        }
    }

    /// Throw away all state and start over from the same config
    pub fn restart(&mut self, now_ms: f64) {
        *self = Race::new(self.config.clone(), now_ms);
        log::info!("Race restarted");
    }

    /// Milliseconds since the stopwatch started
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.start_ms
    }

    /// Sample, update and check for the finish. `surface` must hold the
    /// previously drawn frame.
    pub fn frame(
        &mut self,
        now_ms: f64,
        surface: &impl PixelSource,
        input: &impl InputState,
    ) -> FrameReport {
        let last = self.last_tick_ms.unwrap_or(now_ms);
        // A clock stepping backwards must not run the integrator in reverse
        let dt = ((now_ms - last) / 1000.0).max(0.0) as f32;
        self.last_tick_ms = Some(now_ms);

        let was_moving = self.vehicle.speed != Vector::ZERO;
        let rules = self.config.rules;
        let event = self.vehicle.collide_test(surface, &mut self.track, &rules);
        match event {
            TrackEvent::OffTrack if was_moving => {
                let pos = self.vehicle.position;
                log::debug!("Off track at ({:.0}, {:.0})", pos.x, pos.y);
            }
            TrackEvent::Checkpoint1 | TrackEvent::Checkpoint2 => {
                log::info!("{:?} passed (lap {})", event, self.track.lap);
            }
            TrackEvent::LapCompleted(lap) => log::info!("Lap {} complete", lap),
            _ => {}
        }

        self.vehicle.update(input, &self.forces, dt);

        let finished = self
            .track
            .capture_finish(self.config.race_laps, self.elapsed_ms(now_ms));
        if finished {
            log::info!(
                "Race finished in {}",
                self.track.finish_time.as_deref().unwrap_or_default()
            );
        }

        log::trace!(
            "dt={:.4} pos={:?} speed={:?}",
            dt,
            self.vehicle.position,
            self.vehicle.speed
        );

        FrameReport {
            dt,
            event,
            finished,
        }
    }

    pub fn hud(&self, now_ms: f64) -> Hud {
        match (&self.track.finish_time, self.track.timer_stopped) {
            (Some(time), true) => Hud {
                lap: self.config.race_laps,
                time: time.clone(),
                finished: true,
            },
            _ => Hud {
                lap: self.track.lap,
                time: format_race_time(self.elapsed_ms(now_ms)),
                finished: false,
            },
        }
    }
}
