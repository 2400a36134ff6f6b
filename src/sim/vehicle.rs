//! The player's car
//!
//! Motion has two channels that both move the car:
//! - `speed` is driven by throttle/brake, damped every tick, and projected
//!   onto the heading per component (`x` by cos, `y` by sin)
//! - `velocity` is driven by the shared force registry and the brake
//!
//! Both are integrated into `position` independently.

use serde::{Deserialize, Serialize};

use super::forces::{Force, ForceRegistry};
use super::input::{Control, InputState};
use super::track::{PixelSource, TrackEvent, TrackRules, TrackState};
use super::vector::{Vector, VectorOps};
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub position: Vector,
    pub velocity: Vector,
    pub speed: Vector,
    /// Heading in radians, 0 = facing +x
    pub direction: f32,
    pub width: f32,
    pub height: f32,
    /// Steering per tick (radians)
    pub turn_rate: f32,
    /// Throttle, applied to `speed`
    pub accelerate: Force,
    /// Brake, applied to `speed` and `velocity`
    pub brake: Force,
    /// Rolling resistance, applied to `speed` every tick
    pub damp: Force,
}

impl Vehicle {
    pub fn new(position: Vector) -> Self {
        Self {
            position,
            velocity: Vector::ZERO,
            speed: Vector::ZERO,
            direction: 0.0,
            width: VEHICLE_WIDTH,
            height: VEHICLE_HEIGHT,
            turn_rate: TURN_RATE,
            accelerate: Force::Acceleration {
                vector: Vector::new(ACCELERATION.0, ACCELERATION.1),
            },
            brake: Force::Damping {
                factor: BRAKE_DAMPING,
            },
            damp: Force::Damping {
                factor: ROLLING_DAMPING,
            },
        }
    }

    pub fn throttle(&mut self, dt: f32) {
        self.accelerate.apply(&mut self.speed, dt);
    }

    pub fn brakes(&mut self, dt: f32) {
        self.brake.apply(&mut self.speed, dt);
        self.brake.apply(&mut self.velocity, dt);
    }

    pub fn rotate_left(&mut self) {
        self.direction -= self.turn_rate;
    }

    pub fn rotate_right(&mut self) {
        self.direction += self.turn_rate;
    }

    /// Integrate both motion channels into position
    pub fn move_forward(&mut self, dt: f32) {
        self.damp.apply(&mut self.speed, dt);
        self.position.x += self.speed.x * self.direction.cos() * dt;
        self.position.y += self.speed.y * self.direction.sin() * dt;
        self.position.accumulate(self.velocity.scale(dt));
    }

    /// Advance one frame from held controls and the registry
    pub fn update(&mut self, input: &impl InputState, forces: &ForceRegistry, dt: f32) {
        if input.is_active(Control::Up) {
            self.throttle(dt);
        }
        if input.is_active(Control::Left) {
            self.rotate_left();
        }
        if input.is_active(Control::Down) {
            self.brakes(dt);
        }
        if input.is_active(Control::Right) {
            self.rotate_right();
        }
        forces.apply_all(&mut self.velocity, dt);
        self.move_forward(dt);
    }

    /// Sample the pixel under the car and advance lap tracking.
    /// Leaving the road stops the car dead.
    pub fn collide_test(
        &mut self,
        surface: &impl PixelSource,
        track: &mut TrackState,
        rules: &TrackRules,
    ) -> TrackEvent {
        let Some(color) = surface.pixel_at(self.position.x, self.position.y) else {
            return TrackEvent::None;
        };

        let event = track.observe(color, rules);
        if event == TrackEvent::OffTrack {
            self.speed = Vector::ZERO;
        }
        event
    }

    /// Drawing rotation: the sprite points up, heading 0 points right
    pub fn sprite_rotation(&self) -> f32 {
        self.direction + std::f32::consts::FRAC_PI_2
    }
}
