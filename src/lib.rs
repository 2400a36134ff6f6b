//! Mini Madness - A top-down racing demo on a 2D canvas
//!
//! Core modules:
//! - `sim`: Platform-free race logic (vectors, forces, vehicle, lap tracking)
//! - `renderer`: Canvas 2D drawing and pixel read-back (wasm only)
//! - `platform`: Keyboard state and browser helpers
//! - `config`: Data-driven race tuning

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::RaceConfig;
pub use error::RaceError;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Canvas dimensions
    pub const CANVAS_WIDTH: u32 = 800;
    pub const CANVAS_HEIGHT: u32 = 554;

    /// Vehicle footprint (pixels)
    pub const VEHICLE_WIDTH: f32 = 15.0;
    pub const VEHICLE_HEIGHT: f32 = 25.0;
    /// Starting y on the main straight; x is the canvas center
    pub const START_Y: f32 = 154.0;

    /// Throttle acceleration applied to speed (pixels/s²)
    pub const ACCELERATION: (f32, f32) = (80.0, 80.0);
    /// Brake damping, applied to both speed and velocity
    pub const BRAKE_DAMPING: f32 = 0.97;
    /// Rolling resistance applied to speed every tick
    pub const ROLLING_DAMPING: f32 = 0.999;
    /// Air drag registered in the default force registry
    pub const DRAG_DAMPING: f32 = 0.97;
    /// Steering per tick (radians)
    pub const TURN_RATE: f32 = PI / 60.0;

    /// Any channel above this counts as off-track
    pub const OFF_TRACK_THRESHOLD: u8 = 10;
    /// Laps needed to stop the clock
    pub const RACE_LAPS: u32 = 3;
}

/// Format elapsed race time as `m:s:t` (minutes, seconds, tenths)
pub fn format_race_time(elapsed_ms: f64) -> String {
    let millis = elapsed_ms.max(0.0) as u64;
    let minutes = millis / 60_000;
    let seconds = (millis / 1000) % 60;
    let tenths = (millis / 100) % 10;
    format!("{}:{}:{}", minutes, seconds, tenths)
}
