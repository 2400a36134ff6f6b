//! Race simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Time arrives as a per-frame dt
//! - Keys arrive through `InputState`
//! - Pixels arrive through `PixelSource`
//! - No rendering or browser dependencies

pub mod forces;
pub mod input;
pub mod race;
pub mod raster;
pub mod track;
pub mod vector;
pub mod vehicle;

pub use forces::{Force, ForceRegistry, NamedForce};
pub use input::{Control, ControlState, InputState};
pub use race::{FrameReport, Hud, Race};
pub use raster::RasterTrack;
pub use track::{PixelSource, Rgb, TrackEvent, TrackRules, TrackState};
pub use vector::{Vector, VectorOps};
pub use vehicle::Vehicle;
