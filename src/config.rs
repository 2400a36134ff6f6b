//! Race tuning and layout
//!
//! Every field has a default, so a partial JSON override is enough.
//! On the web an override may be stored in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::RaceError;
use crate::sim::{Force, NamedForce, Rgb, TrackRules, Vector};

/// Which trigger a painted marker line represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Finish,
    Checkpoint1,
    Checkpoint2,
}

impl MarkerKind {
    pub fn color(&self, rules: &TrackRules) -> Rgb {
        match self {
            MarkerKind::Finish => rules.finish,
            MarkerKind::Checkpoint1 => rules.checkpoint_1,
            MarkerKind::Checkpoint2 => rules.checkpoint_2,
        }
    }
}

/// A vertical marker line painted over the track image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerLine {
    pub kind: MarkerKind,
    pub x: f32,
    pub y0: f32,
    pub y1: f32,
    pub line_width: f32,
}

/// Static image paths, loaded once at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub background: String,
    pub car: String,
    pub exhaust: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            background: "img/RacingTrack.jpg".to_string(),
            car: "img/mini4.png".to_string(),
            exhaust: "img/fumes.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    // === Canvas ===
    pub canvas_width: u32,
    pub canvas_height: u32,

    // === Vehicle ===
    pub start_position: Vector,
    pub vehicle_width: f32,
    pub vehicle_height: f32,
    /// Throttle acceleration (pixels/s²)
    pub acceleration: Vector,
    pub brake_damping: f32,
    pub rolling_damping: f32,
    /// Steering per tick (radians)
    pub turn_rate: f32,

    // === World ===
    /// Registry forces, applied to velocity in this order
    pub forces: Vec<NamedForce>,

    // === Track ===
    pub rules: TrackRules,
    pub markers: Vec<MarkerLine>,
    pub race_laps: u32,

    pub assets: AssetPaths,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            start_position: Vector::new(CANVAS_WIDTH as f32 / 2.0, START_Y),
            vehicle_width: VEHICLE_WIDTH,
            vehicle_height: VEHICLE_HEIGHT,
            acceleration: Vector::new(ACCELERATION.0, ACCELERATION.1),
            brake_damping: BRAKE_DAMPING,
            rolling_damping: ROLLING_DAMPING,
            turn_rate: TURN_RATE,

            // Gravity (0, 9.82) and wind (0.5, 0) are available but off
            forces: vec![NamedForce {
                name: "drag".to_string(),
                force: Force::Damping {
                    factor: DRAG_DAMPING,
                },
            }],

            rules: TrackRules::default(),
            markers: vec![
                MarkerLine {
                    kind: MarkerKind::Finish,
                    x: 350.0,
                    y0: 133.0,
                    y1: 176.0,
                    line_width: 10.0,
                },
                MarkerLine {
                    kind: MarkerKind::Checkpoint1,
                    x: 700.0,
                    y0: 375.0,
                    y1: 418.0,
                    line_width: 10.0,
                },
                MarkerLine {
                    kind: MarkerKind::Checkpoint2,
                    x: 250.0,
                    y0: 497.0,
                    y1: 540.0,
                    line_width: 10.0,
                },
            ],
            race_laps: RACE_LAPS,

            assets: AssetPaths::default(),
        }
    }
}

impl RaceConfig {
    /// Parse and validate a (possibly partial) JSON config
    pub fn from_json(json: &str) -> Result<Self, RaceError> {
        let config: RaceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RaceError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(RaceError::InvalidConfig(format!(
                "canvas size {}x{} is empty",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.race_laps == 0 {
            return Err(RaceError::InvalidConfig("race_laps must be at least 1".into()));
        }
        check_damping("brake_damping", self.brake_damping)?;
        check_damping("rolling_damping", self.rolling_damping)?;
        for entry in &self.forces {
            if let Force::Damping { factor } = entry.force {
                check_damping(&entry.name, factor)?;
            }
        }
        Ok(())
    }

    pub fn accelerate_force(&self) -> Force {
        Force::Acceleration {
            vector: self.acceleration,
        }
    }

    pub fn brake_force(&self) -> Force {
        Force::Damping {
            factor: self.brake_damping,
        }
    }

    pub fn damp_force(&self) -> Force {
        Force::Damping {
            factor: self.rolling_damping,
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "mini_madness_config";

    /// Load a config override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded race config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored race config: {}", e),
                }
            }
        }

        log::info!("Using default race config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

fn check_damping(name: &str, factor: f32) -> Result<(), RaceError> {
    if factor > 0.0 && factor <= 1.0 {
        Ok(())
    } else {
        Err(RaceError::InvalidConfig(format!(
            "damping `{}` must be in (0, 1], got {}",
            name, factor
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RaceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.start_position, Vector::new(400.0, 154.0));
        assert_eq!(config.forces.len(), 1);
        assert_eq!(config.race_laps, 3);
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{"race_laps": 5, "turn_rate": 0.1}"#;
        let config = RaceConfig::from_json(json).unwrap();
        assert_eq!(config.race_laps, 5);
        assert_eq!(config.turn_rate, 0.1);
        assert_eq!(config.brake_damping, BRAKE_DAMPING);
        assert_eq!(config.markers.len(), 3);
    }

    #[test]
    fn test_forces_override() {
        let json = r#"{"forces": [
            {"name": "drag", "kind": "damping", "factor": 0.9},
            {"name": "wind", "kind": "wind", "vector": [0.5, 0.0]}
        ]}"#;
        let config = RaceConfig::from_json(json).unwrap();
        let wind = Force::Wind {
            vector: Vector::new(0.5, 0.0),
        };
        assert_eq!(config.forces[1].force, wind);
    }

    #[test]
    fn test_rejects_bad_damping() {
        let err = RaceConfig::from_json(r#"{"brake_damping": 1.5}"#).unwrap_err();
        assert!(matches!(err, RaceError::InvalidConfig(_)));

        let json = r#"{"forces": [{"name": "drag", "kind": "damping", "factor": 0.0}]}"#;
        assert!(matches!(RaceConfig::from_json(json), Err(RaceError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_laps_and_bad_json() {
        assert!(matches!(
            RaceConfig::from_json(r#"{"race_laps": 0}"#),
            Err(RaceError::InvalidConfig(_))
        ));
        assert!(matches!(RaceConfig::from_json("{not json"), Err(RaceError::Config(_))));
    }

    #[test]
    fn test_marker_colors_follow_rules() {
        let rules = TrackRules::default();
        assert_eq!(MarkerKind::Finish.color(&rules), Rgb::new(8, 0, 0));
        assert_eq!(MarkerKind::Checkpoint2.color(&rules), Rgb::new(0, 0, 8));
    }
}
