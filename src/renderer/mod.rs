//! Canvas 2D rendering module
//!
//! Layout and text are platform-free; the drawing itself needs a browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::Hud;

/// Title position and style
pub const TITLE: &str = "Mini-Madness";
pub const TITLE_POS: (f64, f64) = (580.0, 60.0);
pub const TITLE_FONT: &str = "bold 30px Arial";

/// HUD line positions
pub const LAP_POS: (f64, f64) = (630.0, 100.0);
pub const TIME_POS: (f64, f64) = (600.0, 140.0);
pub const HUD_FONT: &str = "bold 25px Arial";

pub const OUTLINE_COLOR: &str = "#00FF00";
pub const TEXT_COLOR: &str = "#003300";
pub const FINISHED_TEXT_COLOR: &str = "#FF0000";
pub const BRAKE_LIGHT_COLOR: &str = "#990000";

/// Sprite is drawn at half size
pub const SPRITE_SCALE: f64 = 0.5;
/// Sprite offsets in the car's local (rotated, unscaled) frame
pub const CAR_SPRITE_OFFSET: (f64, f64) = (-16.0, 1.0);
pub const EXHAUST_SPRITE_OFFSET: (f64, f64) = (-16.0, 40.0);
/// Brake light arc center y in the car's local frame
pub const BRAKE_ARC_Y: f64 = 46.0;

/// The two HUD lines: lap count and stopwatch
pub fn hud_lines(hud: &Hud) -> (String, String) {
    (format!("Lap: {}", hud.lap), format!("Time: {}", hud.time))
}

/// Fill color for the HUD text (red once the clock stopped)
pub fn hud_fill(hud: &Hud) -> &'static str {
    if hud.finished {
        FINISHED_TEXT_COLOR
    } else {
        TEXT_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_lines() {
        let hud = Hud {
            lap: 2,
            time: "0:41:3".to_string(),
            finished: false,
        };
        assert_eq!(hud_lines(&hud), ("Lap: 2".to_string(), "Time: 0:41:3".to_string()));
        assert_eq!(hud_fill(&hud), TEXT_COLOR);
    }

    #[test]
    fn test_finished_hud_is_red() {
        let hud = Hud {
            lap: 3,
            time: "1:2:3".to_string(),
            finished: true,
        };
        assert_eq!(hud_fill(&hud), FINISHED_TEXT_COLOR);
    }
}
