//! In-memory RGB track image
//!
//! Stands in for the canvas when there is no browser: the headless demo and
//! tests paint a track here and let the vehicle sample it.

use super::track::{PixelSource, Rgb, TrackRules};

/// Off-road color for painted test tracks
pub const GRASS: Rgb = Rgb::new(40, 140, 40);
/// Half the road width of a painted strip
const STRIP_HALF_WIDTH: i64 = 22;
/// Gap between the start and each successive marker on a strip
const STRIP_MARKER_SPACING: f32 = 100.0;
const STRIP_MARKER_WIDTH: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct RasterTrack {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl RasterTrack {
    /// A track image filled with one color
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn set(&mut self, x: i64, y: i64, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Fill an axis-aligned rectangle, clipped to the image
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Rgb) {
        for py in y..y + h {
            for px in x..x + w {
                self.set(px, py, color);
            }
        }
    }

    /// Paint a vertical marker line `line_width` wide, centered on `x`,
    /// from `y0` to `y1` (matches a stroked canvas path with butt caps)
    pub fn vertical_line(&mut self, x: f32, y0: f32, y1: f32, line_width: f32, color: Rgb) {
        let left = (x - line_width / 2.0).floor() as i64;
        let right = (x + line_width / 2.0).ceil() as i64;
        let top = y0.min(y1).floor() as i64;
        let bottom = y0.max(y1).ceil() as i64;
        self.fill_rect(left, top, right - left, bottom - top, color);
    }

    /// A straight road along `lane_y` from the left edge, with checkpoint 1,
    /// checkpoint 2 and the finish painted across it ahead of `start_x`, in
    /// driving order for a car heading +x.
    pub fn drag_strip(
        width: u32,
        height: u32,
        lane_y: f32,
        start_x: f32,
        rules: &TrackRules,
    ) -> Self {
        let mut track = Self::new(width, height, GRASS);
        let lane = lane_y.round() as i64;
        track.fill_rect(
            0,
            lane - STRIP_HALF_WIDTH,
            width as i64,
            2 * STRIP_HALF_WIDTH,
            Rgb::BLACK,
        );

        let markers = [rules.checkpoint_1, rules.checkpoint_2, rules.finish];
        for (i, color) in markers.into_iter().enumerate() {
            let x = start_x + STRIP_MARKER_SPACING * (i as f32 + 1.0);
            track.vertical_line(
                x,
                lane_y - STRIP_HALF_WIDTH as f32,
                lane_y + STRIP_HALF_WIDTH as f32,
                STRIP_MARKER_WIDTH,
                color,
            );
        }
        track
    }
}

impl PixelSource for RasterTrack {
    /// Outside the image reads as transparent black, like canvas read-back
    fn pixel_at(&self, x: f32, y: f32) -> Option<Rgb> {
        Some(self.get(x.floor() as i64, y.floor() as i64).unwrap_or(Rgb::BLACK))
    }
}
