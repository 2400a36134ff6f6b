//! Canvas 2D renderer and pixel read-back
//!
//! Images are created once here; the frame path only blits them.
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use std::cell::Cell;
use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::*;
use crate::config::{AssetPaths, MarkerLine};
use crate::error::RaceError;
use crate::sim::{Control, InputState, PixelSource, Race, Rgb, TrackRules, Vehicle};

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    background: HtmlImageElement,
    car: HtmlImageElement,
    exhaust: HtmlImageElement,
    /// Read-back failures are reported once, not every frame
    readback_warned: Cell<bool>,
}

fn load_image(src: &str) -> Result<HtmlImageElement, RaceError> {
    let image = HtmlImageElement::new()?;
    image.set_src(src);
    Ok(image)
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, assets: &AssetPaths) -> Result<Self, RaceError> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| RaceError::Js("canvas has no 2d context".into()))?
            .dyn_into()
            .map_err(|_| RaceError::Js("2d context has unexpected type".into()))?;

        ctx.set_line_width(1.0);
        ctx.set_stroke_style_str("hsla(0,0%,100%,1)");

        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            background: load_image(&assets.background)?,
            car: load_image(&assets.car)?,
            exhaust: load_image(&assets.exhaust)?,
            readback_warned: Cell::new(false),
        })
    }

    /// Draw the full scene: track, HUD, car
    pub fn draw(&self, race: &Race, input: &impl InputState, now_ms: f64) -> Result<(), JsValue> {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        self.draw_track(&race.config.markers, &race.config.rules)?;
        self.draw_hud(&race.hud(now_ms))?;
        self.draw_vehicle(&race.vehicle, input)?;
        Ok(())
    }

    fn draw_track(&self, markers: &[MarkerLine], rules: &TrackRules) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.draw_image_with_html_image_element(&self.background, 0.0, 0.0)?;

        for marker in markers {
            ctx.begin_path();
            ctx.move_to(marker.x as f64, marker.y0 as f64);
            ctx.line_to(marker.x as f64, marker.y1 as f64);
            ctx.set_stroke_style_str(&marker.kind.color(rules).to_css());
            ctx.set_line_width(marker.line_width as f64);
            ctx.stroke();
        }

        ctx.restore();
        Ok(())
    }

    fn draw_hud(&self, hud: &Hud) -> Result<(), JsValue> {
        let ctx = &self.ctx;

        ctx.save();
        ctx.set_stroke_style_str(OUTLINE_COLOR);
        ctx.set_line_width(10.0);
        ctx.set_font(TITLE_FONT);
        ctx.stroke_text(TITLE, TITLE_POS.0, TITLE_POS.1)?;
        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.fill_text(TITLE, TITLE_POS.0, TITLE_POS.1)?;
        ctx.restore();

        let (lap, time) = hud_lines(hud);
        ctx.save();
        ctx.set_stroke_style_str(OUTLINE_COLOR);
        ctx.set_line_width(2.0);
        ctx.set_font(HUD_FONT);
        ctx.stroke_text(&lap, LAP_POS.0, LAP_POS.1)?;
        ctx.stroke_text(&time, TIME_POS.0, TIME_POS.1)?;
        ctx.set_fill_style_str(hud_fill(hud));
        ctx.fill_text(&lap, LAP_POS.0, LAP_POS.1)?;
        ctx.fill_text(&time, TIME_POS.0, TIME_POS.1)?;
        ctx.restore();

        Ok(())
    }

    fn draw_vehicle(&self, vehicle: &Vehicle, input: &impl InputState) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let half_height = vehicle.height as f64 / 2.0;

        ctx.save();
        ctx.translate(vehicle.position.x as f64, vehicle.position.y as f64)?;
        ctx.rotate(vehicle.sprite_rotation() as f64)?;
        ctx.scale(SPRITE_SCALE, SPRITE_SCALE)?;

        ctx.begin_path();
        if input.is_active(Control::Up) {
            ctx.draw_image_with_html_image_element(
                &self.exhaust,
                EXHAUST_SPRITE_OFFSET.0,
                EXHAUST_SPRITE_OFFSET.1,
            )?;
        }
        if input.is_active(Control::Down) {
            ctx.move_to(half_height + 4.0, BRAKE_ARC_Y);
            let radius = half_height + 2.0;
            ctx.arc_with_anticlockwise(0.0, BRAKE_ARC_Y, radius, PI, 2.0 * PI, true)?;
        }
        ctx.set_stroke_style_str(BRAKE_LIGHT_COLOR);
        ctx.set_line_width(5.0);
        ctx.stroke();

        ctx.draw_image_with_html_image_element(
            &self.car,
            CAR_SPRITE_OFFSET.0,
            CAR_SPRITE_OFFSET.1,
        )?;
        ctx.restore();
        Ok(())
    }
}

impl PixelSource for CanvasRenderer {
    fn pixel_at(&self, x: f32, y: f32) -> Option<Rgb> {
        match self.ctx.get_image_data(x as f64, y as f64, 1.0, 1.0) {
            Ok(image) => {
                let data = image.data();
                match data.get(0..3) {
                    Some(&[r, g, b]) => Some(Rgb::new(r, g, b)),
                    _ => None,
                }
            }
            Err(e) => {
                if !self.readback_warned.replace(true) {
                    log::warn!("Pixel read-back failed: {:?}", e);
                }
                None
            }
        }
    }
}
