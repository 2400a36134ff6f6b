//! Mini Madness entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement};

    use mini_madness::RaceConfig;
    use mini_madness::RaceError;
    use mini_madness::platform::{KeyState, now_ms};
    use mini_madness::renderer::CanvasRenderer;
    use mini_madness::sim::Race;

    const CANVAS_ID: &str = "canvas1";
    const RESTART_ID: &str = "restartButton";

    struct Game {
        race: Race,
        renderer: CanvasRenderer,
        keys: KeyState,
    }

    impl Game {
        /// Sample the last drawn frame, advance, then draw this one.
        /// `now` is the `requestAnimationFrame` timestamp.
        fn step(&mut self, now: f64) {
            let report = self.race.frame(now, &self.renderer, &self.keys);
            if report.finished {
                let hud = self.race.hud(now);
                log::info!("Finish time {} over {} laps", hud.time, hud.lap);
            }
            if let Err(e) = self.renderer.draw(&self.race, &self.keys, now) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    pub fn run() -> Result<(), RaceError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Mini Madness starting...");

        let window = web_sys::window().ok_or_else(|| RaceError::Js("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| RaceError::Js("no document".into()))?;

        let config = RaceConfig::load();
        let canvas = ensure_canvas(&document, &config)?;
        let renderer = CanvasRenderer::new(&canvas, &config.assets)?;

        let game = Rc::new(RefCell::new(Game {
            race: Race::new(config, now_ms()),
            renderer,
            keys: KeyState::new(),
        }));

        setup_input_handlers(game.clone())?;
        setup_restart_button(&document, game.clone())?;

        log::info!("Init the game");
        request_animation_frame(game);
        log::info!("Ready to play.");
        Ok(())
    }

    /// Use the host page's canvas and restart button, creating them if absent
    fn ensure_canvas(
        document: &Document,
        config: &RaceConfig,
    ) -> Result<HtmlCanvasElement, RaceError> {
        let body = document
            .body()
            .ok_or_else(|| RaceError::Js("no body".into()))?;

        let canvas: HtmlCanvasElement = match document.get_element_by_id(CANVAS_ID) {
            Some(el) => el
                .dyn_into()
                .map_err(|_| RaceError::Js(format!("#{} is not a canvas", CANVAS_ID)))?,
            None => {
                let el: HtmlCanvasElement = document
                    .create_element("canvas")?
                    .dyn_into()
                    .map_err(|_| RaceError::Js("new element is not a canvas".into()))?;
                el.set_id(CANVAS_ID);
                el.set_text_content(Some(
                    "Your browser does not support the element HTML5 Canvas.",
                ));
                body.append_child(&el)?;
                el
            }
        };
        canvas.set_width(config.canvas_width);
        canvas.set_height(config.canvas_height);

        if document.get_element_by_id(RESTART_ID).is_none() {
            body.append_child(&document.create_element("br")?)?;
            let button = document.create_element("button")?;
            button.set_id(RESTART_ID);
            button.set_text_content(Some("Click to restart game"));
            body.append_child(&button)?;
        }

        Ok(canvas)
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), RaceError> {
        let window = web_sys::window().ok_or_else(|| RaceError::Js("no window".into()))?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                if KeyState::is_bound(&key) {
                    // Arrows would scroll the page
                    event.prevent_default();
                }
                game.borrow_mut().keys.key_down(&key);
            });
            window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Blur: no keyup will arrive for keys held while focus leaves
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.release_all();
                log::debug!("Window blur, keys released");
            });
            window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), RaceError> {
        if let Some(btn) = document.get_element_by_id(RESTART_ID) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.race.restart(now_ms());
                g.keys.release_all();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        request_animation_frame(game.clone());
        game.borrow_mut().step(time);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Mini Madness failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mini Madness (native) starting...");
    log::info!("Native mode runs a headless drag strip - use `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Throttle down a painted drag strip without a browser: checkpoint 1,
/// checkpoint 2 and the finish lie straight ahead of the start.
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use mini_madness::RaceConfig;
    use mini_madness::sim::{Control, ControlState, Race, RasterTrack, TrackEvent};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 30;

    pub fn run() {
        let config = RaceConfig::load();
        let start = config.start_position;
        let strip = RasterTrack::drag_strip(
            config.canvas_width,
            config.canvas_height,
            start.y,
            start.x,
            &config.rules,
        );
        let mut race = Race::new(config, 0.0);
        let throttle = ControlState::default().with(Control::Up);

        let mut now = 0.0;
        for frame in 0..MAX_FRAMES {
            now += FRAME_MS;
            let report = race.frame(now, &strip, &throttle);
            match report.event {
                TrackEvent::OffTrack => {
                    log::warn!("Left the road after {} frames", frame);
                    break;
                }
                TrackEvent::LapCompleted(lap) => {
                    log::info!("Lap {} after {} frames", lap, frame);
                    break;
                }
                _ => {}
            }
        }

        let hud = race.hud(now);
        println!("Lap: {}  Time: {}", hud.lap, hud.time);
    }
}
