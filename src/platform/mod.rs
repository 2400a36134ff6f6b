//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard state (fed by keydown/keyup on web)
//! - Frame time source

pub mod keyboard;

pub use keyboard::KeyState;

/// Milliseconds on the same monotonic clock as `requestAnimationFrame`
/// timestamps (`performance.now()`)
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
