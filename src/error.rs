//! Error types for configuration and browser glue
//!
//! Gameplay itself never fails; leaving the track is a rule, not an error.

/// Errors surfaced by configuration loading and the browser layer.
#[derive(Debug, thiserror::Error)]
pub enum RaceError {
    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("browser call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for RaceError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        RaceError::Js(format!("{:?}", value))
    }
}
