//! wasm-bindgen session handle
//!
//! The host page owns drawing and the animation loop. It forwards key and
//! pointer events here and calls `frame` from `requestAnimationFrame`,
//! drawing the returned JSON snapshot.

use wasm_bindgen::prelude::*;

use crate::config::{SimConfig, Variant};
use crate::persistence::LocalStorage;
use crate::platform::frame_seconds;
use crate::platform::input::InputState;
use crate::session::Session;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Paddle Rush loaded");
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session<LocalStorage>,
    input: InputState,
}

#[wasm_bindgen]
impl WebSession {
    /// `variant` is a preset name; unknown names fall back to survival
    #[wasm_bindgen(constructor)]
    pub fn new(variant: &str) -> WebSession {
        let variant = Variant::from_str(variant).unwrap_or_else(|| {
            log::warn!("Unknown variant {:?}, using survival", variant);
            Variant::Survival
        });
        let seed = js_sys::Date::now() as u64;
        log::info!("Starting {} session with seed {}", variant.as_str(), seed);
        WebSession {
            session: Session::new(SimConfig::for_variant(variant), LocalStorage::new(), seed),
            input: InputState::new(),
        }
    }

    /// Returns true if the key is bound (so the page can preventDefault)
    pub fn key_down(&mut self, code: &str) -> bool {
        self.input.key_down(code)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.input.key_up(code)
    }

    pub fn pointer_down(&mut self) {
        self.input.pointer_down();
    }

    pub fn blur(&mut self) {
        self.input.reset();
    }

    /// Advance one frame and return the JSON snapshot to draw, with this
    /// frame's events attached
    pub fn frame(&mut self, delta_ms: f64) -> String {
        let input = self.input.frame_input();
        let report = self.session.frame(&input, frame_seconds(delta_ms));
        if report.ended {
            log::info!("Game over, score {}", self.session.state().score);
        }
        let snapshot = self.session.snapshot().with_events(report.events);
        snapshot.to_json().unwrap_or_else(|err| {
            log::error!("Snapshot encode failed: {}", err);
            String::from("{}")
        })
    }

    pub fn is_over(&self) -> bool {
        self.session.is_over()
    }

    pub fn restart(&mut self) {
        self.input.reset();
        self.session.restart(js_sys::Date::now() as u64);
    }

    pub fn score(&self) -> f64 {
        self.session.state().score as f64
    }

    pub fn high_score(&self) -> f64 {
        self.session.high_score() as f64
    }
}
