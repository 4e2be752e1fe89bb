//! Browser bindings
//!
//! JS owns rendering and input. It calls `update` from `requestAnimationFrame`,
//! forwards marker clicks, and redraws from `snapshot`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::driver::Game;
use crate::format_elapsed;
use crate::settings::Settings;
use crate::sim::{ActivationOutcome, Phase};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Number Rush starting...");
}

/// One marker as the renderer needs it (pixels, top-left)
#[derive(Serialize)]
struct MarkerView {
    id: u32,
    x: f32,
    y: f32,
    flashing: bool,
}

/// Everything needed to draw a frame
#[derive(Serialize)]
struct FrameView {
    status: &'static str,
    start_label: &'static str,
    time: String,
    phase: Phase,
    expected_next: u32,
    markers: Vec<MarkerView>,
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// Build from optional settings JSON
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<WebGame, JsValue> {
        let mut settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Settings::default(),
        };
        if settings.seed.is_none() {
            settings.seed = Some(js_sys::Date::now() as u64);
        }
        Ok(WebGame {
            game: Game::new(settings),
        })
    }

    pub fn restart(&mut self) {
        self.game.restart();
    }

    /// Returns false if the click ended the game
    pub fn click(&mut self, id: u32) -> bool {
        self.game.click(id) != ActivationOutcome::GameOver
    }

    pub fn update(&mut self, dt: f64) {
        self.game.update(dt);
    }

    /// Raw "Points" input; negative or NaN is ignored
    pub fn set_marker_count(&mut self, count: f64) -> bool {
        self.game.set_marker_count_from_input(count)
    }

    /// Frame description as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        let state = self.game.state();
        let field = glam::Vec2::new(FIELD_WIDTH, FIELD_HEIGHT);
        let view = FrameView {
            status: state.status().label(),
            start_label: state.start_label(),
            time: format_elapsed(state.elapsed),
            phase: state.phase(),
            expected_next: state.expected_next,
            markers: state
                .markers
                .iter()
                .map(|m| {
                    let px = m.to_field(field);
                    MarkerView {
                        id: m.id,
                        x: px.x,
                        y: px.y,
                        flashing: state.is_flashing(m.id),
                    }
                })
                .collect(),
        };
        serde_json::to_string(&view).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
