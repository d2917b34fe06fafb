use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::input::{decode_key, SwipeTracker};
use crate::session::{MoveStatus, Session, SessionConfig};
use crate::storage::LocalStorageStore;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Browser-facing game. The page forwards keyboard and touch events, waits
/// `settle_delay_ms()` while `is_moving()` and then calls `settle()`, and
/// draws whatever `tiles_json()` returns after each call.
#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorageStore>,
    swipe: SwipeTracker,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>) -> WebGame {
        init_panic_hook();

        let seed = seed.unwrap_or_else(|| {
            (js_sys::Math::random() * (u64::MAX as f64)) as u64
        });

        console::log_1(&format!("Using seed: {}", seed).into());

        let config = SessionConfig {
            seed: Some(seed),
            ..Default::default()
        };

        WebGame {
            session: Session::new(config, LocalStorageStore::new()),
            swipe: SwipeTracker::new(),
        }
    }

    /// Returns whether the key is one of the arrow keys, so the page can
    /// suppress scrolling.
    #[wasm_bindgen]
    pub fn key_down(&mut self, key: &str) -> bool {
        match decode_key(key) {
            Some(direction) => {
                self.session.begin_move(direction);
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn touch_start(&mut self, x: f32, y: f32) {
        let accepting = self.session.accepts_input();
        self.swipe.start(x, y, accepting);
    }

    #[wasm_bindgen]
    pub fn touch_move(&mut self, x: f32, y: f32) {
        self.swipe.track(x, y);
    }

    /// Returns whether the swipe started a move.
    #[wasm_bindgen]
    pub fn touch_end(&mut self) -> bool {
        match self.swipe.end() {
            Some(direction) => self.session.begin_move(direction) == MoveStatus::Sliding,
            None => false,
        }
    }

    /// Returns whether a pending move was committed.
    #[wasm_bindgen]
    pub fn settle(&mut self) -> bool {
        match self.session.settle() {
            Some(report) => {
                if report.game_over {
                    console::log_1(&format!("Game over, score {}", self.session.score()).into());
                }
                true
            }
            None => false,
        }
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.swipe.cancel();
        self.session.reset();
    }

    #[wasm_bindgen]
    pub fn score(&self) -> u32 {
        self.session.score()
    }

    #[wasm_bindgen]
    pub fn best_score(&self) -> u32 {
        self.session.best_score()
    }

    #[wasm_bindgen]
    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    #[wasm_bindgen]
    pub fn is_moving(&self) -> bool {
        self.session.is_moving()
    }

    #[wasm_bindgen]
    pub fn settle_delay_ms(&self) -> u32 {
        self.session.settle_delay().as_millis() as u32
    }

    /// Current tiles as a JSON array of `{id, value, row, col, flags}`.
    #[wasm_bindgen]
    pub fn tiles_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.session.tiles())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
