use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::{GameSession, MoveOutcome};
use crate::types::{Player, RejectReason};

/// Outcome of a move request, serialized across the wasm boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub applied: bool,
    /// Contract:
    /// - `None` when the move was applied.
    /// - The reject reason when it was not.
    pub reason: Option<RejectReason>,
}

/// JS-facing handle to one game session.
///
/// The wrapper owns the session and swaps it on every applied move; the
/// core stays purely functional underneath.
#[wasm_bindgen]
pub struct Session {
    inner: GameSession,
}

#[wasm_bindgen]
impl Session {
    /// Creates a started session. Errors if either name is empty.
    #[wasm_bindgen(constructor)]
    pub fn new(black_name: String, white_name: String) -> Result<Session, JsValue> {
        let inner = GameSession::with_players(&black_name, &white_name)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Session { inner })
    }

    /// Requests a move for `player` (1=black, 2=white) at `(row, col)`.
    /// Returns a serialized [`MoveReport`].
    pub fn attempt_move(&mut self, player: u8, row: u8, col: u8) -> Result<JsValue, JsValue> {
        let player = Player::from_code(player)
            .ok_or_else(|| JsValue::from_str("invalid player code"))?;

        let report = match self.inner.attempt_move(player, row, col) {
            MoveOutcome::Applied(next) => {
                self.inner = next;
                MoveReport {
                    applied: true,
                    reason: None,
                }
            }
            MoveOutcome::Rejected(reason) => MoveReport {
                applied: false,
                reason: Some(reason),
            },
        };

        serde_wasm_bindgen::to_value(&report).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Returns the serialized [`crate::types::GameView`] snapshot.
    pub fn view(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.view())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
