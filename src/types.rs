use std::fmt;

use serde::Serialize;

/// Wire code for the black player at the wasm boundary.
pub const PLAYER_BLACK: u8 = 1;
/// Wire code for the white player at the wasm boundary.
pub const PLAYER_WHITE: u8 = 2;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Returns the other player. Involutive: `p.opponent().opponent() == p`.
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Converts to the wire code (1=black, 2=white).
    pub fn code(self) -> u8 {
        match self {
            Player::Black => PLAYER_BLACK,
            Player::White => PLAYER_WHITE,
        }
    }

    /// Parses a wire code. Returns `None` for anything but 1 or 2.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            PLAYER_BLACK => Some(Player::Black),
            PLAYER_WHITE => Some(Player::White),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

/// Disc counts, always recomputed from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub black: u8,
    pub white: u8,
}

impl Score {
    pub fn total(self) -> u8 {
        self.black + self.white
    }
}

/// Session lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Entry,
    Playing,
    Finished,
}

/// Final result of a finished game. A draw is its own value, never
/// attributed to either player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// Why a move request was turned down. Rejections are ordinary return
/// values; they never change the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    GameNotPlaying,
    OutOfTurn,
    OutOfRange,
    NotEmpty,
    NoCapture,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::GameNotPlaying => write!(f, "game is not in the playing phase"),
            RejectReason::OutOfTurn => write!(f, "it is not that player's turn"),
            RejectReason::OutOfRange => write!(f, "row/col out of range"),
            RejectReason::NotEmpty => write!(f, "target cell is already occupied"),
            RejectReason::NoCapture => write!(f, "move would capture nothing"),
        }
    }
}

/// Session setup errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// A player name is missing.
    InvalidNames,
    /// `start` was called outside the entry phase.
    NotInEntry,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidNames => write!(f, "both player names must be non-empty"),
            SessionError::NotInEntry => write!(f, "session is not in the entry phase"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Read-only snapshot of a session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// Row-major cells: 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: Player,
    pub black_name: String,
    pub white_name: String,
    pub score: Score,
    pub legal_moves: Vec<Position>,
    pub phase: GamePhase,
    /// Contract:
    /// - `true` when the previous transition included a forced pass.
    /// - `false` when the previous transition was a normal move.
    pub is_pass: bool,
    /// Set once the game is finished.
    pub outcome: Option<Outcome>,
}
