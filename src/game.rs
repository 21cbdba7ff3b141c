use crate::board::Board;
use crate::types::{
    Cell, GamePhase, GameView, Outcome, Player, Position, RejectReason, Score, SessionError,
};

/// Result of a move request.
///
/// Rejections are expected, frequent outcomes, not faults; the adapter
/// decides what feedback to give. The session that produced a rejection is
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum MoveOutcome {
    Applied(GameSession),
    Rejected(RejectReason),
}

/// One play-through of a game: board, turn order, phase, and player names.
///
/// Sessions are values. Every accepted move returns a new session and leaves
/// the old one intact, so the adapter can diff successive states for
/// animation. All derived state (score, legal moves) is recomputed from the
/// board, never kept as independent truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    phase: GamePhase,
    black_name: String,
    white_name: String,
    legal_moves: Vec<Position>,
    is_pass: bool,
    outcome: Option<Outcome>,
}

impl GameSession {
    /// Creates a session in the entry phase, waiting for player names.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Black,
            phase: GamePhase::Entry,
            black_name: String::new(),
            white_name: String::new(),
            legal_moves: Vec::new(),
            is_pass: false,
            outcome: None,
        }
    }

    /// Creates a started session directly from two names.
    pub fn with_players(black_name: &str, white_name: &str) -> Result<Self, SessionError> {
        Self::new()
            .with_player_name(Player::Black, black_name)
            .with_player_name(Player::White, white_name)
            .start()
    }

    /// Sets a display name. Names are only writable during entry; outside
    /// that phase the session comes back unchanged.
    pub fn with_player_name(&self, player: Player, name: &str) -> Self {
        let mut next = self.clone();
        if self.phase == GamePhase::Entry {
            match player {
                Player::Black => next.black_name = name.to_string(),
                Player::White => next.white_name = name.to_string(),
            }
        }
        next
    }

    /// Entry -> Playing. Requires both names to be non-empty; black moves
    /// first.
    pub fn start(&self) -> Result<Self, SessionError> {
        if self.phase != GamePhase::Entry {
            return Err(SessionError::NotInEntry);
        }
        if self.black_name.is_empty() || self.white_name.is_empty() {
            return Err(SessionError::InvalidNames);
        }

        let mut next = self.clone();
        next.phase = GamePhase::Playing;
        next.current_player = Player::Black;
        next.legal_moves = next.board.legal_moves(Player::Black);
        Ok(next)
    }

    /// Requests a move by `player` at `(row, col)`.
    ///
    /// Validation runs in order: phase, turn, range, emptiness, capture.
    /// On success the placement and all flips apply atomically, the turn
    /// alternates, and any forced pass or termination is resolved before
    /// the new session is returned.
    pub fn attempt_move(&self, player: Player, row: u8, col: u8) -> MoveOutcome {
        if self.phase != GamePhase::Playing {
            return MoveOutcome::Rejected(RejectReason::GameNotPlaying);
        }
        if player != self.current_player {
            return MoveOutcome::Rejected(RejectReason::OutOfTurn);
        }
        let (row, col) = (row as usize, col as usize);
        let cell = match self.board.cell_at(row, col) {
            Ok(cell) => cell,
            Err(_) => return MoveOutcome::Rejected(RejectReason::OutOfRange),
        };
        if cell != Cell::Empty {
            return MoveOutcome::Rejected(RejectReason::NotEmpty);
        }
        let captured = self.board.captured_cells(row, col, player);
        if captured.is_empty() {
            return MoveOutcome::Rejected(RejectReason::NoCapture);
        }

        let mut next = self.clone();
        next.board = self.board.with_move(row, col, player, &captured);
        next.is_pass = false;

        debug_assert_eq!(
            next.board.score().total(),
            self.board.score().total() + 1,
            "a move must occupy exactly one new cell"
        );

        next.advance_turn(player.opponent());
        MoveOutcome::Applied(next)
    }

    /// Hands the turn to `to`, resolving forced passes and termination.
    fn advance_turn(&mut self, to: Player) {
        self.current_player = to;
        self.legal_moves = self.board.legal_moves(to);

        if self.board.is_full() {
            self.finish();
            return;
        }

        if self.legal_moves.is_empty() {
            // Forced pass: the turn goes straight back without a placement.
            let back = to.opponent();
            let moves = self.board.legal_moves(back);
            if moves.is_empty() {
                // Neither side can move: the game ends even with empty
                // cells left.
                self.finish();
                return;
            }
            self.current_player = back;
            self.legal_moves = moves;
            self.is_pass = true;
        }
    }

    fn finish(&mut self) {
        self.phase = GamePhase::Finished;
        self.legal_moves.clear();
        let score = self.board.score();
        self.outcome = Some(if score.black > score.white {
            Outcome::Winner(Player::Black)
        } else if score.white > score.black {
            Outcome::Winner(Player::White)
        } else {
            Outcome::Draw
        });
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> Score {
        self.board.score()
    }

    /// Legal moves for the current player. Empty outside the playing phase.
    pub fn legal_moves(&self) -> &[Position] {
        &self.legal_moves
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::Black => &self.black_name,
            Player::White => &self.white_name,
        }
    }

    /// Read-only snapshot for rendering.
    pub fn view(&self) -> GameView {
        GameView {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player,
            black_name: self.black_name.clone(),
            white_name: self.white_name.clone(),
            score: self.board.score(),
            legal_moves: self.legal_moves.clone(),
            phase: self.phase,
            is_pass: self.is_pass,
            outcome: self.outcome,
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Player) {
        self.board = board;
        self.current_player = current_player;
        self.phase = GamePhase::Playing;
        self.legal_moves = board.legal_moves(current_player);
        self.is_pass = false;
        self.outcome = None;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> GameSession {
        GameSession::with_players("Ada", "Grace").unwrap()
    }

    fn apply(session: &GameSession, player: Player, row: u8, col: u8) -> GameSession {
        match session.attempt_move(player, row, col) {
            MoveOutcome::Applied(next) => next,
            MoveOutcome::Rejected(reason) => panic!("move ({row},{col}) rejected: {reason}"),
        }
    }

    #[test]
    fn entry_requires_both_names() {
        let session = GameSession::new();
        assert_eq!(session.phase(), GamePhase::Entry);
        assert_eq!(session.start(), Err(SessionError::InvalidNames));

        let session = session.with_player_name(Player::Black, "Ada");
        assert_eq!(session.start(), Err(SessionError::InvalidNames));

        let session = session.with_player_name(Player::White, "Grace");
        let started = session.start().unwrap();
        assert_eq!(started.phase(), GamePhase::Playing);
        assert_eq!(started.current_player(), Player::Black);
        assert_eq!(started.legal_moves().len(), 4);
    }

    #[test]
    fn start_is_rejected_outside_entry() {
        let session = started();
        assert_eq!(session.start(), Err(SessionError::NotInEntry));
    }

    #[test]
    fn names_are_immutable_once_playing() {
        let session = started();
        let renamed = session.with_player_name(Player::Black, "Mallory");

        assert_eq!(renamed.player_name(Player::Black), "Ada");
        assert_eq!(renamed, session);
    }

    #[test]
    fn moves_before_start_are_rejected() {
        let session = GameSession::new();
        assert_eq!(
            session.attempt_move(Player::Black, 2, 3),
            MoveOutcome::Rejected(RejectReason::GameNotPlaying)
        );
    }

    #[test]
    fn t02_illegal_move_requests_leave_the_session_unchanged() {
        let session = started();

        let cases = [
            (Player::White, 2, 3, RejectReason::OutOfTurn),
            (Player::Black, 8, 0, RejectReason::OutOfRange),
            (Player::Black, 3, 3, RejectReason::NotEmpty),
            (Player::Black, 0, 0, RejectReason::NoCapture),
        ];
        for (player, row, col, expected) in cases {
            assert_eq!(
                session.attempt_move(player, row, col),
                MoveOutcome::Rejected(expected),
                "({row},{col})"
            );
        }

        // Rejection round-trip: the session is value-identical.
        assert_eq!(session, started());
    }

    #[test]
    fn accepted_move_flips_discs_and_alternates_the_turn() {
        let session = started();
        let next = apply(&session, Player::Black, 2, 3);

        assert_eq!(next.current_player(), Player::White);
        assert_eq!(next.score(), Score { black: 4, white: 1 });
        assert_eq!(next.score().total(), session.score().total() + 1);
        assert!(!next.view().is_pass);
        // The prior session is untouched.
        assert_eq!(session.score(), Score { black: 2, white: 2 });
        assert_eq!(session.current_player(), Player::Black);
    }

    #[test]
    fn capture_accounting_balances_across_a_move() {
        let session = started();
        let captured = session.board().captured_cells(2, 3, Player::Black);
        let before = session.score();

        let next = apply(&session, Player::Black, 2, 3);
        let after = next.score();

        let flips = captured.len() as u8;
        assert_eq!(after.black, before.black + 1 + flips);
        assert_eq!(after.white, before.white - flips);
    }

    #[test]
    fn t03_forced_pass_hands_the_turn_back_without_a_board_change() {
        // After black plays (0,2), white's lone disc at (2,0) has no legal
        // reply, so the turn passes straight back to black.
        let board = Board::from_rows([
            "B W . . . . . .",
            "B . . . . . . .",
            "W . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
        ]);
        let mut session = started();
        session.set_board_for_test(board, Player::Black);

        let next = apply(&session, Player::Black, 0, 2);

        assert_eq!(next.phase(), GamePhase::Playing);
        assert_eq!(next.current_player(), Player::Black);
        assert!(next.view().is_pass);
        assert_eq!(next.score(), Score { black: 4, white: 1 });
        assert_eq!(next.legal_moves(), [Position { row: 3, col: 0 }]);
    }

    #[test]
    fn t04_double_pass_ends_game_with_empty_cells_left() {
        // Continues the forced-pass position: black captures white's last
        // disc, after which neither side has a move although 58 cells are
        // still empty.
        let board = Board::from_rows([
            "B W . . . . . .",
            "B . . . . . . .",
            "W . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
        ]);
        let mut session = started();
        session.set_board_for_test(board, Player::Black);

        let next = apply(&session, Player::Black, 0, 2);
        let next = apply(&next, Player::Black, 3, 0);

        assert_eq!(next.phase(), GamePhase::Finished);
        assert_eq!(next.outcome(), Some(Outcome::Winner(Player::Black)));
        assert_eq!(next.score(), Score { black: 6, white: 0 });
        assert!(!next.board().is_full());
        assert!(next.legal_moves().is_empty());
    }

    #[test]
    fn t05_filling_the_board_finishes_the_game_with_a_winner() {
        // Full board minus (0,0); black's final move flips one white disc.
        let board = Board::from_rows([
            ". W B B B B B B",
            "B B B B B B B B",
            "B B B B B B B B",
            "B B B B B B B B",
            "B W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W W",
        ]);
        let mut session = started();
        session.set_board_for_test(board, Player::Black);

        let next = apply(&session, Player::Black, 0, 0);

        assert_eq!(next.phase(), GamePhase::Finished);
        assert!(next.board().is_full());
        assert_eq!(next.score(), Score { black: 33, white: 31 });
        assert_eq!(next.outcome(), Some(Outcome::Winner(Player::Black)));
    }

    #[test]
    fn a_full_board_with_equal_counts_is_a_draw() {
        let board = Board::from_rows([
            ". W B B B B B B",
            "B B B B B B B B",
            "B B B B B B B B",
            "B B B B B B B B",
            "W W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W W",
        ]);
        let mut session = started();
        session.set_board_for_test(board, Player::Black);

        let next = apply(&session, Player::Black, 0, 0);

        assert_eq!(next.phase(), GamePhase::Finished);
        assert_eq!(next.score(), Score { black: 32, white: 32 });
        assert_eq!(next.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn moves_after_the_game_finished_are_rejected() {
        let board = Board::from_rows([
            ". W B B B B B B",
            "B B B B B B B B",
            "B B B B B B B B",
            "B B B B B B B B",
            "W W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W W",
            "W W W W W W W W",
        ]);
        let mut session = started();
        session.set_board_for_test(board, Player::Black);
        let finished = apply(&session, Player::Black, 0, 0);

        assert_eq!(
            finished.attempt_move(Player::White, 0, 0),
            MoveOutcome::Rejected(RejectReason::GameNotPlaying)
        );
    }

    #[test]
    fn view_reflects_the_session() {
        let session = started();
        let view = session.view();

        assert_eq!(view.black_name, "Ada");
        assert_eq!(view.white_name, "Grace");
        assert_eq!(view.current_player, Player::Black);
        assert_eq!(view.phase, GamePhase::Playing);
        assert_eq!(view.score, Score { black: 2, white: 2 });
        assert_eq!(view.legal_moves.len(), 4);
        assert_eq!(view.board.len(), 64);
        assert_eq!(view.outcome, None);
        assert!(!view.is_pass);
    }
}
