use std::fmt;

use crate::types::{Cell, Player, Position, Score};

/// Squares along one edge of the board.
pub const BOARD_SIZE: usize = 8;
/// Total number of squares.
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Coordinate outside `[0, BOARD_SIZE)`. An adapter bug, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) is outside the board", self.row, self.col)
    }
}

impl std::error::Error for OutOfRange {}

/// Othello board state as an 8x8 grid of cells.
///
/// Boards are plain values: `with_move` returns a new board and never
/// touches its input, so a caller may keep the previous board around for
/// diffing or animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        let mid = BOARD_SIZE / 2;
        cells[mid - 1][mid - 1] = Cell::Occupied(Player::White);
        cells[mid][mid] = Cell::Occupied(Player::White);
        cells[mid - 1][mid] = Cell::Occupied(Player::Black);
        cells[mid][mid - 1] = Cell::Occupied(Player::Black);
        Self { cells }
    }

    /// Returns the cell at `(row, col)`, or `OutOfRange` off the board.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<Cell, OutOfRange> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(OutOfRange { row, col });
        }
        Ok(self.cells[row][col])
    }

    /// Returns a new board with `(row, col)` and every coordinate in
    /// `flipped` set to `player`'s color. Does not validate legality;
    /// that is the caller's job.
    pub fn with_move(&self, row: usize, col: usize, player: Player, flipped: &[Position]) -> Self {
        let mut next = *self;
        next.cells[row][col] = Cell::Occupied(player);
        for pos in flipped {
            next.cells[pos.row as usize][pos.col as usize] = Cell::Occupied(player);
        }
        next
    }

    /// Returns every opponent disc that placing `player` at `(row, col)`
    /// would flip, across all 8 directions.
    ///
    /// Caller contract: `(row, col)` should be an empty square; occupied or
    /// off-board targets yield no captures.
    pub fn captured_cells(&self, row: usize, col: usize, player: Player) -> Vec<Position> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Vec::new();
        }
        if self.cells[row][col] != Cell::Empty {
            return Vec::new();
        }

        let opponent = player.opponent();
        let mut captured = Vec::new();

        for (dr, dc) in DIRECTIONS {
            let mut r = row as i32 + dr;
            let mut c = col as i32 + dc;
            let mut line: Vec<Position> = Vec::new();

            while in_bounds(r, c) {
                match self.cells[r as usize][c as usize] {
                    Cell::Occupied(p) if p == opponent => {
                        line.push(Position {
                            row: r as u8,
                            col: c as u8,
                        });
                    }
                    Cell::Occupied(_) => {
                        // Own disc terminates the line; commit the run.
                        captured.append(&mut line);
                        break;
                    }
                    Cell::Empty => break,
                }

                r += dr;
                c += dc;
            }
            // Walking off the edge discards the tentative run.
        }

        captured
    }

    /// A legal move is an empty square that captures at least one disc.
    pub fn is_legal_move(&self, row: usize, col: usize, player: Player) -> bool {
        self.cell_at(row, col) == Ok(Cell::Empty)
            && !self.captured_cells(row, col, player).is_empty()
    }

    /// Returns all legal moves for `player`, in row-major order.
    pub fn legal_moves(&self, player: Player) -> Vec<Position> {
        let mut moves = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.is_legal_move(row, col, player) {
                    moves.push(Position {
                        row: row as u8,
                        col: col as u8,
                    });
                }
            }
        }
        moves
    }

    /// Recomputes disc counts from the cells.
    pub fn score(&self) -> Score {
        let mut score = Score { black: 0, white: 0 };
        for row in &self.cells {
            for cell in row {
                match cell {
                    Cell::Occupied(Player::Black) => score.black += 1,
                    Cell::Occupied(Player::White) => score.white += 1,
                    Cell::Empty => {}
                }
            }
        }
        score
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        NUM_CELLS as u8 - self.score().total()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_CELLS] {
        let mut board = [0u8; NUM_CELLS];
        for (pos, cell) in board.iter_mut().enumerate() {
            *cell = match self.cells[pos / BOARD_SIZE][pos % BOARD_SIZE] {
                Cell::Empty => 0,
                Cell::Occupied(player) => player.code(),
            };
        }
        board
    }

    /// Test constructor: one &str per row, '.'=empty, 'B'=black, 'W'=white,
    /// spaces ignored.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in rows.iter().enumerate() {
            let mut c = 0;
            for ch in row.chars() {
                match ch {
                    '.' => c += 1,
                    'B' => {
                        cells[r][c] = Cell::Occupied(Player::Black);
                        c += 1;
                    }
                    'W' => {
                        cells[r][c] = Cell::Occupied(Player::White);
                        c += 1;
                    }
                    ' ' => {}
                    _ => panic!("bad board char: {ch}"),
                }
            }
            assert_eq!(c, BOARD_SIZE, "row {r} has {c} cells");
        }
        Self { cells }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
