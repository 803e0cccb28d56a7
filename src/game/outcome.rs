//! Outcome evaluation for tic-tac-toe boards.
//!
//! Pure classification of a board snapshot: won, drawn, or still
//! in progress. The evaluator never mutates state and is safe to
//! call redundantly.

use super::position::Position;
use super::types::{Board, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A winning line on the board.
pub type Line = [Position; 3];

/// The 8 lines that decide a game, in fixed evaluation order:
/// rows top to bottom, columns left to right, then the two diagonals.
///
/// The first complete line in this order is the one reported, which
/// makes the tie-break deterministic for artificially constructed
/// boards with two completed lines.
pub const LINES: [Line; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Terminal classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Game is still in progress.
    Undecided,
    /// A player completed a line.
    Decisive {
        /// The winning player.
        winner: Player,
        /// The completed line, for highlighting.
        line: Line,
    },
    /// Board is full with no completed line.
    Draw,
}

impl Outcome {
    /// Returns true if the board is won or drawn.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Undecided)
    }
}

/// Evaluates a board snapshot.
///
/// Checks each line in [`LINES`] order; the first line where all
/// three squares are occupied by the same player decides the game.
/// A full board with no such line is a draw.
#[instrument]
pub fn evaluate(board: &Board) -> Outcome {
    for line in LINES {
        let [a, b, c] = line;
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            if let Square::Occupied(winner) = sq {
                return Outcome::Decisive { winner, line };
            }
        }
    }

    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Undecided
    }
}
