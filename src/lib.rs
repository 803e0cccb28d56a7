//! Tic-tac-toe with time travel - local two-player game library.
//!
//! # Architecture
//!
//! - **Game core**: pure outcome evaluation, the match state machine
//!   with an append-only snapshot history, and a cross-match
//!   scoreboard.
//! - **Session**: the intent/query boundary the presentation layer
//!   talks to. The session owns the match and the scoreboard and is
//!   the single place where a decisive move is recorded.
//! - **TUI** ([`tui`]): ratatui presentation layer rendering the
//!   board, the move history panel, and the scoreboard.
//!
//! # Example
//!
//! ```
//! use tictactoe_rewind::{Position, Session};
//!
//! let mut session = Session::new();
//! session.place_move(Position::Center)?;
//! session.place_move(Position::TopLeft)?;
//!
//! // Time travel: view the opening position, then branch from it.
//! session.view_history_index(0)?;
//! assert!(session.board().is_empty(Position::Center));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
pub mod tui;

pub use game::{
    evaluate, AlternatingMarksInvariant, Board, Invariant, InvariantSet, InvariantViolation,
    JumpError, Line, MatchInvariants, MatchState, MatchStatus, MonotonicHistoryInvariant,
    MoveError, Outcome, Placement, Player, PointerInBoundsInvariant, Position, Scoreboard,
    Session, Snapshot, Square, LINES,
};
