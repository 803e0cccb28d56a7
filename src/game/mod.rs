//! Core game logic: outcome evaluation, match history, scoreboard.

mod invariants;
mod match_state;
mod outcome;
mod position;
mod scoreboard;
mod session;
mod types;

pub use invariants::{
    AlternatingMarksInvariant, Invariant, InvariantSet, InvariantViolation, MatchInvariants,
    MonotonicHistoryInvariant, PointerInBoundsInvariant,
};
pub use match_state::{JumpError, MatchState, MatchStatus, MoveError, Placement, Snapshot};
pub use outcome::{evaluate, Line, Outcome, LINES};
pub use position::Position;
pub use scoreboard::Scoreboard;
pub use session::Session;
pub use types::{Board, Player, Square};
