//! Session: one match state machine plus one scoreboard.
//!
//! The session is the boundary the presentation layer talks to. It
//! accepts intents, forwards them to the match state machine, and
//! routes the single win notification to the scoreboard.

use super::match_state::{JumpError, MatchState, MatchStatus, MoveError, Placement};
use super::outcome::Outcome;
use super::position::Position;
use super::scoreboard::Scoreboard;
use super::types::{Board, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A sequence of matches sharing one scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    match_state: MatchState,
    scoreboard: Scoreboard,
}

impl Session {
    /// Creates a session with a fresh match (X starts) and a zeroed
    /// scoreboard.
    pub fn new() -> Self {
        Self {
            match_state: MatchState::new(),
            scoreboard: Scoreboard::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Inbound intents
    // ─────────────────────────────────────────────────────────────

    /// Places a mark at the given position.
    ///
    /// This is the only call site for [`Scoreboard::record`]: the
    /// notification fires on the move that first makes the live tip
    /// decisive, so it fires at most once per match and never for a
    /// draw or a jump to an already-decisive entry.
    #[instrument(skip(self))]
    pub fn place_move(&mut self, pos: Position) -> Result<Placement, MoveError> {
        let placement = self.match_state.apply_move(pos)?;

        // The win notification runs strictly after the history
        // mutation above has committed.
        if let Placement::Won { winner, .. } = placement {
            info!(winner = %winner, "Match decided");
            self.scoreboard.record(winner);
        }

        Ok(placement)
    }

    /// Views a history entry. Never touches the scoreboard.
    #[instrument(skip(self))]
    pub fn view_history_index(&mut self, index: usize) -> Result<(), JumpError> {
        self.match_state.jump_to(index)
    }

    /// Starts a new match, flipping the starting player. Scores are
    /// kept.
    #[instrument(skip(self))]
    pub fn start_new_match(&mut self) {
        self.match_state.new_match();
        debug!(starting_player = %self.match_state.starting_player(), "New match");
    }

    /// Resets both win counters to zero.
    #[instrument(skip(self))]
    pub fn reset_scoreboard(&mut self) {
        self.scoreboard.reset();
    }

    // ─────────────────────────────────────────────────────────────
    //  Outbound queries
    // ─────────────────────────────────────────────────────────────

    /// Returns the board at the pointer.
    pub fn board(&self) -> &Board {
        self.match_state.board()
    }

    /// Returns the board at the given history index.
    pub fn board_at(&self, index: usize) -> Option<&Board> {
        self.match_state.board_at(index)
    }

    /// Evaluates the board at the pointer.
    pub fn outcome(&self) -> Outcome {
        self.match_state.outcome()
    }

    /// Evaluates the board at the given history index.
    pub fn outcome_at(&self, index: usize) -> Option<Outcome> {
        self.match_state.outcome_at(index)
    }

    /// Classifies the current position for display.
    pub fn status(&self) -> MatchStatus {
        self.match_state.status()
    }

    /// Returns the number of history entries.
    pub fn history_len(&self) -> usize {
        self.match_state.history_len()
    }

    /// Returns the currently viewed history index.
    pub fn pointer(&self) -> usize {
        self.match_state.pointer()
    }

    /// Returns the player whose mark the next placed square would take.
    pub fn current_turn(&self) -> Player {
        self.match_state.current_turn()
    }

    /// Returns the move that produced the current board, if any.
    pub fn last_move(&self) -> Option<Position> {
        self.match_state.last_move()
    }

    /// Returns the move stored at the given history index.
    pub fn move_at(&self, index: usize) -> Option<Position> {
        self.match_state
            .snapshot_at(index)
            .and_then(|snapshot| snapshot.last_move())
    }

    /// Returns the (x_wins, o_wins) counters.
    pub fn scores(&self) -> (u32, u32) {
        (self.scoreboard.x_wins(), self.scoreboard.o_wins())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
