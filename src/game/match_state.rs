//! Match state machine: move history, time travel, and turn order.
//!
//! A match owns an append-only history of board snapshots plus a
//! pointer to the currently viewed entry. Moves are validated against
//! the board *at the pointer*; playing after a jump truncates the
//! abandoned continuation before appending (the branching rule).

use super::outcome::{evaluate, Line, Outcome};
use super::position::Position;
use super::types::{Board, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One entry in the match history.
///
/// The position of the move that produced this board is stored
/// explicitly, so the UI can highlight the latest mark without
/// diffing adjacent snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The board after the move.
    board: Board,
    /// The move that produced this board. `None` only for the
    /// initial empty entry.
    last_move: Option<Position>,
}

impl Snapshot {
    fn initial() -> Self {
        Self {
            board: Board::new(),
            last_move: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the move that produced this board, if any.
    pub fn last_move(&self) -> Option<Position> {
        self.last_move
    }
}

/// Result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Match continues with the next player.
    Continued,
    /// The move completed a line.
    Won {
        /// The winning player.
        winner: Player,
        /// The completed line.
        line: Line,
    },
    /// The move filled the board with no line.
    Drawn,
}

/// Rejected move. State is untouched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {_0:?} is already occupied")]
    SquareOccupied(Position),

    /// The board at the pointer is already won or drawn.
    #[display("Match is already over")]
    MatchOver,
}

impl std::error::Error for MoveError {}

/// Rejected history jump. State is untouched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum JumpError {
    /// The requested history index does not exist.
    #[display("History index {index} out of range (len {len})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Current history length.
        len: usize,
    },
}

impl std::error::Error for JumpError {}

/// User-facing classification of the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Match in progress; this player moves next.
    Turn(Player),
    /// Match won.
    Won {
        /// The winning player.
        winner: Player,
        /// The completed line, for highlighting.
        line: Line,
    },
    /// Match drawn.
    Drawn,
}

/// State machine for a single match with time travel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    /// Board snapshots, oldest first. Never empty: entry 0 is the
    /// all-empty board.
    history: Vec<Snapshot>,
    /// Index of the currently viewed entry.
    pointer: usize,
    /// Player who moves at even history indices this match.
    starting_player: Player,
}

impl MatchState {
    /// Creates a new match with X to start.
    pub fn new() -> Self {
        Self::with_starting_player(Player::X)
    }

    /// Creates a new match with the given starting player.
    pub fn with_starting_player(starting_player: Player) -> Self {
        Self {
            history: vec![Snapshot::initial()],
            pointer: 0,
            starting_player,
        }
    }

    /// Returns the board at the pointer.
    pub fn board(&self) -> &Board {
        &self.history[self.pointer].board
    }

    /// Returns the board at the given history index.
    pub fn board_at(&self, index: usize) -> Option<&Board> {
        self.history.get(index).map(Snapshot::board)
    }

    /// Returns the snapshot at the given history index.
    pub fn snapshot_at(&self, index: usize) -> Option<&Snapshot> {
        self.history.get(index)
    }

    /// Evaluates the board at the pointer.
    pub fn outcome(&self) -> Outcome {
        evaluate(self.board())
    }

    /// Evaluates the board at the given history index.
    pub fn outcome_at(&self, index: usize) -> Option<Outcome> {
        self.board_at(index).map(evaluate)
    }

    /// Returns the number of history entries (moves played + 1).
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Returns the index of the currently viewed entry.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Returns the player who starts this match.
    pub fn starting_player(&self) -> Player {
        self.starting_player
    }

    /// Returns the move that produced the current board, if any.
    pub fn last_move(&self) -> Option<Position> {
        self.history[self.pointer].last_move
    }

    /// Returns the player whose mark the next placed square would take.
    ///
    /// Even history indices belong to the starting player. Meaningless
    /// once the current board is terminal.
    pub fn current_turn(&self) -> Player {
        if self.pointer % 2 == 0 {
            self.starting_player
        } else {
            self.starting_player.opponent()
        }
    }

    /// Classifies the current position for display.
    pub fn status(&self) -> MatchStatus {
        match self.outcome() {
            Outcome::Undecided => MatchStatus::Turn(self.current_turn()),
            Outcome::Decisive { winner, line } => MatchStatus::Won { winner, line },
            Outcome::Draw => MatchStatus::Drawn,
        }
    }

    /// Applies a move at the given position.
    ///
    /// Rejected (state untouched) if the square at the pointer is
    /// occupied or the board at the pointer is already terminal.
    /// On success the history is truncated to the pointer, the new
    /// snapshot appended, and the pointer advanced to it.
    #[instrument(skip(self), fields(pointer = self.pointer))]
    pub fn apply_move(&mut self, pos: Position) -> Result<Placement, MoveError> {
        if self.outcome().is_terminal() {
            return Err(MoveError::MatchOver);
        }
        if !self.board().is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }

        let player = self.current_turn();
        let mut board = self.board().clone();
        board.set(pos, Square::Occupied(player));

        // Branching rule: discard any future beyond the pointer.
        self.history.truncate(self.pointer + 1);
        self.history.push(Snapshot {
            board,
            last_move: Some(pos),
        });
        self.pointer = self.history.len() - 1;

        debug!(player = %player, position = %pos, len = self.history.len(), "Move applied");

        #[cfg(debug_assertions)]
        super::invariants::assert_invariants(self);

        match self.outcome() {
            Outcome::Undecided => Ok(Placement::Continued),
            Outcome::Decisive { winner, line } => Ok(Placement::Won { winner, line }),
            Outcome::Draw => Ok(Placement::Drawn),
        }
    }

    /// Moves the pointer to a history entry without altering history.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, index: usize) -> Result<(), JumpError> {
        if index >= self.history.len() {
            return Err(JumpError::OutOfRange {
                index,
                len: self.history.len(),
            });
        }
        self.pointer = index;
        debug!(index, "Jumped to history entry");
        Ok(())
    }

    /// Resets the match and flips the starting player.
    ///
    /// Alternation is a deterministic toggle across matches, not
    /// based on who won the previous one.
    #[instrument(skip(self))]
    pub fn new_match(&mut self) {
        self.starting_player = self.starting_player.opponent();
        self.history = vec![Snapshot::initial()];
        self.pointer = 0;
        debug!(starting_player = %self.starting_player, "New match started");
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(index: usize) -> Position {
        Position::from_index(index).expect("test index in range")
    }

    #[test]
    fn test_new_match_state() {
        let state = MatchState::new();
        assert_eq!(state.history_len(), 1);
        assert_eq!(state.pointer(), 0);
        assert_eq!(state.current_turn(), Player::X);
        assert_eq!(state.status(), MatchStatus::Turn(Player::X));
    }

    #[test]
    fn test_turns_alternate() {
        let mut state = MatchState::new();
        assert_eq!(state.current_turn(), Player::X);
        state.apply_move(Position::Center).unwrap();
        assert_eq!(state.current_turn(), Player::O);
        state.apply_move(Position::TopLeft).unwrap();
        assert_eq!(state.current_turn(), Player::X);
    }

    #[test]
    fn test_occupied_square_rejected_state_unchanged() {
        let mut state = MatchState::new();
        state.apply_move(Position::Center).unwrap();
        let before = state.clone();

        let result = state.apply_move(Position::Center);
        assert_eq!(result, Err(MoveError::SquareOccupied(Position::Center)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_after_win_rejected_state_unchanged() {
        let mut state = MatchState::new();
        // X: 0, 1, 2 wins; O: 3, 4.
        for i in [0, 3, 1, 4, 2] {
            state.apply_move(pos(i)).unwrap();
        }
        let before = state.clone();

        let result = state.apply_move(pos(5));
        assert_eq!(result, Err(MoveError::MatchOver));
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_rejected_at_terminal_history_entry() {
        let mut state = MatchState::new();
        for i in [0, 3, 1, 4, 2] {
            state.apply_move(pos(i)).unwrap();
        }
        // Jump back to the winning tip explicitly; still terminal.
        state.jump_to(5).unwrap();
        assert_eq!(state.apply_move(pos(5)), Err(MoveError::MatchOver));
    }

    #[test]
    fn test_jump_out_of_range_rejected() {
        let mut state = MatchState::new();
        state.apply_move(Position::Center).unwrap();
        let before = state.clone();

        let result = state.jump_to(2);
        assert_eq!(result, Err(JumpError::OutOfRange { index: 2, len: 2 }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_jump_then_move_truncates_future() {
        let mut state = MatchState::new();
        // History length 4 (three moves), pointer at 3.
        state.apply_move(pos(0)).unwrap();
        state.apply_move(pos(4)).unwrap();
        state.apply_move(pos(8)).unwrap();
        assert_eq!(state.history_len(), 4);
        assert_eq!(state.pointer(), 3);

        state.jump_to(1).unwrap();
        // O to move at index 1 (X started).
        assert_eq!(state.current_turn(), Player::O);
        state.apply_move(pos(2)).unwrap();

        assert_eq!(state.history_len(), 3);
        assert_eq!(state.pointer(), 2);
        // Old continuation is gone; the new tip holds O's mark at 2.
        assert_eq!(state.board().get(pos(2)), Square::Occupied(Player::O));
        assert_eq!(state.board().get(pos(4)), Square::Empty);
        assert_eq!(state.board().get(pos(8)), Square::Empty);
    }

    #[test]
    fn test_jump_preserves_history() {
        let mut state = MatchState::new();
        state.apply_move(pos(0)).unwrap();
        state.apply_move(pos(4)).unwrap();

        state.jump_to(0).unwrap();
        assert_eq!(state.history_len(), 3);
        assert!(state.board().is_empty(pos(0)));

        state.jump_to(2).unwrap();
        assert_eq!(state.board().get(pos(4)), Square::Occupied(Player::O));
    }

    #[test]
    fn test_last_move_tracked_per_snapshot() {
        let mut state = MatchState::new();
        assert_eq!(state.last_move(), None);
        state.apply_move(Position::Center).unwrap();
        assert_eq!(state.last_move(), Some(Position::Center));
        state.apply_move(Position::TopLeft).unwrap();
        assert_eq!(state.last_move(), Some(Position::TopLeft));
        state.jump_to(1).unwrap();
        assert_eq!(state.last_move(), Some(Position::Center));
    }

    #[test]
    fn test_new_match_flips_starting_player() {
        let mut state = MatchState::new();
        assert_eq!(state.starting_player(), Player::X);

        state.new_match();
        assert_eq!(state.starting_player(), Player::O);
        assert_eq!(state.current_turn(), Player::O);
        assert_eq!(state.history_len(), 1);

        state.new_match();
        assert_eq!(state.starting_player(), Player::X);
    }

    #[test]
    fn test_o_starts_turn_formula() {
        let mut state = MatchState::with_starting_player(Player::O);
        assert_eq!(state.current_turn(), Player::O);
        state.apply_move(Position::Center).unwrap();
        assert_eq!(state.current_turn(), Player::X);
        assert_eq!(
            state.board().get(Position::Center),
            Square::Occupied(Player::O)
        );
    }

    #[test]
    fn test_win_reports_line() {
        let mut state = MatchState::new();
        for i in [0, 4, 1, 3, 2] {
            let result = state.apply_move(pos(i)).unwrap();
            if i == 2 {
                assert_eq!(
                    result,
                    Placement::Won {
                        winner: Player::X,
                        line: [Position::TopLeft, Position::TopCenter, Position::TopRight],
                    }
                );
            } else {
                assert_eq!(result, Placement::Continued);
            }
        }
        assert!(matches!(
            state.status(),
            MatchStatus::Won {
                winner: Player::X,
                ..
            }
        ));
    }

    #[test]
    fn test_draw_reported() {
        let mut state = MatchState::new();
        // X at 0, 2, 4, 5, 7; O at 1, 3, 6, 8. No line for either.
        let order = [0, 1, 2, 3, 4, 6, 5, 8, 7];
        for (turn, i) in order.iter().enumerate() {
            let result = state.apply_move(pos(*i)).unwrap();
            if turn == order.len() - 1 {
                assert_eq!(result, Placement::Drawn);
            } else {
                assert_eq!(result, Placement::Continued);
            }
        }
        assert_eq!(state.status(), MatchStatus::Drawn);
    }
}
