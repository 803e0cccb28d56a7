//! First-class invariants for the match state machine.
//!
//! Invariants are logical properties that must hold throughout a
//! match. They are testable independently and checked in debug
//! builds after every state transition.

use super::match_state::MatchState;
use super::position::Position;
use super::types::Square;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: adjacent history entries differ in exactly one square,
/// and that square goes from empty to occupied.
///
/// Forward play never retracts or overwrites a mark.
pub struct MonotonicHistoryInvariant;

impl Invariant<MatchState> for MonotonicHistoryInvariant {
    fn holds(state: &MatchState) -> bool {
        for index in 1..state.history_len() {
            let prev = state
                .board_at(index - 1)
                .expect("index - 1 < history_len");
            let next = state.board_at(index).expect("index < history_len");

            let mut changed = 0;
            for pos in Position::ALL {
                match (prev.get(pos), next.get(pos)) {
                    (a, b) if a == b => {}
                    (Square::Empty, Square::Occupied(_)) => changed += 1,
                    _ => {
                        warn!(index, position = %pos, "Mark retracted or overwritten");
                        return false;
                    }
                }
            }
            if changed != 1 {
                warn!(index, changed, "History step changed an unexpected number of squares");
                return false;
            }
        }
        true
    }

    fn description() -> &'static str {
        "Adjacent snapshots differ in exactly one square, empty to occupied"
    }
}

/// Invariant: the pointer addresses an existing history entry.
pub struct PointerInBoundsInvariant;

impl Invariant<MatchState> for PointerInBoundsInvariant {
    fn holds(state: &MatchState) -> bool {
        let valid = state.pointer() < state.history_len();
        if !valid {
            warn!(
                pointer = state.pointer(),
                len = state.history_len(),
                "Pointer out of bounds"
            );
        }
        valid
    }

    fn description() -> &'static str {
        "Pointer is within history bounds"
    }
}

/// Invariant: marks alternate, starting with the match's starting player.
///
/// At history index i the count of the starting player's marks is
/// ceil(i / 2) and the opponent's is floor(i / 2).
pub struct AlternatingMarksInvariant;

impl Invariant<MatchState> for AlternatingMarksInvariant {
    fn holds(state: &MatchState) -> bool {
        let starter = state.starting_player();
        for index in 0..state.history_len() {
            let board = state.board_at(index).expect("index < history_len");
            let starter_count = board
                .squares()
                .iter()
                .filter(|s| s.occupant() == Some(starter))
                .count();
            let other_count = board
                .squares()
                .iter()
                .filter(|s| s.occupant() == Some(starter.opponent()))
                .count();

            if starter_count != index.div_ceil(2) || other_count != index / 2 {
                warn!(index, starter_count, other_count, "Mark counts violate alternation");
                return false;
            }
        }
        true
    }

    fn description() -> &'static str {
        "Marks alternate starting with the starting player"
    }
}

/// All match invariants as a composable set.
pub type MatchInvariants = (
    MonotonicHistoryInvariant,
    PointerInBoundsInvariant,
    AlternatingMarksInvariant,
);

/// Asserts that all match invariants hold (debug builds only).
pub fn assert_invariants(state: &MatchState) {
    debug_assert!(
        MatchInvariants::check_all(state).is_ok(),
        "Match invariant violated"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    fn pos(index: usize) -> Position {
        Position::from_index(index).expect("test index in range")
    }

    #[test]
    fn test_invariants_hold_for_new_match() {
        let state = MatchState::new();
        assert!(MatchInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariants_hold_through_play_and_jumps() {
        let mut state = MatchState::new();
        for i in [4, 0, 8, 2] {
            state.apply_move(pos(i)).unwrap();
            assert!(MatchInvariants::check_all(&state).is_ok());
        }
        state.jump_to(1).unwrap();
        assert!(MatchInvariants::check_all(&state).is_ok());
        state.apply_move(pos(6)).unwrap();
        assert!(MatchInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariants_hold_when_o_starts() {
        let mut state = MatchState::with_starting_player(Player::O);
        state.apply_move(pos(4)).unwrap();
        state.apply_move(pos(0)).unwrap();
        assert!(MatchInvariants::check_all(&state).is_ok());
    }
}
