//! Cross-match win tallies.

use super::types::Player;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Cumulative win counters for a session of matches.
///
/// Draws are never recorded. The counters persist across matches
/// until explicitly reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    x_wins: u32,
    o_wins: u32,
}

impl Scoreboard {
    /// Creates a scoreboard with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a win for the given player.
    #[instrument(skip(self))]
    pub fn record(&mut self, winner: Player) {
        match winner {
            Player::X => self.x_wins += 1,
            Player::O => self.o_wins += 1,
        }
        debug!(x_wins = self.x_wins, o_wins = self.o_wins, "Win recorded");
    }

    /// Resets both counters to zero.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.x_wins = 0;
        self.o_wins = 0;
        debug!("Scoreboard reset");
    }

    /// Wins recorded for X.
    pub fn x_wins(&self) -> u32 {
        self.x_wins
    }

    /// Wins recorded for O.
    pub fn o_wins(&self) -> u32 {
        self.o_wins
    }
}
