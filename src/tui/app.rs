//! Application state and intent handling.

use crate::game::{MatchStatus, Placement, Position, Session};
use tracing::{debug, warn};

/// Main application state.
pub struct App {
    session: Session,
    cursor: Position,
    show_moves: bool,
    status_message: String,
}

impl App {
    /// Creates a new application.
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            cursor: Position::Center,
            show_moves: true,
            status_message: "Player X to start.".to_string(),
        }
    }

    /// Gets the session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Gets the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Sets the cursor position.
    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    /// Whether the moves panel is shown.
    pub fn show_moves(&self) -> bool {
        self.show_moves
    }

    /// Toggles the moves panel.
    pub fn toggle_moves(&mut self) {
        self.show_moves = !self.show_moves;
    }

    /// Gets the transient status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Places a mark at the cursor.
    pub fn place_at_cursor(&mut self) {
        self.place(self.cursor);
    }

    /// Places a mark at the given position.
    ///
    /// A rejected move leaves the board untouched; the rejection is
    /// logged but not surfaced as an error on screen.
    pub fn place(&mut self, pos: Position) {
        match self.session.place_move(pos) {
            Ok(Placement::Continued) => {
                self.status_message = format!("Next player: {}", self.session.current_turn());
            }
            Ok(Placement::Won { winner, .. }) => {
                self.status_message = format!("Winner: {}! Press 'n' for a new match.", winner);
            }
            Ok(Placement::Drawn) => {
                self.status_message = "Game drawn. Press 'n' for a new match.".to_string();
            }
            Err(e) => {
                // Silent no-op on screen per the rejection contract.
                debug!(error = %e, position = %pos, "Move rejected");
            }
        }
    }

    /// Places a mark via a digit key (1-9, row-major).
    pub fn place_digit(&mut self, digit: u32) {
        if let Some(pos) = (digit as usize)
            .checked_sub(1)
            .and_then(Position::from_index)
        {
            self.cursor = pos;
            self.place(pos);
        }
    }

    /// Steps one entry back in history.
    pub fn step_back(&mut self) {
        let pointer = self.session.pointer();
        if pointer > 0 {
            self.view(pointer - 1);
        }
    }

    /// Steps one entry forward in history.
    pub fn step_forward(&mut self) {
        self.view(self.session.pointer() + 1);
    }

    fn view(&mut self, index: usize) {
        match self.session.view_history_index(index) {
            Ok(()) => {
                self.status_message = if index == 0 {
                    "Viewing start of match.".to_string()
                } else {
                    format!("Viewing move {}.", index)
                };
            }
            Err(e) => debug!(error = %e, "Jump rejected"),
        }
    }

    /// Starts a new match, keeping the scores.
    pub fn new_match(&mut self) {
        self.session.start_new_match();
        self.status_message = format!(
            "New match. Player {} to start.",
            self.session.current_turn()
        );
    }

    /// Resets the scoreboard.
    pub fn reset_scores(&mut self) {
        self.session.reset_scoreboard();
        self.status_message = "Scoreboard reset.".to_string();
    }

    /// Dumps the session state as JSON for debugging.
    pub fn dump_session(&mut self, path: &str) {
        match serde_json::to_string_pretty(&self.session)
            .map_err(anyhow::Error::from)
            .and_then(|json| std::fs::write(path, json).map_err(anyhow::Error::from))
        {
            Ok(()) => {
                self.status_message = format!("Session dumped to {}.", path);
            }
            Err(e) => {
                warn!(error = %e, path, "Session dump failed");
                self.status_message = "Session dump failed (see log).".to_string();
            }
        }
    }

    /// Returns the current match status for rendering.
    pub fn match_status(&self) -> MatchStatus {
        self.session.status()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_move_keeps_board() {
        let mut app = App::new();
        app.place(Position::Center);
        let before = app.session().clone();

        app.place(Position::Center);
        assert_eq!(app.session(), &before);
    }

    #[test]
    fn test_digit_places_row_major() {
        let mut app = App::new();
        app.place_digit(1);
        assert!(!app.session().board().is_empty(Position::TopLeft));
        app.place_digit(9);
        assert!(!app.session().board().is_empty(Position::BottomRight));
    }

    #[test]
    fn test_step_back_and_forward() {
        let mut app = App::new();
        app.place(Position::Center);
        app.place(Position::TopLeft);

        app.step_back();
        assert_eq!(app.session().pointer(), 1);
        app.step_back();
        assert_eq!(app.session().pointer(), 0);
        // Already at the start; no-op.
        app.step_back();
        assert_eq!(app.session().pointer(), 0);

        app.step_forward();
        assert_eq!(app.session().pointer(), 1);
    }
}
