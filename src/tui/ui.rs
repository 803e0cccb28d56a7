//! Stateless UI rendering for the game screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::app::App;
use crate::game::{MatchStatus, Player, Position, Square};

/// Renders the full game screen.
///
/// The match status is evaluated once per frame and reused for the
/// status line and the winning-line highlight.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status = app.match_status();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(13),   // Board + moves panel
            Constraint::Length(3), // Scoreboard
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new("Tic-Tac-Toe Rewind")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    if app.show_moves() {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(42), Constraint::Length(28)])
            .split(chunks[1]);
        draw_board(frame, halves[0], app, &status);
        draw_moves_panel(frame, halves[1], app);
    } else {
        draw_board(frame, chunks[1], app, &status);
    }

    draw_scoreboard(frame, chunks[2], app);

    let status = Paragraph::new(status_line(app, &status))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);
}

fn status_line(app: &App, status: &MatchStatus) -> String {
    let headline = match status {
        MatchStatus::Turn(player) => format!("Next player: {}", player),
        MatchStatus::Won { winner, .. } => format!("Winner: {}", winner),
        MatchStatus::Drawn => "Game drawn".to_string(),
    };
    format!("{} | {}", headline, app.status_message())
}

fn draw_scoreboard(frame: &mut Frame, area: Rect, app: &App) {
    let (x_wins, o_wins) = app.session().scores();
    let line = TextLine::from(vec![
        Span::styled(
            format!(" X wins: {} ", x_wins),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Span::raw("|"),
        Span::styled(
            format!(" O wins: {} ", o_wins),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  [n] new match  [,/.] history  [m] moves  [s] reset scores  [q] quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_moves_panel(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.session();
    let items: Vec<ListItem> = (0..session.history_len())
        .map(|index| {
            let label = match session.move_at(index) {
                None => "Start".to_string(),
                Some(pos) => format!("Move {} ({}, {})", index, pos.row(), pos.col()),
            };
            let marker = if index == session.pointer() { "> " } else { "  " };
            let style = if index == session.pointer() {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}{}", marker, label)).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().title("Moves").borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, status: &MatchStatus) {
    // Center the board
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    draw_row(
        frame,
        rows[0],
        app,
        status,
        &[Position::TopLeft, Position::TopCenter, Position::TopRight],
    );
    draw_separator(frame, rows[1]);
    draw_row(
        frame,
        rows[2],
        app,
        status,
        &[Position::MiddleLeft, Position::Center, Position::MiddleRight],
    );
    draw_separator(frame, rows[3]);
    draw_row(
        frame,
        rows[4],
        app,
        status,
        &[
            Position::BottomLeft,
            Position::BottomCenter,
            Position::BottomRight,
        ],
    );
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    status: &MatchStatus,
    positions: &[Position; 3],
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    draw_cell(frame, cols[0], app, status, positions[0]);
    draw_separator_vertical(frame, cols[1]);
    draw_cell(frame, cols[2], app, status, positions[1]);
    draw_separator_vertical(frame, cols[3]);
    draw_cell(frame, cols[4], app, status, positions[2]);
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, status: &MatchStatus, pos: Position) {
    let session = app.session();
    let square = session.board().get(pos);

    let (symbol, base_style) = match square {
        Square::Empty => ("   ", Style::default().fg(Color::DarkGray)),
        Square::Occupied(Player::X) => (
            " X ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            " O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let on_winning_line = match status {
        MatchStatus::Won { line, .. } => line.contains(&pos),
        _ => false,
    };
    let is_last_move = session.last_move() == Some(pos);

    let style = if pos == app.cursor() {
        base_style.bg(Color::White).fg(Color::Black)
    } else if on_winning_line {
        base_style.bg(Color::Green).fg(Color::Black)
    } else if is_last_move {
        base_style.add_modifier(Modifier::UNDERLINED)
    } else {
        base_style
    };

    let paragraph =
        Paragraph::new(TextLine::from(Span::styled(symbol, style))).alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─────────────────────────────────────────")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
