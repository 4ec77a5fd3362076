//! Stateless UI rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::app::App;
use noughts_core::{Board, Cell, Player, Square};

const HELP: &str =
    "arrows move | enter/space/1-9 place | esc/u undo | n new round | a toggle AI | q quit";

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(1), // Score
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new("Noughts - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_score(frame, chunks[1], app);

    // Show the finished board until the next move is made.
    let controller = app.controller();
    match controller.last_round() {
        Some(summary) if controller.engine().moves().is_empty() => {
            let highlight = summary
                .winner()
                .map(|(_, line)| line.cells().to_vec())
                .unwrap_or_default();
            draw_board(frame, chunks[2], summary.board(), None, &highlight);
        }
        _ => {
            let cursor = (!app.is_thinking()).then(|| app.cursor());
            draw_board(frame, chunks[2], &controller.engine().board(), cursor, &[]);
        }
    }

    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_score(frame: &mut Frame, area: Rect, app: &App) {
    let engine = app.controller().engine();
    let ai = if engine.ai_enabled() {
        format!("AI plays {}", app.controller().ai_player())
    } else {
        "AI off".to_string()
    };
    let line = Line::from(vec![
        Span::styled(
            format!("X {}", engine.score(Player::Cross)),
            Style::default().fg(Color::Blue),
        ),
        Span::raw(" - "),
        Span::styled(
            format!("{} O", engine.score(Player::Circle)),
            Style::default().fg(Color::Red),
        ),
        Span::raw(format!("    {}", ai)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Option<Cell>, line: &[Cell]) {
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

    for y in 0..3 {
        draw_row(frame, rows[y * 2], board, cursor, line, y);
        if y < 2 {
            let sep = Paragraph::new("────────────────────────────────────────")
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, rows[y * 2 + 1]);
        }
    }
}

fn draw_row(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    cursor: Option<Cell>,
    line: &[Cell],
    y: usize,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Length(2),
            Constraint::Length(12),
        ])
        .split(area);

    for x in 0..3 {
        let cell = Cell::ALL[y * 3 + x];
        draw_cell(frame, cols[x * 2], board, cell, cursor == Some(cell), line.contains(&cell));
        if x < 2 {
            let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, cols[x * 2 + 1]);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, board: &Board, cell: Cell, selected: bool, winning: bool) {
    let (symbol, base_style) = match board.get(cell) {
        Square::Empty => ("   ", Style::default().fg(Color::DarkGray)),
        Square::Occupied(Player::Cross) => (
            " X ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::Circle) => (
            " O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if selected {
        base_style.bg(Color::White).fg(Color::Black)
    } else if winning {
        base_style.bg(Color::Green)
    } else {
        base_style
    };

    // Vertically centre the mark in the three-line cell.
    let text = vec![
        Line::default(),
        Line::from(Span::styled(symbol, style)),
        Line::default(),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
