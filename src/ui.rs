//! Terminal UI rendering with ratatui

use blockfall::{Phase, Snapshot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const BLOCK: &str = "██";

/// Width of the stats column next to the board
const STATS_WIDTH: u16 = 18;

/// Popups drawn over the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ConfirmReset,
}

pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, rows_cleared: u32, overlay: Overlay) {
    let area = frame.area();

    let board_width = snapshot.width() as u16 * 2 + 2;
    let board_height = snapshot.height() as u16 + 2;
    let game_area = center_rect(area, board_width + STATS_WIDTH, board_height);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Length(STATS_WIDTH),
        ])
        .split(game_area);

    render_board(frame, layout[0], snapshot);
    render_stats(frame, layout[1], snapshot, rows_cleared);

    match overlay {
        Overlay::Welcome => render_welcome(frame, area),
        Overlay::ConfirmReset => render_overlay(frame, area, "RESTART?", "y: yes   n: no"),
        Overlay::None => match snapshot.phase {
            Phase::Paused => render_overlay(frame, area, "PAUSED", "Press P to resume"),
            Phase::GameOver => render_overlay(frame, area, "GAME OVER", "Press any key"),
            Phase::Running | Phase::LockPending | Phase::ClearAnimating => {}
        },
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(0x77, 0x77, 0x77)));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = snapshot
        .rows
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| Span::styled(BLOCK, Style::default().fg(cell.color)))
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot, rows_cleared: u32) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::styled("SCORE", Style::default().fg(Color::Gray)),
        Line::styled(
            snapshot.score.to_string(),
            Style::default().fg(Color::Yellow).bold(),
        ),
        Line::raw(""),
        Line::styled("ROWS", Style::default().fg(Color::Gray)),
        Line::raw(rows_cleared.to_string()),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let popup_area = center_rect(area, 30, 10);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Welcome ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key = Style::default().fg(Color::Yellow).bold();
    let text = vec![
        Line::from(vec![Span::styled("P", key), Span::raw("  pause / resume")]),
        Line::from(vec![Span::styled("R", key), Span::raw("  rotate")]),
        Line::from(vec![Span::styled("Arrows", key), Span::raw("  move")]),
        Line::from(vec![Span::styled("N", key), Span::raw("  restart")]),
        Line::raw(""),
        Line::styled("Press any key", Style::default().fg(Color::Gray)),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_width = 24u16;
    let popup_height = 5u16;
    let popup_area = center_rect(area, popup_width, popup_height);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
