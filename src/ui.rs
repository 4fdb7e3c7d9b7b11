//! Terminal UI rendering with ratatui

use crate::menu::{Menu, MenuScreen};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use tetrs_remix::board::EMPTY;
use tetrs_remix::{COLS, Coord, LINES, Settings, Snapshot};

/// Total width needed: board(22) + stats(18) = 40
const GAME_WIDTH: u16 = 40;
/// Board rows plus borders
const GAME_HEIGHT: u16 = LINES as u16 + 2;

/// Terminal color for a cell value
fn cell_color(value: u8) -> Color {
    match value {
        1 => Color::Cyan,
        2 => Color::Red,
        3 => Color::Green,
        4 => Color::Magenta,
        5 => Color::Rgb(255, 165, 0), // Orange
        6 => Color::Blue,
        7 => Color::Yellow,
        _ => Color::DarkGray,
    }
}

/// Render the menu screens
pub fn render_menu(frame: &mut Frame, menu: &Menu) {
    let area = frame.area();
    let menu_area = center_rect(area, 44, 18);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(menu_area);

    let title = match menu.screen {
        MenuScreen::Main => "TETRS REMIX",
        MenuScreen::Instructions => "HOW TO PLAY",
        MenuScreen::DifficultySelect => "DIFFICULTY",
    };
    let title = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(title, Style::default().fg(Color::Cyan).bold()),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, layout[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);

    let mut lines = vec![Line::raw("")];
    if menu.screen == MenuScreen::Instructions {
        for text in INSTRUCTIONS {
            lines.push(Line::styled(*text, Style::default().fg(Color::White)));
        }
        lines.push(Line::raw(""));
    }

    for (i, item) in menu.items.iter().enumerate() {
        let (prefix, style) = if i == menu.selected {
            ("▶ ", Style::default().fg(Color::Yellow).bold())
        } else {
            ("  ", Style::default().fg(Color::White))
        };
        lines.push(Line::styled(format!("{}{}", prefix, item.label), style));
        lines.push(Line::raw(""));
    }

    lines.push(Line::styled(
        "↑↓ Select  Enter Confirm  Esc Back",
        Style::default().fg(Color::DarkGray),
    ));

    let menu_text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(menu_text, inner);
}

const INSTRUCTIONS: &[&str] = &[
    "←/→ move   ↑ rotate   ↓ drop faster",
    "Space: bomb (clears the bottom row)",
    "A: toggle the auto-player",
    "Every 3 rows cleared earns a bomb",
    "Esc: menu   Q: quit",
];

/// Render the playfield and side panel
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(COLS as u16 * 2 + 2), // Board
            Constraint::Length(18),                  // Stats
        ])
        .split(game_area);

    render_board(frame, layout[0], snapshot, settings);
    render_stats(frame, layout[1], snapshot, settings);

    if snapshot.game_over {
        render_overlay(frame, area, "GAME OVER", "Any key for menu");
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

/// Render the grid with the falling piece on top
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings) {
    let (block_char, empty_char) = settings.visual.block_chars();

    let title = format!(" {} ", snapshot.difficulty.name());
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::with_capacity(LINES);
    for (y, row) in snapshot.cells.iter().enumerate() {
        let spans: Vec<Span> = row
            .iter()
            .enumerate()
            .map(|(x, &cell)| {
                let at = Coord::new(x as i32, y as i32);
                let value = if snapshot.piece.contains(&at) {
                    snapshot.color
                } else {
                    cell
                };
                if value == EMPTY {
                    Span::raw(empty_char)
                } else {
                    Span::styled(block_char, Style::default().fg(cell_color(value)))
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));

    let mut lines = vec![
        label("SCORE"),
        Line::from(Span::styled(
            format!("{}", snapshot.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        label("BOMBS"),
        Line::from(Span::styled(
            format!("x{}", snapshot.bombs),
            Style::default().fg(Color::Red).bold(),
        )),
        Line::raw(""),
        label("AUTO"),
    ];
    lines.push(if snapshot.ai_enabled {
        Line::styled("ON", Style::default().fg(Color::Green).bold())
    } else {
        Line::styled("OFF", Style::default().fg(Color::DarkGray))
    });

    if settings.visual.show_controls {
        lines.push(Line::raw(""));
        for hint in ["←→ move", "↑ rotate", "↓ drop", "Spc bomb", "A auto"] {
            lines.push(Line::styled(hint, Style::default().fg(Color::DarkGray)));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_area = center_rect(area, 24, 5);

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_color_is_distinct() {
        let colors: Vec<Color> = (1..=7).map(cell_color).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_center_rect_clamps() {
        let area = Rect::new(0, 0, 10, 10);
        let centered = center_rect(area, 40, 4);
        assert_eq!(centered.width, 10);
        assert_eq!(centered.y, 3);
    }
}
