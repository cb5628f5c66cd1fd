//! Ratatui drawing: main menu, playfield with landing preview, sidebar, pause overlay.

use crate::app::MenuChoice;
use crate::theme::Theme;
use brickgame::board::{BOARD_HEIGHT, BOARD_WIDTH, Cell};
use brickgame::game::{Frame as GameFrame, PauseState};
use brickgame::overlay::OverlayCell;
use brickgame::piece::Piece;
use brickgame::session::SessionSummary;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

/// Terminal columns per board cell.
const CELL_WIDTH: u16 = 2;
const SIDEBAR_WIDTH: u16 = 20;
const BLOCK: &str = "██";
const GHOST: &str = "░░";

fn playfield_size() -> (u16, u16) {
    (
        BOARD_WIDTH as u16 * CELL_WIDTH + 2,
        BOARD_HEIGHT as u16 + 2,
    )
}

/// Rect of `w × h` centred in `area`, clipped to it.
fn centered(area: Rect, w: u16, h: u16) -> Rect {
    Rect {
        x: area.x + area.width.saturating_sub(w) / 2,
        y: area.y + area.height.saturating_sub(h) / 2,
        width: w.min(area.width),
        height: h.min(area.height),
    }
}

pub fn draw_menu(
    frame: &mut Frame,
    theme: &Theme,
    selected: MenuChoice,
    last: Option<&SessionSummary>,
    best: u32,
) {
    let area = frame.area();
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let border_style = Style::default().fg(theme.div_line);

    let panel = centered(area, 40, 17);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(1),
            Constraint::Length(4), // choices
            Constraint::Length(1),
            Constraint::Length(4), // controls
            Constraint::Length(4), // scores
        ])
        .split(panel);

    Paragraph::new(Line::from(Span::styled("BRICK GAME 1.0", title_style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .render(chunks[0], frame.buffer_mut());

    let choices = [(MenuChoice::Start, "Start Game"), (MenuChoice::Exit, "Exit")]
        .into_iter()
        .map(|(choice, label)| {
            if choice == selected {
                Line::from(Span::styled(format!("> {label} <"), title_style))
            } else {
                Line::from(Span::styled(label, fg_style))
            }
        })
        .collect::<Vec<_>>();
    Paragraph::new(choices)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .render(chunks[2], frame.buffer_mut());

    let controls = vec![
        Line::from(Span::styled("Arrow keys - move, R - rotate", fg_style)),
        Line::from(Span::styled("P - pause, Q - exit", fg_style)),
    ];
    Paragraph::new(controls)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(" Controls ", title_style)),
        )
        .render(chunks[4], frame.buffer_mut());

    let mut scores = vec![Line::from(vec![
        Span::styled("Best: ", title_style),
        Span::styled(best.to_string(), fg_style),
    ])];
    if let Some(summary) = last {
        scores.push(Line::from(vec![
            Span::styled("Last: ", title_style),
            Span::styled(summary.score.to_string(), fg_style),
        ]));
        if summary.new_record {
            scores.push(Line::from(Span::styled("New record!", title_style)));
        }
    }
    Paragraph::new(scores)
        .alignment(Alignment::Center)
        .render(chunks[5], frame.buffer_mut());
}

pub fn draw_game(frame: &mut Frame, game: &GameFrame<'_>, theme: &Theme, best: u32) {
    let (pw, ph) = playfield_size();
    let active = centered(frame.area(), pw + SIDEBAR_WIDTH, ph);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(pw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(active);

    draw_playfield(frame, game, theme, inner[0]);
    draw_sidebar(frame, game, theme, best, inner[1]);
    if game.pause == PauseState::Paused {
        draw_pause_overlay(frame, theme, inner[0]);
    }
}

fn draw_playfield(frame: &mut Frame, game: &GameFrame<'_>, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.div_line))
        .style(Style::default().bg(theme.bg));
    let board_rect = block.inner(area);
    block.render(area, frame.buffer_mut());

    let buf = frame.buffer_mut();
    for (y, (row, overlay_row)) in game.board.rows().iter().zip(game.overlay.rows()).enumerate() {
        for (x, (cell, over)) in row.iter().zip(overlay_row).enumerate() {
            let (symbol, color) = match (over, cell) {
                (OverlayCell::Active(id), _) => (BLOCK, theme.piece_color(*id)),
                (_, Cell::Block(id)) => (BLOCK, theme.piece_color(*id)),
                (OverlayCell::Ghost(_), Cell::Empty) => (GHOST, theme.ghost),
                (OverlayCell::Empty, Cell::Empty) => ("  ", theme.bg),
            };
            let rx = board_rect.x + x as u16 * CELL_WIDTH;
            let ry = board_rect.y + y as u16;
            if rx + CELL_WIDTH <= board_rect.x + board_rect.width
                && ry < board_rect.y + board_rect.height
            {
                buf.set_string(rx, ry, symbol, Style::default().fg(color).bg(theme.bg));
            }
        }
    }
}

fn draw_sidebar(frame: &mut Frame, game: &GameFrame<'_>, theme: &Theme, best: u32, area: Rect) {
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let border_style = Style::default().fg(theme.div_line);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Next (border + title + 4 rows)
            Constraint::Length(1), // gap
            Constraint::Length(6), // Stats
            Constraint::Length(1), // gap
            Constraint::Length(3), // Pause flag
        ])
        .split(area);

    let next_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" Next ", title_style));
    let next_inner = next_block.inner(chunks[0]);
    next_block.render(chunks[0], frame.buffer_mut());
    if let Some(next) = game.next {
        draw_next_preview(frame, theme, next, next_inner);
    }

    let stats = vec![
        Line::from(vec![
            Span::styled("Score: ", title_style),
            Span::styled(game.progress.score.to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("Best:  ", title_style),
            Span::styled(best.max(game.progress.score).to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("LEVEL: ", title_style),
            Span::styled(game.progress.level.to_string(), fg_style),
        ]),
        Line::from(vec![
            Span::styled("SPEED: ", title_style),
            Span::styled(game.progress.speed.to_string(), fg_style),
        ]),
    ];
    Paragraph::new(stats)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .render(chunks[2], frame.buffer_mut());

    if game.pause == PauseState::Paused {
        Paragraph::new(Line::from(Span::styled(
            " PAUSED ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .render(chunks[4], frame.buffer_mut());
    }
}

/// Piece matrix drawn at its spawn orientation, centred in `area`.
fn draw_next_preview(frame: &mut Frame, theme: &Theme, piece: &Piece, area: Rect) {
    let w = piece.width() as u16;
    let rows = (0..piece.width())
        .filter(|&r| (0..piece.width()).any(|c| piece.is_filled(r, c)))
        .count() as u16;
    let off_x = area.width.saturating_sub(w * CELL_WIDTH) / 2;
    let off_y = area.height.saturating_sub(rows) / 2;
    let style = Style::default().fg(theme.piece_color(piece.color_id()));
    let buf = frame.buffer_mut();
    for (col, row) in piece.offsets() {
        let rx = area.x + off_x + col as u16 * CELL_WIDTH;
        let ry = area.y + off_y + row as u16;
        if rx + CELL_WIDTH <= area.x + area.width && ry < area.y + area.height {
            buf.set_string(rx, ry, BLOCK, style);
        }
    }
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup = centered(area, 26, 5);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        )),
        Line::from(Span::styled(" P - Resume   Q - Quit ", Style::default().fg(theme.main_fg))),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line))
                .style(Style::default().bg(theme.bg)),
        )
        .render(popup, frame.buffer_mut());
}
