//! Game screen rendering.
//!
//! Uses half-block pixel rendering: each board cell is one colored pixel and
//! two vertical pixels share a terminal row via `▀` (fg = top, bg = bottom).

use super::game_common::{
    create_screen_layout, render_modal, render_panel_frame, render_status_bar,
};
use crate::app::{App, GameOverlay};
use crate::game::{Direction, GameEngine, GameOverCause, GameState, Variant};
use rand::Rng;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BORDER_H: char = '\u{2500}'; // ─
const BORDER_V: char = '\u{2502}'; // │
const BORDER_TL: char = '\u{250C}'; // ┌
const BORDER_TR: char = '\u{2510}'; // ┐
const BORDER_BL: char = '\u{2514}'; // └
const BORDER_BR: char = '\u{2518}'; // ┘
const HALF_TOP: char = '\u{2580}'; // ▀
const FULL_BLOCK: char = '\u{2588}'; // █

const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const HEAD_UNRESTRICTED: Color = Color::Rgb(255, 215, 0);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const FOOD_COLOR: Color = Color::Rgb(255, 80, 40);
const PREY_COLOR: Color = Color::Rgb(255, 200, 60);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);
const FRAME_COLOR: Color = Color::Rgb(80, 80, 80);

pub fn render_game_screen<R: Rng>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let engine = &app.engine;
    let layout = create_screen_layout(frame, area, " Snake Arcade ", Color::LightGreen, 12, 22);

    render_play_field(frame, layout.content, engine);
    render_overlay(frame, layout.content, app);
    render_status_bar_content(frame, layout.status_bar, app);
    render_info_panel(frame, layout.side_panel, engine);
}

/// Interpolated color for body segment `index` (0 = head).
fn body_color(index: usize, snake_len: usize) -> Color {
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    let r = (BODY_BRIGHT.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (BODY_BRIGHT.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (BODY_BRIGHT.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

pub(crate) fn heading_arrow(direction: Direction) -> char {
    match direction {
        Direction::Up => '↑',
        Direction::Down => '↓',
        Direction::Left => '←',
        Direction::Right => '→',
    }
}

fn target_color(variant: Variant) -> Color {
    match variant {
        Variant::Food => FOOD_COLOR,
        Variant::Prey => PREY_COLOR,
    }
}

/// Board cells as pixel colors, indexed `[y][x]`.
fn pixel_grid<R: Rng>(engine: &GameEngine<R>) -> Vec<Vec<Option<Color>>> {
    let n = engine.grid_size().max(0) as usize;
    let mut pixels = vec![vec![None; n]; n];

    let target = engine.target().cell;
    if target.in_bounds(engine.grid_size()) {
        pixels[target.y as usize][target.x as usize] = Some(target_color(engine.config().variant));
    }

    let head_color = if engine.special_mode() {
        HEAD_UNRESTRICTED
    } else {
        HEAD_COLOR
    };
    let snake_len = engine.snake().len();
    for (i, seg) in engine.snake().iter().enumerate() {
        if seg.in_bounds(engine.grid_size()) {
            pixels[seg.y as usize][seg.x as usize] = Some(if i == 0 {
                head_color
            } else {
                body_color(i, snake_len)
            });
        }
    }
    pixels
}

fn render_play_field<R: Rng>(frame: &mut Frame, area: Rect, engine: &GameEngine<R>) {
    if area.height < 3 || area.width < 5 {
        return;
    }

    let pixels = pixel_grid(engine);
    let grid = pixels.len();
    let content_rows = grid.div_ceil(2);
    let render_w = ((grid + 2) as u16).min(area.width);
    let inner_w = render_w as usize - 2;
    let x_off = area.x + area.width.saturating_sub(render_w) / 2;
    let y_off = area.y;
    let border = Style::default().fg(FRAME_COLOR);

    // Top border with the score embedded on the right.
    {
        let score_val = engine.score().to_string();
        let label = "Score: ";
        let score_len = label.len() + score_val.len();
        let pad_before = inner_w.saturating_sub(score_len + 1);
        let pad_after = inner_w.saturating_sub(pad_before + score_len);

        let mut spans = vec![Span::styled(BORDER_TL.to_string(), border)];
        spans.push(Span::styled(
            std::iter::repeat_n(BORDER_H, pad_before).collect::<String>(),
            border,
        ));
        if inner_w >= score_len {
            spans.push(Span::styled(label, border));
            spans.push(Span::styled(score_val, Style::default().fg(Color::White)));
        }
        spans.push(Span::styled(
            std::iter::repeat_n(BORDER_H, pad_after).collect::<String>(),
            border,
        ));
        spans.push(Span::styled(BORDER_TR.to_string(), border));
        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_off, y_off, render_w, 1),
        );
    }

    let empty_row: Vec<Option<Color>> = vec![None; grid];
    for term_row in 0..content_rows {
        let row_y = y_off + 1 + term_row as u16;
        if row_y >= area.y + area.height {
            break;
        }
        let top_row = pixels.get(term_row * 2).unwrap_or(&empty_row);
        let bot_row = pixels.get(term_row * 2 + 1).unwrap_or(&empty_row);

        let mut spans = vec![Span::styled(BORDER_V.to_string(), border)];

        // Batch runs of cells with the same colors into one span.
        let mut cur_fg = Color::Reset;
        let mut cur_bg = Color::Reset;
        let mut cur_text = String::new();
        for (&top_c, &bot_c) in top_row.iter().zip(bot_row.iter()).take(inner_w) {
            let fg = top_c.unwrap_or(EMPTY_BG);
            let bg = bot_c.unwrap_or(EMPTY_BG);
            if (fg != cur_fg || bg != cur_bg) && !cur_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut cur_text),
                    Style::default().fg(cur_fg).bg(cur_bg),
                ));
            }
            cur_fg = fg;
            cur_bg = bg;
            cur_text.push(HALF_TOP);
        }
        if !cur_text.is_empty() {
            spans.push(Span::styled(
                cur_text,
                Style::default().fg(cur_fg).bg(cur_bg),
            ));
        }
        spans.push(Span::styled(BORDER_V.to_string(), border));

        frame.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(x_off, row_y, render_w, 1),
        );
    }

    let bot_y = y_off + 1 + content_rows as u16;
    if bot_y < area.y + area.height {
        let mut s = String::new();
        s.push(BORDER_BL);
        s.extend(std::iter::repeat_n(BORDER_H, inner_w));
        s.push(BORDER_BR);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(s, border))),
            Rect::new(x_off, bot_y, render_w, 1),
        );
    }
}

fn cause_text(cause: Option<GameOverCause>) -> &'static str {
    match cause {
        Some(GameOverCause::Wall) => "You hit the wall.",
        Some(GameOverCause::SelfCollision) => "You ran into yourself.",
        Some(GameOverCause::BoardFilled) => "The board is full!",
        None => "",
    }
}

fn hint(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

fn render_overlay<R: Rng>(frame: &mut Frame, area: Rect, app: &App<R>) {
    let engine = &app.engine;
    match &app.overlay {
        GameOverlay::NamePrompt(prompt) => {
            prompt.draw(frame, area, engine.score());
            return;
        }
        GameOverlay::Submitting { player_name } => {
            render_modal(
                frame,
                area,
                "Submitting score...",
                Color::Yellow,
                vec![Line::from(format!("{} - {}", player_name, engine.score()))],
            );
            return;
        }
        GameOverlay::Submitted { entry } => {
            render_modal(
                frame,
                area,
                "Score submitted!",
                Color::Green,
                vec![
                    Line::from(format!("{} - {}", entry.player_name, entry.score)),
                    Line::from(""),
                    hint("[L] View Leaderboard  [R] Play Again"),
                ],
            );
            return;
        }
        GameOverlay::SubmitFailed { message, .. } => {
            render_modal(
                frame,
                area,
                "Submission failed",
                Color::Red,
                vec![
                    Line::from(Span::styled(message.as_str(), Style::default().fg(Color::White))),
                    Line::from(""),
                    hint("[Enter] Retry  [Esc] OK"),
                ],
            );
            return;
        }
        GameOverlay::None => {}
    }

    match engine.state() {
        GameState::Ready => render_start_prompt(frame, area),
        GameState::Paused => {
            render_modal(
                frame,
                area,
                "PAUSED",
                Color::Yellow,
                vec![hint("[Space] Resume")],
            );
        }
        GameState::GameOver => {
            let submit_hint = if app.can_submit() {
                "[Enter] Submit Score  [R] Play Again"
            } else {
                "[R] Play Again"
            };
            let mut body = vec![
                Line::from(cause_text(engine.game_over_cause())),
                Line::from(Span::styled(
                    format!("Final score: {}", engine.score()),
                    Style::default().fg(Color::Cyan),
                )),
                Line::from(""),
                hint(submit_hint),
            ];
            if app.score_submitted {
                body.insert(2, hint("Score already submitted"));
            }
            let (title, color) = match engine.game_over_cause() {
                Some(GameOverCause::BoardFilled) => ("BOARD CLEARED", Color::Green),
                _ => ("GAME OVER", Color::Red),
            };
            render_modal(frame, area, title, color, body);
        }
        GameState::Playing => {}
    }
}

fn render_start_prompt(frame: &mut Frame, area: Rect) {
    if area.height < 5 || area.width < 20 {
        return;
    }
    let prompt = "[ Press Space to Start ]";
    let width = prompt.chars().count() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    let line = Paragraph::new(Line::from(Span::styled(
        prompt,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(line, Rect::new(x, area.y + area.height / 2, width.min(area.width), 1));
}

fn render_status_bar_content<R: Rng>(frame: &mut Frame, area: Rect, app: &App<R>) {
    match app.engine.state() {
        GameState::Ready => render_status_bar(
            frame,
            area,
            "Ready",
            Color::LightGreen,
            &[("[Space]", "Start"), ("[L]", "Leaderboard"), ("[Q]", "Quit")],
        ),
        GameState::Playing => render_status_bar(
            frame,
            area,
            "Slither!",
            Color::Green,
            &[("[WASD]", "Steer"), ("[Space]", "Pause"), ("[Q]", "Quit")],
        ),
        GameState::Paused => render_status_bar(
            frame,
            area,
            "Paused",
            Color::Yellow,
            &[("[Space]", "Resume"), ("[R]", "Restart"), ("[L]", "Leaderboard")],
        ),
        GameState::GameOver => render_status_bar(
            frame,
            area,
            "Game over",
            Color::Red,
            &[("[R]", "Play Again"), ("[L]", "Leaderboard"), ("[Q]", "Quit")],
        ),
    }
}

fn render_info_panel<R: Rng>(frame: &mut Frame, area: Rect, engine: &GameEngine<R>) {
    let inner = render_panel_frame(frame, area, " Info ");
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let variant = engine.config().variant;

    let mut lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                engine.score().to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Length: ", label),
            Span::styled(engine.snake().len().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", engine.tick_interval_ms()), value),
        ]),
        Line::from(vec![
            Span::styled("Heading: ", label),
            Span::styled(heading_arrow(engine.visual_direction()).to_string(), value),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Mode: ", label),
            Span::styled(variant.name(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            Span::styled("Grid: ", label),
            Span::styled(format!("{0}x{0}", engine.grid_size()), value),
        ]),
    ];
    if engine.special_mode() {
        lines.push(Line::from(Span::styled(
            "Walls wrap",
            Style::default()
                .fg(HEAD_UNRESTRICTED)
                .add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Legend:",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    let target_label = match variant {
        Variant::Food => "Food",
        Variant::Prey => "Prey",
    };
    for (color, name) in [
        (HEAD_COLOR, "Head"),
        (body_color(0, 2), "Body"),
        (target_color(variant), target_label),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!(" {FULL_BLOCK} "), Style::default().fg(color)),
            Span::styled(name, label),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
