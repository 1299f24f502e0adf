use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::{
    GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT,
    GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GLYPH_SNAKE_TAIL,
};
use crate::draw::{Drawable, FrameSketch, Tile};
use crate::game::{GameState, GameStatus, TickReport};
use crate::grid::{Cell, GridSize};
use crate::input::Direction;
use crate::theme::Theme;

/// Renders the full game frame from immutable state.
///
/// `report` is the latest tick's render request; its vacated cell is
/// erased explicitly so a renderer that skips full-frame clears still
/// drops the trail.
pub fn render(
    frame: &mut Frame<'_>,
    state: &GameState,
    theme: &Theme,
    report: Option<TickReport>,
    sketch: &mut FrameSketch,
) {
    let [hud_area, play_outer] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    render_hud(frame, hud_area, state, theme);

    let play_area = fit_to_grid(play_outer, state.bounds());
    let block =
        Block::bordered().border_style(Style::new().fg(theme.border_fg).bg(theme.border_bg));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);
    frame.render_widget(Block::new().style(Style::new().bg(theme.play_bg)), inner);

    if let Some(TickReport {
        vacated: Some(cell),
        ..
    }) = report
    {
        if let Some((x, y)) = logical_to_terminal(inner, state.bounds(), cell) {
            frame
                .buffer_mut()
                .set_string(x, y, " ", Style::new().bg(theme.play_bg));
        }
    }

    sketch.clear();
    state.food.draw(sketch);
    state.snake.draw(sketch);

    let head_direction = state.snake.direction();
    let bounds = state.bounds();
    let buffer = frame.buffer_mut();
    for sprite in sketch.sprites() {
        let Some((x, y)) = logical_to_terminal(inner, bounds, sprite.cell) else {
            continue;
        };

        let (glyph, style) = match sprite.tile {
            Tile::SnakeHead => (
                head_glyph(head_direction),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            ),
            Tile::SnakeBody => (GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body)),
            Tile::SnakeTail => (GLYPH_SNAKE_TAIL, Style::new().fg(theme.snake_tail)),
            Tile::Food => (GLYPH_FOOD, Style::new().fg(theme.food)),
        };
        buffer.set_string(x, y, glyph, style.bg(theme.play_bg));
    }

    if state.status == GameStatus::Paused {
        render_pause_overlay(frame, inner, theme);
    }
}

fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) {
    frame.render_widget(
        Paragraph::new("[p] pause  [q] quit").style(Style::new().fg(theme.hud_fg)),
        area,
    );

    let stats = format!(
        "length {}  round {}  {}x{}",
        state.snake.len(),
        state.rounds + 1,
        state.bounds().width,
        state.bounds().height,
    );
    frame.render_widget(
        Paragraph::new(stats)
            .alignment(Alignment::Right)
            .style(Style::new().fg(theme.hud_fg)),
        area,
    );
}

fn render_pause_overlay(frame: &mut Frame<'_>, inner: Rect, theme: &Theme) {
    let text = "PAUSED  [p] resume";
    let Ok(text_width) = u16::try_from(text.width()) else {
        return;
    };
    if inner.width < text_width || inner.height == 0 {
        return;
    }

    let x = inner.x + (inner.width - text_width) / 2;
    let y = inner.y + inner.height / 2;
    frame.buffer_mut().set_string(
        x,
        y,
        text,
        Style::new()
            .fg(theme.overlay_fg)
            .bg(theme.play_bg)
            .add_modifier(Modifier::BOLD),
    );
}

/// Shrinks the available area to the bordered grid footprint.
fn fit_to_grid(outer: Rect, bounds: GridSize) -> Rect {
    Rect {
        x: outer.x,
        y: outer.y,
        width: outer.width.min(bounds.width.saturating_add(2)),
        height: outer.height.min(bounds.height.saturating_add(2)),
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, cell: Cell) -> Option<(u16, u16)> {
    if !cell.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
