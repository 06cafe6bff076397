//! Terminal rendering for SwipeDeck using ratatui.
//!
//! The deck engine works in abstract drag units. One terminal column is
//! [`CELL_UNITS`] units wide, so a 50-unit dead zone is about six columns.

mod card;
mod effects;
mod input;
mod motion;
mod theme;

pub use card::{CardRole, RenderCard, render_card};
pub use effects::{Blend, composite, desaturate, fade, scale_rect};
pub use input::{InputPump, apply_event, handle_events, to_units};
pub use motion::{BackgroundFrame, ForegroundFrame, MotionFrame, OverlayFrame, StackMotion};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use std::time::Instant;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use swipedeck_engine::{BoundaryCopy, CardStack, DeckController, DeckListener};
use swipedeck_types::ui::UiOptions;

/// Drag units per terminal column.
pub const CELL_UNITS: f32 = 8.0;

const MAX_CARD_WIDTH: u16 = 64;
const MAX_CARD_HEIGHT: u16 = 22;
const CAPTION_WIDTH: u16 = 44;
const CAPTION_HEIGHT: u16 = 5;
/// Overlays this faint are not drawn at all.
const MIN_VISIBLE_OPACITY: f32 = 0.02;

/// Viewport width in drag units for a terminal `columns` wide.
#[must_use]
pub fn viewport_units(columns: u16) -> f32 {
    f32::from(columns) * CELL_UNITS
}

/// Render-side state that outlives a single frame.
#[derive(Debug, Clone)]
pub struct DeckView {
    title: String,
    copy: BoundaryCopy,
    options: UiOptions,
    motion: StackMotion,
}

impl DeckView {
    #[must_use]
    pub fn new(title: impl Into<String>, copy: BoundaryCopy, options: UiOptions) -> Self {
        Self {
            title: title.into(),
            copy,
            options,
            motion: StackMotion::new(options.reduced_motion),
        }
    }
}

/// Main draw function
pub fn draw<T, L>(frame: &mut Frame, deck: &DeckController<T, L>, view: &mut DeckView, now: Instant)
where
    T: RenderCard,
    L: DeckListener<T>,
{
    let palette = palette(view.options);
    let glyphs = glyphs(view.options);
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg_dark)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Top bar
            Constraint::Length(1),
            Constraint::Min(3), // Cards
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    let stack = deck.stack();
    draw_top_bar(frame, chunks[0], &view.title, &stack, &palette, &glyphs);
    draw_key_hints(frame, chunks[3], deck.is_empty(), &palette, &glyphs);

    if deck.is_empty() {
        draw_empty(frame, chunks[2], &view.copy, &palette);
        return;
    }

    let stage = chunks[2];
    let card_rect = card_rect(stage);
    let card_units = f32::from(card_rect.width) * CELL_UNITS;
    let motion = view.motion.update(&stack, card_units, now);

    if let Some(bg) = motion.background
        && let Some(item) = deck.items().get(bg.index)
    {
        let rect = scale_rect(card_rect, bg.scale);
        let surface = render_card(
            item,
            CardRole::Background,
            rect.width,
            rect.height,
            &palette,
            &glyphs,
        );
        composite(
            &surface,
            frame.buffer_mut(),
            i32::from(rect.x),
            i32::from(rect.y),
            stage,
            Blend {
                opacity: bg.opacity,
                grayscale: bg.grayscale,
                backdrop: palette.bg_dark,
            },
        );
    }

    if let Some(fg) = motion.foreground
        && let Some(item) = deck.items().get(fg.index)
    {
        let surface = render_card(
            item,
            CardRole::Foreground,
            card_rect.width,
            card_rect.height,
            &palette,
            &glyphs,
        );
        let shift = (fg.offset / CELL_UNITS).round() as i32;
        composite(
            &surface,
            frame.buffer_mut(),
            i32::from(card_rect.x) + shift,
            i32::from(card_rect.y) + i32::from(fg.tilt_rows),
            stage,
            Blend {
                opacity: fg.opacity,
                grayscale: 0.0,
                backdrop: palette.bg_dark,
            },
        );
    }

    if let Some(overlay) = motion.overlay
        && overlay.opacity > MIN_VISIBLE_OPACITY
    {
        let (title, body) = view.copy.for_side(overlay.side);
        draw_caption(
            frame.buffer_mut(),
            card_rect,
            title,
            body,
            overlay.opacity,
            &palette,
            &glyphs,
        );
    }

    if deck.tutorial_visible() {
        draw_tutorial(frame, card_rect, &palette, &glyphs);
    }
}

/// The card's resting position inside `stage`.
#[must_use]
pub fn card_rect(stage: Rect) -> Rect {
    let width = stage.width.saturating_sub(4).min(MAX_CARD_WIDTH).max(1);
    let height = stage.height.min(MAX_CARD_HEIGHT).max(1);
    Rect {
        x: stage.x + (stage.width.saturating_sub(width) / 2),
        y: stage.y,
        width,
        height,
    }
}

fn draw_top_bar(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    stack: &CardStack,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let back = format!(" {} Back", glyphs.back);
    let position = stack
        .progress
        .map(|p| format!("{} of {} ", p.position, p.total))
        .unwrap_or_default();

    let used = back.width() + position.width();
    let free = (area.width as usize).saturating_sub(used);
    let title_width = title.width().min(free);
    let left_pad = free.saturating_sub(title_width) / 2;
    let right_pad = free.saturating_sub(title_width + left_pad);
    let title: String = title.chars().take(title_width).collect();

    let line = Line::from(vec![
        Span::styled(back, styles::key_highlight(palette)),
        Span::raw(" ".repeat(left_pad)),
        Span::styled(title, styles::card_title(palette)),
        Span::raw(" ".repeat(right_pad)),
        Span::styled(position, Style::default().fg(palette.text_muted)),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(palette.bg_highlight)),
        area,
    );
}

fn draw_key_hints(frame: &mut Frame, area: Rect, empty: bool, palette: &Palette, glyphs: &Glyphs) {
    let mut spans = Vec::new();
    let mut hint = |key: String, label: &str| {
        spans.push(Span::styled(key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {label}  "), styles::key_hint(palette)));
    };
    if !empty {
        hint(format!("{}/h", glyphs.arrow_left), "previous");
        hint(format!("{}/l", glyphs.arrow_right), "next");
        hint("drag".to_string(), "swipe");
    }
    hint("q".to_string(), "back");
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn draw_empty(frame: &mut Frame, area: Rect, copy: &BoundaryCopy, palette: &Palette) {
    let height = area.height.min(3);
    let rect = Rect {
        y: area.y + area.height.saturating_sub(height) / 2,
        height,
        ..area
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(
        copy.empty.clone(),
        Style::default().fg(palette.text_secondary),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, rect);
}

fn draw_caption(
    buf: &mut Buffer,
    card: Rect,
    title: &str,
    body: &str,
    opacity: f32,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let width = CAPTION_WIDTH.min(card.width.saturating_sub(4)).max(1);
    let height = CAPTION_HEIGHT.min(card.height).max(1);
    let x = card.x + (card.width.saturating_sub(width) / 2);
    let y = card.y + (card.height.saturating_sub(height) / 2);

    let mut surface = Buffer::empty(Rect::new(0, 0, width, height));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(glyphs.border)
        .border_style(Style::default().fg(palette.yellow))
        .style(Style::default().bg(palette.bg_highlight).fg(palette.text_primary));
    Paragraph::new(vec![
        Line::from(Span::styled(title.to_string(), styles::caption_title(palette))),
        Line::from(body.to_string()),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(block)
    .render(surface.area, &mut surface);

    composite(
        &surface,
        buf,
        i32::from(x),
        i32::from(y),
        card,
        Blend {
            opacity,
            grayscale: 0.0,
            backdrop: palette.bg_panel,
        },
    );
}

fn draw_tutorial(frame: &mut Frame, card: Rect, palette: &Palette, glyphs: &Glyphs) {
    let text = format!(
        " {}  Swipe to navigate  {} ",
        glyphs.arrow_left, glyphs.arrow_right
    );
    let width = (text.width() as u16).min(card.width);
    if card.height < 3 || width == 0 {
        return;
    }
    let rect = Rect {
        x: card.x + (card.width.saturating_sub(width) / 2),
        y: card.bottom().saturating_sub(3),
        width,
        height: 1,
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Span::styled(text, styles::key_highlight(palette)))
            .style(Style::default().bg(palette.bg_highlight)),
        rect,
    );
}
