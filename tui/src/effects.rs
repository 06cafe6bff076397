//! Cell-level effects: scaling, sliding and fading of card surfaces.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Shrink `base` around its center. `scale` is clamped to `(0, 1]`.
#[must_use]
pub fn scale_rect(base: Rect, scale: f32) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let width = (f32::from(base.width) * scale).round() as u16;
    let height = (f32::from(base.height) * scale).round() as u16;
    let width = width.max(1).min(base.width);
    let height = height.max(1).min(base.height);
    let x = base.x + (base.width.saturating_sub(width) / 2);
    let y = base.y + (base.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// How a pre-rendered surface is blended onto the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blend {
    /// 0.0 is invisible, 1.0 fully opaque.
    pub opacity: f32,
    /// 0.0 keeps colors, 1.0 is fully desaturated.
    pub grayscale: f32,
    /// Color the surface fades toward.
    pub backdrop: Color,
}

impl Blend {
    #[must_use]
    pub fn opaque(backdrop: Color) -> Self {
        Self {
            opacity: 1.0,
            grayscale: 0.0,
            backdrop,
        }
    }

    #[must_use]
    pub fn apply(&self, color: Color) -> Color {
        fade(desaturate(color, self.grayscale), self.backdrop, self.opacity)
    }
}

/// Mix `color` toward `backdrop`. Named colors switch over at half opacity.
#[must_use]
pub fn fade(color: Color, backdrop: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (color, backdrop) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => Color::Rgb(
            mix(br, r, opacity),
            mix(bg, g, opacity),
            mix(bb, b, opacity),
        ),
        _ if opacity >= 0.5 => color,
        _ if opacity > 0.0 => Color::DarkGray,
        _ => backdrop,
    }
}

/// Pull `color` toward its own luma.
#[must_use]
pub fn desaturate(color: Color, amount: f32) -> Color {
    let amount = amount.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => {
            let luma = (0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b))
                .round()
                .clamp(0.0, 255.0) as u8;
            Color::Rgb(
                mix(r, luma, amount),
                mix(g, luma, amount),
                mix(b, luma, amount),
            )
        }
        Color::Reset | Color::Black | Color::White | Color::Gray | Color::DarkGray => color,
        _ if amount >= 0.5 => Color::Gray,
        _ => color,
    }
}

fn mix(from: u8, to: u8, t: f32) -> u8 {
    (f32::from(from) + (f32::from(to) - f32::from(from)) * t)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// Copy `surface` onto `dest` with its top-left corner at `(x, y)`, which
/// may lie outside `clip`. Cells outside `clip` are dropped.
pub fn composite(surface: &Buffer, dest: &mut Buffer, x: i32, y: i32, clip: Rect, blend: Blend) {
    let area = surface.area;
    let clip = clip.intersection(dest.area);
    for row in 0..area.height {
        let dy = y + i32::from(row);
        if dy < i32::from(clip.top()) || dy >= i32::from(clip.bottom()) {
            continue;
        }
        for col in 0..area.width {
            let dx = x + i32::from(col);
            if dx < i32::from(clip.left()) || dx >= i32::from(clip.right()) {
                continue;
            }
            let Some(src) = surface.cell((area.x + col, area.y + row)) else {
                continue;
            };
            let Some(cell) = dest.cell_mut((dx as u16, dy as u16)) else {
                continue;
            };
            *cell = src.clone();
            cell.set_fg(blend.apply(src.fg));
            cell.set_bg(blend.apply(src.bg));
        }
    }
}
