//! Card faces for each deck variant.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

use swipedeck_engine::DeckItem;
use swipedeck_types::{Candidate, Job};

use crate::theme::{Glyphs, Palette, styles};

/// What a card shows, independent of where it is drawn.
pub trait RenderCard: DeckItem {
    fn headline(&self) -> &str;

    /// Line under the headline (company, current role, ...).
    fn subtitle(&self) -> String;

    /// Short facts rendered as a row of tags.
    fn facts(&self, glyphs: &Glyphs) -> Vec<String>;

    fn body(&self) -> &str;

    /// Small print at the bottom of the card.
    fn footer(&self, _glyphs: &Glyphs) -> Option<String> {
        None
    }
}

impl RenderCard for Job {
    fn headline(&self) -> &str {
        &self.title
    }

    fn subtitle(&self) -> String {
        self.company.clone()
    }

    fn facts(&self, glyphs: &Glyphs) -> Vec<String> {
        let mut facts = Vec::new();
        if !self.location.trim().is_empty() {
            facts.push(format!("{} {}", glyphs.location, self.location.trim()));
        }
        facts.push(self.modality.label().to_string());
        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            facts.push(category.trim().to_string());
        }
        if let Some(salary) = self.salary_label() {
            facts.push(format!("{} {salary}", glyphs.salary));
        }
        facts
    }

    fn body(&self) -> &str {
        &self.description
    }

    fn footer(&self, glyphs: &Glyphs) -> Option<String> {
        if !self.is_external {
            return None;
        }
        Some(match self.external_url.as_deref() {
            Some(url) if !url.trim().is_empty() => format!("{} {}", glyphs.external, url.trim()),
            _ => format!("{} External posting", glyphs.external),
        })
    }
}

impl RenderCard for Candidate {
    fn headline(&self) -> &str {
        &self.name
    }

    fn subtitle(&self) -> String {
        match self.experience_years {
            Some(1) => format!("{} · 1 year", self.title),
            Some(years) => format!("{} · {years} years", self.title),
            None => self.title.clone(),
        }
    }

    fn facts(&self, glyphs: &Glyphs) -> Vec<String> {
        let mut facts = Vec::with_capacity(self.skills.len() + 1);
        if !self.location.trim().is_empty() {
            facts.push(format!("{} {}", glyphs.location, self.location.trim()));
        }
        facts.extend(
            self.skills
                .iter()
                .map(|skill| skill.trim())
                .filter(|skill| !skill.is_empty())
                .map(str::to_string),
        );
        facts
    }

    fn body(&self) -> &str {
        &self.bio
    }

    fn footer(&self, glyphs: &Glyphs) -> Option<String> {
        if self.unlocked {
            self.email.clone()
        } else {
            Some(format!("{} Contact details locked", glyphs.locked))
        }
    }
}

/// Which slot of the stack a card is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardRole {
    Foreground,
    /// The neighbour revealed under a drag. Drawn without small print.
    Background,
}

/// Draw `item` onto an off-screen `width` x `height` surface.
pub fn render_card<T: RenderCard>(
    item: &T,
    role: CardRole,
    width: u16,
    height: u16,
    palette: &Palette,
    glyphs: &Glyphs,
) -> Buffer {
    let area = Rect::new(0, 0, width, height);
    let mut surface = Buffer::empty(area);
    if width < 4 || height < 3 {
        return surface;
    }

    let border = match role {
        CardRole::Foreground => palette.primary,
        CardRole::Background => palette.bg_border,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(glyphs.border)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(palette.bg_panel).fg(palette.text_secondary))
        .padding(Padding::horizontal(1));
    let inner_width = block.inner(area).width as usize;

    let mut lines = vec![
        Line::from(Span::styled(
            item.headline().to_string(),
            styles::card_title(palette),
        )),
    ];
    let subtitle = item.subtitle();
    if !subtitle.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            subtitle,
            styles::card_subtitle(palette),
        )));
    }
    lines.push(Line::from(""));
    lines.extend(fact_rows(&item.facts(glyphs), inner_width, palette));
    lines.push(Line::from(""));
    lines.extend(
        item.body()
            .lines()
            .map(|line| Line::from(Span::raw(line.to_string()))),
    );

    Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .render(area, &mut surface);

    if role == CardRole::Foreground
        && let Some(footer) = item.footer(glyphs)
    {
        let footer_y = height.saturating_sub(2);
        let max = width.saturating_sub(4) as usize;
        surface.set_stringn(
            2,
            footer_y,
            footer,
            max,
            Style::default().fg(palette.text_muted).bg(palette.bg_panel),
        );
    }

    surface
}

/// Pack tags into rows no wider than `width`.
fn fact_rows(facts: &[String], width: usize, palette: &Palette) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for fact in facts {
        let tag = format!(" {fact} ");
        let tag_width = tag.width();
        if !row.is_empty() && used + 1 + tag_width > width {
            rows.push(Line::from(std::mem::take(&mut row)));
            used = 0;
        }
        if !row.is_empty() {
            row.push(Span::raw(" "));
            used += 1;
        }
        used += tag_width;
        row.push(Span::styled(tag, styles::tag(palette)));
    }
    if !row.is_empty() {
        rows.push(Line::from(row));
    }
    rows
}
