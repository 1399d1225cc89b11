use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::catalog::ComboCase;
use crate::ui::theme::Theme;

/// Combo-case reference: common two-part interview shapes.
pub struct CombosView<'a> {
    pub combos: &'a [ComboCase],
    pub scroll: u16,
    pub theme: &'a Theme,
}

impl<'a> CombosView<'a> {
    pub fn new(combos: &'a [ComboCase], scroll: u16, theme: &'a Theme) -> Self {
        Self {
            combos,
            scroll,
            theme,
        }
    }
}

impl Widget for CombosView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Combo Cases ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        for combo in self.combos {
            lines.push(Line::from(Span::styled(
                combo.name.clone(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                format!("  {}", combo.description),
                Style::default().fg(colors.fg()),
            )));
            lines.push(Line::from(Span::styled(
                format!("  Example: {}", combo.example),
                Style::default().fg(colors.text_dim()),
            )));
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(inner, buf);
    }
}
