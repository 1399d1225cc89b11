use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::catalog::{CaseCatalog, Industry};
use crate::ui::theme::Theme;

/// Framework browser: industry selector on top, the full case-type list
/// below with the selected industry's relevant cases highlighted.
pub struct CaseBrowser<'a> {
    pub catalog: &'a CaseCatalog,
    pub industry: Option<&'a Industry>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> CaseBrowser<'a> {
    pub fn new(
        catalog: &'a CaseCatalog,
        industry: Option<&'a Industry>,
        selected: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            catalog,
            industry,
            selected,
            theme,
        }
    }
}

impl Widget for CaseBrowser<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        // Industry selector
        let industry_text = match self.industry {
            Some(industry) => format!("{} {}", industry.icon, industry.name),
            None => "All industries".to_string(),
        };
        let selector = Paragraph::new(Line::from(vec![
            Span::styled("Industry: ", Style::default().fg(colors.text_dim())),
            Span::styled(
                industry_text,
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "   ←/→ change  [r] random",
                Style::default().fg(colors.text_dim()),
            ),
        ]))
        .block(
            Block::bordered()
                .border_style(Style::default().fg(colors.border()))
                .style(Style::default().bg(colors.bg())),
        );
        selector.render(layout[0], buf);

        // Case list
        let relevant = self
            .industry
            .map(|i| self.catalog.relevant_case_ids(&i.id))
            .unwrap_or(&[]);

        let block = Block::bordered()
            .title(" Case Frameworks ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(layout[1]);
        block.render(layout[1], buf);

        let rows = inner.height as usize / 2;
        // Keep the selection visible on short terminals
        let first = if self.selected >= rows && rows > 0 {
            self.selected + 1 - rows
        } else {
            0
        };

        let row_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(2); rows])
            .split(inner);

        for (row, case) in self.catalog.case_types.iter().skip(first).enumerate() {
            if row >= rows {
                break;
            }
            let idx = first + row;
            let is_selected = idx == self.selected;
            let is_relevant = relevant.iter().any(|id| *id == case.id);
            let indicator = if is_selected { ">" } else { " " };
            let marker = if is_relevant { "★ " } else { "  " };

            let name_style = Style::default()
                .fg(if is_selected {
                    colors.accent()
                } else if is_relevant {
                    colors.highlight()
                } else {
                    colors.fg()
                })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            let lines = vec![
                Line::from(vec![
                    Span::styled(format!(" {indicator} {marker}"), name_style),
                    Span::styled(case.name.clone(), name_style),
                    Span::styled(
                        format!("  [{}]  {} · {}", case.category, case.duration, case.difficulty),
                        Style::default().fg(colors.text_dim()),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("      {}", case.description),
                    Style::default().fg(colors.text_dim()),
                )),
            ];
            Paragraph::new(lines).render(row_layout[row], buf);
        }
    }
}
