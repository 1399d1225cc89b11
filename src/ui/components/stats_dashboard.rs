use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::catalog::CaseCatalog;
use crate::engine::stats;
use crate::session::record::PracticeSession;
use crate::session::timer::format_duration;
use crate::ui::theme::Theme;

/// Practice statistics: totals, recent history, weak spots. Everything is
/// derived from the history slice on render; nothing is cached.
pub struct StatsDashboard<'a> {
    pub history: &'a [PracticeSession],
    pub catalog: &'a CaseCatalog,
    pub confirm_clear: bool,
    pub theme: &'a Theme,
}

impl<'a> StatsDashboard<'a> {
    pub fn new(
        history: &'a [PracticeSession],
        catalog: &'a CaseCatalog,
        confirm_clear: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            history,
            catalog,
            confirm_clear,
            theme,
        }
    }
}

impl Widget for StatsDashboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Practice Stats ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.history.is_empty() {
            let msg = Paragraph::new(Line::from(Span::styled(
                "No practice sessions yet. Open a case and start the timer!",
                Style::default().fg(colors.text_dim()),
            )));
            msg.render(inner, buf);
            return;
        }

        let aggregated = stats::aggregate(self.history);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(6)])
            .split(inner);

        // Totals row
        let totals = Line::from(vec![
            Span::styled("Sessions: ", Style::default().fg(colors.text_dim())),
            Span::styled(
                aggregated.total_sessions.to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Total time: ", Style::default().fg(colors.text_dim())),
            Span::styled(
                format_duration(aggregated.total_duration_secs),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Avg time: ", Style::default().fg(colors.text_dim())),
            Span::styled(
                format_duration(aggregated.average_duration_secs),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(totals).render(layout[0], buf);

        // Two columns: recent history, weak spots
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(layout[1]);

        self.render_recent(columns[0], buf);
        self.render_weak_spots(&aggregated, columns[1], buf);

        // Clear-history confirmation overlay
        if self.confirm_clear {
            let dialog_width = 44u16.min(area.width);
            let dialog_height = 4u16;
            let dialog_x = area.x + area.width.saturating_sub(dialog_width) / 2;
            let dialog_y = area.y + area.height.saturating_sub(dialog_height) / 2;
            let dialog_area = Rect::new(dialog_x, dialog_y, dialog_width, dialog_height);

            Clear.render(dialog_area, buf);
            let dialog = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Clear all practice history? (y/n)  ",
                    Style::default().fg(colors.fg()),
                )),
            ])
            .style(Style::default().bg(colors.bg()))
            .block(
                Block::bordered()
                    .title(" Confirm ")
                    .border_style(Style::default().fg(colors.error()))
                    .style(Style::default().bg(colors.bg())),
            );
            dialog.render(dialog_area, buf);
        }
    }
}

impl StatsDashboard<'_> {
    fn render_recent(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Recent Sessions ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = Vec::new();
        for session in stats::recent(self.history) {
            let industry = session.industry.as_deref().unwrap_or("General");
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<28}", truncate(&session.case_type, 28)),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(
                    format!("{:>6}  ", format_duration(session.duration)),
                    Style::default().fg(colors.highlight()),
                ),
                Span::styled(
                    format!(
                        "{}  {}",
                        session.timestamp.format("%Y-%m-%d"),
                        truncate(industry, 20)
                    ),
                    Style::default().fg(colors.text_dim()),
                ),
            ]));
        }
        Paragraph::new(lines).render(inner, buf);
    }

    fn render_weak_spots(&self, aggregated: &stats::PracticeStats, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Weak Spots ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let weak = stats::weak_spots(self.catalog, aggregated);
        if weak.is_empty() {
            let msg = Paragraph::new(Line::from(Span::styled(
                "All case types practiced multiple times. Nice.",
                Style::default().fg(colors.success()),
            )));
            msg.render(inner, buf);
            return;
        }

        let lines: Vec<Line> = weak
            .iter()
            .map(|(case, count)| {
                let times = if *count == 1 { "1 time" } else { "0 times" };
                Line::from(vec![
                    Span::styled(
                        format!("{:<30}", truncate(&case.name, 30)),
                        Style::default().fg(colors.warning()),
                    ),
                    Span::styled(times, Style::default().fg(colors.text_dim())),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
