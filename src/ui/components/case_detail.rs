use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::catalog::CaseType;
use crate::session::timer::{self, PracticeTimer, TimerPhase};
use crate::session::tracker::SelectedIndustry;
use crate::ui::theme::Theme;

/// Full-screen case view: stopwatch panel on top, the framework content in
/// a scrollable body below.
pub struct CaseDetail<'a> {
    pub case: &'a CaseType,
    pub industry: Option<&'a SelectedIndustry>,
    pub timer: &'a PracticeTimer,
    pub scroll: u16,
    pub theme: &'a Theme,
}

impl<'a> CaseDetail<'a> {
    pub fn new(
        case: &'a CaseType,
        industry: Option<&'a SelectedIndustry>,
        timer: &'a PracticeTimer,
        scroll: u16,
        theme: &'a Theme,
    ) -> Self {
        Self {
            case,
            industry,
            timer,
            scroll,
            theme,
        }
    }

    fn timer_panel(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let (state_label, state_color) = match self.timer.phase() {
            TimerPhase::Idle => ("ready", colors.text_dim()),
            TimerPhase::Running => ("running", colors.success()),
            TimerPhase::Paused => ("paused", colors.warning()),
        };

        let keys = match self.timer.phase() {
            TimerPhase::Idle => "[s] start",
            TimerPhase::Running => "[p] pause  [x] reset  [c] complete",
            TimerPhase::Paused => "[p] resume  [x] reset  [c] complete",
        };

        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", timer::format_duration(self.timer.elapsed_seconds())),
                Style::default()
                    .fg(colors.highlight())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("({state_label})"), Style::default().fg(state_color)),
            Span::styled(format!("   {keys}"), Style::default().fg(colors.text_dim())),
        ]);

        let panel = Paragraph::new(line).block(
            Block::bordered()
                .title(" Practice Timer ")
                .border_style(Style::default().fg(if self.timer.is_active() {
                    colors.border_focused()
                } else {
                    colors.border()
                }))
                .style(Style::default().bg(colors.bg())),
        );
        panel.render(area, buf);
    }

    fn body_lines(&self) -> Vec<Line<'_>> {
        let colors = &self.theme.colors;
        let section = Style::default()
            .fg(colors.accent())
            .add_modifier(Modifier::BOLD);
        let text = Style::default().fg(colors.fg());
        let dim = Style::default().fg(colors.text_dim());

        let mut lines: Vec<Line> = Vec::new();

        let industry_note = match self.industry {
            Some(industry) => format!("  ·  practicing against {}", industry.name),
            None => String::new(),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} · {} difficulty", self.case.duration, self.case.difficulty),
                dim,
            ),
            Span::styled(industry_note, dim),
        ]));
        lines.push(Line::from(Span::styled(
            format!("When to use: {}", self.case.when_used),
            text,
        )));
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled("Framework Steps", section)));
        for (i, step) in self.case.framework.steps.iter().enumerate() {
            lines.push(Line::from(Span::styled(
                format!("  {}. {}", i + 1, step),
                text,
            )));
        }
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled("Key Areas to Explore", section)));
        lines.push(Line::from(Span::styled(
            format!("  {}", self.case.framework.key_areas.join("  ·  ")),
            text,
        )));
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled("Clarifying Questions", section)));
        for question in &self.case.clarifying_questions {
            lines.push(Line::from(Span::styled(format!("  • {question}"), text)));
        }
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled("Common Pitfalls", section)));
        for pitfall in &self.case.common_pitfalls {
            lines.push(Line::from(Span::styled(
                format!("  ⚠ {pitfall}"),
                Style::default().fg(colors.warning()),
            )));
        }
        lines.push(Line::from(""));

        lines.push(Line::from(Span::styled("Example Prompt", section)));
        lines.push(Line::from(Span::styled(
            format!("  \"{}\"", self.case.example_prompt),
            dim,
        )));

        lines
    }
}

impl Widget for CaseDetail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(area);

        self.timer_panel(layout[0], buf);

        let block = Block::bordered()
            .title(format!(" {} ", self.case.name))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(layout[1]);
        block.render(layout[1], buf);

        Paragraph::new(self.body_lines())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(inner, buf);
    }
}
