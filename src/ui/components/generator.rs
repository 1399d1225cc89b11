use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::app::{GeneratorFocus, GeneratorOutput};
use crate::catalog::CaseCatalog;
use crate::ui::theme::Theme;

/// AI case generator screen: its own industry + case pickers (independent
/// of the practice selection) and the output pane.
pub struct GeneratorView<'a> {
    pub catalog: &'a CaseCatalog,
    pub industry_idx: usize,
    pub case_idx: usize,
    pub focus: GeneratorFocus,
    pub output: &'a GeneratorOutput,
    pub theme: &'a Theme,
}

impl<'a> GeneratorView<'a> {
    pub fn new(
        catalog: &'a CaseCatalog,
        industry_idx: usize,
        case_idx: usize,
        focus: GeneratorFocus,
        output: &'a GeneratorOutput,
        theme: &'a Theme,
    ) -> Self {
        Self {
            catalog,
            industry_idx,
            case_idx,
            focus,
            output,
            theme,
        }
    }

    fn picker_line(&self, label: &str, value: String, focused: bool) -> Line<'_> {
        let colors = &self.theme.colors;
        let indicator = if focused { " > " } else { "   " };
        Line::from(vec![
            Span::styled(
                format!("{indicator}{label}: "),
                Style::default()
                    .fg(if focused { colors.accent() } else { colors.fg() })
                    .add_modifier(if focused {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            ),
            Span::styled(
                format!("< {value} >"),
                Style::default().fg(if focused {
                    colors.highlight()
                } else {
                    colors.text_dim()
                }),
            ),
        ])
    }
}

impl Widget for GeneratorView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(5)])
            .split(area);

        // Pickers
        let industry = &self.catalog.industries[self.industry_idx];
        let case = &self.catalog.case_types[self.case_idx];

        let picker_block = Block::bordered()
            .title(" Generate a Case Prompt ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let picker_inner = picker_block.inner(layout[0]);
        picker_block.render(layout[0], buf);

        let lines = vec![
            self.picker_line(
                "Industry ",
                format!("{} {}", industry.icon, industry.name),
                self.focus == GeneratorFocus::Industry,
            ),
            self.picker_line(
                "Case type",
                format!("{} ({})", case.name, case.category),
                self.focus == GeneratorFocus::Case,
            ),
            Line::from(Span::styled(
                "   j/k switch field  ←/→ change  [g] generate",
                Style::default().fg(colors.text_dim()),
            )),
        ];
        Paragraph::new(lines).render(picker_inner, buf);

        // Output pane
        let (title, border) = match self.output {
            GeneratorOutput::Pending => (" Generating… ", colors.warning()),
            GeneratorOutput::Failed { .. } => (" Generation Failed ", colors.error()),
            _ => (" Generated Case ", colors.border()),
        };
        let output_block = Block::bordered()
            .title(title)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));
        let output_inner = output_block.inner(layout[1]);
        output_block.render(layout[1], buf);

        let output_lines: Vec<Line> = match self.output {
            GeneratorOutput::Empty => vec![Line::from(Span::styled(
                "Pick an industry and case type, then press [g].",
                Style::default().fg(colors.text_dim()),
            ))],
            GeneratorOutput::Pending => vec![Line::from(Span::styled(
                "Asking the model for a fresh case prompt…",
                Style::default().fg(colors.warning()),
            ))],
            GeneratorOutput::Ready(text) => text
                .lines()
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(colors.fg()))))
                .collect(),
            GeneratorOutput::Failed { message, hints } => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        message.clone(),
                        Style::default().fg(colors.error()),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        "Troubleshooting:",
                        Style::default().fg(colors.fg()),
                    )),
                ];
                lines.extend(hints.iter().map(|hint| {
                    Line::from(Span::styled(
                        format!("  • {hint}"),
                        Style::default().fg(colors.text_dim()),
                    ))
                }));
                lines
            }
        };
        Paragraph::new(output_lines)
            .wrap(Wrap { trim: false })
            .render(output_inner, buf);
    }
}
