mod ai;
mod app;
mod catalog;
mod config;
mod engine;
mod event;
mod session;
mod store;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::{App, AppScreen};
use event::{AppEvent, EventHandler};
use session::timer;
use ui::components::browser::CaseBrowser;
use ui::components::case_detail::CaseDetail;
use ui::components::combos::CombosView;
use ui::components::generator::GeneratorView;
use ui::components::stats_dashboard::StatsDashboard;
use ui::layout::AppLayout;
use ui::line_input::InputResult;

#[derive(Parser)]
#[command(name = "casedr", version, about = "Terminal case-interview practice tool")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut app = App::new()?;

    if let Some(theme_name) = cli.theme {
        app.set_theme(&theme_name);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // One tick per second: the practice timer's only tick source.
    let events = EventHandler::new(Duration::from_secs(1));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key, events),
            AppEvent::Tick => app.tick(),
            AppEvent::Resize(_, _) => {}
            AppEvent::CaseGenerated(result) => app.on_case_generated(result),
            AppEvent::KeyTested(result) => app.on_key_tested(result),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, events: &EventHandler) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Credential editing captures everything until submit/cancel
    if app.screen == AppScreen::Settings && app.key_input.is_some() {
        handle_key_edit(app, key);
        return;
    }

    // Top-level screen switching, available everywhere but the case view
    if app.screen != AppScreen::CaseDetail && !app.confirm_clear {
        match key.code {
            KeyCode::Char('1') => return app.go_to(AppScreen::Browse),
            KeyCode::Char('2') => return app.go_to(AppScreen::Combos),
            KeyCode::Char('3') => return app.go_to(AppScreen::Stats),
            KeyCode::Char('4') => return app.go_to(AppScreen::Generator),
            KeyCode::Char('5') => return app.go_to(AppScreen::Settings),
            _ => {}
        }
    }

    match app.screen {
        AppScreen::Browse => handle_browse_key(app, key),
        AppScreen::CaseDetail => handle_detail_key(app, key),
        AppScreen::Combos => handle_combos_key(app, key),
        AppScreen::Stats => handle_stats_key(app, key),
        AppScreen::Generator => handle_generator_key(app, key, events),
        AppScreen::Settings => handle_settings_key(app, key, events),
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.move_case_selection(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_case_selection(-1),
        KeyCode::Right | KeyCode::Char('l') => app.cycle_industry(1),
        KeyCode::Left | KeyCode::Char('h') => app.cycle_industry(-1),
        KeyCode::Char('r') => app.random_industry(),
        KeyCode::Enter => app.open_selected_case(),
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Back to the browser; the pending session and its clock live on
        KeyCode::Esc | KeyCode::Char('q') => app.go_to(AppScreen::Browse),
        KeyCode::Char('s') => app.start_timer(),
        KeyCode::Char('p') => app.toggle_pause(),
        KeyCode::Char('x') => app.reset_timer(),
        KeyCode::Char('c') => app.complete_case(),
        KeyCode::Down | KeyCode::Char('j') => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_combos_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to(AppScreen::Browse),
        KeyCode::Down | KeyCode::Char('j') => {
            app.combos_scroll = app.combos_scroll.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.combos_scroll = app.combos_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_stats_key(app: &mut App, key: KeyEvent) {
    // Confirmation dialog takes priority
    if app.confirm_clear {
        match key.code {
            KeyCode::Char('y') => app.confirm_clear_history(),
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_clear_history(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to(AppScreen::Browse),
        KeyCode::Char('x') => app.request_clear_history(),
        _ => {}
    }
}

fn handle_generator_key(app: &mut App, key: KeyEvent, events: &EventHandler) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to(AppScreen::Browse),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Up | KeyCode::Char('k') | KeyCode::Tab => {
            app.generator_switch_focus();
        }
        KeyCode::Right | KeyCode::Char('l') => app.generator_cycle(1),
        KeyCode::Left | KeyCode::Char('h') => app.generator_cycle(-1),
        KeyCode::Char('g') => app.request_generation(&events.sender()),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent, events: &EventHandler) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            let _ = app.config.save();
            app.go_to(AppScreen::Browse);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected < 2 {
                app.settings_selected += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.settings_selected = app.settings_selected.saturating_sub(1);
        }
        KeyCode::Enter => match app.settings_selected {
            0 => app.begin_key_edit(),
            1 => app.request_key_test(&events.sender()),
            2 => app.cycle_theme(1),
            _ => {}
        },
        KeyCode::Right | KeyCode::Char('l') if app.settings_selected == 2 => {
            app.cycle_theme(1);
        }
        KeyCode::Left | KeyCode::Char('h') if app.settings_selected == 2 => {
            app.cycle_theme(-1);
        }
        _ => {}
    }
}

fn handle_key_edit(app: &mut App, key: KeyEvent) {
    let Some(ref mut input) = app.key_input else {
        return;
    };
    match input.handle(key) {
        InputResult::Submit => app.submit_key_edit(),
        InputResult::Cancel => app.cancel_key_edit(),
        InputResult::Continue => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    render_header(frame, app, layout.header);

    match app.screen {
        AppScreen::Browse => {
            let industry = app
                .browse_industry
                .map(|i| &app.catalog.industries[i]);
            let browser =
                CaseBrowser::new(&app.catalog, industry, app.browse_selected, app.theme);
            frame.render_widget(browser, layout.main);
        }
        AppScreen::CaseDetail => {
            if let Some(active) = app.tracker.active_case() {
                if let Some(case) = app.catalog.case_by_id(&active.id) {
                    let detail = CaseDetail::new(
                        case,
                        app.tracker.selected_industry(),
                        app.tracker.timer(),
                        app.detail_scroll,
                        app.theme,
                    );
                    frame.render_widget(detail, layout.main);
                }
            }
        }
        AppScreen::Combos => {
            let combos = CombosView::new(&app.catalog.combo_cases, app.combos_scroll, app.theme);
            frame.render_widget(combos, layout.main);
        }
        AppScreen::Stats => {
            let dashboard = StatsDashboard::new(
                app.history.sessions(),
                &app.catalog,
                app.confirm_clear,
                app.theme,
            );
            frame.render_widget(dashboard, layout.main);
        }
        AppScreen::Generator => {
            let generator = GeneratorView::new(
                &app.catalog,
                app.gen_industry_idx,
                app.gen_case_idx,
                app.gen_focus,
                &app.generator_output,
                app.theme,
            );
            frame.render_widget(generator, layout.main);
        }
        AppScreen::Settings => render_settings(frame, app, layout.main),
    }

    render_footer(frame, app, layout.footer);
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;

    let tabs = [
        (AppScreen::Browse, "[1] Frameworks"),
        (AppScreen::Combos, "[2] Combos"),
        (AppScreen::Stats, "[3] Stats"),
        (AppScreen::Generator, "[4] Generator"),
        (AppScreen::Settings, "[5] Settings"),
    ];
    // The case view belongs to the framework browser for tab purposes
    let active = if app.screen == AppScreen::CaseDetail {
        AppScreen::Browse
    } else {
        app.screen
    };

    let mut spans = vec![Span::styled(
        " casedr ",
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )];
    for (screen, label) in tabs {
        let style = if screen == active {
            Style::default()
                .fg(colors.accent())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.text_dim()).bg(colors.header_bg())
        };
        spans.push(Span::styled(format!(" {label} "), style));
    }

    // Running-clock chip so the stopwatch stays visible from any screen
    if app.tracker.timer().is_active() {
        let state = if app.timer_is_running() {
            "running"
        } else {
            "paused"
        };
        spans.push(Span::styled(
            format!(
                "  ⏱ {} ({state})",
                timer::format_duration(app.tracker.timer().elapsed_seconds())
            ),
            Style::default()
                .fg(colors.highlight())
                .bg(colors.header_bg()),
        ));
    }

    let header =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;

    let line = if let Some(ref status) = app.status {
        Line::from(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(if status.is_error {
                colors.error()
            } else {
                colors.success()
            }),
        ))
    } else {
        let hints = match app.screen {
            AppScreen::Browse => {
                " [j/k] Case  [←/→] Industry  [r] Random  [Enter] Open  [q] Quit"
            }
            AppScreen::CaseDetail => {
                " [s] Start  [p] Pause  [x] Reset  [c] Complete  [j/k] Scroll  [Esc] Back"
            }
            AppScreen::Combos => " [j/k] Scroll  [Esc] Back",
            AppScreen::Stats => " [x] Clear history  [Esc] Back",
            AppScreen::Generator => " [j/k] Field  [←/→] Change  [g] Generate  [Esc] Back",
            AppScreen::Settings => {
                if app.key_input.is_some() {
                    " [Enter] Save key  [Esc] Cancel"
                } else {
                    " [j/k] Field  [Enter] Edit/Run  [←/→] Theme  [Esc] Save & back"
                }
            }
        };
        Line::from(Span::styled(hints, Style::default().fg(colors.text_dim())))
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_settings(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect) {
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(70, 80, area);
    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    frame.render_widget(block, centered);

    let key_value = if let Some(ref input) = app.key_input {
        format!("{}▏", input.masked())
    } else {
        match app.api_key {
            Some(ref key) => format!("saved ({} characters)", key.len()),
            None => "not saved".to_string(),
        }
    };

    let fields: [(&str, String); 3] = [
        ("API key", key_value),
        ("Test key", "send a probe request".to_string()),
        ("Theme", app.config.theme.clone()),
    ];

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { " > " } else { "   " };
        let label_style = Style::default()
            .fg(if is_selected { colors.accent() } else { colors.fg() })
            .add_modifier(if is_selected {
                Modifier::BOLD
            } else {
                Modifier::empty()
            });
        let value_color = if i == 0 && app.key_input.is_some() {
            colors.highlight()
        } else if app.api_key.is_some() && i == 0 {
            colors.success()
        } else {
            colors.text_dim()
        };
        lines.push(Line::from(Span::styled(
            format!("{indicator}{label}:"),
            label_style,
        )));
        lines.push(Line::from(Span::styled(
            format!("      {value}"),
            Style::default().fg(value_color),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        format!("   Endpoint: {}", app.config.api_endpoint),
        Style::default().fg(colors.text_dim()),
    )));
    lines.push(Line::from(Span::styled(
        format!("   Model:    {}", app.config.api_model),
        Style::default().fg(colors.text_dim()),
    )));
    lines.push(Line::from(Span::styled(
        "   Endpoint and model are edited in config.toml",
        Style::default().fg(colors.text_dim()),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}
