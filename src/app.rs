use std::sync::mpsc::Sender;
use std::thread;

use anyhow::{Result, ensure};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::ai::client::{CaseGenerator, GenerateError, troubleshooting};
use crate::catalog::CaseCatalog;
use crate::config::Config;
use crate::event::AppEvent;
use crate::session::timer::{self, TimerPhase};
use crate::session::tracker::{SessionError, SessionTracker};
use crate::store::history::HistoryStore;
use crate::store::json_store::JsonStore;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Browse,
    CaseDetail,
    Combos,
    Stats,
    Generator,
    Settings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorFocus {
    Industry,
    Case,
}

/// Presentation state of the AI request. `Pending` doubles as the trigger
/// guard: no second request can start while one is in flight.
pub enum GeneratorOutput {
    Empty,
    Pending,
    Ready(String),
    Failed {
        message: String,
        hints: Vec<&'static str>,
    },
}

pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

pub struct App {
    pub screen: AppScreen,
    pub catalog: CaseCatalog,
    pub config: Config,
    pub theme: &'static Theme,
    pub tracker: SessionTracker,
    pub history: HistoryStore,
    pub api_key: Option<String>,
    pub should_quit: bool,
    pub status: Option<StatusLine>,

    // Browse screen
    pub browse_industry: Option<usize>,
    pub browse_selected: usize,

    // Scroll positions
    pub detail_scroll: u16,
    pub combos_scroll: u16,

    // Stats screen
    pub confirm_clear: bool,

    // Generator screen
    pub gen_industry_idx: usize,
    pub gen_case_idx: usize,
    pub gen_focus: GeneratorFocus,
    pub generator_output: GeneratorOutput,

    // Settings screen
    pub settings_selected: usize,
    pub key_input: Option<LineInput>,

    store: Option<JsonStore>,
    rng: SmallRng,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::load().unwrap_or_default();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let catalog = CaseCatalog::load()?;
        ensure!(
            !catalog.industries.is_empty() && !catalog.case_types.is_empty(),
            "bundled catalog is empty"
        );

        // Two handles to the same data dir: one inside the history store,
        // one for the credential file.
        let history = HistoryStore::load(JsonStore::new().ok());
        let store = JsonStore::new().ok();
        let api_key = store.as_ref().and_then(JsonStore::load_api_key);

        Ok(Self {
            screen: AppScreen::Browse,
            catalog,
            config,
            theme,
            tracker: SessionTracker::new(),
            history,
            api_key,
            should_quit: false,
            status: None,
            browse_industry: None,
            browse_selected: 0,
            detail_scroll: 0,
            combos_scroll: 0,
            confirm_clear: false,
            gen_industry_idx: 0,
            gen_case_idx: 0,
            gen_focus: GeneratorFocus::Industry,
            generator_output: GeneratorOutput::Empty,
            settings_selected: 0,
            key_input: None,
            store,
            rng: SmallRng::from_entropy(),
        })
    }

    pub fn set_theme(&mut self, name: &str) {
        if let Some(new_theme) = Theme::load(name) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
            self.config.theme = name.to_string();
        }
    }

    // ----- status -----

    pub fn notify(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn notify_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: true,
        });
    }

    // ----- navigation -----

    pub fn go_to(&mut self, screen: AppScreen) {
        self.status = None;
        self.confirm_clear = false;
        self.screen = screen;
    }

    /// One-second tick from the event loop. The timer keeps running no
    /// matter which screen is showing, exactly like a stopwatch on a desk.
    pub fn tick(&mut self) {
        self.tracker.tick();
    }

    // ----- browse -----

    pub fn move_case_selection(&mut self, delta: isize) {
        let len = self.catalog.case_types.len() as isize;
        let next = (self.browse_selected as isize + delta).rem_euclid(len);
        self.browse_selected = next as usize;
    }

    /// Cycle the industry filter through None + every catalog industry and
    /// mirror the choice into the tracker.
    pub fn cycle_industry(&mut self, delta: isize) {
        let slots = self.catalog.industries.len() as isize + 1;
        let current = match self.browse_industry {
            None => 0,
            Some(i) => i as isize + 1,
        };
        let next = (current + delta).rem_euclid(slots);
        self.apply_industry(if next == 0 { None } else { Some(next as usize - 1) });
    }

    pub fn random_industry(&mut self) {
        let idx = self.rng.gen_range(0..self.catalog.industries.len());
        self.apply_industry(Some(idx));
    }

    fn apply_industry(&mut self, idx: Option<usize>) {
        self.browse_industry = idx;
        match idx {
            Some(i) => {
                let industry = &self.catalog.industries[i];
                self.tracker.select_industry(&industry.id, &industry.name);
            }
            None => self.tracker.clear_industry(),
        }
    }

    /// Open the highlighted case and make it the pending practice session.
    pub fn open_selected_case(&mut self) {
        let case = &self.catalog.case_types[self.browse_selected];
        self.tracker.select_case(&case.id, &case.name);
        self.detail_scroll = 0;
        self.go_to(AppScreen::CaseDetail);
    }

    // ----- timer actions (case detail) -----

    pub fn start_timer(&mut self) {
        match self.tracker.start() {
            Ok(()) => {}
            Err(SessionError::NoActiveSession) => {
                self.notify_error("Select a case first: open one from the browser");
            }
        }
    }

    pub fn toggle_pause(&mut self) {
        self.tracker.toggle_pause();
    }

    pub fn reset_timer(&mut self) {
        self.tracker.reset_timer();
    }

    pub fn complete_case(&mut self) {
        match self.tracker.complete() {
            Ok(record) => {
                let summary = format!(
                    "Completed a {} case in {}",
                    record.case_type,
                    timer::format_duration(record.duration)
                );
                self.history.append(record);
                self.go_to(AppScreen::Browse);
                self.notify(summary);
            }
            Err(SessionError::NoActiveSession) => {
                self.notify_error("No case session active");
            }
        }
    }

    pub fn timer_is_running(&self) -> bool {
        self.tracker.timer().phase() == TimerPhase::Running
    }

    // ----- stats -----

    pub fn request_clear_history(&mut self) {
        if !self.history.is_empty() {
            self.confirm_clear = true;
        }
    }

    pub fn confirm_clear_history(&mut self) {
        self.history.clear();
        self.confirm_clear = false;
        self.notify("Practice history cleared");
    }

    pub fn cancel_clear_history(&mut self) {
        self.confirm_clear = false;
    }

    // ----- generator -----

    pub fn generator_switch_focus(&mut self) {
        self.gen_focus = match self.gen_focus {
            GeneratorFocus::Industry => GeneratorFocus::Case,
            GeneratorFocus::Case => GeneratorFocus::Industry,
        };
    }

    pub fn generator_cycle(&mut self, delta: isize) {
        match self.gen_focus {
            GeneratorFocus::Industry => {
                let len = self.catalog.industries.len() as isize;
                self.gen_industry_idx =
                    ((self.gen_industry_idx as isize + delta).rem_euclid(len)) as usize;
            }
            GeneratorFocus::Case => {
                let len = self.catalog.case_types.len() as isize;
                self.gen_case_idx =
                    ((self.gen_case_idx as isize + delta).rem_euclid(len)) as usize;
            }
        }
    }

    pub fn ai_pending(&self) -> bool {
        matches!(self.generator_output, GeneratorOutput::Pending)
    }

    /// Kick off a generation request on a worker thread. The trigger is a
    /// no-op while a request is pending; a missing credential redirects to
    /// Settings instead of sending anything.
    pub fn request_generation(&mut self, events: &Sender<AppEvent>) {
        if self.ai_pending() {
            return;
        }
        let Some(api_key) = self.api_key.clone() else {
            let error = GenerateError::MissingCredential;
            self.generator_output = GeneratorOutput::Failed {
                message: error.to_string(),
                hints: troubleshooting(&error),
            };
            self.go_to(AppScreen::Settings);
            self.notify_error("Save an API key before generating cases");
            return;
        };

        let generator = CaseGenerator::from_config(&self.config);
        let case_name = self.catalog.case_types[self.gen_case_idx].name.clone();
        let industry_name = self.catalog.industries[self.gen_industry_idx].name.clone();
        let tx = events.clone();

        self.generator_output = GeneratorOutput::Pending;
        thread::spawn(move || {
            let result = generator.generate(&api_key, &case_name, &industry_name);
            let _ = tx.send(AppEvent::CaseGenerated(result));
        });
    }

    /// Worker-thread outcome. Practice state is untouched either way.
    pub fn on_case_generated(&mut self, result: Result<String, GenerateError>) {
        self.generator_output = match result {
            Ok(text) => GeneratorOutput::Ready(text),
            Err(error) => GeneratorOutput::Failed {
                message: error.to_string(),
                hints: troubleshooting(&error),
            },
        };
    }

    // ----- settings -----

    pub fn begin_key_edit(&mut self) {
        let current = self.api_key.clone().unwrap_or_default();
        self.key_input = Some(LineInput::new(&current));
    }

    pub fn submit_key_edit(&mut self) {
        if let Some(input) = self.key_input.take() {
            let key = input.value().trim().to_string();
            if key.is_empty() {
                self.notify_error("API key unchanged: empty input");
                return;
            }
            if let Some(ref store) = self.store {
                match store.save_api_key(&key) {
                    Ok(()) => self.notify(format!("API key saved ({} characters)", key.len())),
                    Err(_) => {
                        // Key still usable this run even if the write failed
                        self.notify_error("API key kept in memory; saving to disk failed");
                    }
                }
            }
            self.api_key = Some(key);
        }
    }

    pub fn cancel_key_edit(&mut self) {
        self.key_input = None;
    }

    pub fn request_key_test(&mut self, events: &Sender<AppEvent>) {
        let Some(api_key) = self.api_key.clone() else {
            self.notify_error("No API key saved, nothing to test");
            return;
        };
        let generator = CaseGenerator::from_config(&self.config);
        let tx = events.clone();
        self.notify("Testing API key…");
        thread::spawn(move || {
            let result = generator.probe(&api_key);
            let _ = tx.send(AppEvent::KeyTested(result));
        });
    }

    pub fn on_key_tested(&mut self, result: Result<(), GenerateError>) {
        match result {
            Ok(()) => self.notify("API key is valid and working"),
            Err(error) => self.notify_error(format!("API key test failed: {error}")),
        }
    }

    pub fn cycle_theme(&mut self, delta: isize) {
        let themes = Theme::available_themes();
        if themes.is_empty() {
            return;
        }
        let len = themes.len() as isize;
        let current = themes
            .iter()
            .position(|t| *t == self.config.theme)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        let name = themes[next].clone();
        self.set_theme(&name);
    }
}
