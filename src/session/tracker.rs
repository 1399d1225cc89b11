use chrono::Utc;
use thiserror::Error;

use crate::session::record::PracticeSession;
use crate::session::timer::PracticeTimer;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no case selected; open a case to start a practice session")]
    NoActiveSession,
}

/// The case a pending practice attempt is bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveCase {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedIndustry {
    pub id: String,
    pub name: String,
}

/// Binds the current selection (industry + case type) to the practice timer
/// and turns a finished attempt into a history record.
///
/// Invariant shared with the timer: `start` and `complete` both refuse to
/// run without an active case, so a malformed record can never be produced.
#[derive(Debug, Default)]
pub struct SessionTracker {
    timer: PracticeTimer,
    active_case: Option<ActiveCase>,
    selected_industry: Option<SelectedIndustry>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timer(&self) -> &PracticeTimer {
        &self.timer
    }

    pub fn active_case(&self) -> Option<&ActiveCase> {
        self.active_case.as_ref()
    }

    pub fn selected_industry(&self) -> Option<&SelectedIndustry> {
        self.selected_industry.as_ref()
    }

    /// Bind the pending session to a case type. Last selection wins: picking
    /// a different case silently discards the pending attempt, clock
    /// included. Re-selecting the case already active keeps the clock, so
    /// re-opening the framework mid-attempt costs nothing.
    pub fn select_case(&mut self, id: &str, name: &str) {
        let same = self.active_case.as_ref().is_some_and(|c| c.id == id);
        if !same {
            self.timer.reset();
            self.active_case = Some(ActiveCase {
                id: id.to_string(),
                name: name.to_string(),
            });
        }
    }

    /// Industry selection is independent of the timer; changing it mid-run
    /// only affects what the eventual record says.
    pub fn select_industry(&mut self, id: &str, name: &str) {
        self.selected_industry = Some(SelectedIndustry {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    pub fn clear_industry(&mut self) {
        self.selected_industry = None;
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.active_case.is_none() {
            return Err(SessionError::NoActiveSession);
        }
        self.timer.start();
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.timer.toggle_pause();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    /// One-second tick from the event loop. Returns true when the display
    /// value changed.
    pub fn tick(&mut self) -> bool {
        self.timer.tick()
    }

    /// Finish the pending attempt: materialize a history record from the
    /// selection and elapsed clock, reset the timer, and clear the active
    /// case. The caller appends the record to history.
    pub fn complete(&mut self) -> Result<PracticeSession, SessionError> {
        let case = self
            .active_case
            .take()
            .ok_or(SessionError::NoActiveSession)?;
        let record = PracticeSession {
            case_type: case.name,
            industry: self.selected_industry.as_ref().map(|i| i.name.clone()),
            duration: self.timer.elapsed_seconds(),
            timestamp: Utc::now(),
        };
        self.timer.reset();
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::timer::TimerPhase;

    fn tracker_with_case() -> SessionTracker {
        let mut tracker = SessionTracker::new();
        tracker.select_case("profitability", "Profitability Decline");
        tracker
    }

    #[test]
    fn start_without_case_fails_and_leaves_clock_at_zero() {
        let mut tracker = SessionTracker::new();
        assert_eq!(tracker.start(), Err(SessionError::NoActiveSession));
        assert_eq!(tracker.timer().elapsed_seconds(), 0);
        assert_eq!(tracker.timer().phase(), TimerPhase::Idle);
    }

    #[test]
    fn complete_without_case_fails() {
        let mut tracker = SessionTracker::new();
        assert!(matches!(
            tracker.complete(),
            Err(SessionError::NoActiveSession)
        ));
    }

    #[test]
    fn complete_builds_record_and_clears_active_case() {
        let mut tracker = tracker_with_case();
        tracker.select_industry("tech", "Technology & Software");
        tracker.start().unwrap();
        for _ in 0..75 {
            tracker.tick();
        }

        let record = tracker.complete().unwrap();
        assert_eq!(record.case_type, "Profitability Decline");
        assert_eq!(record.industry.as_deref(), Some("Technology & Software"));
        assert_eq!(record.duration, 75);

        // Attempt is finished: timer reset, no active case, start refuses.
        assert_eq!(tracker.timer().elapsed_seconds(), 0);
        assert!(tracker.active_case().is_none());
        assert_eq!(tracker.start(), Err(SessionError::NoActiveSession));
    }

    #[test]
    fn complete_without_industry_records_none() {
        let mut tracker = tracker_with_case();
        tracker.start().unwrap();
        let record = tracker.complete().unwrap();
        assert!(record.industry.is_none());
        assert_eq!(record.duration, 0);
    }

    #[test]
    fn switching_case_discards_pending_attempt() {
        let mut tracker = tracker_with_case();
        tracker.start().unwrap();
        for _ in 0..30 {
            tracker.tick();
        }

        tracker.select_case("pricing", "Pricing Strategy");
        assert_eq!(tracker.timer().elapsed_seconds(), 0);
        assert_eq!(tracker.timer().phase(), TimerPhase::Idle);
        assert_eq!(tracker.active_case().unwrap().name, "Pricing Strategy");
    }

    #[test]
    fn reselecting_same_case_keeps_clock() {
        let mut tracker = tracker_with_case();
        tracker.start().unwrap();
        for _ in 0..30 {
            tracker.tick();
        }

        tracker.select_case("profitability", "Profitability Decline");
        assert_eq!(tracker.timer().elapsed_seconds(), 30);
        assert_eq!(tracker.timer().phase(), TimerPhase::Running);
    }

    #[test]
    fn industry_change_does_not_touch_running_timer() {
        let mut tracker = tracker_with_case();
        tracker.start().unwrap();
        for _ in 0..10 {
            tracker.tick();
        }
        tracker.select_industry("retail", "Retail & E-commerce");
        assert_eq!(tracker.timer().elapsed_seconds(), 10);
        assert_eq!(tracker.timer().phase(), TimerPhase::Running);

        tracker.clear_industry();
        assert_eq!(tracker.timer().phase(), TimerPhase::Running);
    }

    #[test]
    fn paused_time_does_not_accumulate() {
        let mut tracker = tracker_with_case();
        tracker.start().unwrap();
        for _ in 0..5 {
            tracker.tick();
        }
        tracker.toggle_pause();
        for _ in 0..60 {
            tracker.tick();
        }
        tracker.toggle_pause();
        for _ in 0..5 {
            tracker.tick();
        }
        let record = tracker.complete().unwrap();
        assert_eq!(record.duration, 10);
    }
}
