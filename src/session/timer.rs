/// Stopwatch for the active practice attempt. Tick-driven: the event loop
/// delivers one tick per wall-clock second, and the timer only advances in
/// `Running`. Ticks arriving in `Idle` or `Paused` are no-ops, so a stray or
/// repeated tick can never compound elapsed time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PracticeTimer {
    phase: TimerPhase,
    elapsed_seconds: u64,
}

impl PracticeTimer {
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Running or Paused; an attempt is underway either way.
    pub fn is_active(&self) -> bool {
        self.phase != TimerPhase::Idle
    }

    /// Idle → Running. Starting an already-active timer is a no-op: the
    /// attempt keeps its clock and there is still only one tick consumer.
    pub fn start(&mut self) {
        if self.phase == TimerPhase::Idle {
            self.phase = TimerPhase::Running;
        }
    }

    /// Advance by one second if running. Returns true when the displayed
    /// value changed.
    pub fn tick(&mut self) -> bool {
        if self.phase == TimerPhase::Running {
            self.elapsed_seconds += 1;
            true
        } else {
            false
        }
    }

    /// Running ⇄ Paused. Toggling twice lands back on the advancing state.
    /// No-op in Idle.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            TimerPhase::Running => TimerPhase::Paused,
            TimerPhase::Paused => TimerPhase::Running,
            TimerPhase::Idle => TimerPhase::Idle,
        };
    }

    pub fn reset(&mut self) {
        self.phase = TimerPhase::Idle;
        self.elapsed_seconds = 0;
    }
}

/// `minutes:seconds`, seconds zero-padded, minutes unpadded: 75 → "1:15".
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticked(timer: &mut PracticeTimer, n: u64) {
        for _ in 0..n {
            timer.tick();
        }
    }

    #[test]
    fn starts_idle_at_zero() {
        let timer = PracticeTimer::default();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.elapsed_seconds(), 0);
        assert!(!timer.is_active());
    }

    #[test]
    fn ticks_only_advance_while_running() {
        let mut timer = PracticeTimer::default();
        ticked(&mut timer, 5);
        assert_eq!(timer.elapsed_seconds(), 0);

        timer.start();
        ticked(&mut timer, 5);
        assert_eq!(timer.elapsed_seconds(), 5);

        timer.toggle_pause();
        ticked(&mut timer, 5);
        assert_eq!(timer.elapsed_seconds(), 5);
    }

    #[test]
    fn double_pause_returns_to_advancing() {
        let mut timer = PracticeTimer::default();
        timer.start();
        ticked(&mut timer, 3);
        timer.toggle_pause();
        timer.toggle_pause();
        assert_eq!(timer.phase(), TimerPhase::Running);
        ticked(&mut timer, 2);
        assert_eq!(timer.elapsed_seconds(), 5);
    }

    #[test]
    fn pause_in_idle_is_noop() {
        let mut timer = PracticeTimer::default();
        timer.toggle_pause();
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }

    #[test]
    fn start_while_active_keeps_clock() {
        let mut timer = PracticeTimer::default();
        timer.start();
        ticked(&mut timer, 7);
        timer.start();
        assert_eq!(timer.elapsed_seconds(), 7);
        assert_eq!(timer.phase(), TimerPhase::Running);

        timer.toggle_pause();
        timer.start();
        // Start never resumes a paused attempt
        assert_eq!(timer.phase(), TimerPhase::Paused);
    }

    #[test]
    fn reset_returns_to_idle_from_any_state() {
        let mut timer = PracticeTimer::default();
        timer.start();
        ticked(&mut timer, 37);
        assert_eq!(format_duration(timer.elapsed_seconds()), "0:37");
        timer.reset();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(format_duration(timer.elapsed_seconds()), "0:00");

        timer.start();
        timer.toggle_pause();
        timer.reset();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.elapsed_seconds(), 0);
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(5), "0:05");
        assert_eq!(format_duration(75), "1:15");
        assert_eq!(format_duration(125), "2:05");
        assert_eq!(format_duration(3599), "59:59");
        assert_eq!(format_duration(3600), "60:00");
    }
}
