use std::time::Duration;

use crate::models::{Candidate, DuplicateReport};

/// Default quiet period before a check fires after the last input change
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_secs(1);

/// Shorter delay used when input arrived while a check was in flight
pub const DEFAULT_RESETTLE_DELAY: Duration = Duration::from_millis(100);

/// Controller state, observable by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Idle,
    PendingDebounce,
    Checking,
    Ready,
}

/// Events fed into the controller by the host
#[derive(Debug, Clone)]
pub enum CheckEvent {
    /// The user changed the form; `None` means the candidate became
    /// incomplete and any pending check should be abandoned.
    InputChanged(Option<Candidate>),
    /// A timer started via `Action::StartTimer` fired. The generation lets
    /// the controller ignore timers it has since superseded.
    TimerFired { generation: u64 },
    /// The record store finished loading the full record set.
    RecordsLoaded,
    /// The host finished running a check.
    CheckCompleted(DuplicateReport),
}

/// What the host should do after feeding an event
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    /// Arm a one-shot timer; deliver `TimerFired` with this generation when
    /// it elapses. Arming a new timer supersedes any earlier one.
    StartTimer { generation: u64, delay: Duration },
    /// Run the matcher for this candidate and report back with
    /// `CheckCompleted`.
    RunCheck(Candidate),
}

/// Debounced duplicate-check state machine.
///
/// Replaces timer-per-keystroke re-computation with an explicit machine the
/// UI layer drives: input events arm a quiet-period timer, the newest input
/// always wins, and checks are deferred until the record set has loaded.
/// The machine itself is synchronous and does no I/O; the host owns timers
/// and matcher invocation.
#[derive(Debug, Clone)]
pub struct CheckController {
    state: CheckState,
    pending: Option<Candidate>,
    records_ready: bool,
    /// Timer fired while records were still loading; run as soon as they land
    deferred: bool,
    /// Input arrived while a check was in flight
    dirty: bool,
    timer_generation: u64,
    last_report: Option<DuplicateReport>,
    quiet_period: Duration,
    resettle_delay: Duration,
}

impl CheckController {
    pub fn new(quiet_period: Duration, resettle_delay: Duration) -> Self {
        Self {
            state: CheckState::Idle,
            pending: None,
            records_ready: false,
            deferred: false,
            dirty: false,
            timer_generation: 0,
            last_report: None,
            quiet_period,
            resettle_delay,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD, DEFAULT_RESETTLE_DELAY)
    }

    pub fn state(&self) -> CheckState {
        self.state
    }

    /// The most recent completed report, if any
    pub fn last_report(&self) -> Option<&DuplicateReport> {
        self.last_report.as_ref()
    }

    /// Feed one event, returning the action the host should take
    pub fn handle(&mut self, event: CheckEvent) -> Action {
        match event {
            CheckEvent::InputChanged(candidate) => self.on_input_changed(candidate),
            CheckEvent::TimerFired { generation } => self.on_timer_fired(generation),
            CheckEvent::RecordsLoaded => self.on_records_loaded(),
            CheckEvent::CheckCompleted(report) => self.on_check_completed(report),
        }
    }

    fn on_input_changed(&mut self, candidate: Option<Candidate>) -> Action {
        let Some(candidate) = candidate.filter(Candidate::is_complete) else {
            // Incomplete input: never invoke the matcher, drop anything queued
            self.pending = None;
            self.deferred = false;
            if self.state != CheckState::Checking {
                self.state = CheckState::Idle;
            } else {
                self.dirty = false;
            }
            return Action::None;
        };

        // Last write wins: the new snapshot replaces whatever was pending
        self.pending = Some(candidate);
        self.deferred = false;

        if self.state == CheckState::Checking {
            // Re-arm after the in-flight check completes
            self.dirty = true;
            return Action::None;
        }

        self.state = CheckState::PendingDebounce;
        self.arm_timer(self.quiet_period)
    }

    fn on_timer_fired(&mut self, generation: u64) -> Action {
        // A superseded timer; newer input already re-armed
        if generation != self.timer_generation || self.state != CheckState::PendingDebounce {
            return Action::None;
        }

        if !self.records_ready {
            // Not yet ready: hold the candidate and run on RecordsLoaded
            self.deferred = true;
            return Action::None;
        }

        self.start_check()
    }

    fn on_records_loaded(&mut self) -> Action {
        self.records_ready = true;

        if self.deferred && self.state == CheckState::PendingDebounce {
            self.deferred = false;
            return self.start_check();
        }

        Action::None
    }

    fn on_check_completed(&mut self, report: DuplicateReport) -> Action {
        self.last_report = Some(report);

        if self.dirty {
            // Input arrived mid-check; settle briefly, then re-run
            self.dirty = false;
            self.state = CheckState::PendingDebounce;
            return self.arm_timer(self.resettle_delay);
        }

        self.state = CheckState::Ready;
        Action::None
    }

    fn start_check(&mut self) -> Action {
        match self.pending.take() {
            Some(candidate) => {
                self.state = CheckState::Checking;
                Action::RunCheck(candidate)
            }
            None => {
                self.state = CheckState::Idle;
                Action::None
            }
        }
    }

    fn arm_timer(&mut self, delay: Duration) -> Action {
        self.timer_generation += 1;
        Action::StartTimer {
            generation: self.timer_generation,
            delay,
        }
    }
}

impl Default for CheckController {
    fn default() -> Self {
        Self::with_defaults()
    }
}
