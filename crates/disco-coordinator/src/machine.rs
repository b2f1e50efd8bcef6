//! Loading state machine for one domain lookup at a time.
//!
//! The machine owns no tasks and performs no I/O. Each [`Event`] goes in
//! through [`LoadingMachine::apply`], which updates the phase and returns the
//! [`Effect`]s the driver must carry out. Events from timers and fetches carry
//! the [`SessionId`] they were started for; anything tagged with an older
//! session is dropped, so a superseded lookup can never touch visible state.
//!
//! ```text
//!            start                timer               fetch
//!   Idle ──────────► LoadingBoth ──────► WaitingForApi ──────► Complete
//!                        │                                       ▲   │ settle
//!                        │ fetch          timer                  │   ▼
//!                        └──────► WaitingForTimer ───────────────┘  Idle
//! ```

use std::time::Duration;

use disco_core::{CodeRecord, DomainQuery, FetchResult, LoadingTimings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No lookup active.
    Idle,
    /// Fetch in flight and minimum-display timer running.
    LoadingBoth,
    /// Timer elapsed (ad triggered), fetch still in flight.
    WaitingForApi,
    /// Fetch finished (result stored), timer still running.
    WaitingForTimer,
    /// Both sides finished; waiting out the settle delay.
    Complete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::LoadingBoth => write!(f, "loading-both"),
            Phase::WaitingForApi => write!(f, "waiting-for-api"),
            Phase::WaitingForTimer => write!(f, "waiting-for-timer"),
            Phase::Complete => write!(f, "complete"),
        }
    }
}

/// Identifies one lookup. Every start and every cancel moves to a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What consumers are allowed to see of the current session.
///
/// Only published on session start, after the settle delay, and on cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub loading: bool,
    pub domain: Option<DomainQuery>,
    pub codes: Vec<CodeRecord>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start { domain: DomainQuery, premium: bool },
    FetchCompleted { session: SessionId, result: FetchResult },
    TimerElapsed { session: SessionId },
    SettleElapsed { session: SessionId },
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Drop every task belonging to earlier sessions.
    AbortTasks,
    Publish(SessionView),
    StartTimer { session: SessionId, delay: Duration },
    StartFetch { session: SessionId, domain: DomainQuery },
    /// Call the ad adapter's show-or-load. Emitted at most once per session.
    TriggerAd { session: SessionId },
    ScheduleSettle { session: SessionId, delay: Duration },
}

#[derive(Debug)]
pub struct LoadingMachine {
    timings: LoadingTimings,
    phase: Phase,
    session: SessionId,
    domain: Option<DomainQuery>,
    premium: bool,
    pending: Option<FetchResult>,
    ad_triggered: bool,
}

impl LoadingMachine {
    #[must_use]
    pub fn new(timings: LoadingTimings) -> Self {
        Self {
            timings,
            phase: Phase::Idle,
            session: SessionId(0),
            domain: None,
            premium: false,
            pending: None,
            ad_triggered: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn timings(&self) -> LoadingTimings {
        self.timings
    }

    /// Applies one event and returns the effects to run, in order.
    ///
    /// Events that have no transition from the current phase, or that belong
    /// to a superseded session, change nothing and return no effects.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Start { domain, premium } => self.start(domain, premium),
            Event::Cancel => self.cancel(),
            Event::TimerElapsed { session } => {
                if self.is_current(session, "timer") {
                    self.on_timer_elapsed()
                } else {
                    Vec::new()
                }
            }
            Event::FetchCompleted { session, result } => {
                if self.is_current(session, "fetch") {
                    self.on_fetch_completed(result)
                } else {
                    Vec::new()
                }
            }
            Event::SettleElapsed { session } => {
                if self.is_current(session, "settle") {
                    self.on_settle_elapsed()
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn start(&mut self, domain: DomainQuery, premium: bool) -> Vec<Effect> {
        self.advance_session();
        self.phase = Phase::LoadingBoth;
        self.domain = Some(domain.clone());
        self.premium = premium;
        self.pending = None;
        self.ad_triggered = false;

        tracing::debug!(session = %self.session, domain = %domain, premium, "session started");

        vec![
            Effect::AbortTasks,
            Effect::Publish(SessionView {
                loading: true,
                domain: Some(domain.clone()),
                codes: Vec::new(),
                error: None,
            }),
            Effect::StartTimer {
                session: self.session,
                delay: self.timings.timer_delay(premium),
            },
            Effect::StartFetch {
                session: self.session,
                domain,
            },
        ]
    }

    fn cancel(&mut self) -> Vec<Effect> {
        let was = self.phase;
        self.advance_session();
        self.phase = Phase::Idle;
        self.domain = None;
        self.pending = None;
        self.ad_triggered = false;

        tracing::debug!(session = %self.session, from = %was, "session cancelled");

        vec![Effect::AbortTasks, Effect::Publish(SessionView::default())]
    }

    fn on_timer_elapsed(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        match self.phase {
            Phase::LoadingBoth => {
                self.trigger_ad(&mut effects);
                self.transition(Phase::WaitingForApi);
            }
            Phase::WaitingForTimer => {
                self.trigger_ad(&mut effects);
                self.complete(&mut effects);
            }
            Phase::Idle | Phase::WaitingForApi | Phase::Complete => {}
        }
        effects
    }

    fn on_fetch_completed(&mut self, result: FetchResult) -> Vec<Effect> {
        let mut effects = Vec::new();
        match self.phase {
            Phase::LoadingBoth => {
                self.pending = Some(result);
                self.transition(Phase::WaitingForTimer);
            }
            Phase::WaitingForApi => {
                self.pending = Some(result);
                self.complete(&mut effects);
            }
            Phase::Idle | Phase::WaitingForTimer | Phase::Complete => {}
        }
        effects
    }

    fn on_settle_elapsed(&mut self) -> Vec<Effect> {
        if self.phase != Phase::Complete {
            return Vec::new();
        }
        self.transition(Phase::Idle);

        let (codes, error) = match self.pending.take() {
            Some(FetchResult::Success(codes)) => (codes, None),
            Some(FetchResult::Failure(reason)) => (Vec::new(), Some(reason)),
            // Complete is only entered with a stored result.
            None => (Vec::new(), None),
        };

        vec![Effect::Publish(SessionView {
            loading: false,
            domain: self.domain.clone(),
            codes,
            error,
        })]
    }

    fn trigger_ad(&mut self, effects: &mut Vec<Effect>) {
        if self.premium || self.ad_triggered {
            return;
        }
        self.ad_triggered = true;
        effects.push(Effect::TriggerAd {
            session: self.session,
        });
    }

    fn complete(&mut self, effects: &mut Vec<Effect>) {
        self.transition(Phase::Complete);
        effects.push(Effect::ScheduleSettle {
            session: self.session,
            delay: self.timings.settle_delay,
        });
    }

    fn transition(&mut self, to: Phase) {
        tracing::debug!(session = %self.session, from = %self.phase, to = %to, "loading transition");
        self.phase = to;
    }

    fn advance_session(&mut self) {
        self.session = SessionId(self.session.0.wrapping_add(1));
    }

    fn is_current(&self, session: SessionId, source: &'static str) -> bool {
        if session == self.session {
            return true;
        }
        tracing::debug!(
            current = %self.session,
            stale = %session,
            source,
            "ignoring event from superseded session"
        );
        false
    }
}

#[cfg(test)]
#[path = "machine_test.rs"]
mod tests;
