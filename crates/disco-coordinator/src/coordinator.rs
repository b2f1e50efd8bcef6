//! Runs [`LoadingMachine`] against real timers, a [`CodeFetcher`], and an
//! [`AdPresenter`], and publishes the result through a `watch` channel.
//!
//! All state changes go through [`dispatch`], which holds one lock while the
//! machine applies an event and its effects are carried out. The fetch, the
//! timer, and the settle delay are spawned tasks that report back through
//! the same path, tagged with the session they belong to. The ad adapter is
//! the one collaborator called outside the lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use disco_client::CodeFetcher;
use disco_core::{CodeRecord, DomainQuery, LoadingTimings};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::ads::{show_or_load, AdPresenter};
use crate::clipboard::{Clipboard, ClipboardError};
use crate::machine::{Effect, Event, LoadingMachine, Phase, SessionId, SessionView};

/// Everything the presentation layer renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinatorState {
    pub loading: bool,
    pub domain: Option<DomainQuery>,
    pub codes: Vec<CodeRecord>,
    pub error: Option<String>,
    pub show_copy_toast: bool,
}

struct Inner {
    machine: LoadingMachine,
    tasks: Vec<JoinHandle<()>>,
    toast_generation: u64,
    toast_task: Option<JoinHandle<()>>,
}

struct Shared {
    inner: Mutex<Inner>,
    state_tx: watch::Sender<CoordinatorState>,
    fetcher: Arc<dyn CodeFetcher>,
    ads: Arc<dyn AdPresenter>,
    clipboard: Arc<dyn Clipboard>,
    copy_toast: Duration,
    premium: AtomicBool,
}

/// Coordinates one discount code lookup at a time.
///
/// Cheap to clone; clones share the same session. Every method that starts
/// work spawns tokio tasks and must be called from inside a runtime.
#[derive(Clone)]
pub struct LoadingCoordinator {
    shared: Arc<Shared>,
}

impl LoadingCoordinator {
    #[must_use]
    pub fn new(
        fetcher: Arc<dyn CodeFetcher>,
        ads: Arc<dyn AdPresenter>,
        clipboard: Arc<dyn Clipboard>,
        timings: LoadingTimings,
    ) -> Self {
        let (state_tx, _) = watch::channel(CoordinatorState::default());
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    machine: LoadingMachine::new(timings),
                    tasks: Vec::new(),
                    toast_generation: 0,
                    toast_task: None,
                }),
                state_tx,
                fetcher,
                ads,
                clipboard,
                copy_toast: timings.copy_toast,
                premium: AtomicBool::new(false),
            }),
        }
    }

    /// Sets the premium entitlement used by the next session.
    pub fn set_premium(&self, premium: bool) {
        self.shared.premium.store(premium, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.shared.premium.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CoordinatorState> {
        self.shared.state_tx.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> CoordinatorState {
        self.shared.state_tx.borrow().clone()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.shared.inner.lock().machine.phase()
    }

    /// Starts a lookup for `domain`, superseding any session in progress.
    pub fn start(&self, domain: DomainQuery) {
        let premium = self.is_premium();
        tracing::info!(domain = %domain, premium, "starting code lookup");
        dispatch(&self.shared, Event::Start { domain, premium });
    }

    /// Normalizes raw user input and starts a lookup for it.
    ///
    /// Blank input starts nothing and leaves the current session alone.
    pub fn submit(&self, raw: &str) -> Option<DomainQuery> {
        let Some(domain) = DomainQuery::parse(raw) else {
            tracing::debug!(input = raw, "ignoring blank domain");
            return None;
        };
        self.start(domain.clone());
        Some(domain)
    }

    /// Cancels the current session. `loading` is false when this returns.
    pub fn clear(&self) {
        dispatch(&self.shared, Event::Cancel);
    }

    /// Begins loading an ad ahead of the next session.
    pub fn preload_ad(&self) {
        self.shared.ads.load();
    }

    /// Copies `code` and raises the copy toast for the configured duration.
    ///
    /// A later copy restarts the toast window.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] if the clipboard write fails; the toast is
    /// not shown in that case.
    pub fn copy_code(&self, code: &str) -> Result<(), ClipboardError> {
        self.shared.clipboard.set_text(code)?;
        tracing::info!(code, "copied code");

        let mut inner = self.shared.inner.lock();
        inner.toast_generation = inner.toast_generation.wrapping_add(1);
        let generation = inner.toast_generation;
        if let Some(task) = inner.toast_task.take() {
            task.abort();
        }
        self.shared
            .state_tx
            .send_modify(|state| state.show_copy_toast = true);

        let shared = Arc::clone(&self.shared);
        let delay = self.shared.copy_toast;
        inner.toast_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let inner = shared.inner.lock();
            if inner.toast_generation == generation {
                shared
                    .state_tx
                    .send_modify(|state| state.show_copy_toast = false);
            }
        }));
        Ok(())
    }

    /// Waits until the current session is no longer loading and returns the
    /// state at that point.
    pub async fn wait_until_loaded(&self) -> CoordinatorState {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let state = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        state
    }
}

/// Single mutation entry point: applies `event` and runs its effects.
///
/// Effects run in the order the machine emitted them, under the lock. Ad
/// triggers are the exception: the adapter is called after the lock is
/// released, so a slow presentation never holds up `clear` or `start`.
fn dispatch(shared: &Arc<Shared>, event: Event) {
    let mut ads = Vec::new();
    {
        let mut inner = shared.inner.lock();
        let effects = inner.machine.apply(event);
        run_effects(shared, &mut inner, effects, &mut ads);
    }
    for session in ads {
        tracing::info!(session = %session, "triggering interstitial ad");
        show_or_load(shared.ads.as_ref());
    }
}

fn run_effects(
    shared: &Arc<Shared>,
    inner: &mut Inner,
    effects: Vec<Effect>,
    ads: &mut Vec<SessionId>,
) {
    for effect in effects {
        match effect {
            Effect::AbortTasks => {
                for task in inner.tasks.drain(..) {
                    task.abort();
                }
            }
            Effect::Publish(view) => publish(shared, view),
            Effect::StartTimer { session, delay } => {
                let task = spawn_delayed(shared, delay, Event::TimerElapsed { session });
                inner.tasks.push(task);
            }
            Effect::ScheduleSettle { session, delay } => {
                let task = spawn_delayed(shared, delay, Event::SettleElapsed { session });
                inner.tasks.push(task);
            }
            Effect::StartFetch { session, domain } => {
                let s = Arc::clone(shared);
                let task = tokio::spawn(async move {
                    let result = s.fetcher.fetch(&domain).await;
                    dispatch(&s, Event::FetchCompleted { session, result });
                });
                inner.tasks.push(task);
            }
            Effect::TriggerAd { session } => ads.push(session),
        }
    }
}

fn spawn_delayed(shared: &Arc<Shared>, delay: Duration, event: Event) -> JoinHandle<()> {
    let s = Arc::clone(shared);
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        dispatch(&s, event);
    })
}

fn publish(shared: &Shared, view: SessionView) {
    shared.state_tx.send_modify(|state| {
        state.loading = view.loading;
        state.domain = view.domain;
        state.codes = view.codes;
        state.error = view.error;
    });
}
