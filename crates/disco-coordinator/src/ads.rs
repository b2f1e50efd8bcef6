//! Interstitial ad presentation.
//!
//! The coordinator only talks to [`AdPresenter`]. [`InterstitialAdManager`]
//! is the production presenter: it keeps one interstitial preloaded through
//! an [`AdNetwork`] and reloads after every presentation.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdError {
    #[error("ad failed to load: {0}")]
    Load(String),

    #[error("ad failed to present: {0}")]
    Present(String),
}

/// Capability the loading coordinator needs from an ad implementation.
///
/// The coordinator calls these from its timer task, so they should return
/// promptly and hand long-running work off to a task of their own.
pub trait AdPresenter: Send + Sync {
    fn is_ready(&self) -> bool;

    /// Starts loading an ad. No-op if one is loading or ready, or the SDK
    /// has not been started.
    fn load(&self);

    /// Presents the loaded ad. If none is ready, starts a load instead.
    fn show(&self);
}

/// Shows the ad when one is ready, otherwise loads one for next time.
pub fn show_or_load(ads: &dyn AdPresenter) {
    if ads.is_ready() {
        ads.show();
    } else {
        tracing::info!("ad not ready; loading one for next time");
        ads.load();
    }
}

/// The ad SDK seam.
#[async_trait]
pub trait AdNetwork: Send + Sync {
    /// Fetches one interstitial and holds it until [`AdNetwork::present`].
    async fn load_interstitial(&self) -> Result<(), AdError>;

    /// Presents the held interstitial and returns once it is dismissed.
    ///
    /// May block; [`InterstitialAdManager`] runs it on the blocking pool.
    fn present(&self) -> Result<(), AdError>;
}

#[derive(Debug, Default)]
struct AdState {
    sdk_started: bool,
    loading: bool,
    ready: bool,
}

/// Keeps one interstitial preloaded and replaces it after each use.
///
/// Loads and presentations run on spawned tokio tasks, so both
/// [`AdPresenter::load`] and [`AdPresenter::show`] return immediately and
/// must be called from inside a runtime.
#[derive(Clone)]
pub struct InterstitialAdManager {
    state: Arc<Mutex<AdState>>,
    network: Arc<dyn AdNetwork>,
}

impl InterstitialAdManager {
    #[must_use]
    pub fn new(network: Arc<dyn AdNetwork>) -> Self {
        Self {
            state: Arc::new(Mutex::new(AdState::default())),
            network,
        }
    }

    /// Records that the ad SDK finished starting, and begins the first load.
    pub fn set_sdk_started(&self, started: bool) {
        let should_load = {
            let mut state = self.state.lock();
            state.sdk_started = started;
            started && !state.loading && !state.ready
        };
        if should_load {
            self.load();
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.lock().loading
    }
}

impl AdPresenter for InterstitialAdManager {
    fn is_ready(&self) -> bool {
        self.state.lock().ready
    }

    fn load(&self) {
        {
            let mut state = self.state.lock();
            if state.loading || state.ready || !state.sdk_started {
                tracing::debug!(
                    loading = state.loading,
                    ready = state.ready,
                    sdk_started = state.sdk_started,
                    "skipping ad load"
                );
                return;
            }
            state.loading = true;
        }

        let state = Arc::clone(&self.state);
        let network = Arc::clone(&self.network);
        tokio::spawn(async move {
            let outcome = network.load_interstitial().await;
            let mut state = state.lock();
            state.loading = false;
            match outcome {
                Ok(()) => {
                    state.ready = true;
                    tracing::info!("interstitial ad loaded");
                }
                Err(e) => {
                    state.ready = false;
                    tracing::warn!(error = %e, "interstitial ad failed to load");
                }
            }
        });
    }

    fn show(&self) {
        {
            let mut state = self.state.lock();
            if !state.ready {
                tracing::warn!("interstitial ad was not ready");
                drop(state);
                self.load();
                return;
            }
            // A presented ad is consumed whether or not presentation succeeds.
            state.ready = false;
        }

        let manager = self.clone();
        tokio::spawn(async move {
            let network = Arc::clone(&manager.network);
            match tokio::task::spawn_blocking(move || network.present()).await {
                Ok(Ok(())) => tracing::info!("interstitial ad dismissed"),
                Ok(Err(e)) => tracing::warn!(error = %e, "interstitial ad failed to present"),
                Err(e) => tracing::error!(error = %e, "interstitial presentation task failed"),
            }
            manager.load();
        });
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use super::*;

    #[derive(Default)]
    struct FakeNetwork {
        fail_load: AtomicBool,
        fail_present: AtomicBool,
        present_for: Mutex<Duration>,
        loads: AtomicUsize,
        presents: AtomicUsize,
    }

    #[async_trait]
    impl AdNetwork for FakeNetwork {
        async fn load_interstitial(&self) -> Result<(), AdError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail_load.load(Ordering::SeqCst) {
                Err(AdError::Load("no fill".to_owned()))
            } else {
                Ok(())
            }
        }

        fn present(&self) -> Result<(), AdError> {
            std::thread::sleep(*self.present_for.lock());
            self.presents.fetch_add(1, Ordering::SeqCst);
            if self.fail_present.load(Ordering::SeqCst) {
                Err(AdError::Present("no window".to_owned()))
            } else {
                Ok(())
            }
        }
    }

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    /// Polls `done` until it holds; presentations finish on the blocking pool.
    async fn eventually(done: impl Fn() -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !done() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[tokio::test]
    async fn load_is_skipped_before_sdk_start() {
        let network = Arc::new(FakeNetwork::default());
        let manager = InterstitialAdManager::new(network.clone());
        manager.load();
        settle().await;
        assert_eq!(network.loads.load(Ordering::SeqCst), 0);
        assert!(!manager.is_ready());
    }

    #[tokio::test]
    async fn sdk_start_triggers_first_load() {
        let network = Arc::new(FakeNetwork::default());
        let manager = InterstitialAdManager::new(network.clone());
        manager.set_sdk_started(true);
        settle().await;
        assert_eq!(network.loads.load(Ordering::SeqCst), 1);
        assert!(manager.is_ready());
        assert!(!manager.is_loading());
    }

    #[tokio::test]
    async fn load_is_idempotent_while_ready() {
        let network = Arc::new(FakeNetwork::default());
        let manager = InterstitialAdManager::new(network.clone());
        manager.set_sdk_started(true);
        settle().await;
        manager.load();
        manager.load();
        settle().await;
        assert_eq!(network.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn show_presents_then_reloads() {
        let network = Arc::new(FakeNetwork::default());
        let manager = InterstitialAdManager::new(network.clone());
        manager.set_sdk_started(true);
        settle().await;

        manager.show();
        eventually(|| manager.is_ready()).await;
        assert_eq!(network.presents.load(Ordering::SeqCst), 1);
        assert_eq!(network.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn show_returns_before_presentation_is_dismissed() {
        let network = Arc::new(FakeNetwork::default());
        *network.present_for.lock() = Duration::from_millis(500);
        let manager = InterstitialAdManager::new(network.clone());
        manager.set_sdk_started(true);
        eventually(|| manager.is_ready()).await;

        let began = Instant::now();
        manager.show();
        assert!(began.elapsed() < Duration::from_millis(100));
        assert!(!manager.is_ready(), "ad is consumed as soon as it is shown");

        eventually(|| network.presents.load(Ordering::SeqCst) == 1).await;
        eventually(|| manager.is_ready()).await;
    }

    #[tokio::test]
    async fn show_when_not_ready_loads_instead() {
        let network = Arc::new(FakeNetwork::default());
        network.fail_load.store(true, Ordering::SeqCst);
        let manager = InterstitialAdManager::new(network.clone());
        manager.set_sdk_started(true);
        settle().await;
        assert!(!manager.is_ready());

        network.fail_load.store(false, Ordering::SeqCst);
        manager.show();
        settle().await;
        assert_eq!(network.presents.load(Ordering::SeqCst), 0);
        assert_eq!(network.loads.load(Ordering::SeqCst), 2);
        assert!(manager.is_ready());
    }

    #[tokio::test]
    async fn failed_presentation_still_reloads() {
        let network = Arc::new(FakeNetwork::default());
        network.fail_present.store(true, Ordering::SeqCst);
        let manager = InterstitialAdManager::new(network.clone());
        manager.set_sdk_started(true);
        settle().await;

        manager.show();
        eventually(|| network.loads.load(Ordering::SeqCst) == 2).await;
        assert_eq!(network.presents.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn show_or_load_picks_by_readiness() {
        let network = Arc::new(FakeNetwork::default());
        let manager = InterstitialAdManager::new(network.clone());
        manager.set_sdk_started(true);
        settle().await;

        show_or_load(&manager);
        eventually(|| network.presents.load(Ordering::SeqCst) == 1).await;
    }
}
