//! Loading coordinator for discount code lookups.
//!
//! A lookup runs the network fetch and a minimum-display timer side by side
//! and resolves to a single "loading finished" transition once both are done
//! and a short settle delay has passed. An interstitial ad is triggered once
//! per session when the timer elapses, unless the user holds premium.

pub mod ads;
pub mod clipboard;
pub mod coordinator;
pub mod machine;

pub use ads::{show_or_load, AdError, AdNetwork, AdPresenter, InterstitialAdManager};
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use coordinator::{CoordinatorState, LoadingCoordinator};
pub use machine::{Effect, Event, LoadingMachine, Phase, SessionId, SessionView};
