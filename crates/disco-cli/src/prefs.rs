//! Handlers for the local preference flags.

use clap::Subcommand;
use disco_core::PreferencesStore;

/// Sub-commands available under `tutorial`.
#[derive(Debug, Subcommand)]
pub enum TutorialCommands {
    /// Print whether onboarding will show on next launch
    Status,
    /// Mark onboarding as completed
    Done,
    /// Show onboarding again on next launch
    Reset,
}

/// Sub-commands available under `premium`.
#[derive(Debug, Subcommand)]
pub enum PremiumCommands {
    /// Print whether premium is active
    Status,
    /// Turn premium on (no ads, no minimum loading time)
    On,
    /// Turn premium off
    Off,
}

pub(crate) fn run_tutorial(
    store: &PreferencesStore,
    command: &TutorialCommands,
) -> anyhow::Result<()> {
    match command {
        TutorialCommands::Status => {}
        TutorialCommands::Done => store.mark_tutorial_seen()?,
        TutorialCommands::Reset => store.reset_tutorial()?,
    }
    println!("{}", tutorial_status_line(store.should_show_tutorial()?));
    Ok(())
}

pub(crate) fn run_premium(store: &PreferencesStore, command: &PremiumCommands) -> anyhow::Result<()> {
    match command {
        PremiumCommands::Status => {}
        PremiumCommands::On => store.set_premium(true)?,
        PremiumCommands::Off => store.set_premium(false)?,
    }
    println!("{}", premium_status_line(store.is_premium()?));
    Ok(())
}

fn tutorial_status_line(pending: bool) -> &'static str {
    if pending {
        "tutorial: will show on next launch"
    } else {
        "tutorial: completed"
    }
}

fn premium_status_line(premium: bool) -> &'static str {
    if premium {
        "premium: active (no ads, instant results)"
    } else {
        "premium: inactive"
    }
}
