//! Lookup and copy command handlers.

use std::sync::Arc;

use anyhow::Context as _;
use disco_client::DiscountCodeClient;
use disco_coordinator::{Clipboard, InterstitialAdManager, LoadingCoordinator};
use disco_core::{AppConfig, CodeRecord, PreferencesStore};

use crate::house_ads::HouseAdNetwork;
use crate::render;
use crate::terminal_clipboard::Osc52Clipboard;

/// Wires the HTTP client, house ads, and terminal clipboard into a
/// coordinator. Ads are only started for non-premium users.
fn build_coordinator(config: &AppConfig, premium: bool) -> anyhow::Result<LoadingCoordinator> {
    let client = DiscountCodeClient::from_config(config)
        .with_context(|| format!("invalid DISCO_API_URL {:?}", config.api_url))?;
    let ads = InterstitialAdManager::new(Arc::new(HouseAdNetwork));
    if !premium {
        ads.set_sdk_started(true);
    }

    let coordinator = LoadingCoordinator::new(
        Arc::new(client),
        Arc::new(ads),
        Arc::new(Osc52Clipboard::stdout()),
        config.loading_timings(),
    );
    coordinator.set_premium(premium);
    Ok(coordinator)
}

/// Runs one lookup to completion and prints the result.
///
/// `premium` forces the premium bypass for this lookup; otherwise the stored
/// entitlement decides.
///
/// # Errors
///
/// Returns an error if the domain is blank, the preferences file cannot be
/// read, or `copy` names a code that does not exist.
pub(crate) async fn run_lookup(
    config: &AppConfig,
    store: &PreferencesStore,
    raw_domain: &str,
    premium: bool,
    copy: Option<usize>,
) -> anyhow::Result<()> {
    let premium = premium || store.is_premium()?;
    let coordinator = build_coordinator(config, premium)?;

    let Some(domain) = coordinator.submit(raw_domain) else {
        anyhow::bail!("enter a store domain, e.g. {}", render::SUGGESTED_DOMAINS[0]);
    };
    eprintln!("{}", render::searching(&domain));

    let state = coordinator.wait_until_loaded().await;
    println!("{}", render::render_state(&state));

    if let Some(n) = copy {
        let record = pick_code(&state.codes, n)?;
        coordinator.copy_code(&record.code)?;
        if coordinator.state().show_copy_toast {
            println!("{} {}", render::COPIED, record.code);
        }
    }
    Ok(())
}

/// Copies `code` to the terminal clipboard without running a lookup.
///
/// # Errors
///
/// Returns an error if the terminal clipboard write fails.
pub(crate) fn run_copy(code: &str) -> anyhow::Result<()> {
    println!("{}", copy_with(&Osc52Clipboard::stdout(), code)?);
    Ok(())
}

fn copy_with(clipboard: &dyn Clipboard, code: &str) -> anyhow::Result<String> {
    clipboard.set_text(code)?;
    tracing::info!(code, "copied code");
    Ok(format!("{} {code}", render::COPIED))
}

/// Resolves the 1-based `n` the user typed to a code.
fn pick_code(codes: &[CodeRecord], n: usize) -> anyhow::Result<&CodeRecord> {
    n.checked_sub(1)
        .and_then(|i| codes.get(i))
        .with_context(|| match codes.len() {
            0 => "there are no codes to copy".to_string(),
            len => format!("no code number {n}; pick 1 to {len}"),
        })
}
