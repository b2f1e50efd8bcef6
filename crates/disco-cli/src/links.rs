//! Deep link and share handover commands.

use anyhow::Context as _;
use disco_client::{build_deep_link, host_from_shared_url, parse_deep_link};
use disco_core::{AppConfig, DomainQuery, PreferencesStore};

use crate::lookup;

/// Opens a `disco://showcodes?domain=...` link by running its lookup.
///
/// # Errors
///
/// Returns an error if the link is malformed or the lookup fails.
pub(crate) async fn run_open(
    config: &AppConfig,
    store: &PreferencesStore,
    link: &str,
) -> anyhow::Result<()> {
    let domain = parse_deep_link(link)?;
    tracing::info!(domain = %domain, "opening deep link");
    lookup::run_lookup(config, store, domain.as_str(), false, None).await
}

/// Accepts a shared page URL: records its store as the pending lookup and
/// prints the deep link for it. Unless `link_only`, the lookup runs right
/// away; otherwise it runs on the next plain `disco` launch.
///
/// # Errors
///
/// Returns an error if the URL has no usable host or preferences cannot be
/// written.
pub(crate) async fn run_share(
    config: &AppConfig,
    store: &PreferencesStore,
    url: &str,
    link_only: bool,
) -> anyhow::Result<()> {
    let link = hand_over(store, url)?;
    println!("{link}");
    if link_only {
        return Ok(());
    }

    store.take_last_queried_domain()?;
    run_open(config, store, &link).await
}

/// Stores the shared URL's store domain and returns the link that opens it.
fn hand_over(store: &PreferencesStore, url: &str) -> anyhow::Result<String> {
    let host = host_from_shared_url(url)?;
    let domain =
        DomainQuery::parse(&host).with_context(|| format!("shared URL has no host: {url}"))?;
    store.set_last_queried_domain(domain.as_str())?;
    Ok(build_deep_link(domain.as_str()))
}
