//! Plain-text rendering of lookup results and fixed screens.

use std::fmt::Write as _;

use disco_coordinator::CoordinatorState;
use disco_core::DomainQuery;

/// Domains offered as one-tap suggestions on the home screen.
pub(crate) const SUGGESTED_DOMAINS: [&str; 3] = ["nike.com", "sephora.com", "zara.com"];

pub(crate) const TUTORIAL: &str = "\
Welcome to Disco!

Share any store page to Disco, or run `disco lookup <domain>`, and Disco
finds discount codes that work there right now. Add `--copy N` to copy
the Nth code as soon as results arrive.

Run `disco tutorial done` to stop showing this, or just carry on.";

pub(crate) const COPIED: &str = "Copied!";

pub(crate) fn greeting() -> String {
    format!(
        "Find discount codes for any store.\nTry: {}",
        SUGGESTED_DOMAINS.join(", ")
    )
}

pub(crate) fn searching(domain: &DomainQuery) -> String {
    format!("Finding codes for {domain}...")
}

/// Renders a finished lookup: the numbered codes, an empty notice, or the
/// error with a retry hint.
pub(crate) fn render_state(state: &CoordinatorState) -> String {
    let domain = state
        .domain
        .as_ref()
        .map_or("this store", DomainQuery::as_str);

    if let Some(error) = &state.error {
        return format!(
            "Couldn't load codes for {domain}: {error}\nRetry with `disco lookup {domain}`"
        );
    }
    if state.codes.is_empty() {
        return format!("No codes found for {domain}.");
    }

    let mut out = format!("Codes for {domain}:\n");
    for (i, record) in state.codes.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", i + 1, record.code);
        let _ = writeln!(out, "     {}", record.display_description());
        if let Some(conditions) = record.display_conditions() {
            let _ = writeln!(out, "     Conditions: {conditions}");
        }
    }
    let _ = write!(out, "Copy one with `disco lookup {domain} --copy N`");
    out
}
