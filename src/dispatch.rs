//! Page dispatch: match the navigated page against the rule table and inject.
//!
//! Dispatch is a pure walk over the table plus at most one host injection
//! call. Non-http(s) pages and unmatched pages are no-ops (logged, not
//! errors); a matched rule without an action is a hard error.

use anyhow::Result;
use url::Url;

use crate::host::{ScriptHost, TabId};
use crate::rules::{RuleTable, Trigger};

/// A navigated page as delivered by the host's event notification.
#[derive(Debug, Clone)]
pub struct Page {
    pub tab: TabId,
    pub url: Url,
}

impl Page {
    pub fn new(tab: TabId, url: Url) -> Self {
        Self { tab, url }
    }
}

/// What a dispatch call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A rule matched and its action was injected exactly once.
    Injected,
    /// No rule matched; a diagnostic was logged.
    NoRuleMatched,
    /// The page scheme is not http/https; nothing was evaluated.
    SchemeSkipped,
}

/// Strips a single leading `www.` so rules match both variants of a host.
/// Exactly one strip, so the result is a fixed point.
pub fn normalize_hostname(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Matches `page` against `table` and performs the first matching rule's
/// injection, if any.
pub fn dispatch(
    host: &impl ScriptHost,
    table: &RuleTable,
    page: &Page,
    trigger: Trigger,
) -> Result<DispatchOutcome> {
    // file:// and friends misbehave; only dispatch on web pages.
    if !matches!(page.url.scheme(), "http" | "https") {
        tracing::debug!(url = %page.url, "skipping non-http(s) page");
        return Ok(DispatchOutcome::SchemeSkipped);
    }

    let hostname = normalize_hostname(page.url.host_str().unwrap_or(""));
    let path = page.url.path();

    match table.first_match(hostname, path, trigger) {
        Some(rule) => {
            let action = rule.action(hostname)?;
            host.inject(page.tab, action)?;
            tracing::info!(
                host = hostname,
                path,
                trigger = trigger.as_str(),
                ?action,
                "injected"
            );
            Ok(DispatchOutcome::Injected)
        }
        None => {
            tracing::debug!(
                host = hostname,
                path,
                trigger = trigger.as_str(),
                "no dispatch rule matching page"
            );
            Ok(DispatchOutcome::NoRuleMatched)
        }
    }
}
