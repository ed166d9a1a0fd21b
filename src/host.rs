//! Host-browser capability traits.
//!
//! The extension logic only depends on these narrow traits and never talks to
//! the browser API surface directly. The host binding (or a test mock)
//! implements them.

use crate::rules::Action;

/// Browser tab identifier.
pub type TabId = i64;

/// Download identifier returned by the host's download subsystem.
pub type DownloadId = i64;

/// The tab a message came from: identity plus the position/activity data
/// needed to open a sibling tab next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabInfo {
    pub id: TabId,
    pub index: i32,
    pub active: bool,
}

/// Injects code or a script file into a page.
pub trait ScriptHost {
    fn inject(&self, tab: TabId, action: Action<'_>) -> anyhow::Result<()>;
}

/// Starts a download. The filename passed here is a best-effort hint the
/// host is free to ignore; the authoritative name goes through the
/// suggestion mechanism (see the coordinator).
pub trait DownloadHost {
    fn start_download(&self, url: &str, filename: &str) -> anyhow::Result<DownloadId>;
}

/// Tab lifecycle: close, open-next-to, focus.
pub trait TabHost {
    fn close_tab(&self, tab: TabId) -> anyhow::Result<()>;
    /// Opens `url` at position `index`, active or not per the flag.
    fn create_tab(&self, url: &str, index: i32, active: bool) -> anyhow::Result<TabId>;
    fn focus_tab(&self, tab: TabId) -> anyhow::Result<()>;
}
