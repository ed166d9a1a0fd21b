//! sitehook: per-site script dispatch and download-naming mediation.
//!
//! Two jobs. First, when a page loads (or the user invokes the registered
//! command), match the page against an ordered rule table and inject the
//! matching rule's script or code, first match wins. Second, mediate the
//! host's download-naming workflow: the host treats "start a download" and
//! "name a download" as independent events, so the [`coordinator`] serializes
//! announce → download → suggest into one logical transaction and withholds
//! the download acknowledgement until the name has been consumed.
//!
//! The host browser's API surface (tab queries, script injection, downloads)
//! is consumed through the narrow traits in [`host`]; nothing in this crate
//! talks to a browser directly.

pub mod agent;
pub mod background;
pub mod builtin;
pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod host;
pub mod logging;
pub mod matcher;
pub mod messages;
pub mod rules;

pub use background::{Background, Reply};
pub use coordinator::NamingCoordinator;
pub use dispatch::{dispatch, DispatchOutcome, Page};
pub use matcher::Pattern;
pub use rules::{Rule, RuleTable, Trigger};
