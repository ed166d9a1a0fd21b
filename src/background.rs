//! Background context: event entry points and message routing.
//!
//! `Background` is the privileged side of the extension. It owns the rule
//! table, the naming coordinator, and the host capability handle, and is
//! driven by three kinds of host events: page-load completion, the user's
//! registered command, and messages from tab agents.

use anyhow::Result;
use tokio::sync::oneshot;

use crate::coordinator::NamingCoordinator;
use crate::dispatch::{dispatch, DispatchOutcome, Page};
use crate::host::{DownloadHost, ScriptHost, TabHost, TabInfo};
use crate::messages::{Ack, TabMessage};
use crate::rules::{RuleTable, Trigger};

/// The host fired a command this extension never registered. Protocol drift,
/// treated as fatal.
#[derive(Debug, thiserror::Error)]
#[error("unknown command {got:?}, registered {registered:?}")]
pub struct UnknownCommand {
    pub got: String,
    pub registered: String,
}

/// Command dispatch needs exactly one active page target.
#[derive(Debug, thiserror::Error)]
#[error("expected exactly one active tab, found {found}")]
pub struct AmbiguousActiveTab {
    pub found: usize,
}

/// How to answer a tab message.
#[derive(Debug)]
pub enum Reply {
    /// Respond with an ack right away.
    Now(Ack),
    /// Respond with an ack once the receiver resolves (download naming
    /// confirmed).
    Deferred(oneshot::Receiver<()>),
    /// The message carries no response.
    None,
}

/// The background side of the extension, generic over the host binding.
pub struct Background<H> {
    host: H,
    table: RuleTable,
    naming: NamingCoordinator,
    command: String,
}

impl<H> Background<H> {
    pub fn new(host: H, table: RuleTable, command: impl Into<String>) -> Self {
        Self {
            host,
            table,
            naming: NamingCoordinator::new(),
            command: command.into(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host is asking what the new download should be named. Returns the
    /// announced filename, or `None` to let the host use its default.
    pub fn on_determining_filename(&self) -> Option<String> {
        self.naming.on_suggestion_requested()
    }
}

impl<H: ScriptHost> Background<H> {
    /// A page finished loading.
    pub fn on_page_complete(&self, page: &Page) -> Result<DispatchOutcome> {
        dispatch(&self.host, &self.table, page, Trigger::Load)
    }

    /// The user invoked the registered command. `active_tabs` are the
    /// candidate target pages; exactly one is required.
    pub fn on_command(&self, command: &str, active_tabs: &[Page]) -> Result<DispatchOutcome> {
        if command != self.command {
            return Err(UnknownCommand {
                got: command.to_string(),
                registered: self.command.clone(),
            }
            .into());
        }
        let [page] = active_tabs else {
            return Err(AmbiguousActiveTab {
                found: active_tabs.len(),
            }
            .into());
        };
        dispatch(&self.host, &self.table, page, Trigger::Command)
    }
}

impl<H: DownloadHost + TabHost> Background<H> {
    /// Routes one message from a tab agent.
    ///
    /// `nextFilename` is acknowledged immediately; `download` is acknowledged
    /// only after the host consumes the announced filename; the tab-lifecycle
    /// messages expect no response.
    pub fn handle_message(&self, msg: TabMessage, sender: TabInfo) -> Result<Reply> {
        tracing::debug!(?msg, tab = sender.id, "tab message");
        match msg {
            TabMessage::NextFilename { filename } => {
                self.naming.announce(filename)?;
                Ok(Reply::Now(Ack::ok()))
            }
            TabMessage::Download { url, filename } => {
                let ack = self.naming.request_download(&self.host, &url, &filename)?;
                Ok(Reply::Deferred(ack))
            }
            TabMessage::CloseTab => {
                self.host.close_tab(sender.id)?;
                Ok(Reply::None)
            }
            TabMessage::MakeTab { url } => {
                self.host.create_tab(&url, sender.index + 1, sender.active)?;
                Ok(Reply::None)
            }
            TabMessage::FocusMe => {
                self.host.focus_tab(sender.id)?;
                Ok(Reply::None)
            }
        }
    }
}
