//! Download-naming coordination.
//!
//! The host performs "start a download" and "name the download" as two
//! independent, asynchronously-ordered events, and the filename passed to the
//! download call is only a hint. To name a download reliably, the tab first
//! announces the filename it wants, then starts the download, and the
//! acknowledgement for the download request is withheld until the host has
//! actually consumed the announced name via its suggestion callback. That
//! makes announce → download → suggest one logical transaction.
//!
//! The coordinator holds at most one transaction. Announcing while one is
//! staged is rejected with [`TransactionInProgress`] rather than clobbering
//! the slot; the tab-side agent must await each acknowledgement before
//! moving on (see `agent`).

use std::sync::Mutex;

use tokio::sync::oneshot;

use crate::host::{DownloadHost, DownloadId};

/// A second filename was announced while one is still waiting to be consumed.
#[derive(Debug, thiserror::Error)]
#[error("naming transaction already in progress (staged {staged:?})")]
pub struct TransactionInProgress {
    pub staged: String,
}

#[derive(Default)]
struct Slot {
    /// Filename to hand the host on its next suggestion request.
    staged: Option<String>,
    /// Fired when the staged filename is consumed; resolves the deferred
    /// download acknowledgement.
    pending_ack: Option<oneshot::Sender<()>>,
}

/// Single-slot transaction object mediating download naming.
///
/// All mutation goes through `announce`, `request_download`, and
/// `on_suggestion_requested`; the slot itself is behind a lock so the
/// coordinator can be shared with the host's event callbacks.
#[derive(Default)]
pub struct NamingCoordinator {
    slot: Mutex<Slot>,
}

impl NamingCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages `filename` for the next download. Acknowledged immediately.
    ///
    /// Fails with [`TransactionInProgress`] if a previous announcement has
    /// not been consumed yet.
    pub fn announce(&self, filename: impl Into<String>) -> Result<(), TransactionInProgress> {
        let mut slot = self.slot.lock().unwrap();
        if let Some(staged) = &slot.staged {
            return Err(TransactionInProgress {
                staged: staged.clone(),
            });
        }
        let filename = filename.into();
        tracing::debug!(%filename, "staged next download filename");
        slot.staged = Some(filename);
        Ok(())
    }

    /// Starts the download and returns the deferred acknowledgement: a future
    /// that resolves only once the host has consumed the staged filename.
    ///
    /// There are no timeouts; if the host never asks for a suggestion the
    /// returned receiver never resolves.
    pub fn request_download(
        &self,
        host: &impl DownloadHost,
        url: &str,
        filename: &str,
    ) -> anyhow::Result<oneshot::Receiver<()>> {
        let id: DownloadId = host.start_download(url, filename)?;
        tracing::debug!(id, url, "download started, awaiting naming");
        let (tx, rx) = oneshot::channel();
        self.slot.lock().unwrap().pending_ack = Some(tx);
        Ok(rx)
    }

    /// The host is asking what the new download should be named.
    ///
    /// Returns the staged filename and completes the pending transaction, or
    /// `None` when nothing is staged (the host falls back to its default
    /// naming).
    pub fn on_suggestion_requested(&self) -> Option<String> {
        let (staged, ack) = {
            let mut slot = self.slot.lock().unwrap();
            match slot.staged.take() {
                Some(name) => (name, slot.pending_ack.take()),
                None => {
                    tracing::debug!("no staged filename, host default applies");
                    return None;
                }
            }
        };
        tracing::info!(filename = %staged, "suggesting download filename");
        if let Some(tx) = ack {
            // Receiver gone means the requesting tab went away; nothing to do.
            let _ = tx.send(());
        }
        Some(staged)
    }
}
