//! Tab-side agent contract.
//!
//! Agents run inside an observed page and talk to the background context over
//! an awaitable request/response channel. The naming coordinator holds only
//! one transaction, so an agent downloading a collection must fully finish
//! each item (announce acknowledged, then download acknowledged) before
//! starting the next. `download_collection` encodes that sequencing so
//! per-site agents cannot get it wrong.

use anyhow::Result;

use crate::messages::{Ack, TabMessage};

/// Awaitable request/response channel from a page to the background context.
/// Each call suspends until the background side acknowledges; for `download`
/// messages that acknowledgement only arrives once the naming transaction has
/// completed.
pub trait MessageChannel {
    fn request(&self, msg: TabMessage) -> impl std::future::Future<Output = Result<Ack>> + Send;
}

/// One downloadable item scraped from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub url: String,
    pub filename: String,
}

/// Downloads `items` one at a time: announce the filename, await the ack,
/// start the download, await the deferred ack, then move on. Stops at the
/// first failure.
pub async fn download_collection(channel: &impl MessageChannel, items: &[Item]) -> Result<()> {
    for item in items {
        channel
            .request(TabMessage::NextFilename {
                filename: item.filename.clone(),
            })
            .await?;
        channel
            .request(TabMessage::Download {
                url: item.url.clone(),
                filename: item.filename.clone(),
            })
            .await?;
        tracing::debug!(filename = %item.filename, "item download acknowledged");
    }
    Ok(())
}
