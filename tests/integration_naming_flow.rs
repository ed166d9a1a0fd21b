//! Integration test: a mock host driving dispatch and the full naming flow.
//!
//! Wires a tab-side agent to the background context over an in-process
//! channel and checks that a two-item collection download produces the right
//! host calls in the right order, with each download named before the next
//! item starts.

use std::sync::Arc;
use std::sync::Mutex;

use url::Url;

use sitehook::agent::{self, Item, MessageChannel};
use sitehook::builtin;
use sitehook::host::{DownloadHost, ScriptHost, TabHost, TabId, TabInfo};
use sitehook::messages::{Ack, TabMessage};
use sitehook::rules::Action;
use sitehook::{Background, DispatchOutcome, Page, Reply};

/// Records every capability call, and the filename each download ends up
/// with: the suggestion consumed when the host asks, right after the
/// download starts (mirroring the host's own ordering).
#[derive(Default)]
struct MockHost {
    injected: Mutex<Vec<String>>,
    downloads: Mutex<Vec<String>>,
}

impl ScriptHost for MockHost {
    fn inject(&self, _tab: TabId, action: Action<'_>) -> anyhow::Result<()> {
        let what = match action {
            Action::Script(f) => format!("script:{f}"),
            Action::Code(c) => format!("code:{c}"),
        };
        self.injected.lock().unwrap().push(what);
        Ok(())
    }
}

impl DownloadHost for MockHost {
    fn start_download(&self, url: &str, _filename: &str) -> anyhow::Result<i64> {
        let mut downloads = self.downloads.lock().unwrap();
        downloads.push(format!("{url} -> ?"));
        Ok(downloads.len() as i64)
    }
}

impl TabHost for MockHost {
    fn close_tab(&self, _tab: TabId) -> anyhow::Result<()> {
        Ok(())
    }

    fn create_tab(&self, _url: &str, _index: i32, _active: bool) -> anyhow::Result<TabId> {
        Ok(0)
    }

    fn focus_tab(&self, _tab: TabId) -> anyhow::Result<()> {
        Ok(())
    }
}

/// In-process stand-in for the cross-context message channel. After each
/// download request it plays the host's part and asks the background for a
/// filename suggestion, which is what resolves the deferred ack.
struct LocalChannel {
    background: Arc<Background<MockHost>>,
    sender: TabInfo,
}

impl MessageChannel for LocalChannel {
    async fn request(&self, msg: TabMessage) -> anyhow::Result<Ack> {
        let reply = self.background.handle_message(msg, self.sender)?;
        match reply {
            Reply::Now(ack) => Ok(ack),
            Reply::Deferred(rx) => {
                // The download has started; the host now asks for a name.
                let suggested = self.background.on_determining_filename();
                if let Some(name) = suggested {
                    let mut downloads = self.background.host().downloads.lock().unwrap();
                    let last = downloads.last_mut().expect("a download was started");
                    *last = last.replace("?", &name);
                }
                rx.await?;
                Ok(Ack::ok())
            }
            Reply::None => Ok(Ack::ok()),
        }
    }
}

fn background() -> Arc<Background<MockHost>> {
    Arc::new(Background::new(
        MockHost::default(),
        builtin::default_table(),
        "site-action",
    ))
}

fn page(url: &str) -> Page {
    Page::new(11, Url::parse(url).unwrap())
}

const SENDER: TabInfo = TabInfo {
    id: 11,
    index: 0,
    active: true,
};

#[tokio::test]
async fn collection_download_names_each_item_in_order() {
    let bg = background();

    // The user triggers the command on the Slack emoji page; the exporter
    // script is injected.
    let out = bg
        .on_command(
            "site-action",
            &[page("https://myteam.slack.com/customize/emoji")],
        )
        .unwrap();
    assert_eq!(out, DispatchOutcome::Injected);
    assert_eq!(
        bg.host().injected.lock().unwrap().as_slice(),
        &["script:slack.js".to_string()]
    );

    // The injected agent walks the emoji list, one item at a time.
    let channel = LocalChannel {
        background: Arc::clone(&bg),
        sender: SENDER,
    };
    let items = vec![
        Item {
            url: "https://emoji.example.com/party.gif".to_string(),
            filename: "party.png".to_string(),
        },
        Item {
            url: "https://emoji.example.com/ship.gif".to_string(),
            filename: "ship.png".to_string(),
        },
    ];
    agent::download_collection(&channel, &items).await.unwrap();

    // Every download got the announced name, in order.
    assert_eq!(
        bg.host().downloads.lock().unwrap().as_slice(),
        &[
            "https://emoji.example.com/party.gif -> party.png".to_string(),
            "https://emoji.example.com/ship.gif -> ship.png".to_string(),
        ]
    );

    // The transaction slot ended up clear: an unrelated download gets the
    // host's default naming.
    assert_eq!(bg.on_determining_filename(), None);
}

#[tokio::test]
async fn load_dispatch_and_scheme_guard() {
    let bg = background();

    // Wikipedia article on load, with the www. variant of the host.
    let out = bg
        .on_page_complete(&page("https://www.en.wikipedia.org/wiki/Rust_(programming_language)"))
        .unwrap();
    assert_eq!(out, DispatchOutcome::Injected);

    // Non-article page: diagnostic no-op.
    let out = bg
        .on_page_complete(&page("https://en.wikipedia.org/talk/Something"))
        .unwrap();
    assert_eq!(out, DispatchOutcome::NoRuleMatched);

    // file:// page: never evaluated at all.
    let out = bg.on_page_complete(&page("file:///tmp/x.html")).unwrap();
    assert_eq!(out, DispatchOutcome::SchemeSkipped);

    assert_eq!(bg.host().injected.lock().unwrap().len(), 1);
}
