//! Wire messages between tab agents and the background context.
//!
//! Messages are JSON objects tagged by a `command` field. The set of kinds is
//! closed; an unrecognized kind is a protocol error, not something to ignore.

use serde::{Deserialize, Serialize};

/// A request from a tab agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum TabMessage {
    /// Announce the filename the next download should get.
    NextFilename { filename: String },
    /// Start a download. The acknowledgement is deferred until the announced
    /// filename has been consumed.
    Download { url: String, filename: String },
    /// Close the sending tab.
    CloseTab,
    /// Open a new tab just after the sending tab.
    MakeTab { url: String },
    /// Make the sending tab the active one.
    FocusMe,
}

/// Acknowledgement sent back to a tab agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub ack: bool,
}

impl Ack {
    pub fn ok() -> Self {
        Ack { ack: true }
    }
}

/// The raw message did not parse as a known kind.
#[derive(Debug, thiserror::Error)]
#[error("unrecognized tab message: {0}")]
pub struct MessageParseError(#[from] serde_json::Error);

/// Parses a raw JSON message from a tab. Unknown kinds and malformed payloads
/// are fatal to the request.
pub fn parse_message(raw: &str) -> Result<TabMessage, MessageParseError> {
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_kind() {
        assert_eq!(
            parse_message(r#"{"command":"nextFilename","filename":"a.png"}"#).unwrap(),
            TabMessage::NextFilename {
                filename: "a.png".to_string()
            }
        );
        assert_eq!(
            parse_message(r#"{"command":"download","url":"https://e.com/i","filename":"a"}"#)
                .unwrap(),
            TabMessage::Download {
                url: "https://e.com/i".to_string(),
                filename: "a".to_string()
            }
        );
        assert_eq!(
            parse_message(r#"{"command":"closeTab"}"#).unwrap(),
            TabMessage::CloseTab
        );
        assert_eq!(
            parse_message(r#"{"command":"makeTab","url":"https://e.com/n"}"#).unwrap(),
            TabMessage::MakeTab {
                url: "https://e.com/n".to_string()
            }
        );
        assert_eq!(
            parse_message(r#"{"command":"focusMe"}"#).unwrap(),
            TabMessage::FocusMe
        );
    }

    #[test]
    fn unknown_kind_is_an_error() {
        assert!(parse_message(r#"{"command":"selfDestruct"}"#).is_err());
        assert!(parse_message(r#"{"no_command_at_all":true}"#).is_err());
    }

    #[test]
    fn missing_payload_field_is_an_error() {
        assert!(parse_message(r#"{"command":"nextFilename"}"#).is_err());
        assert!(parse_message(r#"{"command":"download","url":"https://e.com"}"#).is_err());
    }

    #[test]
    fn ack_serializes_as_ack_field() {
        assert_eq!(serde_json::to_string(&Ack::ok()).unwrap(), r#"{"ack":true}"#);
    }
}
