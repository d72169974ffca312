//! Message and page-of-messages types.

use chrono::{DateTime, Utc};

use super::attachment::Attachment;

/// A single mail message as seen through the currently selected mailbox.
///
/// List calls (see [`ImapClient::get_inbox`](crate::imap::ImapClient::get_inbox))
/// populate only the envelope fields; `size`, `body`, and `attachments` are
/// filled by a full single-message fetch.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Message {
    /// Stringified IMAP sequence number.
    ///
    /// Only meaningful relative to the selected mailbox at fetch time —
    /// sequence numbers renumber when mail arrives or is expunged, so this
    /// is NOT a durable identifier across sessions.
    pub id: String,

    /// Decoded subject line (RFC 2047 encoded-words resolved).
    pub subject: String,

    /// Parsed envelope date. Falls back to Unix epoch when the header is
    /// absent or unparseable.
    pub date: DateTime<Utc>,

    /// Status flags in canonical IMAP form (`"\\Seen"`, `"\\Flagged"`,
    /// custom keywords as-is).
    pub flags: Vec<String>,

    /// First envelope from-address as `mailbox@host`, or empty.
    pub from: String,

    /// All envelope to-addresses in envelope order.
    pub to: Vec<String>,

    /// RFC822.SIZE in bytes. Zero unless a full fetch was performed.
    pub size: u32,

    /// Decoded readable body text. Empty unless a full fetch was performed.
    pub body: String,

    /// Attachments in the order they appear in the message.
    pub attachments: Vec<Attachment>,

    /// Non-fatal notes from the body walk (skipped parts, unopenable
    /// literals). Empty on clean parses.
    pub warnings: Vec<String>,
}

impl Default for Message {
    fn default() -> Self {
        Self {
            id: String::new(),
            subject: String::new(),
            date: DateTime::UNIX_EPOCH,
            flags: Vec::new(),
            from: String::new(),
            to: Vec::new(),
            size: 0,
            body: String::new(),
            attachments: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// One page of a mailbox listing, newest-first.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MessagePage {
    /// Messages in this page, sorted newest-first by sequence number.
    /// Possibly empty (page beyond the end of the mailbox).
    pub messages: Vec<Message>,

    /// Mailbox message count at selection time. A snapshot, not live.
    pub total_count: u32,
}
