//! Mapping of streamed FETCH records into domain [`Message`] values.

use async_imap::imap_proto::types::Address;
use async_imap::types::{Fetch, Flag};
use chrono::DateTime;
use tracing::warn;

use crate::mime::header::{decode_field, parse_date};
use crate::mime::walker;
use crate::model::Message;

/// Field set for range-mode page listings.
pub(crate) const RANGE_ITEMS: &str = "(FLAGS ENVELOPE)";

/// Field set for a full single-message fetch. `BODY[]` (not PEEK) marks
/// the message as seen, matching what readers expect from an open action.
pub(crate) const SINGLE_ITEMS: &str = "(FLAGS ENVELOPE RFC822.SIZE BODYSTRUCTURE BODY[])";

/// Build a [`Message`] from an envelope-and-flags record (range mode).
///
/// `size` and `body` stay unpopulated; the caller did not request them.
pub(crate) fn envelope_message(record: &Fetch) -> Message {
    let mut message = Message {
        id: record.message.to_string(),
        flags: flag_strings(record),
        ..Default::default()
    };

    if let Some(envelope) = record.envelope() {
        if let Some(subject) = envelope.subject.as_deref() {
            message.subject = decode_field(subject);
        }
        if let Some(date) = envelope.date.as_deref() {
            // Unparseable dates fall back to the epoch default
            message.date = parse_date(&String::from_utf8_lossy(date))
                .unwrap_or(DateTime::UNIX_EPOCH);
        }
        if let Some(from) = envelope.from.as_ref().and_then(|addrs| addrs.first()) {
            message.from = address_text(from);
        }
        if let Some(to) = envelope.to.as_ref() {
            message.to = to.iter().map(address_text).collect();
        }
    } else {
        warn!(seq = record.message, "FETCH record without ENVELOPE");
    }

    message
}

/// Build a fully populated [`Message`] (single-message mode): envelope,
/// flags, size, and the walked body literal.
pub(crate) fn full_message(record: &Fetch) -> Message {
    let mut message = envelope_message(record);
    message.size = record.size.unwrap_or(0);

    let mut content = walker::BodyContent::default();
    if let Some(literal) = record.body() {
        walker::walk_literal(literal, &mut content);
    }
    message.body = content.body;
    message.attachments = content.attachments;
    message.warnings = content.warnings;

    message
}

/// Collapse a single-message FETCH response to the record that counts.
///
/// Zero records means the message does not exist in the selected mailbox;
/// the caller maps that to `NotFound`. More than one record for a single
/// sequence number is a protocol anomaly, and the last one delivered wins.
pub(crate) fn winning_record<T>(records: Vec<T>) -> Option<T> {
    records.into_iter().last()
}

/// Render flags in canonical IMAP string form; custom keywords pass through.
fn flag_strings(record: &Fetch) -> Vec<String> {
    record
        .flags()
        .map(|flag| match flag {
            Flag::Seen => "\\Seen".to_string(),
            Flag::Answered => "\\Answered".to_string(),
            Flag::Flagged => "\\Flagged".to_string(),
            Flag::Deleted => "\\Deleted".to_string(),
            Flag::Draft => "\\Draft".to_string(),
            Flag::Recent => "\\Recent".to_string(),
            Flag::MayCreate => "\\MayCreate".to_string(),
            Flag::Custom(name) => name.to_string(),
        })
        .collect()
}

/// Render an envelope address as `mailbox@host` text.
///
/// Display names are deliberately not rendered; an address without a
/// mailbox yields an empty string.
fn address_text(addr: &Address<'_>) -> String {
    let mailbox = addr
        .mailbox
        .as_deref()
        .map(String::from_utf8_lossy)
        .unwrap_or_default();
    if mailbox.is_empty() {
        return String::new();
    }
    match addr.host.as_deref() {
        Some(host) if !host.is_empty() => {
            format!("{}@{}", mailbox, String::from_utf8_lossy(host))
        }
        _ => mailbox.into_owned(),
    }
}
