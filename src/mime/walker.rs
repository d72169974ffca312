//! Raw body literal walking: one readable body plus ordered attachments.
//!
//! A fetched message carries its full RFC 5322 content as a single raw
//! literal. The walker opens it with `mail-parser` and visits the leaf
//! parts in document order:
//!
//! - a part with `Content-Disposition: attachment` becomes an
//!   [`Attachment`], preserving encounter order;
//! - any other leaf part is inline; its text overwrites the body, so when
//!   several inline parts exist the LAST one wins (no concatenation);
//! - a part the parser could not decode contributes nothing except a
//!   warning, and the walk continues;
//! - a literal that cannot be opened at all is skipped entirely, leaving
//!   previously accumulated state.

use mail_parser::{MessageParser, MessagePart, MimeHeaders, PartType};
use tracing::warn;

use crate::model::Attachment;

/// Maximum multipart nesting depth, to bound the walk on adversarial input.
const MAX_DEPTH: usize = 10;

/// Accumulated output of one or more literal walks.
#[derive(Debug, Default)]
pub struct BodyContent {
    /// Readable body text. The last inline part encountered.
    pub body: String,
    /// Attachments in document order.
    pub attachments: Vec<Attachment>,
    /// Non-fatal notes: parts skipped, literals that would not open.
    pub warnings: Vec<String>,
}

/// Walk one raw body literal, merging its parts into `content`.
pub fn walk_literal(raw: &[u8], content: &mut BodyContent) {
    let Some(message) = MessageParser::default().parse(raw) else {
        warn!(bytes = raw.len(), "body literal could not be opened, skipping");
        content
            .warnings
            .push("unparseable body literal skipped".to_string());
        return;
    };

    // Part 0 is the root; multiparts reference their children by index.
    walk_part(&message, 0, 0, content);
}

fn walk_part(
    message: &mail_parser::Message<'_>,
    part_id: usize,
    depth: usize,
    content: &mut BodyContent,
) {
    let Some(part) = message.parts.get(part_id) else {
        return;
    };

    match &part.body {
        PartType::Multipart(children) => {
            if depth >= MAX_DEPTH {
                content
                    .warnings
                    .push(format!("multipart nesting deeper than {MAX_DEPTH}, subtree skipped"));
                return;
            }
            for &child in children {
                walk_part(message, child, depth + 1, content);
            }
        }
        _ => visit_leaf(part, content),
    }
}

/// Classify a leaf part as attachment or inline and record it.
fn visit_leaf(part: &MessagePart<'_>, content: &mut BodyContent) {
    let mime_type = content_type_of(part);

    if part.is_encoding_problem {
        warn!(mime_type = %mime_type, "undecodable part skipped");
        content
            .warnings
            .push(format!("undecodable {mime_type} part skipped"));
        return;
    }

    let is_attachment = part
        .content_disposition()
        .map(|cd| cd.ctype().eq_ignore_ascii_case("attachment"))
        .unwrap_or(false);

    if is_attachment {
        content.attachments.push(Attachment {
            filename: part.attachment_name().map(String::from),
            content: part.contents().to_vec(),
            mime_type,
        });
    } else {
        content.body = match &part.body {
            PartType::Text(text) | PartType::Html(text) => text.to_string(),
            _ => String::from_utf8_lossy(part.contents()).into_owned(),
        };
    }
}

/// Render a part's declared content type as `type/subtype`.
fn content_type_of(part: &MessagePart<'_>) -> String {
    part.content_type()
        .map(|ct| match ct.subtype() {
            Some(sub) => format!("{}/{}", ct.ctype(), sub),
            None => ct.ctype().to_string(),
        })
        .unwrap_or_else(|| "application/octet-stream".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_part_plain_message() {
        let raw = b"From: alice@example.com\r\n\
            To: bob@example.com\r\n\
            Subject: Hello\r\n\
            Content-Type: text/plain; charset=utf-8\r\n\
            \r\n\
            Just a plain body.\r\n";

        let mut content = BodyContent::default();
        walk_literal(raw, &mut content);
        assert_eq!(content.body.trim(), "Just a plain body.");
        assert!(content.attachments.is_empty());
        assert!(content.warnings.is_empty());
    }

    #[test]
    fn test_inline_plus_two_attachments_preserves_order() {
        let raw = b"From: alice@example.com\r\n\
            Subject: Report\r\n\
            MIME-Version: 1.0\r\n\
            Content-Type: multipart/mixed; boundary=\"XYZ\"\r\n\
            \r\n\
            --XYZ\r\n\
            Content-Type: text/plain; charset=utf-8\r\n\
            \r\n\
            Report attached.\r\n\
            --XYZ\r\n\
            Content-Type: application/pdf\r\n\
            Content-Disposition: attachment; filename=\"report.pdf\"\r\n\
            Content-Transfer-Encoding: base64\r\n\
            \r\n\
            JVBERi0xLjQ=\r\n\
            --XYZ\r\n\
            Content-Type: text/csv\r\n\
            Content-Disposition: attachment; filename=\"data.csv\"\r\n\
            \r\n\
            a,b\r\n\
            1,2\r\n\
            --XYZ--\r\n";

        let mut content = BodyContent::default();
        walk_literal(raw, &mut content);

        assert_eq!(content.body.trim(), "Report attached.");
        assert_eq!(content.attachments.len(), 2, "expected both attachments");
        assert_eq!(
            content.attachments[0].filename.as_deref(),
            Some("report.pdf")
        );
        assert_eq!(content.attachments[0].mime_type, "application/pdf");
        assert_eq!(content.attachments[0].content, b"%PDF-1.4");
        assert_eq!(content.attachments[1].filename.as_deref(), Some("data.csv"));
        assert_eq!(content.attachments[1].mime_type, "text/csv");
    }

    #[test]
    fn test_last_inline_part_wins() {
        let raw = b"From: alice@example.com\r\n\
            Subject: Alt\r\n\
            MIME-Version: 1.0\r\n\
            Content-Type: multipart/alternative; boundary=\"AB\"\r\n\
            \r\n\
            --AB\r\n\
            Content-Type: text/plain; charset=utf-8\r\n\
            \r\n\
            plain version\r\n\
            --AB\r\n\
            Content-Type: text/html; charset=utf-8\r\n\
            \r\n\
            <p>html version</p>\r\n\
            --AB--\r\n";

        let mut content = BodyContent::default();
        walk_literal(raw, &mut content);
        assert!(
            content.body.contains("html version"),
            "body should hold the LAST inline part, got: '{}'",
            content.body
        );
        assert!(!content.body.contains("plain version"));
        assert!(content.attachments.is_empty());
    }

    #[test]
    fn test_attachment_without_filename() {
        let raw = b"From: alice@example.com\r\n\
            MIME-Version: 1.0\r\n\
            Content-Type: multipart/mixed; boundary=\"NN\"\r\n\
            \r\n\
            --NN\r\n\
            Content-Type: text/plain\r\n\
            \r\n\
            See attached.\r\n\
            --NN\r\n\
            Content-Type: application/octet-stream\r\n\
            Content-Disposition: attachment\r\n\
            \r\n\
            rawdata\r\n\
            --NN--\r\n";

        let mut content = BodyContent::default();
        walk_literal(raw, &mut content);
        assert_eq!(content.attachments.len(), 1);
        assert_eq!(content.attachments[0].filename, None);
        assert_eq!(
            content.attachments[0].mime_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_unopenable_literal_leaves_prior_state() {
        let mut content = BodyContent::default();
        content.body = "already here".to_string();

        walk_literal(b"", &mut content);

        assert_eq!(content.body, "already here");
        assert!(content.attachments.is_empty());
        assert_eq!(content.warnings.len(), 1);
    }
}
