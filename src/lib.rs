//! `mailpager` — paginated, newest-first reading of IMAP mailboxes.
//!
//! This crate lets host applications browse any folder in fixed-size pages
//! without downloading the whole mailbox, and pull a single message's
//! readable body plus attachments on demand. All protocol work goes through
//! one guarded session; see [`imap::ImapClient`] for the public surface.

pub mod config;
pub mod error;
pub mod imap;
pub mod mime;
pub mod model;
pub mod page;

pub use config::{ImapConfig, Security};
pub use error::{MailError, Result};
pub use imap::ImapClient;
pub use model::{Attachment, Message, MessagePage};
