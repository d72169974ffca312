//! Centralized error types for mailpager.

use thiserror::Error;

/// Boxed source for connection failures, which can originate from TCP,
/// TLS negotiation, or the IMAP login exchange.
type ConnectSource = Box<dyn std::error::Error + Send + Sync>;

/// All errors produced by the mailpager library.
#[derive(Error, Debug)]
pub enum MailError {
    /// Dial, TLS negotiation, greeting, or login failure.
    /// The session is left unset.
    #[error("IMAP connection failed: {reason}")]
    Connection {
        reason: String,
        #[source]
        source: Option<ConnectSource>,
    },

    /// An operation was attempted with no live session.
    #[error("not connected to the IMAP server")]
    NotConnected,

    /// The mailbox does not exist or is inaccessible.
    #[error("failed to select mailbox '{folder}'")]
    Selection {
        folder: String,
        #[source]
        source: async_imap::error::Error,
    },

    /// Transport-level failure during a LIST or FETCH stream.
    #[error("{op} failed")]
    Fetch {
        op: String,
        #[source]
        source: async_imap::error::Error,
    },

    /// A caller-supplied message ID that is not a valid sequence number.
    #[error("invalid message ID '{raw}': not a sequence number")]
    InvalidId { raw: String },

    /// A single-message fetch yielded no record.
    #[error("message {id} not found in '{folder}'")]
    NotFound { id: String, folder: String },
}

/// Convenience alias for `Result<T, MailError>`.
pub type Result<T> = std::result::Result<T, MailError>;

impl MailError {
    /// Create a `Connection` variant wrapping a transport-level source.
    pub(crate) fn connection(reason: impl Into<String>, source: impl Into<ConnectSource>) -> Self {
        Self::Connection {
            reason: reason.into(),
            source: Some(source.into()),
        }
    }

    /// Create a `Connection` variant with no underlying source
    /// (e.g. a rejected greeting).
    pub(crate) fn connection_msg(reason: impl Into<String>) -> Self {
        Self::Connection {
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a `Selection` variant for a mailbox that could not be selected.
    pub(crate) fn selection(folder: impl Into<String>, source: async_imap::error::Error) -> Self {
        Self::Selection {
            folder: folder.into(),
            source,
        }
    }

    /// Create a `Fetch` variant with the failing operation as context.
    pub(crate) fn fetch(op: impl Into<String>, source: async_imap::error::Error) -> Self {
        Self::Fetch {
            op: op.into(),
            source,
        }
    }
}
