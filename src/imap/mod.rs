//! The IMAP client: session guard and the public mailbox operations.
//!
//! [`ImapClient`] owns at most one live session behind a `tokio::sync::Mutex`.
//! Every operation holds the lock for its FULL duration, streaming fetches
//! included, so the session is never touched concurrently. There is no
//! timeout or retry at this layer; hosts wrap calls in their own deadlines.

pub(crate) mod conn;
pub(crate) mod fetch;

use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::ImapConfig;
use crate::error::{MailError, Result};
use crate::model::{Message, MessagePage};
use crate::page::seq_window;

use conn::ImapSession;

/// A paginating IMAP mailbox reader over a single guarded session.
///
/// ```no_run
/// # use mailpager::{ImapClient, ImapConfig};
/// # async fn demo() -> mailpager::Result<()> {
/// let client = ImapClient::new(ImapConfig {
///     host: "imap.example.com".into(),
///     username: "alice".into(),
///     password: "secret".into(),
///     ..Default::default()
/// });
/// client.connect().await?;
/// let page = client.get_inbox(1, 20).await?;
/// println!("{} of {} messages", page.messages.len(), page.total_count);
/// client.disconnect().await?;
/// # Ok(())
/// # }
/// ```
pub struct ImapClient {
    config: ImapConfig,
    session: Mutex<Option<ImapSession>>,
}

impl ImapClient {
    /// Create a client. No connection is made until [`connect`](Self::connect).
    pub fn new(config: ImapConfig) -> Self {
        Self {
            config,
            session: Mutex::new(None),
        }
    }

    /// Dial, negotiate transport security, and log in.
    ///
    /// Connecting while already connected replaces the held session; the
    /// previous handle is dropped without a remote logout.
    pub async fn connect(&self) -> Result<()> {
        let mut guard = self.session.lock().await;
        let session = conn::establish(&self.config).await?;
        info!(
            host = %self.config.host,
            username = %self.config.username,
            "IMAP session established"
        );
        *guard = Some(session);
        Ok(())
    }

    /// Log out and clear the held session.
    ///
    /// Local state is cleared unconditionally: even when the remote LOGOUT
    /// fails, a subsequent operation sees no session. Disconnecting an
    /// already-disconnected client is a no-op success.
    pub async fn disconnect(&self) -> Result<()> {
        let mut guard = self.session.lock().await;
        let Some(mut session) = guard.take() else {
            return Ok(());
        };
        match session.logout().await {
            Ok(()) => {
                debug!("logged out");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "remote logout failed, session cleared locally");
                Err(MailError::connection("logout failed", e))
            }
        }
    }

    /// List all mailbox names on the server, in server order.
    pub async fn list_folders(&self) -> Result<Vec<String>> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(MailError::NotConnected)?;

        let stream = session
            .list(Some(""), Some("*"))
            .await
            .map_err(|e| MailError::fetch("LIST", e))?;
        let names: Vec<_> = stream.collect().await;

        let mut folders = Vec::with_capacity(names.len());
        for name in names {
            let name = name.map_err(|e| MailError::fetch("LIST", e))?;
            folders.push(name.name().to_string());
        }
        debug!(count = folders.len(), "listed folders");
        Ok(folders)
    }

    /// One page of the INBOX, newest-first.
    pub async fn get_inbox(&self, page: u32, page_size: u32) -> Result<MessagePage> {
        self.get_folder_messages("INBOX", page, page_size).await
    }

    /// One page of an arbitrary folder, newest-first.
    ///
    /// A page beyond the end of the mailbox is not an error: the result is
    /// empty with `total_count` still reporting the mailbox size.
    pub async fn get_folder_messages(
        &self,
        folder: &str,
        page: u32,
        page_size: u32,
    ) -> Result<MessagePage> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(MailError::NotConnected)?;

        let mailbox = session
            .select(folder)
            .await
            .map_err(|e| MailError::selection(folder, e))?;
        let total_count = mailbox.exists;
        debug!(folder, total_count, page, page_size, "mailbox selected");

        let Some(window) = seq_window(total_count, page, page_size) else {
            return Ok(MessagePage {
                messages: Vec::new(),
                total_count,
            });
        };

        let stream = session
            .fetch(window.fetch_set(), fetch::RANGE_ITEMS)
            .await
            .map_err(|e| MailError::fetch("FETCH", e))?;
        let records: Vec<_> = stream.collect().await;

        // Fail-whole: a single stream error discards the partial page.
        let mut fetched = Vec::with_capacity(records.len());
        for record in records {
            fetched.push(record.map_err(|e| MailError::fetch("FETCH", e))?);
        }

        // The transport is free to deliver the range in any order;
        // newest-first is this crate's contract, so sort explicitly.
        fetched.sort_unstable_by(|a, b| b.message.cmp(&a.message));

        let messages: Vec<Message> = fetched.iter().map(fetch::envelope_message).collect();
        Ok(MessagePage {
            messages,
            total_count,
        })
    }

    /// Fetch one message in full: envelope, flags, size, decoded body, and
    /// attachments. `folder` defaults to `"INBOX"`.
    ///
    /// The ID must be a sequence number previously returned by a page
    /// listing against the same session and mailbox state.
    pub async fn get_message_by_id(&self, id: &str, folder: Option<&str>) -> Result<Message> {
        // Validated before touching the session: a malformed ID never
        // causes I/O.
        let seq: u32 = id.parse().map_err(|_| MailError::InvalidId {
            raw: id.to_string(),
        })?;
        let folder = folder.unwrap_or("INBOX");

        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(MailError::NotConnected)?;

        session
            .select(folder)
            .await
            .map_err(|e| MailError::selection(folder, e))?;

        let stream = session
            .fetch(seq.to_string(), fetch::SINGLE_ITEMS)
            .await
            .map_err(|e| MailError::fetch("FETCH", e))?;
        let records: Vec<_> = stream.collect().await;

        // Fail-whole: a stream error discards anything already delivered.
        let mut fetched = Vec::with_capacity(records.len());
        for record in records {
            fetched.push(record.map_err(|e| MailError::fetch("FETCH", e))?);
        }

        match fetch::winning_record(fetched) {
            Some(record) => Ok(fetch::full_message(&record)),
            None => Err(MailError::NotFound {
                id: id.to_string(),
                folder: folder.to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for ImapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImapClient")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("username", &self.config.username)
            .finish_non_exhaustive()
    }
}
