//! Transport establishment and authentication.
//!
//! Dials TCP, optionally wraps or upgrades to TLS per the configured
//! [`Security`] mode, and performs the LOGIN exchange. The resulting
//! [`ImapSession`] is handed to the guard in [`super::ImapClient`] and
//! never leaves this crate.

use async_imap::{Client, Session};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_native_tls::TlsStream;
use tracing::debug;

use crate::config::{ImapConfig, Security};
use crate::error::{MailError, Result};

/// Wrapper to unify TLS and plain streams so `Session` can use one type.
pub(crate) enum ImapStream {
    Tls(TlsStream<TcpStream>),
    Plain(TcpStream),
}

pub(crate) type ImapSession = Session<ImapStream>;

impl tokio::io::AsyncRead for ImapStream {
    fn poll_read(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &mut tokio::io::ReadBuf<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            ImapStream::Tls(s) => std::pin::Pin::new(s).poll_read(cx, buf),
            ImapStream::Plain(s) => std::pin::Pin::new(s).poll_read(cx, buf),
        }
    }
}

impl tokio::io::AsyncWrite for ImapStream {
    fn poll_write(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
        buf: &[u8],
    ) -> std::task::Poll<std::io::Result<usize>> {
        match self.get_mut() {
            ImapStream::Tls(s) => std::pin::Pin::new(s).poll_write(cx, buf),
            ImapStream::Plain(s) => std::pin::Pin::new(s).poll_write(cx, buf),
        }
    }

    fn poll_flush(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            ImapStream::Tls(s) => std::pin::Pin::new(s).poll_flush(cx),
            ImapStream::Plain(s) => std::pin::Pin::new(s).poll_flush(cx),
        }
    }

    fn poll_shutdown(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::io::Result<()>> {
        match self.get_mut() {
            ImapStream::Tls(s) => std::pin::Pin::new(s).poll_shutdown(cx),
            ImapStream::Plain(s) => std::pin::Pin::new(s).poll_shutdown(cx),
        }
    }
}

impl std::fmt::Debug for ImapStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImapStream::Tls(_) => write!(f, "ImapStream::Tls"),
            ImapStream::Plain(_) => write!(f, "ImapStream::Plain"),
        }
    }
}

/// Establish a connection per the configured security mode and authenticate.
///
/// On login failure the raw connection is dropped before the error returns.
pub(crate) async fn establish(config: &ImapConfig) -> Result<ImapSession> {
    let stream = match config.security {
        Security::Tls => {
            let tcp = dial(config).await?;
            let tls = tls_connector(config)?
                .connect(&config.host, tcp)
                .await
                .map_err(|e| {
                    MailError::connection(format!("TLS handshake with {} failed", config.host), e)
                })?;
            ImapStream::Tls(tls)
        }
        Security::StartTls => upgrade_starttls(config).await?,
        Security::Plain => ImapStream::Plain(dial(config).await?),
    };

    debug!(host = %config.host, port = config.port, security = ?config.security, "transport ready");

    let client = Client::new(stream);
    client
        .login(&config.username, &config.password)
        .await
        // The tuple error hands the client back, dropping it here tears
        // the connection down before we return.
        .map_err(|(e, _client)| MailError::connection("login rejected", e))
}

async fn dial(config: &ImapConfig) -> Result<TcpStream> {
    TcpStream::connect((config.host.as_str(), config.port))
        .await
        .map_err(|e| {
            MailError::connection(
                format!("TCP connect to {}:{} failed", config.host, config.port),
                e,
            )
        })
}

fn tls_connector(config: &ImapConfig) -> Result<tokio_native_tls::TlsConnector> {
    let mut builder = native_tls::TlsConnector::builder();
    if config.accept_invalid_certs {
        builder.danger_accept_invalid_certs(true);
    }
    let connector = builder
        .build()
        .map_err(|e| MailError::connection("failed to build TLS connector", e))?;
    Ok(tokio_native_tls::TlsConnector::from(connector))
}

/// STARTTLS flow: connect plain, consume the greeting, issue STARTTLS,
/// then upgrade the same TCP stream to TLS.
///
/// The greeting must be read manually here because the IMAP client is only
/// created after the upgrade.
async fn upgrade_starttls(config: &ImapConfig) -> Result<ImapStream> {
    let mut tcp = dial(config).await?;

    let mut buf = vec![0u8; 4096];
    let n = tcp
        .read(&mut buf)
        .await
        .map_err(|e| MailError::connection("failed to read server greeting", e))?;
    let greeting = String::from_utf8_lossy(&buf[..n]);
    if !greeting.contains("OK") {
        return Err(MailError::connection_msg(format!(
            "unexpected server greeting: {}",
            greeting.trim()
        )));
    }

    tcp.write_all(b"a001 STARTTLS\r\n")
        .await
        .map_err(|e| MailError::connection("failed to send STARTTLS", e))?;

    let n = tcp
        .read(&mut buf)
        .await
        .map_err(|e| MailError::connection("failed to read STARTTLS response", e))?;
    let response = String::from_utf8_lossy(&buf[..n]);
    if !response.contains("OK") {
        return Err(MailError::connection_msg(format!(
            "STARTTLS rejected: {}",
            response.trim()
        )));
    }

    let tls = tls_connector(config)?
        .connect(&config.host, tcp)
        .await
        .map_err(|e| {
            MailError::connection(
                format!("TLS upgrade after STARTTLS failed for {}", config.host),
                e,
            )
        })?;
    Ok(ImapStream::Tls(tls))
}
