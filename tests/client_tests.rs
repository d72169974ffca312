//! Tests for the client's guard and validation paths that need no server.

use mailpager::{ImapClient, ImapConfig, MailError};

fn offline_client() -> ImapClient {
    ImapClient::new(ImapConfig {
        host: "imap.example.invalid".to_string(),
        username: "alice".to_string(),
        password: "secret".to_string(),
        ..Default::default()
    })
}

// ─── Guard: operations without a session ────────────────────────────

#[tokio::test]
async fn test_list_folders_requires_session() {
    let client = offline_client();
    let err = client.list_folders().await.unwrap_err();
    assert!(matches!(err, MailError::NotConnected), "got: {err}");
}

#[tokio::test]
async fn test_get_inbox_requires_session() {
    let client = offline_client();
    let err = client.get_inbox(1, 10).await.unwrap_err();
    assert!(matches!(err, MailError::NotConnected), "got: {err}");
}

#[tokio::test]
async fn test_get_folder_messages_requires_session() {
    let client = offline_client();
    let err = client.get_folder_messages("Archive", 1, 10).await.unwrap_err();
    assert!(matches!(err, MailError::NotConnected), "got: {err}");
}

#[tokio::test]
async fn test_get_message_by_id_requires_session() {
    let client = offline_client();
    let err = client.get_message_by_id("7", None).await.unwrap_err();
    assert!(matches!(err, MailError::NotConnected), "got: {err}");
}

// ─── Disconnect on an already-disconnected client ───────────────────

#[tokio::test]
async fn test_disconnect_without_session_is_noop() {
    let client = offline_client();
    client.disconnect().await.expect("no-op success");
    client.disconnect().await.expect("still a no-op");
}

// ─── ID validation happens before any I/O or guard check ────────────

#[tokio::test]
async fn test_invalid_id_rejected_before_guard() {
    let client = offline_client();
    let err = client
        .get_message_by_id("not-a-number", Some("INBOX"))
        .await
        .unwrap_err();
    assert!(
        matches!(err, MailError::InvalidId { ref raw } if raw == "not-a-number"),
        "got: {err}"
    );
}

#[tokio::test]
async fn test_negative_and_decorated_ids_rejected() {
    let client = offline_client();
    for bad in ["-1", "1.5", "", "0x10", " 7"] {
        let err = client.get_message_by_id(bad, None).await.unwrap_err();
        assert!(
            matches!(err, MailError::InvalidId { .. }),
            "'{bad}' should be invalid, got: {err}"
        );
    }
}

#[tokio::test]
async fn test_error_messages_name_the_operation() {
    let err = mailpager::MailError::InvalidId {
        raw: "abc".to_string(),
    };
    assert_eq!(err.to_string(), "invalid message ID 'abc': not a sequence number");

    let err = mailpager::MailError::NotFound {
        id: "9".to_string(),
        folder: "INBOX".to_string(),
    };
    assert_eq!(err.to_string(), "message 9 not found in 'INBOX'");
}
