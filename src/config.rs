//! IMAP connection configuration.
//!
//! The library does no file I/O of its own: the host process builds an
//! [`ImapConfig`] however it likes (hand-written, or embedded in its own
//! TOML/JSON configuration via the serde derives) and hands it to
//! [`ImapClient::new`](crate::imap::ImapClient::new).

use serde::{Deserialize, Serialize};

/// Connection settings for a single IMAP account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImapConfig {
    /// Server hostname (also used for TLS certificate verification).
    pub host: String,
    /// Server port. 993 for implicit TLS, 143 for STARTTLS or plaintext.
    pub port: u16,
    /// Account name for LOGIN.
    pub username: String,
    /// Password for LOGIN.
    pub password: String,
    /// Transport security mode. Chosen explicitly by the caller, never
    /// inferred from the port number.
    pub security: Security,
    /// Skip TLS certificate verification. Off by default; only useful
    /// against servers with self-signed certificates.
    pub accept_invalid_certs: bool,
}

/// Transport security mode for the IMAP connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Security {
    /// Implicit TLS from the first byte (usually port 993).
    Tls,
    /// Plaintext dial, then upgrade via the STARTTLS command.
    StartTls,
    /// No encryption at all. Testing only.
    Plain,
}

impl Default for ImapConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: 993,
            username: String::new(),
            password: String::new(),
            security: Security::Tls,
            accept_invalid_certs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ImapConfig::default();
        assert_eq!(cfg.port, 993);
        assert_eq!(cfg.security, Security::Tls);
        assert!(!cfg.accept_invalid_certs);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
host = "imap.example.com"
username = "alice"
password = "secret"
"#;
        let cfg: ImapConfig = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.host, "imap.example.com");
        assert_eq!(cfg.username, "alice");
        // Unspecified fields use defaults
        assert_eq!(cfg.port, 993);
        assert_eq!(cfg.security, Security::Tls);
        assert!(!cfg.accept_invalid_certs);
    }

    #[test]
    fn test_security_mode_names() {
        let cfg: ImapConfig = toml::from_str(
            r#"
host = "localhost"
port = 143
security = "starttls"
"#,
        )
        .expect("parse starttls");
        assert_eq!(cfg.security, Security::StartTls);

        let cfg: ImapConfig = toml::from_str(r#"security = "plain""#).expect("parse plain");
        assert_eq!(cfg.security, Security::Plain);
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let cfg = ImapConfig {
            host: "imap.example.com".to_string(),
            port: 143,
            username: "alice".to_string(),
            password: "secret".to_string(),
            security: Security::StartTls,
            accept_invalid_certs: true,
        };
        let toml_str = toml::to_string(&cfg).expect("serialize");
        let parsed: ImapConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.host, cfg.host);
        assert_eq!(parsed.port, cfg.port);
        assert_eq!(parsed.security, cfg.security);
        assert!(parsed.accept_invalid_certs);
    }
}
