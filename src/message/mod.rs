//! Outgoing message composition.
//!
//! Gmail's `users.messages.send` takes the complete RFC 5322 text in its
//! `raw` field, base64url-encoded with the `=` padding removed. Padded or
//! standard-alphabet payloads are rejected.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

/// Recipient, subject and plain-text body as entered by the user.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EmailEnvelope {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    /// Named `message` on the wire
    #[serde(default, rename = "message")]
    pub body: String,
}

impl EmailEnvelope {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Name of the first empty field, if any.
    ///
    /// Only presence is checked. Address syntax and lengths are left to Gmail.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.to.is_empty() {
            Some("to")
        } else if self.subject.is_empty() {
            Some("subject")
        } else if self.body.is_empty() {
            Some("message")
        } else {
            None
        }
    }
}

/// A composed message in Gmail's `raw` transport encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMessage(String);

impl RawMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Build the RFC 5322 text for `envelope` and encode it for submission.
///
/// Header values are written verbatim. A CR/LF inside `to` or `subject`
/// ends up in the header block as-is.
pub fn compose(envelope: &EmailEnvelope) -> RawMessage {
    let text = [
        format!("To: {}", envelope.to),
        format!("Subject: {}", envelope.subject),
        String::new(),
        envelope.body.clone(),
    ]
    .join("\r\n");

    RawMessage(URL_SAFE_NO_PAD.encode(text.as_bytes()))
}
