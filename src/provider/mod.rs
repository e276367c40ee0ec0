//! Mail provider interface.
//!
//! Everything that talks to Google goes through [`MailProvider`]. The HTTP
//! handlers and the send workflow only see this trait, so tests swap in an
//! in-process fake.

use crate::message::RawMessage;
use crate::session::TokenBundle;
use async_trait::async_trait;
use std::fmt;

pub mod google;

pub use google::GoogleClient;

/// The only scope ever requested: send mail, nothing else
pub const GMAIL_SEND_SCOPE: &str = "https://www.googleapis.com/auth/gmail.send";

/// Gmail's alias for the account the access token belongs to
pub const AUTHENTICATED_USER: &str = "me";

/// Provider-side identifiers of a sent message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SendReceipt {
    /// Absent when Gmail accepted the message without echoing an id
    pub id: Option<String>,
    pub thread_id: Option<String>,
}

/// Failures reported by a mail provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Client id or secret missing
    Configuration(String),
    /// The provider answered with an error status
    Rejected { status: u16, message: String },
    /// The request never got a usable answer
    Transport(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Configuration(msg) => write!(f, "OAuth client not configured: {}", msg),
            // Passed through untouched; this is what the user sees
            ProviderError::Rejected { message, .. } => f.write_str(message),
            ProviderError::Transport(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ProviderError {}

/// OAuth and mail-submission capability of an external provider.
#[async_trait]
pub trait MailProvider: Send + Sync {
    /// Consent page URL requesting `scopes` with offline access.
    fn authorization_url(&self, scopes: &[&str]) -> Result<String, ProviderError>;

    /// Trade a one-time authorization code for a token bundle.
    async fn exchange_code(&self, code: &str) -> Result<TokenBundle, ProviderError>;

    /// Submit an already-composed message as `identity`, authorized by `bundle`.
    async fn submit(
        &self,
        bundle: &TokenBundle,
        identity: &str,
        raw: &RawMessage,
    ) -> Result<SendReceipt, ProviderError>;
}
