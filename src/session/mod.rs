//! Cookie-held OAuth session.
//!
//! The server keeps no session state. After a successful code exchange the
//! token bundle is encoded into a single `gmail_tokens` cookie and read back
//! on every send.
//!
//! ```text
//! TokenBundle ──encode──► JSON ──base64url──► [seal (AES-256-GCM, optional)] ──► cookie
//! cookie ──► [open] ──► base64url ──► JSON ──decode──► TokenBundle
//! ```
//!
//! Anything that fails along the read path means "not authenticated".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod codec;
mod seal;
mod store;


pub use seal::CookieSealer;
pub use store::SessionStore;

/// OAuth token set issued by Google for the authorized account.
///
/// Stored as-is until the next successful exchange replaces it. Expiry is
/// recorded but never enforced here; Gmail rejects stale tokens itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBundle {
    /// Bearer token for Gmail API calls
    pub access_token: String,

    /// Present when offline access was granted on this exchange
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// When the access token expires (UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Granted scopes
    #[serde(default)]
    pub scope: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Whether the caller holds a usable session cookie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated,
}

impl AuthState {
    pub fn of(bundle: Option<&TokenBundle>) -> Self {
        match bundle {
            Some(_) => AuthState::Authenticated,
            None => AuthState::Unauthenticated,
        }
    }

    pub fn is_authenticated(self) -> bool {
        self == AuthState::Authenticated
    }
}
