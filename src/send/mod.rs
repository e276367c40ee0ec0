//! Send workflow: session check, composition, single submission.

use crate::message::{compose, EmailEnvelope};
use crate::provider::{MailProvider, ProviderError, SendReceipt, AUTHENTICATED_USER};
use crate::session::TokenBundle;
use std::fmt;
use tracing::{info, warn};

/// Why a send did not happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendError {
    /// No usable session cookie
    Unauthenticated,
    /// A required envelope field was empty
    InvalidEnvelope(String),
    /// Gmail (or the network) refused the submission
    Provider(ProviderError),
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Unauthenticated => {
                write!(f, "Not authenticated. Please authenticate first.")
            }
            SendError::InvalidEnvelope(msg) => write!(f, "{}", msg),
            SendError::Provider(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SendError {}

impl From<ProviderError> for SendError {
    fn from(e: ProviderError) -> Self {
        SendError::Provider(e)
    }
}

/// Send `envelope` as the account behind `session`.
///
/// # Flow
/// 1. No bundle → `Unauthenticated`, provider untouched
/// 2. Empty field → `InvalidEnvelope`, provider untouched
/// 3. Compose the raw message
/// 4. Submit exactly once as `"me"`
///
/// The bundle is only borrowed; nothing about the session changes, whatever
/// the outcome.
pub async fn send<P>(
    provider: &P,
    session: Option<&TokenBundle>,
    envelope: &EmailEnvelope,
) -> Result<SendReceipt, SendError>
where
    P: MailProvider + ?Sized,
{
    let bundle = session.ok_or(SendError::Unauthenticated)?;

    if let Some(field) = envelope.missing_field() {
        return Err(SendError::InvalidEnvelope(format!(
            "Missing required field '{}'",
            field
        )));
    }

    let raw = compose(envelope);

    let receipt = provider
        .submit(bundle, AUTHENTICATED_USER, &raw)
        .await
        .map_err(|e| {
            warn!(error = %e, "Gmail rejected message");
            SendError::from(e)
        })?;

    info!(
        message_id = receipt.id.as_deref().unwrap_or("unknown"),
        "Email sent"
    );

    Ok(receipt)
}
