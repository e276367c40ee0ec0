//! Token bundle <-> cookie value.
//!
//! JSON keeps the format inspectable; the base64url wrapper keeps quotes,
//! commas and semicolons out of the cookie value.

use super::TokenBundle;
use anyhow::{Context, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Serialize a bundle into a cookie-safe string.
///
/// Field order is fixed by the struct definition, so equal bundles always
/// encode to the same string.
pub fn encode(bundle: &TokenBundle) -> Result<String> {
    let json = serde_json::to_vec(bundle).context("Failed to serialize token bundle")?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Parse a cookie value produced by [`encode`].
///
/// # Errors
/// Fails on invalid base64, invalid JSON, or JSON that does not describe a
/// bundle (e.g. missing `access_token`).
pub fn decode(value: &str) -> Result<TokenBundle> {
    let json = URL_SAFE_NO_PAD
        .decode(value.trim())
        .context("Token cookie is not valid base64url")?;
    serde_json::from_slice(&json).context("Token cookie does not contain a token bundle")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    fn full_bundle() -> TokenBundle {
        TokenBundle {
            access_token: "ya29.a0AfH6SMB".to_string(),
            refresh_token: Some("1//0gLx-refresh".to_string()),
            expires_at: Some(Utc.with_ymd_and_hms(2026, 10, 19, 12, 30, 0).unwrap()),
            scope: vec!["https://www.googleapis.com/auth/gmail.send".to_string()],
            token_type: Some("Bearer".to_string()),
        }
    }

    #[test]
    fn test_round_trip_full_bundle() {
        let bundle = full_bundle();
        let encoded = encode(&bundle).unwrap();
        assert_eq!(decode(&encoded).unwrap(), bundle);
    }

    #[test]
    fn test_round_trip_minimal_bundle() {
        let bundle = TokenBundle {
            access_token: "token; with, \"odd\" chars".to_string(),
            refresh_token: None,
            expires_at: None,
            scope: vec![],
            token_type: None,
        };
        let encoded = encode(&bundle).unwrap();
        assert_eq!(decode(&encoded).unwrap(), bundle);
    }

    #[test]
    fn test_round_trip_subsecond_expiry() {
        let mut bundle = full_bundle();
        bundle.expires_at = Some(Utc.timestamp_millis_opt(1_760_000_000_123).unwrap());
        assert_eq!(decode(&encode(&bundle).unwrap()).unwrap(), bundle);
    }

    #[test]
    fn test_encoding_is_deterministic_and_cookie_safe() {
        let a = encode(&full_bundle()).unwrap();
        let b = encode(&full_bundle()).unwrap();
        assert_eq!(a, b);
        assert!(a
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("not base64 at all!").is_err());
        // Valid base64url, not JSON
        assert!(decode(&URL_SAFE_NO_PAD.encode("hello")).is_err());
        // JSON, but no access_token
        assert!(decode(&URL_SAFE_NO_PAD.encode(r#"{"scope":[]}"#)).is_err());
        assert!(decode("").is_err());
    }
}
