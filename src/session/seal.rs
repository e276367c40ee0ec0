//! AES-256-GCM sealing for the session cookie.
//!
//! A sealed value is `nonce || ciphertext`, base64url-encoded without padding,
//! so it stays a single cookie-safe token. Each seal uses a fresh random nonce.

use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use anyhow::{anyhow, Context, Result};
use base64::{
    engine::general_purpose::{STANDARD as BASE64, URL_SAFE_NO_PAD},
    Engine,
};

/// Size of the sealing key in bytes (256 bits)
const KEY_SIZE: usize = 32;

/// Size of the nonce in bytes (96 bits, standard for GCM)
const NONCE_SIZE: usize = 12;

/// Seals and opens cookie values with a server-held key.
#[derive(Clone)]
pub struct CookieSealer {
    cipher: Aes256Gcm,
}

impl CookieSealer {
    /// Build a sealer from a standard-base64 32-byte key
    /// (the `GMAIL_SENDER_COOKIE_KEY` format).
    pub fn from_base64_key(key_base64: &str) -> Result<Self> {
        let key_bytes = BASE64
            .decode(key_base64.trim())
            .context("Failed to decode base64 cookie key")?;

        if key_bytes.len() != KEY_SIZE {
            return Err(anyhow!(
                "Cookie key must be {} bytes (256 bits), got {} bytes",
                KEY_SIZE,
                key_bytes.len()
            ));
        }

        Self::from_key_bytes(&key_bytes)
    }

    pub fn from_key_bytes(key: &[u8]) -> Result<Self> {
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| anyhow!("Failed to create cipher: {}", e))?;
        Ok(Self { cipher })
    }

    pub fn seal(&self, plaintext: &str) -> Result<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| anyhow!("Sealing failed: {}", e))?;

        let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);

        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    /// Open a value produced by [`seal`](Self::seal).
    ///
    /// Fails on a wrong key, truncation, or any tampering.
    pub fn open(&self, sealed: &str) -> Result<String> {
        let bytes = URL_SAFE_NO_PAD
            .decode(sealed.trim())
            .context("Sealed cookie is not valid base64url")?;

        if bytes.len() <= NONCE_SIZE {
            return Err(anyhow!("Sealed cookie is too short"));
        }

        let (nonce, ciphertext) = bytes.split_at(NONCE_SIZE);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|e| anyhow!("Opening failed (wrong key or corrupted data): {}", e))?;

        String::from_utf8(plaintext).context("Opened cookie is not valid UTF-8")
    }
}
