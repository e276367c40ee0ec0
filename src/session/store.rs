use super::{codec, AuthState, CookieSealer, TokenBundle};
use crate::config::SessionConfig;
use anyhow::{Context, Result};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use tracing::{debug, warn};

/// Reads and writes the token bundle through the session cookie.
///
/// Holds only settings; the bundle itself always travels with the request.
#[derive(Clone)]
pub struct SessionStore {
    cookie_name: String,
    max_age: Duration,
    secure: bool,
    sealer: Option<CookieSealer>,
}

impl SessionStore {
    /// Store with the default cookie (`gmail_tokens`, 7 days), unsealed.
    ///
    /// `secure` should be true in production only; browsers drop `Secure`
    /// cookies on plain-http localhost.
    pub fn new(secure: bool) -> Self {
        let defaults = SessionConfig::default();
        Self {
            cookie_name: defaults.cookie_name,
            max_age: Duration::seconds(defaults.max_age_seconds),
            secure,
            sealer: None,
        }
    }

    pub fn from_config(config: &SessionConfig, production: bool) -> Result<Self> {
        let sealer = config
            .cookie_key
            .as_deref()
            .map(CookieSealer::from_base64_key)
            .transpose()
            .context("Invalid GMAIL_SENDER_COOKIE_KEY")?;

        Ok(Self {
            cookie_name: config.cookie_name.clone(),
            max_age: Duration::seconds(config.max_age_seconds),
            secure: production,
            sealer,
        })
    }

    pub fn with_sealer(mut self, sealer: CookieSealer) -> Self {
        self.sealer = Some(sealer);
        self
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn is_sealed(&self) -> bool {
        self.sealer.is_some()
    }

    /// Replace whatever bundle the client holds with `bundle`.
    pub fn persist(&self, jar: CookieJar, bundle: &TokenBundle) -> Result<CookieJar> {
        let encoded = codec::encode(bundle)?;
        let value = match &self.sealer {
            Some(sealer) => sealer.seal(&encoded)?,
            None => encoded,
        };

        debug!(
            cookie = %self.cookie_name,
            sealed = self.sealer.is_some(),
            has_refresh_token = bundle.refresh_token.is_some(),
            "Persisting token bundle"
        );

        Ok(jar.add(self.session_cookie(value)))
    }

    /// The bundle carried by this request, if any.
    ///
    /// A cookie that cannot be opened or decoded is treated exactly like a
    /// missing one.
    pub fn load(&self, jar: &CookieJar) -> Option<TokenBundle> {
        let raw = jar.get(&self.cookie_name)?.value().to_string();

        let encoded = match &self.sealer {
            Some(sealer) => match sealer.open(&raw) {
                Ok(encoded) => encoded,
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable session cookie");
                    return None;
                }
            },
            None => raw,
        };

        match codec::decode(&encoded) {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                warn!(error = %e, "Discarding malformed session cookie");
                None
            }
        }
    }

    pub fn auth_state(&self, jar: &CookieJar) -> AuthState {
        AuthState::of(self.load(jar).as_ref())
    }

    fn session_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(self.max_age)
            .build()
    }
}
