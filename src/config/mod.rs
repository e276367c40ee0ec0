use serde::Deserialize;

/// Redirect target for the manual copy-the-code flow
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Complete application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Production mode marks the session cookie `Secure`
    #[serde(default)]
    pub production: bool,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            production: false,
        }
    }
}

/// Google OAuth client and API endpoints.
///
/// Client id and secret stay optional here: the server starts without them
/// and the OAuth endpoints report a configuration failure per request.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default = "default_redirect_uri")]
    pub redirect_uri: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Base URL of the Gmail REST API (overridable for tests)
    #[serde(default = "default_gmail_api_url")]
    pub gmail_api_url: String,
}

fn default_redirect_uri() -> String {
    OOB_REDIRECT_URI.to_string()
}

fn default_auth_url() -> String {
    "https://accounts.google.com/o/oauth2/v2/auth".to_string()
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_gmail_api_url() -> String {
    "https://gmail.googleapis.com".to_string()
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: default_redirect_uri(),
            auth_url: default_auth_url(),
            token_url: default_token_url(),
            gmail_api_url: default_gmail_api_url(),
        }
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_max_age_seconds")]
    pub max_age_seconds: i64,
    /// Base64 32-byte key; when set the cookie is AES-256-GCM sealed
    #[serde(default)]
    pub cookie_key: Option<String>,
}

fn default_cookie_name() -> String {
    "gmail_tokens".to_string()
}

fn default_max_age_seconds() -> i64 {
    60 * 60 * 24 * 7
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            max_age_seconds: default_max_age_seconds(),
            cookie_key: None,
        }
    }
}

impl AppConfig {
    /// Apply environment overrides read through `lookup`.
    ///
    /// Empty values count as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("GOOGLE_CLIENT_ID") {
            self.google.client_id = Some(v);
        }
        if let Some(v) = var("GOOGLE_CLIENT_SECRET") {
            self.google.client_secret = Some(v);
        }
        if let Some(v) = var("GOOGLE_REDIRECT_URI") {
            self.google.redirect_uri = v;
        }
        if let Some(v) = var("GMAIL_SENDER_BIND_ADDR") {
            self.server.bind_addr = v;
        }
        if let Some(v) = var("GMAIL_SENDER_ENV") {
            self.server.production = v.eq_ignore_ascii_case("production");
        }
        if let Some(v) = var("GMAIL_SENDER_COOKIE_KEY") {
            self.session.cookie_key = Some(v);
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error + Send + Sync>> {
    let contents = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&contents)?;
    Ok(config)
}
