use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Client credentials and endpoints for the Google sign-in provider.
#[derive(Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub userinfo_url: String,
}

impl std::fmt::Debug for GoogleOAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleOAuthConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("token_url", &self.token_url)
            .field("userinfo_url", &self.userinfo_url)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub backend_api_url: String,
    pub session_secret: String,
    pub session_max_age_secs: u64,
    pub http_timeout_secs: u64,
    pub rate_limit_per_minute: usize,
    pub google: Option<GoogleOAuthConfig>,
    pub weather_api_key: Option<String>,
    pub weather_api_base_url: String,
    pub weather_fallback_city: String,
    pub stripe_publishable_key: Option<String>,
    pub google_maps_api_key: Option<String>,
}

impl AppConfig {
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self.env, Environment::Development)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("backend_api_url", &self.backend_api_url)
            .field("session_secret", &"[redacted]")
            .field("session_max_age_secs", &self.session_max_age_secs)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .field("google", &self.google)
            .field(
                "weather_api_key",
                &self.weather_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("weather_api_base_url", &self.weather_api_base_url)
            .field("weather_fallback_city", &self.weather_fallback_city)
            .field("stripe_publishable_key", &self.stripe_publishable_key)
            .field("google_maps_api_key", &self.google_maps_api_key)
            .finish()
    }
}
