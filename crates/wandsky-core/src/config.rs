use crate::app_config::{AppConfig, Environment, GoogleOAuthConfig};
use crate::ConfigError;

const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const MIN_SESSION_SECRET_LEN: usize = 32;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    let require = |var: &str| -> Result<String, ConfigError> {
        optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("WANDSKY_ENV", "development"))?;

    let backend_api_url = require("BACKEND_API_URL")?;
    validate_http_url("BACKEND_API_URL", &backend_api_url)?;
    let backend_api_url = backend_api_url.trim_end_matches('/').to_owned();

    let session_secret = match optional("WANDSKY_SESSION_SECRET") {
        Some(secret) => secret,
        None => optional("NEXTAUTH_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("WANDSKY_SESSION_SECRET".to_string()))?,
    };
    if env != Environment::Development && session_secret.len() < MIN_SESSION_SECRET_LEN {
        return Err(invalid(
            "WANDSKY_SESSION_SECRET",
            format!("must be at least {MIN_SESSION_SECRET_LEN} bytes outside development"),
        ));
    }

    let bind_addr = or_default("WANDSKY_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("WANDSKY_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("WANDSKY_LOG_LEVEL", "info");

    let session_max_age_secs = parse_u64("WANDSKY_SESSION_MAX_AGE_SECS", "2592000")?;
    if session_max_age_secs == 0 {
        return Err(invalid(
            "WANDSKY_SESSION_MAX_AGE_SECS",
            "must be greater than zero".to_string(),
        ));
    }
    let http_timeout_secs = parse_u64("WANDSKY_HTTP_TIMEOUT_SECS", "30")?;
    let rate_limit_per_minute = parse_usize("WANDSKY_RATE_LIMIT_PER_MINUTE", "120")?;
    if rate_limit_per_minute == 0 {
        return Err(invalid(
            "WANDSKY_RATE_LIMIT_PER_MINUTE",
            "must be greater than zero".to_string(),
        ));
    }

    let google = match (optional("GOOGLE_CLIENT_ID"), optional("GOOGLE_CLIENT_SECRET")) {
        (Some(client_id), Some(client_secret)) => Some(GoogleOAuthConfig {
            client_id,
            client_secret,
            token_url: or_default("GOOGLE_TOKEN_URL", DEFAULT_GOOGLE_TOKEN_URL),
            userinfo_url: or_default("GOOGLE_USERINFO_URL", DEFAULT_GOOGLE_USERINFO_URL),
        }),
        (None, None) => None,
        (Some(_), None) => return Err(ConfigError::MissingEnvVar("GOOGLE_CLIENT_SECRET".into())),
        (None, Some(_)) => return Err(ConfigError::MissingEnvVar("GOOGLE_CLIENT_ID".into())),
    };

    let weather_api_key = optional("WEATHER_API_KEY");
    let weather_api_base_url = or_default("WEATHER_API_BASE_URL", "https://api.weatherapi.com");
    validate_http_url("WEATHER_API_BASE_URL", &weather_api_base_url)?;
    let weather_fallback_city = or_default("WEATHER_FALLBACK_CITY", "Auckland");

    let stripe_publishable_key =
        optional("STRIPE_PUBLISHABLE_KEY").or_else(|| optional("NEXT_PUBLIC_STRIPE_PUBLISHABLE_KEY"));
    let google_maps_api_key =
        optional("GOOGLE_MAPS_API_KEY").or_else(|| optional("NEXT_PUBLIC_GOOGLE_MAPS_API_KEY"));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        backend_api_url,
        session_secret,
        session_max_age_secs,
        http_timeout_secs,
        rate_limit_per_minute,
        google,
        weather_api_key,
        weather_api_base_url,
        weather_fallback_city,
        stripe_publishable_key,
        google_maps_api_key,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WANDSKY_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

fn validate_http_url(var: &str, value: &str) -> Result<(), ConfigError> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
        _ => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected an http(s) URL, got '{value}'"),
        }),
    }
}
