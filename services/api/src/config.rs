use bookreview_auth_types::token::{ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP};

/// Book review API configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// Database connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 8000). Env var: `API_PORT`.
    pub api_port: u16,
    pub jwt: JwtSettings,
}

/// Token signing secret and lifetimes.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    pub secret: String,
    /// Env var: `ACCESS_TOKEN_TTL_SECS`.
    pub access_ttl_secs: u64,
    /// Env var: `REFRESH_TOKEN_TTL_SECS`.
    pub refresh_ttl_secs: u64,
}

impl JwtSettings {
    /// Default lifetimes with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_ttl_secs: ACCESS_TOKEN_EXP,
            refresh_ttl_secs: REFRESH_TOKEN_EXP,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            api_port: env_or("API_PORT", 8000),
            jwt: JwtSettings {
                secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
                access_ttl_secs: env_or("ACCESS_TOKEN_TTL_SECS", ACCESS_TOKEN_EXP),
                refresh_ttl_secs: env_or("REFRESH_TOKEN_TTL_SECS", REFRESH_TOKEN_EXP),
            },
        }
    }
}
