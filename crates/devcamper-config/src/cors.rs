use std::env;

const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Origins allowed to call the API with credentials (the session cookie).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![DEFAULT_ORIGIN.to_string()],
        }
    }
}

impl CorsConfig {
    /// Reads the comma-separated `CORS_ALLOWED_ORIGINS`.
    pub fn from_env() -> Self {
        match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => Self::parse(&raw),
            Err(_) => Self::default(),
        }
    }

    pub fn parse(raw: &str) -> Self {
        let allowed_origins: Vec<String> = raw
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        if allowed_origins.is_empty() {
            return Self::default();
        }
        Self { allowed_origins }
    }
}
