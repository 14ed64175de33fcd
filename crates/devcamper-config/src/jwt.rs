use std::env;

use tracing::warn;

const DEV_SECRET: &str = "devcamper-secret-change-in-production";

const DEFAULT_EXPIRE_DAYS: i64 = 30;

/// Longest accepted session lifetime, ten years.
pub const MAX_EXPIRE_DAYS: i64 = 3650;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of a session token and of the cookie carrying it.
    pub expire_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
            expire_days: DEFAULT_EXPIRE_DAYS,
        }
    }
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, using the development secret");
            DEV_SECRET.to_string()
        });

        Self {
            secret,
            expire_days: parse_expire_days(env::var("JWT_EXPIRE_DAYS").ok().as_deref()),
        }
    }

    /// Token lifetime in seconds.
    pub fn expires_in_secs(&self) -> i64 {
        self.expire_days.saturating_mul(24 * 60 * 60)
    }
}

/// Reads `JWT_EXPIRE_DAYS`, keeping it within `1..=MAX_EXPIRE_DAYS`.
pub fn parse_expire_days(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_EXPIRE_DAYS;
    };

    match raw.trim().parse::<i64>() {
        Ok(days) if (1..=MAX_EXPIRE_DAYS).contains(&days) => days,
        Ok(days) => {
            warn!(
                days,
                max = MAX_EXPIRE_DAYS,
                "JWT_EXPIRE_DAYS out of range, using {} days",
                DEFAULT_EXPIRE_DAYS
            );
            DEFAULT_EXPIRE_DAYS
        }
        Err(_) => {
            warn!(raw, "JWT_EXPIRE_DAYS is not a number, using {} days", DEFAULT_EXPIRE_DAYS);
            DEFAULT_EXPIRE_DAYS
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expires_in_secs() {
        let config = JwtConfig {
            secret: "s".to_string(),
            expire_days: 2,
        };
        assert_eq!(config.expires_in_secs(), 172_800);
    }

    #[test]
    fn test_default_lifetime() {
        assert_eq!(JwtConfig::default().expire_days, 30);
        assert_eq!(parse_expire_days(None), 30);
        assert_eq!(parse_expire_days(Some(" 7 ")), 7);
        assert_eq!(parse_expire_days(Some("abc")), 30);
    }

    #[test]
    fn test_expire_days_out_of_range_falls_back() {
        assert_eq!(parse_expire_days(Some("0")), 30);
        assert_eq!(parse_expire_days(Some("-5")), 30);
        assert_eq!(parse_expire_days(Some("3650")), MAX_EXPIRE_DAYS);
        assert_eq!(parse_expire_days(Some("3000000")), 30);
    }

    #[test]
    fn test_expires_in_secs_saturates() {
        let config = JwtConfig {
            secret: "s".to_string(),
            expire_days: i64::MAX,
        };
        assert_eq!(config.expires_in_secs(), i64::MAX);
    }
}
