use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    /// When unset, issued tokens carry no expiry.
    pub ttl_minutes: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .as_deref()
                .and_then(parse_ttl_minutes),
        };
        Ok(Self { database_url, jwt })
    }
}

/// Non-positive or unparseable TTLs are treated as unset.
fn parse_ttl_minutes(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|m| *m > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_accepts_positive_minutes() {
        assert_eq!(parse_ttl_minutes("60"), Some(60));
    }

    #[test]
    fn ttl_rejects_zero_and_negative_minutes() {
        assert_eq!(parse_ttl_minutes("0"), None);
        assert_eq!(parse_ttl_minutes("-5"), None);
    }

    #[test]
    fn ttl_rejects_garbage() {
        assert_eq!(parse_ttl_minutes("soon"), None);
        assert_eq!(parse_ttl_minutes(""), None);
    }
}
