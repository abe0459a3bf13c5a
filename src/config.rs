use std::env;

use anyhow::Context;

/// One year.
pub const MAX_JWT_TTL_HOURS: i64 = 24 * 365;
/// One week.
pub const MAX_RESET_TTL_MINUTES: i64 = 60 * 24 * 7;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub reset_token_ttl_minutes: i64,
    pub reset_link_base: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub featured_categories: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_ttl_hours = parse_ttl(
            "JWT_TTL_HOURS",
            env::var("JWT_TTL_HOURS").ok(),
            24,
            MAX_JWT_TTL_HOURS,
        )?;
        let reset_token_ttl_minutes = parse_ttl(
            "RESET_TOKEN_TTL_MINUTES",
            env::var("RESET_TOKEN_TTL_MINUTES").ok(),
            60,
            MAX_RESET_TTL_MINUTES,
        )?;
        let reset_link_base = env::var("RESET_LINK_BASE")
            .unwrap_or_else(|_| "http://localhost:3000/reset".to_string());
        let admin_email = env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty());
        let admin_password = env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());
        let featured_categories = env::var("FEATURED_CATEGORIES")
            .map(|v| parse_list(&v))
            .unwrap_or_else(|_| vec!["Horror".to_string(), "Anime".to_string()]);

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_ttl_hours,
            reset_token_ttl_minutes,
            reset_link_base,
            admin_email,
            admin_password,
            featured_categories,
        })
    }

    /// Defaults suitable for tests and local tooling; only the secret and URL are required.
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            jwt_secret: jwt_secret.into(),
            jwt_ttl_hours: 24,
            reset_token_ttl_minutes: 60,
            reset_link_base: "http://localhost:3000/reset".to_string(),
            admin_email: None,
            admin_password: None,
            featured_categories: vec!["Horror".to_string(), "Anime".to_string()],
        }
    }
}

/// Reads a lifetime variable: unset or empty means `default`, anything
/// outside `1..=max` is a startup error.
fn parse_ttl(name: &str, raw: Option<String>, default: i64, max: i64) -> anyhow::Result<i64> {
    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(default);
    };
    let value = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("{name} must be a whole number"))?;
    if !(1..=max).contains(&value) {
        anyhow::bail!("{name} must be between 1 and {max}, got {value}");
    }
    Ok(value)
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{MAX_JWT_TTL_HOURS, parse_list, parse_ttl};

    #[test]
    fn parse_list_trims_and_drops_empty_entries() {
        assert_eq!(parse_list(" Horror, ,Anime ,"), vec!["Horror", "Anime"]);
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn lifetimes_must_be_positive_and_bounded() {
        let max = MAX_JWT_TTL_HOURS;
        assert_eq!(parse_ttl("JWT_TTL_HOURS", None, 24, max).unwrap(), 24);
        assert_eq!(parse_ttl("JWT_TTL_HOURS", Some(" ".into()), 24, max).unwrap(), 24);
        assert_eq!(parse_ttl("JWT_TTL_HOURS", Some("48".into()), 24, max).unwrap(), 48);

        for bad in ["0", "-5", "abc", "9223372036854775807"] {
            let err = parse_ttl("JWT_TTL_HOURS", Some(bad.into()), 24, max).unwrap_err();
            assert!(err.to_string().contains("JWT_TTL_HOURS"), "{bad}: {err}");
        }
    }
}
