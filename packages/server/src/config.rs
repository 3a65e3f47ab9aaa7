use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub database_max_connections: u32,
    pub admin_password: String,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Empty means any origin is allowed
    pub allowed_origins: Vec<String>,
    pub submission_rate_limit: u32,
    pub submission_rate_window_secs: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            admin_password: env::var("ADMIN_PASSWORD").context("ADMIN_PASSWORD must be set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER")
                .unwrap_or_else(|_| "community-directory".to_string()),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
            submission_rate_limit: env::var("SUBMISSION_RATE_LIMIT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("SUBMISSION_RATE_LIMIT must be a valid number")?,
            submission_rate_window_secs: parse_rate_window(
                &env::var("SUBMISSION_RATE_WINDOW_SECS").unwrap_or_else(|_| "3600".to_string()),
            )
            .context("SUBMISSION_RATE_WINDOW_SECS is invalid")?,
        })
    }
}

/// Longest accepted submission rate window: 30 days.
pub const MAX_RATE_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

fn parse_rate_window(raw: &str) -> Result<i64> {
    let secs: i64 = raw.trim().parse().context("must be a whole number of seconds")?;
    if !(1..=MAX_RATE_WINDOW_SECS).contains(&secs) {
        anyhow::bail!("must be between 1 and {MAX_RATE_WINDOW_SECS} seconds, got {secs}");
    }
    Ok(secs)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins("https://a.example, ,https://b.example "),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn rate_window_must_be_positive_and_bounded() {
        assert_eq!(parse_rate_window("3600").unwrap(), 3600);
        assert_eq!(parse_rate_window(" 60 ").unwrap(), 60);
        assert_eq!(
            parse_rate_window(&MAX_RATE_WINDOW_SECS.to_string()).unwrap(),
            MAX_RATE_WINDOW_SECS
        );

        assert!(parse_rate_window("0").is_err());
        assert!(parse_rate_window("-3600").is_err());
        assert!(parse_rate_window("9000000000000").is_err());
        assert!(parse_rate_window("an hour").is_err());
    }
}
