use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    /// Layer token authentication on property create/update/delete.
    pub require_auth_for_writes: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            ttl_hours: parse_ttl_hours(std::env::var("JWT_TTL_HOURS").ok())?,
        };
        Ok(Self {
            database_url,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            jwt,
            require_auth_for_writes: std::env::var("REQUIRE_AUTH_FOR_WRITES")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        })
    }
}

const DEFAULT_TTL_HOURS: i64 = 72;
/// Ten years.
const MAX_TTL_HOURS: i64 = 87_600;

fn parse_ttl_hours(raw: Option<String>) -> anyhow::Result<i64> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TTL_HOURS);
    };
    let hours = raw
        .trim()
        .parse::<i64>()
        .with_context(|| format!("JWT_TTL_HOURS must be an integer, got {raw:?}"))?;
    anyhow::ensure!(
        (1..=MAX_TTL_HOURS).contains(&hours),
        "JWT_TTL_HOURS must be between 1 and {MAX_TTL_HOURS}, got {hours}"
    );
    Ok(hours)
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
