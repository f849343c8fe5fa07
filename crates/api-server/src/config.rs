//! Process configuration read from the environment

use std::net::SocketAddr;

const DEFAULT_DATABASE_URL: &str = "sqlite://.tm-data/tasks.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Mark the anti-forgery cookie `Secure` (HTTPS deployments)
    pub secure_cookies: bool,
}

fn env_flag(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(raw) => parse_flag(&raw).unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("TM_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let bind_addr = std::env::var("TM_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("Invalid TM_BIND_ADDR: {}", e))?;

        let max_connections = match std::env::var("TM_DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| anyhow::anyhow!("Invalid TM_DB_MAX_CONNECTIONS: {}", e))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            secure_cookies: env_flag("TM_SECURE_COOKIES", false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_common_spellings() {
        for raw in ["1", "true", "YES", " on "] {
            assert_eq!(parse_flag(raw), Some(true), "{raw}");
        }
        for raw in ["0", "false", "No", "off"] {
            assert_eq!(parse_flag(raw), Some(false), "{raw}");
        }
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn defaults_parse() {
        assert!(DEFAULT_BIND_ADDR.parse::<SocketAddr>().is_ok());
        assert!(DEFAULT_DATABASE_URL.starts_with("sqlite://"));
    }
}
