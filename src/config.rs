use std::net::{Ipv4Addr, SocketAddr};
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://scorebook.db?mode=rwc";
const DEFAULT_HOST: Ipv4Addr = Ipv4Addr::LOCALHOST;
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("HOST is not in the correct format: {0}")]
    Host(String),
    #[error("PORT is not in the correct format: {0}")]
    Port(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_url: String,
    pub addr: SocketAddr,
}

impl AppConfig {
    /// Reads `DATABASE_URL`, `HOST` and `PORT` from the environment (after
    /// `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let host = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Host(raw))?,
            None => DEFAULT_HOST,
        };
        let port = match lookup("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Port(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            addr: SocketAddr::from((host, port)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.addr, SocketAddr::from((DEFAULT_HOST, DEFAULT_PORT)));
    }

    #[test]
    fn reads_values_and_rejects_bad_ones() {
        let cfg = config(&[("HOST", "0.0.0.0"), ("PORT", "8080"), ("DATABASE_URL", "sqlite::memory:")]).unwrap();
        assert_eq!(cfg.addr.to_string(), "0.0.0.0:8080");
        assert_eq!(cfg.database_url, "sqlite::memory:");

        assert_eq!(config(&[("PORT", "eighty")]).unwrap_err(), ConfigError::Port("eighty".into()));
        assert_eq!(config(&[("HOST", "localhost")]).unwrap_err(), ConfigError::Host("localhost".into()));
    }
}
