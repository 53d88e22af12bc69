use std::collections::HashMap;
use std::net::IpAddr;
use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:school.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let host = env_map
            .get("HOST")
            .map(|s| s.as_str())
            .unwrap_or("127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue("HOST".to_string(), "must be an IP address".to_string())
            })?;

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_url = match env_map.get("DATABASE_URL").map(|s| s.trim()) {
            None | Some("") => DEFAULT_DATABASE_URL.to_string(),
            Some(raw) => normalize_database_url(raw)?,
        };

        Ok(Config {
            host,
            port,
            database_url,
        })
    }
}

/// Turn `DATABASE_URL` into a `sqlite:` connection string.
///
/// Bare paths are accepted as file locations; other URL schemes are rejected
/// because only the SQLite driver is built in.
fn normalize_database_url(raw: &str) -> Result<String, ConfigError> {
    if raw.starts_with("sqlite:") {
        return Ok(raw.to_string());
    }
    if let Some((scheme, _)) = raw.split_once("://") {
        return Err(ConfigError::InvalidValue(
            "DATABASE_URL".to_string(),
            format!("unsupported scheme {}, only sqlite is available", scheme),
        ));
    }
    Ok(format!("sqlite:{}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host.to_string(), "127.0.0.1");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_blank_database_url_uses_default() {
        let config = Config::from_env_map(env(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_sqlite_url_kept() {
        let config =
            Config::from_env_map(env(&[("DATABASE_URL", "sqlite:///tmp/school.db")])).unwrap();
        assert_eq!(config.database_url, "sqlite:///tmp/school.db");
    }

    #[test]
    fn test_bare_path_becomes_sqlite_url() {
        let config = Config::from_env_map(env(&[("DATABASE_URL", "/var/lib/school.db")])).unwrap();
        assert_eq!(config.database_url, "sqlite:/var/lib/school.db");
    }

    #[test]
    fn test_unsupported_scheme() {
        let result = Config::from_env_map(env(&[("DATABASE_URL", "postgres://localhost/school")]));
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "DATABASE_URL"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_env_map(env(&[("PORT", "not_a_number")]));
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_host() {
        let result = Config::from_env_map(env(&[("HOST", "localhost:80")]));
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "HOST"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
