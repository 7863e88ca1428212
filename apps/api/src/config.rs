use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on request body size; larger bodies get 413.
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: match lookup("PORT") {
                Some(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
                None => DEFAULT_PORT,
            },
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_body_bytes: match lookup("MAX_BODY_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_BODY_BYTES must be a byte count")?,
                None => DEFAULT_MAX_BODY_BYTES,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_body_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("RUST_LOG", "debug"),
            ("MAX_BODY_BYTES", "65536"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.rust_log, "debug");
        assert_eq!(config.max_body_bytes, 65536);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
