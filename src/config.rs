//! Environment configuration

use crate::error::AdvisorError;
use crate::Result;
use std::env;
use std::time::Duration;

pub const DEFAULT_ADVISORY_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_API_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub advisory_base_url: String,
    /// `None` keeps the request open until the service answers or the
    /// connection drops.
    pub advisory_timeout: Option<Duration>,
    pub api_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            advisory_base_url: DEFAULT_ADVISORY_BASE_URL.to_string(),
            advisory_timeout: None,
            api_port: DEFAULT_API_PORT,
        }
    }
}

impl AppConfig {
    /// Read `ADVISORY_BASE_URL`, `ADVISORY_TIMEOUT_SECS` and `PORT` /
    /// `API_PORT` from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let advisory_base_url = lookup("ADVISORY_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ADVISORY_BASE_URL.to_string());

        let advisory_timeout = match lookup("ADVISORY_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AdvisorError::Config(format!("ADVISORY_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        let api_port = match lookup("PORT").or_else(|| lookup("API_PORT")) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AdvisorError::Config(format!("Invalid port: {}", raw)))?,
            None => DEFAULT_API_PORT,
        };

        Ok(Self {
            advisory_base_url,
            advisory_timeout,
            api_port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("ADVISORY_BASE_URL", "https://advice.example.edu/"),
            ("ADVISORY_TIMEOUT_SECS", "30"),
            ("API_PORT", "9000"),
        ]))
        .unwrap();

        assert_eq!(config.advisory_base_url, "https://advice.example.edu");
        assert_eq!(config.advisory_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.api_port, 9000);
    }

    #[test]
    fn test_port_takes_precedence_over_api_port() {
        let config =
            AppConfig::from_lookup(lookup_from(&[("PORT", "8081"), ("API_PORT", "9000")])).unwrap();
        assert_eq!(config.api_port, 8081);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
        assert!(AppConfig::from_lookup(lookup_from(&[("ADVISORY_TIMEOUT_SECS", "soon")])).is_err());
    }
}
