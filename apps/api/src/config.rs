use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::search::{SearchLimits, DEFAULT_NODE_LIMIT};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub listings_path: PathBuf,
    /// Per-orientation node budget. `SEARCH_NODE_LIMIT=0` disables it.
    pub search_node_limit: Option<u64>,
    pub search_time_limit: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let node_limit = optional_env::<u64>("SEARCH_NODE_LIMIT")?.unwrap_or(DEFAULT_NODE_LIMIT);

        Ok(Config {
            port: optional_env("PORT")?.unwrap_or(8080),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            listings_path: std::env::var("LISTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/listings.json")),
            search_node_limit: (node_limit > 0).then_some(node_limit),
            search_time_limit: optional_env::<u64>("SEARCH_TIME_LIMIT_MS")?
                .map(Duration::from_millis),
        })
    }

    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            node_limit: self.search_node_limit,
            time_limit: self.search_time_limit,
        }
    }
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_var(key, std::env::var(key).ok())
}

fn parse_var<T>(key: &str, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.map(|value| {
        value
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{value}'"))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_absent() {
        assert_eq!(parse_var::<u16>("PORT", None).unwrap(), None);
    }

    #[test]
    fn test_parse_var_trims_whitespace() {
        assert_eq!(
            parse_var::<u16>("PORT", Some(" 9000 ".to_string())).unwrap(),
            Some(9000)
        );
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        let err = parse_var::<u64>("SEARCH_NODE_LIMIT", Some("lots".to_string())).unwrap_err();
        assert!(err.to_string().contains("SEARCH_NODE_LIMIT"));
    }

    #[test]
    fn test_search_limits_from_config() {
        let config = Config {
            port: 8080,
            rust_log: "info".to_string(),
            listings_path: PathBuf::from("data/listings.json"),
            search_node_limit: Some(10),
            search_time_limit: Some(Duration::from_millis(250)),
        };
        assert_eq!(
            config.search_limits(),
            SearchLimits {
                node_limit: Some(10),
                time_limit: Some(Duration::from_millis(250)),
            }
        );
    }
}
