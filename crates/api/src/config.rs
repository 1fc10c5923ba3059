//! Process configuration, read from the environment.

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_LOOKUP_SEARCH_URL: &str = "https://codes.maa.care/pharmapold/search.php";
pub const DEFAULT_LOOKUP_SUGGEST_URL: &str =
    "https://dev.entrolabs.com/snomed/pharmapold/new/search.php";
pub const DEFAULT_LOOKUP_MAX_RESULTS: usize = 8;
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `MEDSTOCK_BIND_ADDR`
    pub bind_addr: String,
    /// `MEDSTOCK_LOOKUP_SEARCH_URL`: lookup used to augment catalog search.
    pub lookup_search_url: String,
    /// `MEDSTOCK_LOOKUP_SUGGEST_URL`: lookup used for add-form autocomplete.
    pub lookup_suggest_url: String,
    /// `MEDSTOCK_LOOKUP_MAX_RESULTS`
    pub lookup_max_results: usize,
    /// `MEDSTOCK_LOOKUP_TIMEOUT_MS`
    pub lookup_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            lookup_search_url: DEFAULT_LOOKUP_SEARCH_URL.to_string(),
            lookup_suggest_url: DEFAULT_LOOKUP_SUGGEST_URL.to_string(),
            lookup_max_results: DEFAULT_LOOKUP_MAX_RESULTS,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let timeout_ms = parse_or(
            "MEDSTOCK_LOOKUP_TIMEOUT_MS",
            get("MEDSTOCK_LOOKUP_TIMEOUT_MS"),
            defaults.lookup_timeout.as_millis() as u64,
        );

        Self {
            bind_addr: get("MEDSTOCK_BIND_ADDR").unwrap_or(defaults.bind_addr),
            lookup_search_url: get("MEDSTOCK_LOOKUP_SEARCH_URL")
                .unwrap_or(defaults.lookup_search_url),
            lookup_suggest_url: get("MEDSTOCK_LOOKUP_SUGGEST_URL")
                .unwrap_or(defaults.lookup_suggest_url),
            lookup_max_results: parse_or(
                "MEDSTOCK_LOOKUP_MAX_RESULTS",
                get("MEDSTOCK_LOOKUP_MAX_RESULTS"),
                defaults.lookup_max_results,
            ),
            lookup_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Copy + core::fmt::Display,
{
    let Some(raw) = raw else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(key, value = %raw, %default, "unparseable config value; using default");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_source_gives_defaults() {
        assert_eq!(AppConfig::from_source(source(&[])), AppConfig::default());
    }

    #[test]
    fn values_are_read() {
        let cfg = AppConfig::from_source(source(&[
            ("MEDSTOCK_BIND_ADDR", "127.0.0.1:9000"),
            ("MEDSTOCK_LOOKUP_MAX_RESULTS", "20"),
            ("MEDSTOCK_LOOKUP_TIMEOUT_MS", "750"),
        ]));
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.lookup_max_results, 20);
        assert_eq!(cfg.lookup_timeout, Duration::from_millis(750));
    }

    #[test]
    fn bad_numbers_fall_back() {
        let cfg = AppConfig::from_source(source(&[
            ("MEDSTOCK_LOOKUP_MAX_RESULTS", "lots"),
            ("MEDSTOCK_LOOKUP_TIMEOUT_MS", "-1"),
        ]));
        assert_eq!(cfg.lookup_max_results, DEFAULT_LOOKUP_MAX_RESULTS);
        assert_eq!(cfg.lookup_timeout, DEFAULT_LOOKUP_TIMEOUT);
    }
}
