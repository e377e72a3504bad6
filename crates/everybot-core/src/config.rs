//! Environment-driven configuration.

use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_SEARCH_ENDPOINT: &str = "http://localhost:8000/search";
pub const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 120;

/// Search service connection settings.
#[derive(Debug, Clone, Serialize)]
pub struct SearchSettings {
    /// Full URL of the search endpoint (e.g., `http://localhost:8000/search`).
    pub endpoint: String,
    #[serde(skip)]
    pub timeout: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.into(),
            timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
        }
    }
}

/// Completion API settings. The key is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionSettings {
    #[serde(skip)]
    pub api_key: Option<String>,
    pub model: String,
    /// API root; `/chat/completions` is appended.
    pub base_url: String,
    #[serde(skip)]
    pub timeout: Duration,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_COMPLETION_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_COMPLETION_TIMEOUT_SECS),
        }
    }
}

/// Top-level EveryBot configuration.
#[derive(Debug, Clone, Serialize)]
pub struct EverybotConfig {
    /// HTTP server port.
    pub port: u16,
    /// CORS origins. Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub search: SearchSettings,
    pub completion: CompletionSettings,
}

impl Default for EverybotConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origins: Vec::new(),
            search: SearchSettings::default(),
            completion: CompletionSettings::default(),
        }
    }
}

impl EverybotConfig {
    /// Create configuration from process environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(p) => parse_number::<u16>("PORT", &p)?,
            None => DEFAULT_PORT,
        };

        let allowed_origins = match get("ALLOWED_ORIGINS") {
            Some(origins) if origins.trim() != "*" => origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .map(validate_origin)
                .collect::<Result<Vec<_>>>()?,
            _ => Vec::new(),
        };

        let search = SearchSettings {
            endpoint: get("SEARCH_ENDPOINT")
                .or_else(|| get("NEXT_PUBLIC_SEARCH_ENDPOINT"))
                .unwrap_or_else(|| DEFAULT_SEARCH_ENDPOINT.into()),
            timeout: timeout_secs(&get, "SEARCH_TIMEOUT_SECS", DEFAULT_SEARCH_TIMEOUT_SECS)?,
        };

        let completion = CompletionSettings {
            api_key: get("OPENAI_API_KEY"),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            base_url: get("OPENAI_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_COMPLETION_BASE_URL.into()),
            timeout: timeout_secs(
                &get,
                "COMPLETION_TIMEOUT_SECS",
                DEFAULT_COMPLETION_TIMEOUT_SECS,
            )?,
        };

        Ok(Self {
            port,
            allowed_origins,
            search,
            completion,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} must be a number, got {:?}", key, value)))
}

/// Origins end up in a header value, so only visible ASCII is allowed.
fn validate_origin(origin: String) -> Result<String> {
    if origin.bytes().all(|b| (0x20..0x7f).contains(&b)) {
        Ok(origin)
    } else {
        Err(Error::Config(format!(
            "ALLOWED_ORIGINS contains an invalid origin: {:?}",
            origin
        )))
    }
}

fn timeout_secs<G>(get: &G, key: &str, default: u64) -> Result<Duration>
where
    G: Fn(&str) -> Option<String>,
{
    let secs = match get(key) {
        Some(v) => parse_number::<u64>(key, &v)?,
        None => default,
    };
    if secs == 0 {
        return Err(Error::Config(format!("{} must be greater than zero", key)));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<EverybotConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EverybotConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.search.endpoint, "http://localhost:8000/search");
        assert_eq!(config.search.timeout, Duration::from_secs(30));
        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.completion.base_url, "https://api.openai.com/v1");
        assert!(config.completion.api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("OPENAI_BASE_URL", "http://127.0.0.1:9999/v1/"),
            ("SEARCH_ENDPOINT", "http://search:8000/search"),
            ("COMPLETION_TIMEOUT_SECS", "10"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.completion.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.completion.model, "gpt-4o");
        assert_eq!(config.completion.base_url, "http://127.0.0.1:9999/v1");
        assert_eq!(config.completion.timeout, Duration::from_secs(10));
        assert_eq!(config.search.endpoint, "http://search:8000/search");
    }

    #[test]
    fn test_legacy_search_variable() {
        let config = config_from(&[("NEXT_PUBLIC_SEARCH_ENDPOINT", "http://legacy/search")]).unwrap();
        assert_eq!(config.search.endpoint, "http://legacy/search");

        let config = config_from(&[
            ("NEXT_PUBLIC_SEARCH_ENDPOINT", "http://legacy/search"),
            ("SEARCH_ENDPOINT", "http://new/search"),
        ])
        .unwrap();
        assert_eq!(config.search.endpoint, "http://new/search");
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config_from(&[("OPENAI_MODEL", "  "), ("OPENAI_API_KEY", "")]).unwrap();
        assert_eq!(config.completion.model, DEFAULT_MODEL);
        assert!(config.completion.api_key.is_none());
    }

    #[test]
    fn test_allowed_origins() {
        let config = config_from(&[("ALLOWED_ORIGINS", "*")]).unwrap();
        assert!(config.allowed_origins.is_empty());

        let config =
            config_from(&[("ALLOWED_ORIGINS", "http://localhost:3000, https://every.com.br,")])
                .unwrap();
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "https://every.com.br"]
        );
    }

    #[test]
    fn test_invalid_origin_rejected() {
        let result = config_from(&[("ALLOWED_ORIGINS", "https://café.example")]);
        assert!(matches!(result, Err(Error::Config(_))));

        let result = config_from(&[("ALLOWED_ORIGINS", "http://ok.example,bad\u{7}origin")]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(config_from(&[("PORT", "abc")]), Err(Error::Config(_))));
        assert!(matches!(
            config_from(&[("SEARCH_TIMEOUT_SECS", "0")]),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = config_from(&[("OPENAI_API_KEY", "sk-secret")]).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(json.contains("gpt-4o-mini"));
    }
}
