use crate::api::DEFAULT_TIMEOUT;
use crate::logger::DEFAULT_LOG_FILE;
use crate::quiz::DEFAULT_REVEAL_DELAY;
use std::path::PathBuf;
use std::time::Duration;

pub const BACKEND_URL_ENV: &str = "STUDYGENIE_BACKEND_URL";
/// Variable name used by the web frontend deployment; read as a fallback.
pub const LEGACY_BACKEND_URL_ENV: &str = "REACT_APP_BACKEND_URL";
pub const PDF_DIR_ENV: &str = "STUDYGENIE_PDF_DIR";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Missing is allowed; requests then fail individually.
    pub backend_url: Option<String>,
    pub pdf_dir: PathBuf,
    pub initial_file: Option<PathBuf>,
    pub log_file: PathBuf,
    pub reveal_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: None,
            pdf_dir: PathBuf::from("."),
            initial_file: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            reveal_delay: DEFAULT_REVEAL_DELAY,
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let defaults = Self::default();
        Self {
            backend_url: non_empty(BACKEND_URL_ENV)
                .or_else(|| non_empty(LEGACY_BACKEND_URL_ENV)),
            pdf_dir: non_empty(PDF_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.pdf_dir.clone()),
            ..defaults
        }
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
    fn test_defaults_without_environment() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.reveal_delay, Duration::from_secs(2));
        assert!(config.backend_url.is_none());
    }

    #[test]
    fn test_primary_variable_wins() {
        let config = Config::from_lookup(lookup_from(&[
            (BACKEND_URL_ENV, "http://primary:8001"),
            (LEGACY_BACKEND_URL_ENV, "http://legacy:8001"),
        ]));
        assert_eq!(config.backend_url.as_deref(), Some("http://primary:8001"));
    }

    #[test]
    fn test_legacy_variable_is_fallback() {
        let config = Config::from_lookup(lookup_from(&[
            (BACKEND_URL_ENV, "  "),
            (LEGACY_BACKEND_URL_ENV, "http://legacy:8001"),
            (PDF_DIR_ENV, "/srv/pdfs"),
        ]));
        assert_eq!(config.backend_url.as_deref(), Some("http://legacy:8001"));
        assert_eq!(config.pdf_dir, PathBuf::from("/srv/pdfs"));
    }
}
