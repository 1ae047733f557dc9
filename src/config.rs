//! Runtime configuration.
//!
//! Credentials are read from the environment first (a `.env` file is loaded
//! if present) and then from a secrets TOML file. A missing credential never
//! stops the process: it is reported as a [`CredentialWarning`] and the
//! corresponding calls fail later with a provider error.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use url::Url;
use zeroize::Zeroizing;

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const SECRETS_PATH_VAR: &str = "LOCAL_GUIDE_SECRETS";
pub const DEFAULT_SECRETS_PATH: &str = ".secrets.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read secrets file {path}: {source}")]
    SecretsUnreadable {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse secrets file {path}: {source}")]
    SecretsInvalid {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid URL for {key}: {source}")]
    InvalidUrl {
        key: &'static str,
        source: url::ParseError,
    },
    #[error("Invalid value for {key}: {value}")]
    InvalidNumber { key: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// An API credential. Wiped from memory on drop and never printed.
#[derive(Clone)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Fallback credential store, same keys as the environment variables.
#[derive(Deserialize, Default, Debug)]
pub struct SecretsFile {
    #[serde(rename = "GEMINI_API_KEY")]
    pub gemini_api_key: Option<String>,
    #[serde(rename = "OPENAI_API_KEY")]
    pub openai_api_key: Option<String>,
}

impl SecretsFile {
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No secrets file found");
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::SecretsUnreadable {
                path: path.display().to_string(),
                source,
            })?;
        toml::from_str(&content).map_err(|source| ConfigError::SecretsInvalid {
            path: path.display().to_string(),
            source,
        })
    }

    fn get(&self, key: &str) -> Option<&str> {
        match key {
            GEMINI_API_KEY => self.gemini_api_key.as_deref(),
            OPENAI_API_KEY => self.openai_api_key.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialWarning {
    pub missing: Vec<&'static str>,
}

impl fmt::Display for CredentialWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API keys are missing! Please ensure they are properly set in the environment or {} ({}).",
            DEFAULT_SECRETS_PATH,
            self.missing.join(", ")
        )
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<ApiKey>,
    pub openai_api_key: Option<ApiKey>,
    pub gemini_model: String,
    pub gemini_api_url: String,
    pub openai_api_url: String,
    pub tts_model: String,
    pub request_timeout_seconds: u64,
    pub bind_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openai_api_key: None,
            gemini_model: "gemini-pro".to_string(),
            gemini_api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            openai_api_url: "https://api.openai.com/v1".to_string(),
            tts_model: "tts-1".to_string(),
            request_timeout_seconds: 30,
            bind_addr: "127.0.0.1:8501".to_string(),
        }
    }
}

impl Config {
    /// Loads `.env`, the process environment and the secrets file.
    pub fn load() -> ConfigResult<Self> {
        dotenv::dotenv().ok();

        let secrets_path = std::env::var(SECRETS_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SECRETS_PATH));
        let secrets = SecretsFile::load(&secrets_path)?;

        Self::from_sources(|key| std::env::var(key).ok(), &secrets)
    }

    /// Builds a config from an arbitrary variable lookup. Environment values
    /// win over the secrets file; blank values count as missing.
    pub fn from_sources<F>(lookup: F, secrets: &SecretsFile) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let credential = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| secrets.get(key).map(str::to_string))
                .filter(|v| !v.trim().is_empty())
                .map(|v| ApiKey::new(v.trim()))
        };
        let setting = |key: &str, default: String| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default)
        };

        let gemini_api_url = setting("GEMINI_API_URL", defaults.gemini_api_url);
        let openai_api_url = setting("OPENAI_API_URL", defaults.openai_api_url);
        Url::parse(&gemini_api_url).map_err(|source| ConfigError::InvalidUrl {
            key: "GEMINI_API_URL",
            source,
        })?;
        Url::parse(&openai_api_url).map_err(|source| ConfigError::InvalidUrl {
            key: "OPENAI_API_URL",
            source,
        })?;

        let request_timeout_seconds = match lookup("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidNumber {
                    key: "REQUEST_TIMEOUT_SECONDS",
                    value: raw,
                })?,
            None => defaults.request_timeout_seconds,
        };

        Ok(Self {
            gemini_api_key: credential(GEMINI_API_KEY),
            openai_api_key: credential(OPENAI_API_KEY),
            gemini_model: setting("GEMINI_MODEL", defaults.gemini_model),
            gemini_api_url,
            openai_api_url,
            tts_model: setting("TTS_MODEL", defaults.tts_model),
            request_timeout_seconds,
            bind_addr: setting("BIND_ADDR", defaults.bind_addr),
        })
    }

    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.gemini_api_key.is_none() {
            missing.push(GEMINI_API_KEY);
        }
        if self.openai_api_key.is_none() {
            missing.push(OPENAI_API_KEY);
        }
        missing
    }

    pub fn credential_warning(&self) -> Option<CredentialWarning> {
        let missing = self.missing_credentials();
        if missing.is_empty() {
            None
        } else {
            Some(CredentialWarning { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = Config::from_sources(lookup_from(&[]), &SecretsFile::default()).unwrap();
        assert_eq!(config.gemini_model, "gemini-pro");
        assert_eq!(config.tts_model, "tts-1");
        assert_eq!(config.request_timeout_seconds, 30);
        assert_eq!(
            config.missing_credentials(),
            vec![GEMINI_API_KEY, OPENAI_API_KEY]
        );
    }

    #[test]
    fn test_environment_wins_over_secrets() {
        let secrets = SecretsFile {
            gemini_api_key: Some("from-file".to_string()),
            openai_api_key: Some("openai-file".to_string()),
        };
        let config =
            Config::from_sources(lookup_from(&[(GEMINI_API_KEY, "from-env")]), &secrets).unwrap();

        assert_eq!(config.gemini_api_key.unwrap().expose(), "from-env");
        assert_eq!(config.openai_api_key.unwrap().expose(), "openai-file");
    }

    #[test]
    fn test_blank_credentials_count_as_missing() {
        let config = Config::from_sources(
            lookup_from(&[(GEMINI_API_KEY, "   "), (OPENAI_API_KEY, "sk-test")]),
            &SecretsFile::default(),
        )
        .unwrap();

        let warning = config.credential_warning().unwrap();
        assert_eq!(warning.missing, vec![GEMINI_API_KEY]);
        assert!(warning.to_string().starts_with("API keys are missing!"));
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let result = Config::from_sources(
            lookup_from(&[("REQUEST_TIMEOUT_SECONDS", "soon")]),
            &SecretsFile::default(),
        );
        assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let result = Config::from_sources(
            lookup_from(&[("OPENAI_API_URL", "not a url")]),
            &SecretsFile::default(),
        );
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn test_secrets_file_loading() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "GEMINI_API_KEY = \"g-key\"").unwrap();

        let secrets = SecretsFile::load(file.path()).unwrap();
        assert_eq!(secrets.gemini_api_key.as_deref(), Some("g-key"));
        assert!(secrets.openai_api_key.is_none());

        let missing = SecretsFile::load(Path::new("/definitely/not/here.toml")).unwrap();
        assert!(missing.gemini_api_key.is_none());
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-secret");
        assert_eq!(format!("{:?}", key), "ApiKey(***)");
    }
}
