use std::fmt;
use std::time::Duration;

use engine_logging::{engine_debug, mask_secret};
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API_KEY environment variable not set")]
    MissingApiKey,
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Settings for the Gemini extraction client.
#[derive(Clone)]
pub struct ExtractorSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Surface request failures to the caller instead of treating them as "no emails".
    pub report_failures: bool,
}

impl ExtractorSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            report_failures: false,
        }
    }

    /// Loads `.env` if present, then reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            engine_debug!("Loaded environment from {:?}", path);
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("API_KEY")
            .or_else(|| non_empty("GEMINI_API_KEY"))
            .ok_or(ConfigError::MissingApiKey)?;
        let mut settings = Self::new(api_key.trim());

        if let Some(model) = non_empty("MAILSIFT_MODEL") {
            settings.model = model.trim().to_string();
        }
        if let Some(base) = non_empty("MAILSIFT_API_BASE") {
            settings.base_url = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = non_empty("MAILSIFT_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidValue {
                    name: "MAILSIFT_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
            settings.request_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = non_empty("MAILSIFT_REPORT_FAILURES") {
            settings.report_failures = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "MAILSIFT_REPORT_FAILURES",
                        value: raw,
                    })
                }
            };
        }
        Ok(settings)
    }
}

impl fmt::Debug for ExtractorSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractorSettings")
            .field("api_key", &mask_secret(&self.api_key))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("report_failures", &self.report_failures)
            .finish()
    }
}
