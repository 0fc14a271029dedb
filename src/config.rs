// config.rs
use crate::cache::DEFAULT_CACHE_TTL_SECS;
use crate::report::DEFAULT_YIELD_PLAUSIBILITY_MAX;
use crate::research::RetryPolicy;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Settings for the chat-completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub serper_api_key: Option<String>,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub retry_max_attempts: u32,
    pub retry_base_delay_secs: u64,
    pub cache_ttl_secs: i64,
    pub yield_plausibility_max: f64,
    pub report_output_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load `.env` (if any), then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("GROQ_API_KEY").ok_or(ConfigError::Missing("GROQ_API_KEY"))?;

        let llm = LlmConfig {
            api_key,
            model: get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
            api_url: get("GROQ_API_URL").unwrap_or_else(|| DEFAULT_GROQ_API_URL.to_string()),
            temperature: parse_or(&get, "LLM_TEMPERATURE", 0.1)?,
            max_tokens: parse_or(&get, "LLM_MAX_TOKENS", 2000)?,
            timeout_secs: parse_or(&get, "LLM_TIMEOUT_SECS", 120)?,
        };

        let defaults = RetryPolicy::default();

        Ok(Self {
            llm,
            serper_api_key: get("SERPER_API_KEY"),
            bind_addr: parse_or(&get, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?,
            max_workers: parse_or(&get, "MAX_WORKERS", 8)?,
            retry_max_attempts: parse_or(&get, "RETRY_MAX_ATTEMPTS", defaults.max_attempts)?,
            retry_base_delay_secs: parse_or(
                &get,
                "RETRY_BASE_DELAY_SECS",
                defaults.base_delay.as_secs(),
            )?,
            cache_ttl_secs: parse_or(&get, "CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?,
            yield_plausibility_max: parse_or(
                &get,
                "YIELD_PLAUSIBILITY_MAX",
                DEFAULT_YIELD_PLAUSIBILITY_MAX,
            )?,
            report_output_path: get("REPORT_OUTPUT_PATH").map(PathBuf::from),
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max_attempts,
            Duration::from_secs(self.retry_base_delay_secs),
        )
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
