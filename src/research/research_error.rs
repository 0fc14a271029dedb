use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

const RATE_LIMIT_MARKER: &str = "rate_limit";
const RATE_LIMIT_STATUS: u16 = 429;

// "Please try again in 7.66s."
static SUGGESTED_WAIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)try again in (\d+(?:\.\d+)?)s").unwrap_or_else(|e| panic!("{e}"))
});

/// Failures of a remote research call, classified once at the provider boundary.
#[derive(Debug, Error)]
pub enum ResearchError {
    /// The provider asked us to slow down. Retryable.
    #[error("{message}")]
    RateLimited {
        message: String,
        /// Wait suggested by the provider, in seconds.
        retry_after_secs: Option<f64>,
    },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("{0}")]
    Unknown(String),
}

impl ResearchError {
    /// Classify a provider failure from its HTTP status (if any) and raw body/message.
    pub fn classify(status: Option<u16>, raw: &str) -> Self {
        let rate_limited = status == Some(RATE_LIMIT_STATUS)
            || raw.to_lowercase().contains(RATE_LIMIT_MARKER);

        if rate_limited {
            return ResearchError::RateLimited {
                message: raw.to_string(),
                retry_after_secs: suggested_wait_secs(raw),
            };
        }

        match status {
            Some(code) => ResearchError::Unknown(format!("HTTP {code}: {raw}")),
            None => ResearchError::Unknown(raw.to_string()),
        }
    }

    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::classify(Some(status.as_u16()), &err.to_string());
        }
        ResearchError::Transport(err.to_string())
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ResearchError::RateLimited { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ResearchError::RateLimited { .. } => "rate_limited",
            ResearchError::Transport(_) => "transport",
            ResearchError::Unknown(_) => "unknown",
        }
    }
}

fn suggested_wait_secs(raw: &str) -> Option<f64> {
    SUGGESTED_WAIT
        .captures(raw)
        .and_then(|caps| caps[1].parse::<f64>().ok())
}
