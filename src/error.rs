use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Scenario rules errors.
///
/// Any of these stops the run before the first network request; the scorer
/// relies on a validated rule set.
#[derive(Error, Debug)]
pub enum RulesError {
    #[error("failed to read rules file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("weights must sum to 1.0, got {total}")]
    WeightsSum { total: f64 },

    #[error("invalid rule {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Classified failure of a single upstream JSON request.
///
/// `Unauthorized`, `NotFound` and `NonRetryable` are terminal for the
/// provider this run. `Retryable` is transient and only surfaces after the
/// attempt budget is spent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{status} unauthorized/forbidden: {url}")]
    Unauthorized { url: String, status: u16 },

    #[error("404 not found: {url}")]
    NotFound { url: String },

    #[error("non-retryable failure for {url}: {reason}")]
    NonRetryable { url: String, reason: String },

    #[error("retryable failure for {url}: {reason}")]
    Retryable { url: String, reason: String },
}

impl FetchError {
    /// Classify an HTTP status code that is not a success.
    #[must_use]
    pub fn from_status(url: &str, status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized {
                url: url.to_string(),
                status,
            },
            404 => Self::NotFound {
                url: url.to_string(),
            },
            429 | 500..=599 => Self::Retryable {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            },
            _ => Self::NonRetryable {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            },
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable { .. })
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Failure of an external command-line collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// The program is not installed; callers treat this as "tier unavailable".
    #[error("tool not found: {program}")]
    NotFound { program: String },

    #[error("tool {program} timed out after {secs}s")]
    Timeout { program: String, secs: u64 },

    #[error("tool {program} failed: {reason}")]
    Failed { program: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
