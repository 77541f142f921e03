//! Concentration provider port.
//!
//! Every upstream adapter, whether it calls an HTTP API or a local tool,
//! answers the same question: what share of supply do the top ten holders
//! own? A provider either produces a percentage or explains why it skipped.

use async_trait::async_trait;

use crate::domain::SourceId;
use crate::error::{FetchError, ToolError};

/// Market context some providers need to derive a proxy.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResolveInput {
    pub liquidity_usd: Option<f64>,
    pub fdv_usd: Option<f64>,
}

/// Reason a provider produced no percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    /// No credential configured; no request was made.
    MissingCredential,
    /// External tool not installed.
    ToolAbsent,
    /// Responses arrived but no percentage was computable.
    NoData,
    /// An upstream request failed.
    Fetch(FetchError),
    /// The external tool ran but failed.
    Tool(ToolError),
}

impl Skip {
    /// Degradation flag recorded for this skip, if any.
    #[must_use]
    pub fn flag(&self, source: SourceId) -> Option<String> {
        let prefix = source.flag_prefix();
        match self {
            Self::MissingCredential => Some(format!("{prefix}_not_configured")),
            Self::ToolAbsent | Self::NoData => None,
            Self::Fetch(err) if err.is_unauthorized() => Some(format!("{prefix}_unauthorized")),
            Self::Fetch(_) | Self::Tool(_) => Some(format!("{prefix}_unavailable")),
        }
    }
}

impl From<FetchError> for Skip {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

impl From<ToolError> for Skip {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound { .. } => Self::ToolAbsent,
            other => Self::Tool(other),
        }
    }
}

/// One data source in the concentration fallback chain.
#[async_trait]
pub trait ConcentrationProvider: Send + Sync {
    /// Provenance of any value this provider returns; fixes its tier.
    fn source(&self) -> SourceId;

    /// Resolve the top-10 holder percentage.
    ///
    /// # Errors
    ///
    /// Returns the [`Skip`] reason when no percentage is available. A skip
    /// is never fatal to the run.
    async fn top10_pct(&self, input: &ResolveInput) -> Result<f64, Skip>;
}
