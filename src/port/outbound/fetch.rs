//! JSON request port.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// Performs one JSON GET with bounded retry and classified failures.
///
/// Implementations are stateless and safe to call concurrently for
/// independent URLs.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Fetch `url` with the extra request `headers`.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] class of the final failed attempt. Never
    /// returns partial or undecodable data as success.
    async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, FetchError>;
}
