//! Scripted [`JsonFetcher`] for adapter and service tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;
use crate::port::JsonFetcher;

/// One recorded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedCall {
    /// Value of header `name`, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

struct Route {
    fragment: String,
    response: Result<Value, FetchError>,
    delay: Duration,
}

/// Answers each URL with the first route whose fragment it contains.
///
/// Unmatched URLs answer 404 so a missing script shows up as a skipped tier.
#[derive(Default)]
pub struct ScriptedFetcher {
    routes: Vec<Route>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to URLs containing `fragment` with `body`.
    pub fn respond(mut self, fragment: &str, body: Value) -> Self {
        self.routes.push(Route {
            fragment: fragment.to_string(),
            response: Ok(body),
            delay: Duration::ZERO,
        });
        self
    }

    /// Fail URLs containing `fragment` with `error`.
    pub fn fail(mut self, fragment: &str, error: FetchError) -> Self {
        self.routes.push(Route {
            fragment: fragment.to_string(),
            response: Err(error),
            delay: Duration::ZERO,
        });
        self
    }

    /// Fail URLs containing `fragment` with the status classification.
    pub fn status(self, fragment: &str, status: u16) -> Self {
        let error = FetchError::from_status(fragment, status);
        self.fail(fragment, error)
    }

    /// Delay the most recently added route.
    pub fn delayed(mut self, delay: Duration) -> Self {
        if let Some(route) = self.routes.last_mut() {
            route.delay = delay;
        }
        self
    }

    /// Every request made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of requests whose URL contains `fragment`.
    pub fn call_count(&self, fragment: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.url.contains(fragment))
            .count()
    }
}

#[async_trait]
impl JsonFetcher for ScriptedFetcher {
    async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect(),
            });
        }

        let Some(route) = self.routes.iter().find(|r| url.contains(&r.fragment)) else {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        };
        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }
        route.response.clone()
    }
}
