//! reqwest-backed JSON fetcher with bounded retry.
//!
//! Each request is classified into the [`FetchError`] taxonomy. Only
//! retryable failures (429, 5xx, network errors) are attempted again, after
//! an exponential delay with uniform jitter.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{FetchError, Result};
use crate::infrastructure::config::network::{NetworkConfig, RetryConfig};
use crate::port::JsonFetcher;

/// Shared HTTP client for every upstream provider.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: HttpClient,
    retry: RetryConfig,
}

impl HttpFetcher {
    /// Build a fetcher with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(network: &NetworkConfig, retry: RetryConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(network.timeout_secs))
            .user_agent(network.user_agent.clone())
            .build()?;
        Ok(Self { http, retry })
    }

    async fn get_once(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, FetchError> {
        let mut request = self.http.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|err| classify_transport(url, &err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::from_status(url, status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| classify_transport(url, &err))?;
        serde_json::from_slice(&body).map_err(|err| FetchError::NonRetryable {
            url: url.to_string(),
            reason: format!("invalid JSON body: {err}"),
        })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<Value, FetchError> {
        with_retry(&self.retry, url, move || self.get_once(url, headers)).await
    }
}

fn classify_transport(url: &str, err: &reqwest::Error) -> FetchError {
    if err.is_builder() {
        FetchError::NonRetryable {
            url: url.to_string(),
            reason: err.to_string(),
        }
    } else {
        FetchError::Retryable {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

/// Delay before retry `attempt` (zero-based): `2^attempt * base + jitter`.
#[must_use]
pub fn backoff_delay(retry: &RetryConfig, attempt: u32, jitter_ms: u64) -> Duration {
    let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
    let base = retry.base_delay_ms.saturating_mul(factor);
    Duration::from_millis(base.saturating_add(jitter_ms))
}

fn draw_jitter(retry: &RetryConfig) -> u64 {
    if retry.jitter_max_ms <= retry.jitter_min_ms {
        return retry.jitter_min_ms;
    }
    rand::thread_rng().gen_range(retry.jitter_min_ms..=retry.jitter_max_ms)
}

/// Run `op` until it succeeds, fails terminally, or the attempt budget is
/// spent. No delay follows the final attempt.
///
/// # Errors
///
/// Returns the first non-retryable error, or the last retryable one.
pub async fn with_retry<T, F, Fut>(
    retry: &RetryConfig,
    url: &str,
    mut op: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let max_attempts = retry.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => {
                debug!(url, error = %err, "Request failed terminally");
                return Err(err);
            }
            Err(err) => {
                attempt += 1;
                if attempt >= max_attempts {
                    warn!(url, attempts = attempt, error = %err, "Retry budget exhausted");
                    return Err(err);
                }
                let delay = backoff_delay(retry, attempt - 1, draw_jitter(retry));
                warn!(
                    url,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Request failed, retrying"
                );
                sleep(delay).await;
            }
        }
    }
}


/// The fetcher against a local socket serving canned HTTP responses.
#[cfg(test)]
mod wire_tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    struct CannedServer {
        url: String,
        connections: Arc<AtomicU32>,
        requests: Arc<Mutex<Vec<String>>>,
    }

    impl CannedServer {
        fn connections(&self) -> u32 {
            self.connections.load(Ordering::SeqCst)
        }
    }

    /// Answer every connection with `status` and `body`, then close it.
    async fn serve(status: &'static str, body: &'static str) -> CannedServer {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let connections = Arc::new(AtomicU32::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let (count, log) = (Arc::clone(&connections), Arc::clone(&requests));

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                count.fetch_add(1, Ordering::SeqCst);
                let mut head = Vec::new();
                let mut chunk = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => head.extend_from_slice(&chunk[..n]),
                    }
                }
                log.lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&head).to_lowercase());

                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        CannedServer {
            url: format!("http://{addr}/v2.0/token/holders"),
            connections,
            requests,
        }
    }

    fn fetcher(max_attempts: u32) -> HttpFetcher {
        HttpFetcher {
            http: HttpClient::builder()
                .no_proxy()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
            retry: RetryConfig {
                max_attempts,
                base_delay_ms: 0,
                jitter_min_ms: 0,
                jitter_max_ms: 0,
            },
        }
    }

    #[tokio::test]
    async fn json_body_is_returned_and_headers_are_sent() {
        let server = serve("200 OK", r#"{"data":[{"amount":"10"}]}"#).await;

        let doc = fetcher(3)
            .get_json(&server.url, &[("token", "solscan-key")])
            .await
            .unwrap();

        assert_eq!(doc["data"][0]["amount"], "10");
        assert_eq!(server.connections(), 1);
        let requests = server.requests.lock().unwrap();
        assert!(requests[0].starts_with("get /v2.0/token/holders"));
        assert!(requests[0].contains("token: solscan-key"));
    }

    #[tokio::test]
    async fn service_unavailable_is_retried_until_the_budget_is_spent() {
        let server = serve("503 Service Unavailable", "{}").await;

        let err = fetcher(3).get_json(&server.url, &[]).await.unwrap_err();

        assert!(err.is_retryable(), "unexpected error: {err}");
        assert!(err.to_string().contains("HTTP 503"));
        assert_eq!(server.connections(), 3);
    }

    #[tokio::test]
    async fn rate_limit_is_retried() {
        let server = serve("429 Too Many Requests", "{}").await;

        let err = fetcher(2).get_json(&server.url, &[]).await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(server.connections(), 2);
    }

    #[tokio::test]
    async fn unauthorized_stops_after_one_attempt() {
        let server = serve("401 Unauthorized", r#"{"error":"bad key"}"#).await;

        let err = fetcher(3).get_json(&server.url, &[]).await.unwrap_err();

        assert_eq!(
            err,
            FetchError::Unauthorized {
                url: server.url.clone(),
                status: 401
            }
        );
        assert_eq!(server.connections(), 1);
    }

    #[tokio::test]
    async fn not_found_stops_after_one_attempt() {
        let server = serve("404 Not Found", "{}").await;

        let err = fetcher(3).get_json(&server.url, &[]).await.unwrap_err();

        assert!(matches!(err, FetchError::NotFound { .. }));
        assert_eq!(server.connections(), 1);
    }

    #[tokio::test]
    async fn non_json_body_is_not_retryable() {
        let server = serve("200 OK", "<html>maintenance</html>").await;

        let err = fetcher(3).get_json(&server.url, &[]).await.unwrap_err();

        match err {
            FetchError::NonRetryable { reason, .. } => {
                assert!(reason.starts_with("invalid JSON body"), "reason: {reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(server.connections(), 1);
    }

    #[tokio::test]
    async fn refused_connection_is_retryable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = format!("http://{addr}/v2.0/token/meta");
        let err = fetcher(2).get_json(&url, &[]).await.unwrap_err();

        assert!(
            matches!(&err, FetchError::Retryable { url: failed, .. } if *failed == url),
            "unexpected error: {err}"
        );
    }
}
