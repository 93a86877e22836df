use std::time::{Duration, Instant};

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::account::AccountService;
use crate::config::Config;
use crate::constants::*;
use crate::courier::CourierService;
use crate::error::{Error, Result};
use crate::response;
use crate::tracking::TrackingService;

/// Client for the 51Tracking v3 API.
///
/// One instance owns one HTTP connection pool and one throttle clock;
/// independent instances never share either.
#[derive(Debug)]
pub struct TrackingClient {
    config: Config,
    endpoint: String,
    http: Client,
    last_request: Mutex<Option<Instant>>,
}

impl TrackingClient {
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("accept", HeaderValue::from_static("application/json"));
        headers.insert("user-agent", HeaderValue::from_static(USER_AGENT));
        let name = HeaderName::from_bytes(API_KEY_HEADER.as_bytes())
            .map_err(|e| Error::Config(format!("invalid API key header name: {e}")))?;
        let key = HeaderValue::from_str(&config.app_key)
            .map_err(|_| Error::Config("API key is not a valid header value".into()))?;
        headers.insert(name, key);

        let http = ClientBuilder::new()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        let endpoint = config.endpoint();
        Ok(Self {
            config,
            endpoint,
            http,
            last_request: Mutex::new(None),
        })
    }

    pub fn set_debug(&mut self, debug: bool) -> &mut Self {
        self.config.debug = debug;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn account(&self) -> AccountService<'_> {
        AccountService { client: self }
    }

    pub fn courier(&self) -> CourierService<'_> {
        CourierService { client: self }
    }

    pub fn tracking(&self) -> TrackingService<'_> {
        TrackingService { client: self }
    }

    /// Issues one logical API call: throttle gate, bounded rate-limit retry
    /// loop, envelope decoding.
    ///
    /// Only an HTTP 429 or an envelope code 429 triggers a re-issue;
    /// transport errors and other API errors surface immediately. Dropping
    /// the returned future aborts a pending throttle or retry wait.
    pub(crate) async fn dispatch<T, F>(&self, method: Method, path: &str, customize: F) -> Result<T>
    where
        T: DeserializeOwned + Default,
        F: Fn(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
    {
        let url = format!("{}{}", self.endpoint, path);
        let mut attempt: u32 = 0;
        loop {
            self.gate().await;
            let resp = customize(self.http.request(method.clone(), &url))
                .send()
                .await?;
            let status = resp.status();
            let body = resp.bytes().await?;
            if self.config.debug {
                debug!(
                    "{} {} -> {}: {}",
                    method,
                    url,
                    status,
                    String::from_utf8_lossy(&body)
                );
            }

            let rate_limited = status == StatusCode::TOO_MANY_REQUESTS
                || response::body_code(&body) == Some(TOO_MANY_REQUESTS);
            if rate_limited {
                if attempt < self.config.max_retries {
                    attempt += 1;
                    let wait = self.retry_wait(attempt);
                    if self.config.debug {
                        debug!(
                            "rate limited, retrying {} in {:?} ({}/{})",
                            url, wait, attempt, self.config.max_retries
                        );
                    }
                    sleep(wait).await;
                    continue;
                }
                return Err(Error::RetryExhausted {
                    attempts: attempt,
                    last: Box::new(response::failure(status, &body)),
                });
            }

            if !status.is_success() {
                return Err(Error::Status {
                    status,
                    body: String::from_utf8_lossy(&body).into_owned(),
                });
            }

            return response::decode(&body);
        }
    }

    /// Blocks until the configured minimum interval since the previous
    /// request has elapsed, then advances the shared timestamp. Runs once
    /// per physical attempt, so internal retries move the clock too.
    async fn gate(&self) {
        let Some(min) = self.config.min_interval() else {
            return;
        };
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < min {
                sleep(min - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Doubling wait per retry, capped at the configured ceiling.
    fn retry_wait(&self, attempt: u32) -> Duration {
        let base = self.config.retry_wait_ms.max(1);
        let ceiling = self.config.retry_max_wait_ms.max(base);
        let wait = base.saturating_mul(1u64 << attempt.saturating_sub(1).min(16));
        Duration::from_millis(wait.min(ceiling))
    }
}
