use std::time::Instant;

use tracing::{error, info, warn};

use crate::core::{endpoint_url, is_retryable_status, is_success, retry_delay};
use crate::data::{FetchOptions, Payload};
use crate::effects::http::{HttpClient, HttpResponse};
use crate::error::{FetchError, Result};

/// Fetches named endpoints from one base address.
///
/// The client is created once and reused for every call, so connection
/// pooling and the retry policy apply uniformly to all endpoints.
pub struct Fetcher<C: HttpClient> {
    client: C,
    options: FetchOptions,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C, options: FetchOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &FetchOptions { &self.options }

    pub fn client(&self) -> &C { &self.client }

    /// Fetch `endpoint` and return its body as a validated [`Payload`].
    ///
    /// Transient failures are retried according to the configured policy.
    /// Every outcome is logged: success at `info`, failure at `error`.
    pub fn fetch(&self, endpoint: &str) -> Result<Payload> {
        let url = endpoint_url(&self.options.base_url, endpoint);
        let started = Instant::now();

        let result = self
            .get_with_retry(endpoint, &url)
            .and_then(|response| Payload::from_slice(&response.body));

        match result {
            Ok(payload) => {
                info!(
                    endpoint,
                    kind = payload.kind(),
                    bytes = payload.approx_size() as u64,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "fetched {endpoint}"
                );
                Ok(payload)
            }
            Err(e) => {
                error!(endpoint, url = %url, error = %e, "failed to fetch {endpoint}");
                Err(e)
            }
        }
    }

    fn get_with_retry(&self, endpoint: &str, url: &str) -> Result<HttpResponse> {
        let policy = &self.options.retry;
        let attempts = policy.attempts();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let failure = match self.client.get(url) {
                Ok(response) if is_success(response.status) => return Ok(response),
                Ok(response) => {
                    let status_error = FetchError::HttpStatus {
                        status: response.status,
                        url: url.to_string(),
                    };
                    if !is_retryable_status(response.status, &policy.retry_statuses) {
                        return Err(status_error);
                    }
                    status_error
                }
                Err(e) => FetchError::Transport(e.to_string()),
            };

            if attempt >= attempts {
                if attempts == 1 {
                    return Err(failure);
                }
                return Err(FetchError::MaxRetriesExceeded {
                    count: attempts,
                    reason: failure.to_string(),
                });
            }

            let delay = retry_delay(attempt - 1, policy.backoff);
            warn!(
                endpoint,
                attempt,
                max_attempts = attempts,
                delay_ms = delay.as_millis() as u64,
                reason = %failure,
                "retrying {endpoint}"
            );
            std::thread::sleep(delay);
        }
    }
}

#[cfg(feature = "reqwest")]
impl Fetcher<crate::effects::http::ReqwestClient> {
    /// Fetcher over a fresh `reqwest` client using `options.timeout`.
    pub fn with_reqwest(options: FetchOptions) -> Result<Self> {
        let client = crate::effects::http::ReqwestClient::new(options.timeout)
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self::new(client, options))
    }
}
