/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Blocking HTTP client abstraction.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; `Err` is reserved for connection-level failures
/// (DNS, refused, reset, timeout). Status handling and retries belong to
/// [`Fetcher`](crate::Fetcher).
///
/// # Implementations
///
/// - [`ReqwestClient`](crate::ReqwestClient): production implementation using `reqwest`
/// - Scripted doubles in tests
pub trait HttpClient {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a GET for `url` and read the whole body.
    fn get(&self, url: &str) -> Result<HttpResponse, Self::Error>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    type Error = T::Error;

    fn get(&self, url: &str) -> Result<HttpResponse, Self::Error> { (**self).get(url) }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use super::*;

    /// Production HTTP client backed by a pooled `reqwest::blocking::Client`.
    pub struct ReqwestClient {
        client: reqwest::blocking::Client,
    }

    impl ReqwestClient {
        /// Build a client whose requests give up after `timeout`.
        pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
            let client = reqwest::blocking::Client::builder()
                .timeout(timeout)
                .user_agent(concat!("strata/", env!("CARGO_PKG_VERSION")))
                .build()?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        fn get(&self, url: &str) -> Result<HttpResponse, Self::Error> {
            let response = self.client.get(url).send()?;
            let status = response.status().as_u16();
            let body = response.bytes()?.to_vec();

            Ok(HttpResponse { status, body })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
