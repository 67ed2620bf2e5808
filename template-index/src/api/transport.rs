//! HTTP transport used by the REST client and manifest downloads.

use super::ApiError;
use reqwest::header::CONTENT_TYPE;
use std::io::Read;
use std::time::Duration;
use tracing::debug;

/// User agent sent with every request. GitHub rejects requests without one.
const USER_AGENT: &str = concat!("template-index/", env!("CARGO_PKG_VERSION"));

/// A response body that can be consumed incrementally.
pub type ResponseBody = Box<dyn Read + Send>;

/// Issues plain HTTP GET requests.
///
/// The body is handed back as a reader so callers can decode it while it
/// is still arriving.
pub trait HttpTransport {
    /// Performs a GET request against `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] on transport failure and
    /// [`ApiError::Status`] when the server does not answer with 2xx.
    fn get(&self, url: &str, content_type: Option<&str>) -> Result<ResponseBody, ApiError>;
}

/// Blocking [`reqwest`] implementation of [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a transport with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Client`] if the TLS backend fails to initialize.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, content_type: Option<&str>) -> Result<ResponseBody, ApiError> {
        debug!(url, "GET");

        let mut request = self.client.get(url);
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }

        let response = request.send().map_err(|source| ApiError::Request {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(Box::new(response))
    }
}
