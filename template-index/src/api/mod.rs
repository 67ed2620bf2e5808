//! Minimal typed REST client for the hosting service's JSON API.
//!
//! Requests are built from a path template with `{name}` placeholders and
//! the name of the property the response is expected to wrap its payload
//! in. Responses are decoded in a single forward pass; see [`stream`].

mod error;
mod github;
pub mod stream;
mod transport;
mod types;

pub use error::ApiError;
pub use github::{GitHubApi, DEFAULT_API_BASE_URL};
pub use transport::{HttpTransport, ReqwestTransport, ResponseBody};
pub use types::{
    GitHubOrganization, GitHubPosition, GitHubPullRequest, GitHubRepository, GitHubTeam,
    GitHubUser,
};

pub(crate) use types::timestamp;

use serde::de::DeserializeOwned;
use tracing::debug;

/// Content type announced on API requests.
const JSON_CONTENT_TYPE: &str = "application/json";

/// A GET request against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestRequest {
    path: String,
    root_element: String,
}

impl RestRequest {
    /// Creates a request for a path template such as `organizations/{org}`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            root_element: String::new(),
        }
    }

    /// Sets the property name the response must wrap its payload in.
    pub fn with_root_element(mut self, root_element: impl Into<String>) -> Self {
        self.root_element = root_element.into();
        self
    }

    /// Substitutes the `{name}` placeholder with the percent-encoded `value`.
    pub fn with_segment(mut self, name: &str, value: impl ToString) -> Self {
        let placeholder = format!("{{{name}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        self.path = self.path.replace(&placeholder, &encoded);
        self
    }

    /// Returns the path with all substitutions applied so far.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the expected root element; empty means "accept any".
    pub fn root_element(&self) -> &str {
        &self.root_element
    }
}

/// Issues [`RestRequest`]s against a base URL and decodes the results.
#[derive(Debug, Clone)]
pub struct RestClient<T = ReqwestTransport> {
    base_url: String,
    transport: T,
}

impl<T: HttpTransport> RestClient<T> {
    /// Creates a client rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    /// Returns the base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the underlying transport, for requests outside the API.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves the full URL of a request.
    pub fn url_for(&self, request: &RestRequest) -> String {
        format!(
            "{}/{}",
            self.base_url,
            request.path().trim_start_matches('/')
        )
    }

    /// Fetches a single object.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, root element mismatch,
    /// malformed JSON, or when the payload holds no object.
    pub fn get_one<R: DeserializeOwned>(&self, request: &RestRequest) -> Result<R, ApiError> {
        let url = self.url_for(request);
        debug!(url = %url, root = request.root_element(), "Fetching object");

        let body = self.transport.get(&url, Some(JSON_CONTENT_TYPE))?;
        stream::decode_one(body, request.root_element())
    }

    /// Fetches a list of objects, preserving response order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, root element mismatch, or
    /// malformed JSON.
    pub fn get_many<R: DeserializeOwned>(
        &self,
        request: &RestRequest,
    ) -> Result<Vec<R>, ApiError> {
        let url = self.url_for(request);
        debug!(url = %url, root = request.root_element(), "Fetching list");

        let body = self.transport.get(&url, Some(JSON_CONTENT_TYPE))?;
        let values = stream::decode_many(body, request.root_element())?;

        debug!(count = values.len(), "Decoded list");
        Ok(values)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport for tests.

    use super::{ApiError, HttpTransport, ResponseBody};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::Cursor;

    /// Serves canned bodies by exact URL and records every request.
    #[derive(Debug, Default)]
    pub(crate) struct MockTransport {
        responses: HashMap<String, Result<Vec<u8>, u16>>,
        requests: RefCell<Vec<(String, Option<String>)>>,
    }

    impl MockTransport {
        pub(crate) fn with(mut self, url: &str, body: impl Into<Vec<u8>>) -> Self {
            self.responses.insert(url.to_string(), Ok(body.into()));
            self
        }

        pub(crate) fn with_status(mut self, url: &str, status: u16) -> Self {
            self.responses.insert(url.to_string(), Err(status));
            self
        }

        pub(crate) fn requests(&self) -> Vec<(String, Option<String>)> {
            self.requests.borrow().clone()
        }
    }

    impl HttpTransport for MockTransport {
        fn get(&self, url: &str, content_type: Option<&str>) -> Result<ResponseBody, ApiError> {
            self.requests
                .borrow_mut()
                .push((url.to_string(), content_type.map(str::to_string)));

            match self.responses.get(url) {
                Some(Ok(body)) => Ok(Box::new(Cursor::new(body.clone()))),
                Some(Err(status)) => Err(ApiError::Status {
                    url: url.to_string(),
                    status: *status,
                }),
                None => Err(ApiError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }
}
