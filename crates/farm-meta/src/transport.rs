//! Byte transports for remote metadata documents

use std::cell::RefCell;
use std::collections::HashMap;

use crate::{Error, Result};

/// Fetches the raw payload behind a URL.
///
/// The store only needs blocking "give me the bytes"; implementations own
/// every protocol detail.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP(S) transport backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| Error::retrieval("<client>", e))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::retrieval(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::retrieval(url, format!("HTTP status {status}")));
        }

        let body = response.bytes().map_err(|e| Error::retrieval(url, e))?;
        Ok(body.to_vec())
    }
}

/// In-memory transport serving fixed payloads.
///
/// Unknown URLs fail with [`Error::Retrieval`], like an unreachable host.
/// Every request is recorded so callers can assert on cache behaviour.
#[derive(Debug, Default)]
pub struct StaticTransport {
    payloads: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payload for `url`.
    pub fn with(mut self, url: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        self.payloads.insert(url.into(), payload.into());
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for StaticTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        self.payloads
            .get(url)
            .cloned()
            .ok_or_else(|| Error::retrieval(url, "no such document"))
    }
}
