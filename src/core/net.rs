// src/core/net.rs
//
// HTTPS GET with a desktop user agent and a small fixed-delay retry loop.
// `Fetch` is the seam the scraper talks to, so batches can run offline
// against canned pages.

use std::{thread, time::Duration};

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use thiserror::Error;

use crate::config::consts::{ACCEPT_LANGUAGE as ACCEPT_LANGUAGE_VALUE, REQUEST_TIMEOUT_SECS, USER_AGENT};

#[derive(Debug, Error)]
pub enum NetError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },
}

pub trait Fetch {
    /// Return the body of `url` as text.
    fn fetch(&self, url: &str) -> Result<String, NetError>;
}

pub struct HttpFetcher {
    client: Client,
    retries: u32,
    retry_delay: Duration,
}

impl HttpFetcher {
    pub fn new(retries: u32, retry_delay: Duration) -> Result<Self, NetError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(NetError::Client)?;

        Ok(Self { client, retries: retries.max(1), retry_delay })
    }

    fn get_once(&self, url: &str) -> Result<String, NetError> {
        let request_err = |source| NetError::Request { url: s!(url), source };

        let resp = self.client.get(url).send().map_err(request_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(NetError::Status { url: s!(url), status: status.as_u16() });
        }
        resp.text().map_err(request_err)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, NetError> {
        let mut attempt = 1;
        loop {
            match self.get_once(url) {
                Ok(body) => {
                    logd!("Net: GET {url} ok ({} bytes, attempt {attempt})", body.len());
                    return Ok(body);
                }
                Err(e) if attempt < self.retries => {
                    loge!("Net: attempt {attempt}/{} failed: {e}", self.retries);
                    attempt += 1;
                    thread::sleep(self.retry_delay);
                }
                Err(e) => {
                    loge!("Net: giving up on {url} after {} attempts: {e}", self.retries);
                    return Err(e);
                }
            }
        }
    }
}
