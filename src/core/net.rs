// src/core/net.rs
// Blocking HTTP GET + JSON decode. No retry, no auth, no pagination.

use std::{thread, time::Duration};

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use crate::config::consts::USER_AGENT;
use crate::error::{CrawlError, Result};

/// Source of JSON documents keyed by URL. The crawler only talks to this.
pub trait Fetch {
    fn fetch(&mut self, url: &str) -> Result<Value>;
}

impl<F: Fetch + ?Sized> Fetch for &mut F {
    fn fetch(&mut self, url: &str) -> Result<Value> {
        (**self).fetch(url)
    }
}

pub struct HttpFetcher {
    client: Client,
    pause: Option<Duration>,
    requests: usize,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| CrawlError::Transport { url: String::new(), source })?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client, pause: None, requests: 0 }
    }

    /// Sleep `pause` before every request, whatever the endpoint.
    pub fn with_pause(mut self, pause: Option<Duration>) -> Self {
        self.pause = pause.filter(|d| !d.is_zero());
        self
    }

    /// HTTP calls issued so far, root and Observations included.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&mut self, url: &str) -> Result<Value> {
        if let Some(pause) = self.pause {
            thread::sleep(pause);
        }
        self.requests += 1;
        debug!(url, n = self.requests, "GET");

        let transport = |source: reqwest::Error| CrawlError::Transport { url: url.to_string(), source };

        let resp = self.client.get(url).send().map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CrawlError::Status { url: url.to_string(), status: status.as_u16() });
        }

        let body = resp.bytes().map_err(transport)?;
        debug!(url, status = status.as_u16(), bytes = body.len(), "response");
        serde_json::from_slice(&body)
            .map_err(|source| CrawlError::Decode { url: url.to_string(), source })
    }
}
