// src/core/net.rs

// Blocking HTTP GET with a fixed pause between requests

use std::{
    thread,
    time::{Duration, Instant},
};

use reqwest::blocking::Client;

use crate::error::SourceError;

pub struct HttpClient {
    client: Client,
    pause: Duration,
    last_request: Option<Instant>,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout_secs: u64, pause_ms: u64) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;
        Ok(Self { client, pause: Duration::from_millis(pause_ms), last_request: None })
    }

    // be polite
    fn wait_turn(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.pause {
                let wait = self.pause - elapsed;
                logd!("Pausing {wait:?} before next request");
                thread::sleep(wait);
            }
        }
        self.last_request = Some(Instant::now());
    }

    /// GET `url` with query params; non-2xx is an error carrying the status.
    pub fn get_text(&mut self, url: &str, query: &[(&str, &str)]) -> Result<String, SourceError> {
        self.wait_turn();
        logd!("GET {url} {query:?}");

        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unexpected status");
            return Err(SourceError::Status(status.as_u16(), format!("{reason} ({url})")));
        }
        resp.text().map_err(|e| SourceError::Network(e.to_string()))
    }
}
