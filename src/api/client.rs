use std::sync::atomic::{AtomicU32, Ordering};

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::api::{Error, Result};
use crate::prelude::*;

static COUNTER: AtomicU32 = AtomicU32::new(1);

/// Outbound JSON client shared by the API wrappers.
///
/// Every request is bounded by the timeout, and is retried exactly once
/// when the first attempt fails with a timeout or a connection error.
#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    retry_delay: StdDuration,
}

impl Client {
    const USER_AGENT: &'static str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
    const N_ATTEMPTS: u32 = 2;

    pub fn new(timeout: StdDuration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(Error::Network)?;
        Ok(Self {
            client,
            retry_delay: StdDuration::from_millis(250),
        })
    }

    /// Performs the GET request and returns the response body
    /// or `None` when the upstream says the resource does not exist.
    pub async fn get_optional<T: DeserializeOwned>(&self, url: &Url) -> Result<Option<T>> {
        let response = self.send(url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!("{} returned {}", url.path(), status)));
        }
        Ok(Some(response.json::<T>().await?))
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        self.get_optional(url)
            .await?
            .ok_or_else(|| Error::Upstream(format!("{} returned 404", url.path())))
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response> {
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let start_instant = Instant::now();
            debug!(id, attempt, host = ?url.host_str(), path = url.path(), "→");
            match self.client.get(url.clone()).send().await.map_err(Error::from) {
                Ok(response) => {
                    debug!(id, status = ?response.status(), elapsed = ?start_instant.elapsed(), "←");
                    break Ok(response);
                }
                Err(error) if error.is_transient() && attempt < Self::N_ATTEMPTS => {
                    warn!(id, attempt, "{:#}, retrying…", anyhow::Error::new(error));
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(error) => break Err(error),
            }
        }
    }
}
