//! Probe forwarded through a `check-status` endpoint.

use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::debug;

use super::{CheckStatusBody, DEFAULT_PROBE_TIMEOUT, Probe, ProbeOutcome, describe_error};
use crate::{Result, USER_AGENT};

/// Extra time granted to the relay on top of its own probe bound
const RELAY_GRACE: Duration = Duration::from_secs(1);

const CHECK_STATUS_PATH: &str = "/api/check-status";

#[derive(Deserialize)]
struct RelayError {
    error: String,
}

/// Probe that asks a Mission Control server to check the target
pub struct RelayProbe {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl RelayProbe {
    /// `base_url` is the server root, e.g. `http://localhost:8080`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let endpoint = format!("{}{CHECK_STATUS_PATH}", base_url.trim_end_matches('/'));

        Ok(Self { client, endpoint, timeout })
    }

    pub fn with_default_timeout(base_url: &str) -> Result<Self> {
        Self::new(base_url, DEFAULT_PROBE_TIMEOUT)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn forward(&self, url: &str, start: Instant) -> ProbeOutcome {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("url", url)])
            .timeout(self.timeout + RELAY_GRACE)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(error) if error.is_timeout() => {
                return ProbeOutcome::timeout(
                    (self.timeout + RELAY_GRACE).as_millis() as u64,
                    start.elapsed().as_millis() as u64,
                );
            }
            Err(error) => {
                return ProbeOutcome::transport(
                    format!("Relay request failed: {}", describe_error(&error)),
                    start.elapsed().as_millis() as u64,
                );
            }
        };

        let status = response.status();
        if !status.is_success() {
            let detail = response.json::<RelayError>().await.map(|body| body.error).ok();
            let latency_ms = start.elapsed().as_millis() as u64;
            return match detail {
                Some(error) => {
                    ProbeOutcome::transport(format!("Relay rejected request: {error}"), latency_ms)
                }
                None => ProbeOutcome::transport(format!("Relay responded with HTTP {status}"), latency_ms),
            };
        }

        match response.json::<CheckStatusBody>().await {
            Ok(body) => body.into_outcome(start.elapsed().as_millis() as u64),
            Err(error) => ProbeOutcome::transport(
                format!("Invalid relay response: {}", describe_error(&error)),
                start.elapsed().as_millis() as u64,
            ),
        }
    }
}

#[async_trait::async_trait]
impl Probe for RelayProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        let outcome = self.forward(url, Instant::now()).await;
        debug!(url, relay = %self.endpoint, reachable = outcome.reachable(), "Relayed probe finished: {outcome}");
        outcome
    }
}
