//! Direct HEAD probe.

use std::time::{Duration, Instant};

use tracing::debug;

use super::{DEFAULT_PROBE_TIMEOUT, Probe, ProbeOutcome, describe_error};
use crate::{Result, USER_AGENT};

/// HTTP/HTTPS probe issuing a bounded `HEAD` request
pub struct HttpProbe {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { client, timeout })
    }

    /// Probe with the default 5 second bound
    pub fn with_default_timeout() -> Result<Self> {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait::async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        let start = Instant::now();

        // Dropping the send future on expiry aborts the request and closes
        // its connection.
        let result = tokio::time::timeout(self.timeout, self.client.head(url).send()).await;
        let latency_ms = start.elapsed().as_millis() as u64;

        let outcome = match result {
            Ok(Ok(response)) => {
                let status = response.status();
                ProbeOutcome::responded(
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default(),
                    latency_ms,
                )
            }
            Ok(Err(error)) => ProbeOutcome::transport(describe_error(&error), latency_ms),
            Err(_) => ProbeOutcome::timeout(self.timeout.as_millis() as u64, latency_ms),
        };

        debug!(url, reachable = outcome.reachable(), "Probe finished: {outcome}");
        outcome
    }
}
