//! Bounded reachability probes.
//!
//! A probe answers "is this URL reachable right now?" and never fails: every
//! success, HTTP error, network failure and timeout is folded into a
//! [`ProbeOutcome`].

mod http;
mod outcome;
mod relay;

use std::time::Duration;

pub use http::HttpProbe;
pub use outcome::{CheckStatusBody, FailureKind, ProbeOutcome};
pub use relay::RelayProbe;

/// Upper bound on a single probe, from send to response headers
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probe trait for the different ways of reaching a target
#[async_trait::async_trait]
pub trait Probe: Send + Sync {
    /// Check `url` once, without retrying and without raising
    async fn probe(&self, url: &str) -> ProbeOutcome;
}

/// Flatten an error and its sources into one readable line
pub(crate) fn describe_error(error: &(dyn std::error::Error + 'static)) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = cause.source();
    }
    description
}
