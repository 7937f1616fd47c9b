//! Probe outcome types and their `check-status` wire form.

use serde::{Deserialize, Serialize};

/// How a probe failed when no response was received
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The bound expired and the request was aborted
    Timeout,
    /// DNS, connection, TLS or URL failure
    Transport,
}

/// Result of one reachability check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A final response was received before the bound
    Responded { status_code: u16, status_text: String, latency_ms: u64 },

    /// No response was received
    Failed { kind: FailureKind, error: String, latency_ms: u64 },
}

impl ProbeOutcome {
    pub fn responded(status_code: u16, status_text: impl Into<String>, latency_ms: u64) -> Self {
        Self::Responded { status_code, status_text: status_text.into(), latency_ms }
    }

    pub fn timeout(bound_ms: u64, latency_ms: u64) -> Self {
        Self::Failed {
            kind: FailureKind::Timeout,
            error: format!("{TIMEOUT_PREFIX} {bound_ms}ms"),
            latency_ms,
        }
    }

    pub fn transport(error: impl Into<String>, latency_ms: u64) -> Self {
        Self::Failed { kind: FailureKind::Transport, error: error.into(), latency_ms }
    }

    /// True iff a response arrived with a status in 200..=299
    pub fn reachable(&self) -> bool {
        matches!(self, Self::Responded { status_code, .. } if (200..=299).contains(status_code))
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Responded { status_code, .. } => Some(*status_code),
            Self::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Responded { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Failed { kind: FailureKind::Timeout, .. })
    }

    pub fn latency_ms(&self) -> u64 {
        match self {
            Self::Responded { latency_ms, .. } | Self::Failed { latency_ms, .. } => *latency_ms,
        }
    }
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Responded { status_code, status_text, latency_ms } if status_text.is_empty() => {
                write!(f, "HTTP {status_code} ({latency_ms}ms)")
            }
            Self::Responded { status_code, status_text, latency_ms } => {
                write!(f, "HTTP {status_code} {status_text} ({latency_ms}ms)")
            }
            Self::Failed { error, .. } => write!(f, "{error}"),
        }
    }
}

/// Leading text of every timeout-class error description
pub(crate) const TIMEOUT_PREFIX: &str = "Request timed out after";

/// JSON body returned by `GET /api/check-status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckStatusBody {
    pub is_up: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&ProbeOutcome> for CheckStatusBody {
    fn from(outcome: &ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Responded { status_code, status_text, .. } => Self {
                is_up: outcome.reachable(),
                status: Some(*status_code),
                status_text: Some(status_text.clone()),
                error: None,
            },
            ProbeOutcome::Failed { error, .. } => {
                Self { is_up: false, status: None, status_text: None, error: Some(error.clone()) }
            }
        }
    }
}

impl CheckStatusBody {
    /// Rebuild an outcome from a relayed body.
    ///
    /// Reachability is recomputed from the status code; a body carrying
    /// neither a status nor an error is reported as a transport failure.
    pub fn into_outcome(self, latency_ms: u64) -> ProbeOutcome {
        match (self.status, self.error) {
            (Some(status_code), _) => {
                ProbeOutcome::responded(status_code, self.status_text.unwrap_or_default(), latency_ms)
            }
            (None, Some(error)) if error.starts_with(TIMEOUT_PREFIX) => {
                ProbeOutcome::Failed { kind: FailureKind::Timeout, error, latency_ms }
            }
            (None, Some(error)) => ProbeOutcome::transport(error, latency_ms),
            (None, None) => {
                ProbeOutcome::transport("Relay returned neither a status nor an error", latency_ms)
            }
        }
    }
}
