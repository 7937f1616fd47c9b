//! Liveness - reachability probing for the Mission Control dashboard
//!
//! This library answers "was this project reachable just now?" for every
//! monitorable project in a registry snapshot. A [`Probe`] performs one
//! bounded check, and the [`Aggregator`] runs sequential passes and
//! publishes complete [`PassReport`]s.

pub mod aggregator;
pub mod error;
pub mod probe;
pub mod project;
pub mod registry;

// Re-export main types
pub use aggregator::{Aggregator, LifecycleState, PassReport, StatusMap};
pub use error::LivenessError;
pub use probe::{CheckStatusBody, FailureKind, HttpProbe, Probe, ProbeOutcome, RelayProbe};
pub use project::{ProjectRef, ProjectStatus};
pub use registry::ProjectRegistry;

/// Liveness result type
pub type Result<T> = std::result::Result<T, LivenessError>;

/// Identifying header sent with every upstream reachability check
pub const USER_AGENT: &str = "Mission-Control-Status-Checker/1.0";
