//! Monitoring passes over a project snapshot.
//!
//! The aggregator probes every live project one after another, builds a
//! fresh [`StatusMap`], and publishes it as a whole once the last probe has
//! resolved. Observers only ever see complete passes.

mod lifecycle;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use self::lifecycle::{Lifecycle, PassGuard};
use crate::probe::{Probe, ProbeOutcome};
use crate::project::ProjectRef;
use crate::{LivenessError, Result};

pub use lifecycle::LifecycleState;

/// Project id to reachability for one pass
pub type StatusMap = HashMap<String, bool>;

/// Result of one complete monitoring pass
#[derive(Debug, Clone)]
pub struct PassReport {
    /// Reachability per monitorable project id
    pub statuses: StatusMap,

    /// Full probe outcome per monitorable project id
    pub outcomes: HashMap<String, ProbeOutcome>,

    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl PassReport {
    fn new(outcomes: HashMap<String, ProbeOutcome>, started_at: DateTime<Utc>) -> Self {
        let statuses = outcomes.iter().map(|(id, outcome)| (id.clone(), outcome.reachable())).collect();

        Self { statuses, outcomes, started_at, completed_at: Utc::now() }
    }

    /// Number of projects found reachable
    pub fn reachable_count(&self) -> usize {
        self.statuses.values().filter(|up| **up).count()
    }

    /// Number of projects probed in this pass
    pub fn monitorable_count(&self) -> usize {
        self.statuses.len()
    }
}

/// Runs passes and owns the published report and lifecycle
pub struct Aggregator {
    probe: Arc<dyn Probe>,
    lifecycle: Lifecycle,
    published: RwLock<Option<Arc<PassReport>>>,
}

impl Aggregator {
    pub fn new(probe: Arc<dyn Probe>) -> Self {
        Self { probe, lifecycle: Lifecycle::default(), published: RwLock::new(None) }
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn is_checking(&self) -> bool {
        self.state() == LifecycleState::Checking
    }

    /// Report of the most recently completed pass
    pub async fn latest(&self) -> Option<Arc<PassReport>> {
        self.published.read().await.clone()
    }

    /// Run one pass and wait for it.
    ///
    /// Fails with [`LivenessError::PassInProgress`] when another pass is
    /// checking; nothing is probed in that case.
    pub async fn run_pass(&self, projects: &[ProjectRef]) -> Result<Arc<PassReport>> {
        let guard = self.lifecycle.start().ok_or(LivenessError::PassInProgress)?;

        Ok(self.complete_pass(guard, projects).await)
    }

    /// Start a pass on a detached task.
    ///
    /// The lifecycle is already `Checking` when this returns `Ok`, and the
    /// pass runs to completion whether or not the handle is awaited.
    pub fn spawn_pass(self: &Arc<Self>, projects: Vec<ProjectRef>) -> Result<JoinHandle<Arc<PassReport>>> {
        let guard = self.lifecycle.start().ok_or(LivenessError::PassInProgress)?;
        let aggregator = Arc::clone(self);

        Ok(tokio::spawn(async move { aggregator.complete_pass(guard, &projects).await }))
    }

    async fn complete_pass(&self, guard: PassGuard, projects: &[ProjectRef]) -> Arc<PassReport> {
        let started_at = Utc::now();
        let monitorable: Vec<&ProjectRef> = projects.iter().filter(|p| p.is_monitorable()).collect();

        info!(
            monitorable = monitorable.len(),
            skipped = projects.len() - monitorable.len(),
            "Starting monitoring pass"
        );

        let mut outcomes = HashMap::with_capacity(monitorable.len());
        for project in monitorable {
            let outcome = self.probe.probe(&project.url).await;
            if !outcome.reachable() {
                warn!(project = %project.id, url = %project.url, "Project unreachable: {outcome}");
            }
            outcomes.insert(project.id.clone(), outcome);
        }

        let report = Arc::new(PassReport::new(outcomes, started_at));
        *self.published.write().await = Some(Arc::clone(&report));
        guard.finish();

        info!(
            reachable = report.reachable_count(),
            monitorable = report.monitorable_count(),
            elapsed_ms = (report.completed_at - report.started_at).num_milliseconds(),
            "Monitoring pass completed"
        );

        report
    }
}
