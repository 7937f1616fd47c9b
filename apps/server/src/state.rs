use std::sync::Arc;

use liveness::{Aggregator, HttpProbe, Probe, ProjectRegistry};

use crate::config::ServerConfig;
use crate::error::AppError;

/// Shared across workers through `web::Data`
pub struct AppState {
    /// Probe behind `/api/check-status`, also driving the aggregator
    pub probe: Arc<dyn Probe>,
    pub aggregator: Arc<Aggregator>,
    pub registry: Arc<ProjectRegistry>,
}

impl AppState {
    pub fn new(probe: Arc<dyn Probe>, registry: ProjectRegistry) -> Self {
        Self {
            aggregator: Arc::new(Aggregator::new(Arc::clone(&probe))),
            probe,
            registry: Arc::new(registry),
        }
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, AppError> {
        let probe = HttpProbe::new(config.probe_timeout)?;
        let registry = ProjectRegistry::load_or_default(config.projects_file.as_ref())?;

        Ok(Self::new(Arc::new(probe), registry))
    }
}
