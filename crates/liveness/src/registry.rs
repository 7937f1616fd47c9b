//! Project registry supplying immutable snapshots to the aggregator.
//!
//! Registries load from a JSON array of projects or from a TOML file with
//! `[[projects]]` tables, and fall back to the built-in dashboard projects.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::project::{ProjectRef, ProjectStatus};
use crate::{LivenessError, Result};

#[derive(Deserialize)]
struct RegistryFile {
    projects: Vec<ProjectRef>,
}

/// Projects shown on a fresh dashboard
pub fn default_projects() -> Vec<ProjectRef> {
    vec![
        ProjectRef::new("lifeos", "https://pd.nsprd.com", ProjectStatus::Live)
            .with_name("LifeOS")
            .with_emoji("🎯")
            .with_description("Life tracking dashboard"),
        ProjectRef::new("lyne", "https://rp1.nsprd.com", ProjectStatus::Live)
            .with_name("LYNE")
            .with_emoji("🎮")
            .with_description("Generational wealth platform"),
        ProjectRef::new("portal", "https://portal.nsprd.com", ProjectStatus::Live)
            .with_name("Inspired Design Portal")
            .with_emoji("💼")
            .with_description("Business manager"),
        ProjectRef::new("memory", "https://memory.nsprd.com", ProjectStatus::Live)
            .with_name("Memory Palace")
            .with_emoji("🧠")
            .with_description("Memory archive"),
        ProjectRef::new("bailey", "https://bailey.nsprd.com", ProjectStatus::Live)
            .with_name("Bailey Dashboard")
            .with_emoji("🐕")
            .with_description("All things Bailey"),
        ProjectRef::new("vibe", "https://vibe.nsprd.com", ProjectStatus::InProgress)
            .with_name("Desert Vibe Check")
            .with_emoji("🎨")
            .with_description("Fun project"),
        ProjectRef::new("petos", "https://petos.nsprd.com", ProjectStatus::InProgress)
            .with_name("PetOS")
            .with_emoji("🐾")
            .with_description("Pet lifestyle tracker"),
    ]
}

/// Ordered set of projects with unique ids
#[derive(Debug, Clone)]
pub struct ProjectRegistry {
    projects: Vec<ProjectRef>,
}

impl Default for ProjectRegistry {
    fn default() -> Self {
        Self { projects: default_projects() }
    }
}

impl ProjectRegistry {
    /// Build a registry, rejecting duplicate ids.
    ///
    /// Live projects whose URL is not absolute http(s) are kept (their
    /// probes fail like any other transport error) but logged.
    pub fn new(projects: Vec<ProjectRef>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(projects.len());
        for project in &projects {
            if !seen.insert(project.id.as_str()) {
                return Err(LivenessError::DuplicateProject(project.id.clone()));
            }
            if project.is_monitorable() && !is_probeable(&project.url) {
                warn!(project = %project.id, url = %project.url, "Live project has an unusable URL");
            }
        }

        Ok(Self { projects })
    }

    /// Load from a `.toml` file, or a JSON array for any other extension
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| LivenessError::RegistryRead { path: path.to_path_buf(), source })?;

        let parse_error =
            |message: String| LivenessError::RegistryParse { path: path.to_path_buf(), message };

        let projects = if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str::<RegistryFile>(&raw).map_err(|e| parse_error(e.to_string()))?.projects
        } else {
            serde_json::from_str::<Vec<ProjectRef>>(&raw).map_err(|e| parse_error(e.to_string()))?
        };

        Self::new(projects)
    }

    /// Load from `path` when given, else use the built-in projects
    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Immutable copy handed to a monitoring pass
    pub fn snapshot(&self) -> Vec<ProjectRef> {
        self.projects.clone()
    }

    pub fn projects(&self) -> &[ProjectRef] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&ProjectRef> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn monitorable_count(&self) -> usize {
        self.projects.iter().filter(|p| p.is_monitorable()).count()
    }
}

fn is_probeable(target: &str) -> bool {
    Url::parse(target)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}
