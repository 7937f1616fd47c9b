//! Project references handed to the monitor by the registry.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a dashboard project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Live,
    InProgress,
    ComingSoon,
}

impl ProjectStatus {
    /// Only live projects are probed
    pub fn is_monitorable(self) -> bool {
        matches!(self, ProjectStatus::Live)
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectStatus::Live => write!(f, "live"),
            ProjectStatus::InProgress => write!(f, "in-progress"),
            ProjectStatus::ComingSoon => write!(f, "coming-soon"),
        }
    }
}

/// A registered project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// Unique, stable identifier
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// URL checked for reachability
    pub url: String,

    pub status: ProjectStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectRef {
    pub fn new(id: impl Into<String>, url: impl Into<String>, status: ProjectStatus) -> Self {
        let id = id.into();
        Self { name: id.clone(), id, url: url.into(), status, emoji: None, description: None }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_monitorable(&self) -> bool {
        self.status.is_monitorable()
    }
}
