//! Terminal rendering of pass results.

use std::fmt::Write;

use liveness::{PassReport, ProjectRef, StatusMap};
use serde::Serialize;

/// Machine readable summary printed by `check --json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassSummary<'a> {
    pub statuses: &'a StatusMap,
    pub reachable: usize,
    pub monitorable: usize,
    pub completed_at: String,
}

impl<'a> From<&'a PassReport> for PassSummary<'a> {
    fn from(report: &'a PassReport) -> Self {
        Self {
            statuses: &report.statuses,
            reachable: report.reachable_count(),
            monitorable: report.monitorable_count(),
            completed_at: report.completed_at.to_rfc3339(),
        }
    }
}

/// One line per project in registry order, then the online ratio
pub fn render(report: &PassReport, projects: &[ProjectRef]) -> String {
    let width = projects.iter().map(label_len).max().unwrap_or(0);
    let mut out = String::new();

    for project in projects {
        let label = format!("{} ({})", display_name(project), project.id);
        let line = match report.outcomes.get(&project.id) {
            Some(outcome) if outcome.reachable() => format!("● {label:<width$}  up    {outcome}"),
            Some(outcome) => format!("○ {label:<width$}  down  {outcome}"),
            None => format!("- {label:<width$}  {}", project.status),
        };
        let _ = writeln!(out, "{}", line.trim_end());
    }

    let _ = writeln!(
        out,
        "{}/{} systems online",
        report.reachable_count(),
        report.monitorable_count()
    );
    out
}

fn display_name(project: &ProjectRef) -> &str {
    if project.name.is_empty() { &project.id } else { &project.name }
}

fn label_len(project: &ProjectRef) -> usize {
    display_name(project).chars().count() + project.id.chars().count() + 3
}
