use std::collections::HashMap;

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use liveness::{CheckStatusBody, LifecycleState, StatusMap};
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

macros_utils::routes! {
    route status_route,
    route refresh_route,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    state: LifecycleState,
    statuses: StatusMap,
    /// Probe detail per project, in the `check-status` shape
    checks: HashMap<String, CheckStatusBody>,
    reachable: usize,
    monitorable: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
struct RefreshBody {
    state: LifecycleState,
}

/// Latest complete pass plus the current lifecycle state
#[get("/api/status")]
pub async fn status_route(state: web::Data<AppState>) -> HttpResponse {
    let lifecycle = state.aggregator.state();
    let body = match state.aggregator.latest().await {
        Some(report) => StatusBody {
            state: lifecycle,
            reachable: report.reachable_count(),
            monitorable: report.monitorable_count(),
            statuses: report.statuses.clone(),
            checks: report
                .outcomes
                .iter()
                .map(|(id, outcome)| (id.clone(), CheckStatusBody::from(outcome)))
                .collect(),
            completed_at: Some(report.completed_at),
        },
        None => StatusBody {
            state: lifecycle,
            statuses: StatusMap::new(),
            checks: HashMap::new(),
            reachable: 0,
            monitorable: 0,
            completed_at: None,
        },
    };

    HttpResponse::Ok().json(body)
}

/// Start a pass over the current registry snapshot; 409 while one is running
#[post("/api/refresh")]
pub async fn refresh_route(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    // The handle is dropped: the pass finishes on its own and publishes
    // through the aggregator.
    state.aggregator.spawn_pass(state.registry.snapshot())?;
    info!("Monitoring pass requested");

    Ok(HttpResponse::Accepted().json(RefreshBody { state: LifecycleState::Checking }))
}
