use actix_web::{HttpResponse, get, web};
use liveness::CheckStatusBody;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

macros_utils::routes! {
    route check_status_route,
}

/// Forwarding endpoint: probe `url` server-side and relay the outcome.
///
/// Always 200 for a probed target, whatever its state; 400 when `url` is
/// missing or empty. A repeated `url` parameter uses its first value.
#[get("/api/check-status")]
pub async fn check_status_route(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let url = query
        .into_inner()
        .into_iter()
        .find_map(|(key, value)| (key == "url").then_some(value))
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::MissingUrl)?;

    let outcome = state.probe.probe(&url).await;
    debug!(%url, "check-status relayed: {outcome}");

    Ok(HttpResponse::Ok().json(CheckStatusBody::from(&outcome)))
}
