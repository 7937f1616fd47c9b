use actix_web::{HttpResponse, get, web};

use crate::state::AppState;

macros_utils::routes! {
    route projects_route,
}

/// Registry snapshot the passes are run against
#[get("/api/projects")]
pub async fn projects_route(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.registry.projects())
}
