use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "principal_id": principal.principal_id().to_string(),
        "roles": principal.roles().iter().map(|r| r.as_str()).collect::<Vec<_>>(),
    }))
}

/// Fleet totals plus the caller's own visit count, which this request bumps.
pub async fn index(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> impl IntoResponse {
    let counts = services.fleet.counts();
    let num_visits = services.visits.record_visit(principal.principal_id());

    Json(serde_json::json!({
        "num_drivers": counts.drivers,
        "num_cars": counts.cars,
        "num_manufacturers": counts.manufacturers,
        "num_visits": num_visits,
    }))
}
