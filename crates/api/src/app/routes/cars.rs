use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use taxi_auth::permissions;
use taxi_core::CarId;
use taxi_fleet::{Car, CarForm, CarSearchForm, Searchable};

use crate::app::routes::common::authorized;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/:id", get(get_car).put(update_car).delete(delete_car))
        .route("/:id/toggle-assign", post(toggle_assign))
}

pub async fn list_cars(
    Extension(services): Extension<Arc<AppServices>>,
    query: dto::RawListQuery,
) -> axum::response::Response {
    let query = dto::ListQuery::from_request(query);
    let model = CarSearchForm {
        model: query.last(Car::SEARCH_FIELD),
    }
    .clean();
    let rows = services.fleet.list_cars(&model);

    let page = match services.paginate(rows, &query.paging()) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut body = dto::page_to_json(page, dto::car_row_to_json);
    body["search"] = dto::search_to_json(Car::SEARCH_FIELD, model);
    Json(body).into_response()
}

pub async fn create_car(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<CarForm>, JsonRejection>,
) -> axum::response::Response {
    let body = match authorized(&principal, body, permissions::CARS_WRITE) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let form = match dto::read_body(body) {
        Ok(f) => f,
        Err(res) => return res,
    };

    match form.clean().and_then(|draft| services.fleet.create_car(draft)) {
        Ok(view) => (StatusCode::CREATED, Json(dto::car_detail_to_json(view))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_car(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CarId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.fleet.get_car(id) {
        Ok(view) => Json(dto::car_detail_to_json(view)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_car(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<CarForm>, JsonRejection>,
) -> axum::response::Response {
    let body = match authorized(&principal, body, permissions::CARS_WRITE) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let id: CarId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let form = match dto::read_body(body) {
        Ok(f) => f,
        Err(res) => return res,
    };

    match form.clean().and_then(|draft| services.fleet.update_car(id, draft)) {
        Ok(view) => Json(dto::car_detail_to_json(view)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_car(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match authorized(&principal, id, permissions::CARS_WRITE) {
        Ok(id) => id,
        Err(res) => return res,
    };
    let id: CarId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.fleet.delete_car(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Assign the caller to the car, or unassign them if already assigned.
pub async fn toggle_assign(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match authorized(&principal, id, permissions::CARS_ASSIGN) {
        Ok(id) => id,
        Err(res) => return res,
    };
    let car_id: CarId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let driver_id = principal.driver_id();

    match services.fleet.toggle_assignment(car_id, driver_id) {
        Ok(assigned) => Json(serde_json::json!({
            "car_id": car_id.to_string(),
            "driver_id": driver_id.to_string(),
            "assigned": assigned,
        }))
        .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
