use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use taxi_auth::permissions;
use taxi_core::DriverId;
use taxi_fleet::{
    Driver, DriverCreationForm, DriverLicenseUpdateForm, DriverSearchForm, Searchable,
};

use crate::app::routes::common::authorized;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/:id", get(get_driver).delete(delete_driver))
        .route("/:id/license", put(update_license))
}

pub async fn list_drivers(
    Extension(services): Extension<Arc<AppServices>>,
    query: dto::RawListQuery,
) -> axum::response::Response {
    let query = dto::ListQuery::from_request(query);
    let username = DriverSearchForm {
        username: query.last(Driver::SEARCH_FIELD),
    }
    .clean();
    let rows = services.fleet.list_drivers(&username);

    let page = match services.paginate(rows, &query.paging()) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut body = dto::page_to_json(page, dto::driver_to_json);
    body["search"] = dto::search_to_json(Driver::SEARCH_FIELD, username);
    Json(body).into_response()
}

pub async fn create_driver(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<DriverCreationForm>, JsonRejection>,
) -> axum::response::Response {
    let body = match authorized(&principal, body, permissions::DRIVERS_WRITE) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let form = match dto::read_body(body) {
        Ok(f) => f,
        Err(res) => return res,
    };

    match form.clean().and_then(|draft| services.fleet.create_driver(draft)) {
        Ok(driver) => (StatusCode::CREATED, Json(dto::driver_to_json(driver))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_driver(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: DriverId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.fleet.get_driver(id) {
        Ok(view) => Json(dto::driver_detail_to_json(view)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_license(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<DriverLicenseUpdateForm>, JsonRejection>,
) -> axum::response::Response {
    let body = match authorized(&principal, body, permissions::DRIVERS_WRITE) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let id: DriverId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let form = match dto::read_body(body) {
        Ok(f) => f,
        Err(res) => return res,
    };

    match form.clean().and_then(|license| services.fleet.update_license(id, license)) {
        Ok(driver) => Json(dto::driver_to_json(driver)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_driver(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match authorized(&principal, id, permissions::DRIVERS_WRITE) {
        Ok(id) => id,
        Err(res) => return res,
    };
    let id: DriverId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.fleet.delete_driver(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
