use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use taxi_auth::permissions;
use taxi_core::ManufacturerId;
use taxi_fleet::{Manufacturer, ManufacturerForm, ManufacturerSearchForm, Searchable};

use crate::app::routes::common::authorized;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_manufacturers).post(create_manufacturer))
        .route(
            "/:id",
            get(get_manufacturer)
                .put(update_manufacturer)
                .delete(delete_manufacturer),
        )
}

pub async fn list_manufacturers(
    Extension(services): Extension<Arc<AppServices>>,
    query: dto::RawListQuery,
) -> axum::response::Response {
    let query = dto::ListQuery::from_request(query);
    let name = ManufacturerSearchForm {
        name: query.last(Manufacturer::SEARCH_FIELD),
    }
    .clean();
    let rows = services.fleet.list_manufacturers(&name);

    let page = match services.paginate(rows, &query.paging()) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut body = dto::page_to_json(page, dto::manufacturer_to_json);
    body["search"] = dto::search_to_json(Manufacturer::SEARCH_FIELD, name);
    Json(body).into_response()
}

pub async fn create_manufacturer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    body: Result<Json<ManufacturerForm>, JsonRejection>,
) -> axum::response::Response {
    let body = match authorized(&principal, body, permissions::MANUFACTURERS_WRITE) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let form = match dto::read_body(body) {
        Ok(f) => f,
        Err(res) => return res,
    };

    match form.clean().and_then(|draft| services.fleet.create_manufacturer(draft)) {
        Ok(m) => (StatusCode::CREATED, Json(dto::manufacturer_to_json(m))).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_manufacturer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ManufacturerId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.fleet.get_manufacturer(id) {
        Ok(m) => Json(dto::manufacturer_to_json(m)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_manufacturer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    body: Result<Json<ManufacturerForm>, JsonRejection>,
) -> axum::response::Response {
    let body = match authorized(&principal, body, permissions::MANUFACTURERS_WRITE) {
        Ok(b) => b,
        Err(res) => return res,
    };
    let id: ManufacturerId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };
    let form = match dto::read_body(body) {
        Ok(f) => f,
        Err(res) => return res,
    };

    match form.clean().and_then(|draft| services.fleet.update_manufacturer(id, draft)) {
        Ok(m) => Json(dto::manufacturer_to_json(m)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_manufacturer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match authorized(&principal, id, permissions::MANUFACTURERS_WRITE) {
        Ok(id) => id,
        Err(res) => return res,
    };
    let id: ManufacturerId = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.fleet.delete_manufacturer(id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
