use std::collections::HashMap;

use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use serde_json::{Map, Value, json};

use taxi_core::{DomainError, DomainResult, Entity};
use taxi_fleet::{Car, Driver, LicenseNumber, Manufacturer, Page};
use taxi_infra::{CarListing, CarView, DriverView};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Query string pairs of a list endpoint, in request order.
pub type RawListQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Parameters of a list endpoint. A repeated key keeps its last value and an
/// unreadable query string reads as empty, so listing never fails on input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    params: HashMap<String, String>,
}

impl ListQuery {
    pub fn from_request(query: RawListQuery) -> Self {
        match query {
            Ok(Query(pairs)) => pairs.into_iter().collect(),
            Err(rejection) => {
                tracing::debug!(error = %rejection, "unreadable list query; listing unfiltered");
                Self::default()
            }
        }
    }

    pub fn last(&self, key: &str) -> Option<String> {
        self.params.get(key).cloned()
    }

    pub fn paging(&self) -> PageQuery {
        PageQuery {
            page: self.last("page"),
        }
    }
}

impl FromIterator<(String, String)> for ListQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

/// `?page=` on list endpoints: a 1-based number or `last`.
#[derive(Debug, Clone, Default)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Resolve the requested page number for a list of `total` rows.
    ///
    /// Absent or blank means the first page; anything that is neither a
    /// number nor `last` is `NotFound`.
    pub fn number(&self, total: usize, per_page: usize) -> DomainResult<usize> {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => Ok(1),
            Some("last") => Ok(total.div_ceil(per_page.max(1)).max(1)),
            Some(raw) => raw.parse().map_err(|_| DomainError::not_found()),
        }
    }
}

/// Unwrap a JSON body, answering `400` with the usual error body when it
/// cannot be read.
pub fn read_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, axum::response::Response> {
    match body {
        Ok(Json(v)) => Ok(v),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable request body");
            Err(errors::json_error(
                axum::http::StatusCode::BAD_REQUEST,
                "invalid_body",
                rejection.body_text(),
            ))
        }
    }
}

// -------------------------
// JSON mapping
// -------------------------

pub fn page_to_json<T>(page: Page<T>, item: impl FnMut(T) -> Value) -> Value {
    let Page {
        items,
        page,
        per_page,
        total,
        num_pages,
        has_next,
        has_previous,
    } = page;

    json!({
        "items": items.into_iter().map(item).collect::<Vec<_>>(),
        "page": page,
        "per_page": per_page,
        "total": total,
        "num_pages": num_pages,
        "has_next": has_next,
        "has_previous": has_previous,
    })
}

/// Echo of the cleaned search value, keyed by the searched field.
pub fn search_to_json(field: &str, value: String) -> Value {
    let mut search = Map::new();
    search.insert(field.to_string(), Value::String(value));
    Value::Object(search)
}

pub fn manufacturer_to_json(m: Manufacturer) -> Value {
    json!({
        "id": m.id().to_string(),
        "name": m.name(),
        "country": m.country(),
        "display": m.to_string(),
    })
}

pub fn car_to_json(car: &Car) -> Value {
    json!({
        "id": car.id().to_string(),
        "model": car.model(),
        "manufacturer_id": car.manufacturer().to_string(),
        "driver_ids": car.drivers().iter().map(ToString::to_string).collect::<Vec<_>>(),
    })
}

pub fn car_row_to_json(row: CarListing) -> Value {
    let mut v = car_to_json(&row.car);
    v["manufacturer"] = manufacturer_to_json(row.manufacturer);
    v
}

pub fn car_detail_to_json(view: CarView) -> Value {
    let mut v = car_to_json(&view.car);
    v["manufacturer"] = manufacturer_to_json(view.manufacturer);
    v["drivers"] = view.drivers.into_iter().map(driver_to_json).collect();
    v
}

pub fn driver_to_json(d: Driver) -> Value {
    json!({
        "id": d.id().to_string(),
        "username": d.username(),
        "first_name": d.first_name(),
        "last_name": d.last_name(),
        "license_number": d.license_number().map(LicenseNumber::as_str),
        "display": d.to_string(),
    })
}

pub fn driver_detail_to_json(view: DriverView) -> Value {
    let mut v = driver_to_json(view.driver);
    v["cars"] = view.cars.iter().map(car_to_json).collect();
    v
}
