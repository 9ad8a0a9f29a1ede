use axum::{routing::get, Router};

pub mod cars;
pub mod common;
pub mod drivers;
pub mod manufacturers;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::index))
        .route("/whoami", get(system::whoami))
        .nest("/manufacturers", manufacturers::router())
        .nest("/cars", cars::router())
        .nest("/drivers", drivers::router())
}
