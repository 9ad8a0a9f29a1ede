//! `taxi-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the fleet domain,
//! the registry and the HTTP layer (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, FieldErrors};
pub use id::{CarId, DriverId, ManufacturerId};
pub use value_object::ValueObject;
