//! Infrastructure layer: storage and per-user state.

pub mod fleet;
pub mod store;
pub mod visits;

pub use fleet::{CarListing, CarView, DriverView, FleetCounts, FleetRegistry, InMemoryFleetRegistry};
pub use store::{InMemoryStore, Store};
pub use visits::VisitCounter;
