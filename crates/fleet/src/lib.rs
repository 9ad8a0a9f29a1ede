//! Fleet domain module (manufacturers, cars and drivers).
//!
//! This crate contains the business rules of the taxi fleet: the license
//! number format, the text search used by list views, the entities and the
//! forms that turn raw input into validated drafts. Everything here is
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod car;
pub mod driver;
pub mod forms;
pub mod license;
pub mod manufacturer;
pub mod search;

pub use car::Car;
pub use driver::Driver;
pub use forms::{
    CarDraft, CarForm, CarSearchForm, DriverCreationForm, DriverDraft, DriverLicenseUpdateForm,
    DriverSearchForm, ManufacturerDraft, ManufacturerForm, ManufacturerSearchForm,
};
pub use license::{FormatViolation, LicenseNumber, validate_license_number};
pub use manufacturer::Manufacturer;
pub use search::{Page, Searchable, TextQuery, filter_by_text, paginate};
