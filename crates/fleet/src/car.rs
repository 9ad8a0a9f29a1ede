use serde::Serialize;

use taxi_core::{CarId, DomainError, DomainResult, DriverId, Entity, ManufacturerId};

use crate::search::Searchable;

/// A car: one model built by exactly one manufacturer, driven by any number
/// of drivers.
///
/// `drivers` has set semantics: duplicates are dropped, first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Car {
    id: CarId,
    model: String,
    manufacturer: ManufacturerId,
    drivers: Vec<DriverId>,
}

impl Car {
    pub fn new(
        id: CarId,
        model: impl Into<String>,
        manufacturer: ManufacturerId,
        drivers: impl IntoIterator<Item = DriverId>,
    ) -> DomainResult<Self> {
        let model = model.into();
        ensure_model(&model)?;

        let mut car = Self {
            id,
            model,
            manufacturer,
            drivers: Vec::new(),
        };
        car.set_drivers(drivers);
        Ok(car)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn manufacturer(&self) -> ManufacturerId {
        self.manufacturer
    }

    pub fn drivers(&self) -> &[DriverId] {
        &self.drivers
    }

    pub fn has_driver(&self, driver: DriverId) -> bool {
        self.drivers.contains(&driver)
    }

    /// Replace model, manufacturer and drivers in one step.
    pub fn revise(
        &mut self,
        model: impl Into<String>,
        manufacturer: ManufacturerId,
        drivers: impl IntoIterator<Item = DriverId>,
    ) -> DomainResult<()> {
        let model = model.into();
        ensure_model(&model)?;
        self.model = model;
        self.manufacturer = manufacturer;
        self.set_drivers(drivers);
        Ok(())
    }

    /// Add `driver` if absent, remove it if present. Returns whether the
    /// driver is assigned afterwards.
    pub fn toggle_driver(&mut self, driver: DriverId) -> bool {
        if self.has_driver(driver) {
            self.remove_driver(driver);
            false
        } else {
            self.drivers.push(driver);
            true
        }
    }

    pub fn remove_driver(&mut self, driver: DriverId) {
        self.drivers.retain(|d| *d != driver);
    }

    fn set_drivers(&mut self, drivers: impl IntoIterator<Item = DriverId>) {
        self.drivers.clear();
        for driver in drivers {
            if !self.drivers.contains(&driver) {
                self.drivers.push(driver);
            }
        }
    }
}

fn ensure_model(model: &str) -> DomainResult<()> {
    if model.trim().is_empty() {
        return Err(DomainError::invariant("car model cannot be empty"));
    }
    Ok(())
}

impl Entity for Car {
    type Id = CarId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Searchable for Car {
    const SEARCH_FIELD: &'static str = "model";

    fn search_text(&self) -> &str {
        &self.model
    }
}

impl core::fmt::Display for Car {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.model)
    }
}
