//! Fleet registry: the referential rules spanning manufacturers, cars and
//! drivers.
//!
//! Each entity lives in its own [`Store`]. Rules that read one store and
//! write another (a car's manufacturer must exist, deleting a manufacturer
//! deletes its cars, usernames are unique...) run under a single write lock so
//! that no concurrent mutation can slip between the check and the write.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use taxi_core::{CarId, DomainError, DomainResult, DriverId, Entity, FieldErrors, ManufacturerId};
use taxi_fleet::{
    Car, CarDraft, Driver, DriverDraft, LicenseNumber, Manufacturer, ManufacturerDraft, Searchable,
};

use crate::store::{InMemoryStore, Store};

/// Registry wired to in-memory stores.
pub type InMemoryFleetRegistry = FleetRegistry<
    InMemoryStore<ManufacturerId, Manufacturer>,
    InMemoryStore<CarId, Car>,
    InMemoryStore<DriverId, Driver>,
>;

/// A car list row with its manufacturer resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarListing {
    pub car: Car,
    pub manufacturer: Manufacturer,
}

/// Car detail: the car, its manufacturer and its drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CarView {
    pub car: Car,
    pub manufacturer: Manufacturer,
    pub drivers: Vec<Driver>,
}

/// Driver detail: the driver and the cars they drive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverView {
    pub driver: Driver,
    pub cars: Vec<Car>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FleetCounts {
    pub drivers: usize,
    pub cars: usize,
    pub manufacturers: usize,
}

#[derive(Debug)]
pub struct FleetRegistry<M, C, D> {
    manufacturers: M,
    cars: C,
    drivers: D,
    write_lock: Mutex<()>,
}

impl Default for InMemoryFleetRegistry {
    fn default() -> Self {
        Self::new(InMemoryStore::new(), InMemoryStore::new(), InMemoryStore::new())
    }
}

impl<M, C, D> FleetRegistry<M, C, D>
where
    M: Store<ManufacturerId, Manufacturer>,
    C: Store<CarId, Car>,
    D: Store<DriverId, Driver>,
{
    pub fn new(manufacturers: M, cars: C, drivers: D) -> Self {
        Self {
            manufacturers,
            cars,
            drivers,
            write_lock: Mutex::new(()),
        }
    }

    fn write(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data, so a poisoned lock is still usable.
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn counts(&self) -> FleetCounts {
        FleetCounts {
            drivers: self.drivers.len(),
            cars: self.cars.len(),
            manufacturers: self.manufacturers.len(),
        }
    }

    // -------------------------
    // Manufacturers
    // -------------------------

    pub fn create_manufacturer(&self, draft: ManufacturerDraft) -> DomainResult<Manufacturer> {
        let _guard = self.write();
        self.ensure_manufacturer_name_free(&draft.name, None)?;

        let manufacturer = Manufacturer::new(ManufacturerId::new(), draft.name, draft.country)?;
        self.manufacturers.upsert(*manufacturer.id(), manufacturer.clone());

        tracing::info!(manufacturer_id = %manufacturer.id(), name = manufacturer.name(), "manufacturer created");
        Ok(manufacturer)
    }

    pub fn update_manufacturer(
        &self,
        id: ManufacturerId,
        draft: ManufacturerDraft,
    ) -> DomainResult<Manufacturer> {
        let _guard = self.write();
        let mut manufacturer = self.get_manufacturer(id)?;
        self.ensure_manufacturer_name_free(&draft.name, Some(id))?;

        manufacturer.rename(draft.name, draft.country)?;
        self.manufacturers.upsert(id, manufacturer.clone());

        tracing::info!(manufacturer_id = %id, "manufacturer updated");
        Ok(manufacturer)
    }

    /// Delete a manufacturer and every car it builds. Returns the number of
    /// cars removed with it.
    pub fn delete_manufacturer(&self, id: ManufacturerId) -> DomainResult<usize> {
        let _guard = self.write();
        self.manufacturers.remove(&id).ok_or(DomainError::NotFound)?;

        let mut removed = 0;
        for car in self.cars.list() {
            if car.manufacturer() == id {
                self.cars.remove(car.id());
                removed += 1;
            }
        }

        tracing::info!(manufacturer_id = %id, cars_removed = removed, "manufacturer deleted");
        Ok(removed)
    }

    pub fn get_manufacturer(&self, id: ManufacturerId) -> DomainResult<Manufacturer> {
        self.manufacturers.get(&id).ok_or(DomainError::NotFound)
    }

    pub fn list_manufacturers(&self, query: &str) -> Vec<Manufacturer> {
        Manufacturer::filter(&self.manufacturers.list(), query)
    }

    fn ensure_manufacturer_name_free(
        &self,
        name: &str,
        except: Option<ManufacturerId>,
    ) -> DomainResult<()> {
        let taken = self
            .manufacturers
            .list()
            .iter()
            .any(|m| m.name() == name && Some(*m.id()) != except);
        if taken {
            return Err(DomainError::field(
                "name",
                "Manufacturer with this Name already exists.",
            ));
        }
        Ok(())
    }

    // -------------------------
    // Cars
    // -------------------------

    /// Create a car and return its detail, resolved under the same lock.
    pub fn create_car(&self, draft: CarDraft) -> DomainResult<CarView> {
        let _guard = self.write();
        self.ensure_car_references(&draft)?;

        let car = Car::new(CarId::new(), draft.model, draft.manufacturer, draft.drivers)?;
        self.cars.upsert(*car.id(), car.clone());

        tracing::info!(car_id = %car.id(), model = car.model(), "car created");
        self.car_view(car)
    }

    pub fn update_car(&self, id: CarId, draft: CarDraft) -> DomainResult<CarView> {
        let _guard = self.write();
        let mut car = self.cars.get(&id).ok_or(DomainError::NotFound)?;
        self.ensure_car_references(&draft)?;

        car.revise(draft.model, draft.manufacturer, draft.drivers)?;
        self.cars.upsert(id, car.clone());

        tracing::info!(car_id = %id, "car updated");
        self.car_view(car)
    }

    pub fn delete_car(&self, id: CarId) -> DomainResult<()> {
        let _guard = self.write();
        self.cars.remove(&id).ok_or(DomainError::NotFound)?;
        tracing::info!(car_id = %id, "car deleted");
        Ok(())
    }

    pub fn get_car(&self, id: CarId) -> DomainResult<CarView> {
        let car = self.cars.get(&id).ok_or(DomainError::NotFound)?;
        self.car_view(car)
    }

    fn car_view(&self, car: Car) -> DomainResult<CarView> {
        let manufacturer = self.get_manufacturer(car.manufacturer())?;
        let drivers = car
            .drivers()
            .iter()
            .filter_map(|d| self.drivers.get(d))
            .collect();

        Ok(CarView {
            car,
            manufacturer,
            drivers,
        })
    }

    /// Cars whose model matches `query`, each with its manufacturer.
    pub fn list_cars(&self, query: &str) -> Vec<CarListing> {
        Car::filter(&self.cars.list(), query)
            .into_iter()
            .filter_map(|car| {
                // A car read just before its manufacturer's cascade delete is skipped.
                let manufacturer = self.manufacturers.get(&car.manufacturer())?;
                Some(CarListing { car, manufacturer })
            })
            .collect()
    }

    pub fn cars_of_driver(&self, driver: DriverId) -> Vec<Car> {
        self.cars
            .list()
            .into_iter()
            .filter(|car| car.has_driver(driver))
            .collect()
    }

    /// Add `driver` to the car's drivers, or remove it if already there.
    /// Returns whether the driver is assigned afterwards.
    pub fn toggle_assignment(&self, car_id: CarId, driver: DriverId) -> DomainResult<bool> {
        let _guard = self.write();
        let mut car = self.cars.get(&car_id).ok_or(DomainError::NotFound)?;
        if !self.drivers.contains(&driver) {
            return Err(DomainError::invariant("caller is not a registered driver"));
        }

        let assigned = car.toggle_driver(driver);
        self.cars.upsert(car_id, car);

        tracing::info!(car_id = %car_id, driver_id = %driver, assigned, "car assignment toggled");
        Ok(assigned)
    }

    fn ensure_car_references(&self, draft: &CarDraft) -> DomainResult<()> {
        let mut errors = FieldErrors::new();

        if !self.manufacturers.contains(&draft.manufacturer) {
            errors.add(
                "manufacturer",
                "Select a valid choice. That choice is not one of the available choices.",
            );
        }
        for driver in &draft.drivers {
            if !self.drivers.contains(driver) {
                errors.add(
                    "drivers",
                    format!("Select a valid choice. {driver} is not one of the available choices."),
                );
            }
        }

        errors.into_result(())
    }

    // -------------------------
    // Drivers
    // -------------------------

    pub fn create_driver(&self, draft: DriverDraft) -> DomainResult<Driver> {
        let _guard = self.write();

        let drivers = self.drivers.list();
        let mut errors = FieldErrors::new();
        if drivers.iter().any(|d| d.username() == draft.username) {
            errors.add("username", "A user with that username already exists.");
        }
        if drivers
            .iter()
            .any(|d| d.license_number() == Some(&draft.license_number))
        {
            errors.add("license_number", "Driver with this License number already exists.");
        }
        errors.into_result(())?;

        let driver = Driver::new(
            DriverId::new(),
            draft.username,
            draft.first_name,
            draft.last_name,
            Some(draft.license_number),
        )?;
        self.drivers.upsert(*driver.id(), driver.clone());

        tracing::info!(driver_id = %driver.id(), username = driver.username(), "driver created");
        Ok(driver)
    }

    pub fn update_license(&self, id: DriverId, license: LicenseNumber) -> DomainResult<Driver> {
        let _guard = self.write();
        let mut driver = self.drivers.get(&id).ok_or(DomainError::NotFound)?;

        let taken = self
            .drivers
            .list()
            .iter()
            .any(|d| *d.id() != id && d.license_number() == Some(&license));
        if taken {
            return Err(DomainError::field(
                "license_number",
                "Driver with this License number already exists.",
            ));
        }

        driver.update_license(license);
        self.drivers.upsert(id, driver.clone());

        tracing::info!(driver_id = %id, "driver license updated");
        Ok(driver)
    }

    /// Delete a driver and unassign it from every car.
    pub fn delete_driver(&self, id: DriverId) -> DomainResult<()> {
        let _guard = self.write();
        self.drivers.remove(&id).ok_or(DomainError::NotFound)?;

        for mut car in self.cars_of_driver(id) {
            car.remove_driver(id);
            self.cars.upsert(*car.id(), car);
        }

        tracing::info!(driver_id = %id, "driver deleted");
        Ok(())
    }

    pub fn get_driver(&self, id: DriverId) -> DomainResult<DriverView> {
        let driver = self.drivers.get(&id).ok_or(DomainError::NotFound)?;
        let cars = self.cars_of_driver(id);
        Ok(DriverView { driver, cars })
    }

    pub fn list_drivers(&self, query: &str) -> Vec<Driver> {
        Driver::filter(&self.drivers.list(), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manufacturer(registry: &InMemoryFleetRegistry, name: &str, country: &str) -> Manufacturer {
        registry
            .create_manufacturer(ManufacturerDraft {
                name: name.into(),
                country: country.into(),
            })
            .unwrap()
    }

    fn driver(registry: &InMemoryFleetRegistry, username: &str, license: &str) -> Driver {
        registry
            .create_driver(DriverDraft {
                username: username.into(),
                first_name: "Dummy".into(),
                last_name: "Petrenko".into(),
                license_number: LicenseNumber::parse(license).unwrap(),
            })
            .unwrap()
    }

    fn car(registry: &InMemoryFleetRegistry, model: &str, m: &Manufacturer, drivers: Vec<DriverId>) -> Car {
        registry
            .create_car(CarDraft {
                model: model.into(),
                manufacturer: *m.id(),
                drivers,
            })
            .unwrap()
            .car
    }

    fn field_names(err: DomainError) -> Vec<String> {
        err.field_errors()
            .map(|f| f.fields().map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn manufacturer_search_by_name() {
        let registry = InMemoryFleetRegistry::default();
        manufacturer(&registry, "BWD", "Germany");
        manufacturer(&registry, "UAZ Factory", "Muchosransk");

        let found = registry.list_manufacturers("BWD");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "BWD");

        let all = registry.list_manufacturers("");
        let names: Vec<_> = all.iter().map(Manufacturer::name).collect();
        assert_eq!(names, vec!["BWD", "UAZ Factory"]);
    }

    #[test]
    fn manufacturer_names_are_unique() {
        let registry = InMemoryFleetRegistry::default();
        let bwd = manufacturer(&registry, "BWD", "Germany");
        let uaz = manufacturer(&registry, "UAZ Factory", "Muchosransk");

        let err = registry
            .create_manufacturer(ManufacturerDraft {
                name: "BWD".into(),
                country: "Elsewhere".into(),
            })
            .unwrap_err();
        assert_eq!(field_names(err), vec!["name"]);

        let err = registry
            .update_manufacturer(
                *uaz.id(),
                ManufacturerDraft {
                    name: "BWD".into(),
                    country: "Muchosransk".into(),
                },
            )
            .unwrap_err();
        assert_eq!(field_names(err), vec!["name"]);

        // Keeping one's own name is not a conflict.
        let renamed = registry
            .update_manufacturer(
                *bwd.id(),
                ManufacturerDraft {
                    name: "BWD".into(),
                    country: "Bavaria".into(),
                },
            )
            .unwrap();
        assert_eq!(renamed.country(), "Bavaria");
    }

    #[test]
    fn deleting_a_manufacturer_cascades_to_its_cars() {
        let registry = InMemoryFleetRegistry::default();
        let bwd = manufacturer(&registry, "BWD", "Germany");
        let uaz = manufacturer(&registry, "UAZ Factory", "Muchosransk");
        car(&registry, "Panzerhaubitze 2000", &bwd, vec![]);
        car(&registry, "X5", &bwd, vec![]);
        let kept = car(&registry, "UAZ", &uaz, vec![]);

        assert_eq!(registry.delete_manufacturer(*bwd.id()).unwrap(), 2);
        assert_eq!(registry.get_manufacturer(*bwd.id()), Err(DomainError::NotFound));

        let rows = registry.list_cars("");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].car, kept);
        assert_eq!(registry.delete_manufacturer(*bwd.id()), Err(DomainError::NotFound));
    }

    #[test]
    fn car_rows_carry_their_manufacturer() {
        let registry = InMemoryFleetRegistry::default();
        let bwd = manufacturer(&registry, "BWD", "Germany");
        car(&registry, "Panzerhaubitze 2000", &bwd, vec![]);
        car(&registry, "Boat with nipples", &bwd, vec![]);

        let rows = registry.list_cars("panzer");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].car.model(), "Panzerhaubitze 2000");
        assert_eq!(rows[0].manufacturer, bwd);
    }

    #[test]
    fn car_references_must_exist() {
        let registry = InMemoryFleetRegistry::default();
        let err = registry
            .create_car(CarDraft {
                model: "UAZ".into(),
                manufacturer: ManufacturerId::new(),
                drivers: vec![DriverId::new()],
            })
            .unwrap_err();
        assert_eq!(field_names(err), vec!["drivers", "manufacturer"]);
        assert_eq!(registry.counts().cars, 0);
    }

    #[test]
    fn car_detail_resolves_drivers() {
        let registry = InMemoryFleetRegistry::default();
        let bwd = manufacturer(&registry, "BWD", "Germany");
        let d = driver(&registry, "TestDummy", "ABC12345");
        let c = car(&registry, "Panzerhaubitze 2000", &bwd, vec![*d.id()]);

        let view = registry.get_car(*c.id()).unwrap();
        assert_eq!(view.manufacturer, bwd);
        assert_eq!(view.drivers, vec![d]);
        assert_eq!(registry.get_car(CarId::new()), Err(DomainError::NotFound));
    }

    #[test]
    fn create_car_returns_resolved_detail() {
        let registry = InMemoryFleetRegistry::default();
        let bwd = manufacturer(&registry, "BWD", "Germany");
        let d = driver(&registry, "TestDummy", "ABC12345");

        let view = registry
            .create_car(CarDraft {
                model: "Panzerhaubitze 2000".into(),
                manufacturer: *bwd.id(),
                drivers: vec![*d.id()],
            })
            .unwrap();
        assert_eq!(view.manufacturer, bwd);
        assert_eq!(view.drivers, vec![d]);
        assert_eq!(registry.get_car(*view.car.id()), Ok(view));
    }

    #[test]
    fn update_car_replaces_fields() {
        let registry = InMemoryFleetRegistry::default();
        let bwd = manufacturer(&registry, "BWD", "Germany");
        let uaz = manufacturer(&registry, "UAZ Factory", "Muchosransk");
        let c = car(&registry, "X5", &bwd, vec![]);

        let updated = registry
            .update_car(
                *c.id(),
                CarDraft {
                    model: "Bukhanka".into(),
                    manufacturer: *uaz.id(),
                    drivers: vec![],
                },
            )
            .unwrap();
        assert_eq!(updated.car.model(), "Bukhanka");
        assert_eq!(updated.car.manufacturer(), *uaz.id());
        assert_eq!(updated.manufacturer, uaz);
        assert_eq!(registry.delete_car(*c.id()), Ok(()));
        assert_eq!(registry.delete_car(*c.id()), Err(DomainError::NotFound));
    }

    #[test]
    fn toggle_assignment_adds_then_removes() {
        let registry = InMemoryFleetRegistry::default();
        let bwd = manufacturer(&registry, "BWD", "Germany");
        let d = driver(&registry, "TestDummy", "ABC12345");
        let c = car(&registry, "Panzerhaubitze 2000", &bwd, vec![]);

        assert_eq!(registry.toggle_assignment(*c.id(), *d.id()), Ok(true));
        assert_eq!(registry.cars_of_driver(*d.id()).len(), 1);
        assert_eq!(registry.toggle_assignment(*c.id(), *d.id()), Ok(false));
        assert!(registry.cars_of_driver(*d.id()).is_empty());

        assert!(matches!(
            registry.toggle_assignment(*c.id(), DriverId::new()),
            Err(DomainError::InvariantViolation(_))
        ));
        assert_eq!(
            registry.toggle_assignment(CarId::new(), *d.id()),
            Err(DomainError::NotFound)
        );
    }

    #[test]
    fn driver_username_and_license_are_unique() {
        let registry = InMemoryFleetRegistry::default();
        driver(&registry, "TestDummy", "ABC12345");

        let err = registry
            .create_driver(DriverDraft {
                username: "TestDummy".into(),
                first_name: String::new(),
                last_name: String::new(),
                license_number: LicenseNumber::parse("ABC12345").unwrap(),
            })
            .unwrap_err();
        assert_eq!(field_names(err), vec!["license_number", "username"]);
        assert_eq!(registry.counts().drivers, 1);
    }

    #[test]
    fn update_license_checks_other_drivers_only() {
        let registry = InMemoryFleetRegistry::default();
        let a = driver(&registry, "driver1", "ABC12345");
        driver(&registry, "driver2", "DEF67890");

        let same = registry
            .update_license(*a.id(), LicenseNumber::parse("ABC12345").unwrap())
            .unwrap();
        assert_eq!(same.license_number().map(LicenseNumber::as_str), Some("ABC12345"));

        let err = registry
            .update_license(*a.id(), LicenseNumber::parse("DEF67890").unwrap())
            .unwrap_err();
        assert_eq!(field_names(err), vec!["license_number"]);

        let updated = registry
            .update_license(*a.id(), LicenseNumber::parse("XYZ12345").unwrap())
            .unwrap();
        assert_eq!(updated.license_number().map(LicenseNumber::as_str), Some("XYZ12345"));
        assert_eq!(
            registry.update_license(DriverId::new(), LicenseNumber::parse("XYZ12345").unwrap()),
            Err(DomainError::NotFound)
        );
    }

    #[test]
    fn deleting_a_driver_unassigns_it() {
        let registry = InMemoryFleetRegistry::default();
        let bwd = manufacturer(&registry, "BWD", "Germany");
        let a = driver(&registry, "driver1", "ABC12345");
        let b = driver(&registry, "driver2", "DEF67890");
        let c = car(&registry, "X5", &bwd, vec![*a.id(), *b.id()]);

        registry.delete_driver(*a.id()).unwrap();
        let view = registry.get_car(*c.id()).unwrap();
        assert_eq!(view.car.drivers(), &[*b.id()]);
        assert_eq!(registry.get_driver(*a.id()), Err(DomainError::NotFound));
    }

    #[test]
    fn driver_search_and_detail() {
        let registry = InMemoryFleetRegistry::default();
        let bwd = manufacturer(&registry, "BWD", "Germany");
        let a = driver(&registry, "driver1", "ABC12345");
        driver(&registry, "driver2", "DEF67890");
        car(&registry, "X5", &bwd, vec![*a.id()]);

        let found = registry.list_drivers("driver1");
        assert_eq!(found, vec![a.clone()]);
        assert_eq!(registry.list_drivers("").len(), 2);

        let view = registry.get_driver(*a.id()).unwrap();
        assert_eq!(view.cars.len(), 1);
        assert_eq!(
            registry.counts(),
            FleetCounts {
                drivers: 2,
                cars: 1,
                manufacturers: 1
            }
        );
    }
}
