//! Input forms.
//!
//! A form is the raw, untrusted shape of a request body or query string. Its
//! `clean` method checks every field, collects the failures per field and
//! either returns a validated draft or `DomainError::Fields`.

use serde::Deserialize;

use taxi_core::{DomainError, DomainResult, DriverId, FieldErrors, ManufacturerId};

use crate::driver::username_problem;
use crate::license::{FormatViolation, LicenseNumber, validate_license_number};
use crate::manufacturer::MAX_TEXT_LEN;

pub const REQUIRED: &str = "This field is required.";

/// A validator attached to a single form field.
pub type FieldValidator = fn(&str) -> Result<String, FormatViolation>;

/// Validators attached to `license_number` wherever a form accepts one.
pub const LICENSE_NUMBER_VALIDATORS: &[FieldValidator] = &[validate_license_number];

fn required_text(errors: &mut FieldErrors, field: &str, raw: Option<String>) -> String {
    let value = raw.unwrap_or_default().trim().to_string();
    if value.is_empty() {
        errors.add(field, REQUIRED);
    } else if value.chars().count() > MAX_TEXT_LEN {
        errors.add(field, format!("Ensure this value has at most {MAX_TEXT_LEN} characters."));
    }
    value
}

fn optional_text(errors: &mut FieldErrors, field: &str, raw: Option<String>) -> String {
    let value = raw.unwrap_or_default().trim().to_string();
    if value.chars().count() > MAX_TEXT_LEN {
        errors.add(field, format!("Ensure this value has at most {MAX_TEXT_LEN} characters."));
    }
    value
}

/// Shared `license_number` field cleaning for the creation and update forms.
fn clean_license_number(errors: &mut FieldErrors, raw: Option<String>) -> Option<LicenseNumber> {
    const FIELD: &str = "license_number";

    let value = raw.unwrap_or_default().trim().to_string();
    if value.is_empty() {
        errors.add(FIELD, REQUIRED);
        return None;
    }

    let mut cleaned = value;
    for validator in LICENSE_NUMBER_VALIDATORS {
        match validator(&cleaned) {
            Ok(v) => cleaned = v,
            Err(violation) => {
                errors.add(FIELD, violation.to_string());
                return None;
            }
        }
    }

    LicenseNumber::parse(&cleaned).ok()
}

// -------------------------
// Manufacturers
// -------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManufacturerForm {
    pub name: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManufacturerDraft {
    pub name: String,
    pub country: String,
}

impl ManufacturerForm {
    pub fn clean(self) -> DomainResult<ManufacturerDraft> {
        let mut errors = FieldErrors::new();
        let name = required_text(&mut errors, "name", self.name);
        let country = required_text(&mut errors, "country", self.country);
        errors.into_result(ManufacturerDraft { name, country })
    }
}

// -------------------------
// Cars
// -------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CarForm {
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub drivers: Vec<String>,
}

/// Validated car input. Referenced ids are well-formed; whether they exist is
/// checked by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarDraft {
    pub model: String,
    pub manufacturer: ManufacturerId,
    pub drivers: Vec<DriverId>,
}

impl CarForm {
    pub fn clean(self) -> DomainResult<CarDraft> {
        let mut errors = FieldErrors::new();
        let model = required_text(&mut errors, "model", self.model);

        let manufacturer = match self.manufacturer.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("manufacturer", REQUIRED);
                None
            }
            Some(raw) => match raw.parse::<ManufacturerId>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("manufacturer", "Select a valid choice.");
                    None
                }
            },
        };

        let mut drivers = Vec::with_capacity(self.drivers.len());
        for raw in &self.drivers {
            match raw.parse::<DriverId>() {
                Ok(id) => drivers.push(id),
                Err(_) => errors.add("drivers", format!("\"{raw}\" is not a valid value.")),
            }
        }

        match manufacturer {
            Some(manufacturer) if errors.is_empty() => Ok(CarDraft {
                model,
                manufacturer,
                drivers,
            }),
            _ => Err(DomainError::Fields(errors)),
        }
    }
}

/// Car list search form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CarSearchForm {
    pub model: Option<String>,
}

impl CarSearchForm {
    pub fn clean(self) -> String {
        clean_search(self.model)
    }
}

// -------------------------
// Drivers
// -------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DriverCreationForm {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub license_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverDraft {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: LicenseNumber,
}

impl DriverCreationForm {
    pub fn clean(self) -> DomainResult<DriverDraft> {
        let mut errors = FieldErrors::new();

        let username = self.username.unwrap_or_default().trim().to_string();
        if let Some(problem) = username_problem(&username) {
            errors.add("username", problem);
        }

        let first_name = optional_text(&mut errors, "first_name", self.first_name);
        let last_name = optional_text(&mut errors, "last_name", self.last_name);
        let license_number = clean_license_number(&mut errors, self.license_number);

        match license_number {
            Some(license_number) if errors.is_empty() => Ok(DriverDraft {
                username,
                first_name,
                last_name,
                license_number,
            }),
            _ => Err(DomainError::Fields(errors)),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DriverLicenseUpdateForm {
    pub license_number: Option<String>,
}

impl DriverLicenseUpdateForm {
    pub fn clean(self) -> DomainResult<LicenseNumber> {
        let mut errors = FieldErrors::new();
        match clean_license_number(&mut errors, self.license_number) {
            Some(license_number) => Ok(license_number),
            None => Err(DomainError::Fields(errors)),
        }
    }
}

/// Driver list search form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DriverSearchForm {
    pub username: Option<String>,
}

impl DriverSearchForm {
    pub fn clean(self) -> String {
        clean_search(self.username)
    }
}

/// Manufacturer list search form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ManufacturerSearchForm {
    pub name: Option<String>,
}

impl ManufacturerSearchForm {
    pub fn clean(self) -> String {
        clean_search(self.name)
    }
}

/// Search fields are never required: absent or blank cleans to `""`.
fn clean_search(raw: Option<String>) -> String {
    raw.map(|s| s.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(err: DomainError) -> FieldErrors {
        match err {
            DomainError::Fields(f) => f,
            other => panic!("expected field errors, got {other:?}"),
        }
    }

    #[test]
    fn car_form_is_valid() {
        let manufacturer = ManufacturerId::new();
        let driver = DriverId::new();
        let draft = CarForm {
            model: Some("Panzerhaubitze 2000".into()),
            manufacturer: Some(manufacturer.to_string()),
            drivers: vec![driver.to_string()],
        }
        .clean()
        .unwrap();

        assert_eq!(draft.model, "Panzerhaubitze 2000");
        assert_eq!(draft.manufacturer, manufacturer);
        assert_eq!(draft.drivers, vec![driver]);
    }

    #[test]
    fn car_form_reports_each_bad_field() {
        let errors = fields(
            CarForm {
                model: None,
                manufacturer: Some("nope".into()),
                drivers: vec!["bad".into()],
            }
            .clean()
            .unwrap_err(),
        );
        assert!(errors.contains("model"));
        assert!(errors.contains("manufacturer"));
        assert!(errors.contains("drivers"));
    }

    #[test]
    fn car_form_requires_manufacturer() {
        let errors = fields(
            CarForm {
                model: Some("UAZ".into()),
                manufacturer: None,
                drivers: vec![],
            }
            .clean()
            .unwrap_err(),
        );
        assert_eq!(errors.get("manufacturer"), &[REQUIRED.to_string()]);
    }

    #[test]
    fn driver_creation_form_is_valid() {
        let draft = DriverCreationForm {
            username: Some("newdriver".into()),
            first_name: Some("First".into()),
            last_name: Some("Last".into()),
            license_number: Some("DEF67890".into()),
        }
        .clean()
        .unwrap();

        assert_eq!(draft.username, "newdriver");
        assert_eq!(draft.license_number.as_str(), "DEF67890");
    }

    #[test]
    fn driver_creation_form_invalid_license_number() {
        let errors = fields(
            DriverCreationForm {
                username: Some("newdriver".into()),
                first_name: Some("First".into()),
                last_name: Some("Last".into()),
                license_number: Some("invalid".into()),
            }
            .clean()
            .unwrap_err(),
        );
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["license_number"]);
    }

    #[test]
    fn driver_creation_form_requires_license_number() {
        let errors = fields(
            DriverCreationForm {
                username: Some("newdriver".into()),
                ..Default::default()
            }
            .clean()
            .unwrap_err(),
        );
        assert_eq!(errors.get("license_number"), &[REQUIRED.to_string()]);
    }

    #[test]
    fn driver_license_update_form_is_valid() {
        let license = DriverLicenseUpdateForm {
            license_number: Some("XYZ12345".into()),
        }
        .clean()
        .unwrap();
        assert_eq!(license.as_str(), "XYZ12345");
    }

    #[test]
    fn driver_license_update_form_reports_each_violation_on_the_field() {
        let cases = [
            ("ABC1234", FormatViolation::Length),
            ("AB123456", FormatViolation::Prefix),
            ("ABC1234A", FormatViolation::Suffix),
        ];
        for (raw, violation) in cases {
            let errors = fields(
                DriverLicenseUpdateForm {
                    license_number: Some(raw.into()),
                }
                .clean()
                .unwrap_err(),
            );
            assert_eq!(errors.get("license_number"), &[violation.to_string()], "{raw}");
        }
    }

    #[test]
    fn search_forms_accept_values() {
        let form: DriverSearchForm = serde_json::from_str(r#"{"username":"TestDummy"}"#).unwrap();
        assert_eq!(form.clean(), "TestDummy");
        let form: ManufacturerSearchForm = serde_json::from_str(r#"{"name":"BWD"}"#).unwrap();
        assert_eq!(form.clean(), "BWD");
    }

    #[test]
    fn search_forms_clean_empty_or_missing_to_empty_string() {
        let form: DriverSearchForm = serde_json::from_str(r#"{"username":""}"#).unwrap();
        assert_eq!(form.clean(), "");
        let form: ManufacturerSearchForm = serde_json::from_str("{}").unwrap();
        assert_eq!(form.clean(), "");
        assert_eq!(CarSearchForm { model: Some("   ".into()) }.clean(), "");
    }

    #[test]
    fn manufacturer_form_requires_both_fields() {
        let errors = fields(ManufacturerForm::default().clean().unwrap_err());
        assert!(errors.contains("name"));
        assert!(errors.contains("country"));

        let draft = ManufacturerForm {
            name: Some(" BWD ".into()),
            country: Some("Germany".into()),
        }
        .clean()
        .unwrap();
        assert_eq!(draft.name, "BWD");
    }
}
