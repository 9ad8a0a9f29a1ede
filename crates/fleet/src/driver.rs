use serde::Serialize;

use taxi_core::{DomainError, DomainResult, DriverId, Entity};

use crate::license::LicenseNumber;
use crate::search::Searchable;

/// Longest accepted username.
pub const MAX_USERNAME_LEN: usize = 150;

/// A driver, who is also a user of the service.
///
/// # Invariants
/// - `username` is 1..=150 characters of letters, digits and `@.+-_`.
/// - `license_number`, when present, is a valid [`LicenseNumber`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Driver {
    id: DriverId,
    username: String,
    first_name: String,
    last_name: String,
    license_number: Option<LicenseNumber>,
}

impl Driver {
    pub fn new(
        id: DriverId,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        license_number: Option<LicenseNumber>,
    ) -> DomainResult<Self> {
        let username = username.into();
        if let Some(problem) = username_problem(&username) {
            return Err(DomainError::invariant(problem));
        }

        Ok(Self {
            id,
            username,
            first_name: first_name.into(),
            last_name: last_name.into(),
            license_number,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn license_number(&self) -> Option<&LicenseNumber> {
        self.license_number.as_ref()
    }

    /// Replace the license number. The type guarantees it was validated.
    pub fn update_license(&mut self, license_number: LicenseNumber) {
        self.license_number = Some(license_number);
    }
}

/// Describe what is wrong with `username`, if anything.
pub fn username_problem(username: &str) -> Option<&'static str> {
    if username.is_empty() {
        return Some("This field is required.");
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Some("Ensure this value has at most 150 characters.");
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Some("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.");
    }
    None
}

impl Entity for Driver {
    type Id = DriverId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Searchable for Driver {
    const SEARCH_FIELD: &'static str = "username";

    fn search_text(&self) -> &str {
        &self.username
    }
}

impl core::fmt::Display for Driver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({} {})", self.username, self.first_name, self.last_name)
    }
}
