use serde::Serialize;

use taxi_core::{DomainError, DomainResult, Entity, ManufacturerId};

use crate::search::Searchable;

/// Longest accepted value for free-text columns.
pub const MAX_TEXT_LEN: usize = 255;

/// A car manufacturer ("BWD", Germany).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manufacturer {
    id: ManufacturerId,
    name: String,
    country: String,
}

impl Manufacturer {
    pub fn new(
        id: ManufacturerId,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let country = country.into();
        ensure_name(&name)?;
        Ok(Self { id, name, country })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Replace name and country, keeping identity.
    pub fn rename(&mut self, name: impl Into<String>, country: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        ensure_name(&name)?;
        self.name = name;
        self.country = country.into();
        Ok(())
    }
}

fn ensure_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::invariant("manufacturer name cannot be empty"));
    }
    Ok(())
}

impl Entity for Manufacturer {
    type Id = ManufacturerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Searchable for Manufacturer {
    const SEARCH_FIELD: &'static str = "name";

    fn search_text(&self) -> &str {
        &self.name
    }
}

impl core::fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.name, self.country)
    }
}
