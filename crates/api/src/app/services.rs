use taxi_core::DomainResult;
use taxi_fleet::{Page, paginate};
use taxi_infra::{InMemoryFleetRegistry, VisitCounter};

use crate::app::dto::PageQuery;
use crate::config::AppConfig;

/// Shared state behind every protected route.
#[derive(Debug)]
pub struct AppServices {
    pub fleet: InMemoryFleetRegistry,
    pub visits: VisitCounter,
    pub page_size: usize,
}

impl AppServices {
    pub fn new(page_size: usize) -> Self {
        Self {
            fleet: InMemoryFleetRegistry::default(),
            visits: VisitCounter::new(),
            page_size,
        }
    }

    /// Cut an already filtered list down to the requested page.
    pub fn paginate<T>(&self, items: Vec<T>, query: &PageQuery) -> DomainResult<Page<T>> {
        let number = query.number(items.len(), self.page_size)?;
        paginate(items, number, self.page_size)
    }
}

pub fn build_services(config: &AppConfig) -> AppServices {
    AppServices::new(config.page_size)
}
