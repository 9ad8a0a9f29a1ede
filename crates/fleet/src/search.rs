//! Text search and pagination for list views.
//!
//! Every list view narrows its collection with a case-insensitive substring
//! match on one text field. An empty query is not an error: it keeps the whole
//! collection, in its original order.

use serde::Serialize;

use taxi_core::{DomainError, DomainResult};

/// A normalised, case-folded search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    folded: String,
}

impl TextQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            folded: raw.to_lowercase(),
        }
    }

    /// Whether this query keeps every row.
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    /// Case-insensitive substring containment.
    pub fn matches(&self, text: &str) -> bool {
        self.is_empty() || text.to_lowercase().contains(&self.folded)
    }
}

/// An entity that list views can search by one of its text fields.
pub trait Searchable {
    /// Name of the searched field, as it appears in the search form.
    const SEARCH_FIELD: &'static str;

    fn search_text(&self) -> &str;

    /// Filter `items` by this type's search field.
    fn filter(items: &[Self], query: &str) -> Vec<Self>
    where
        Self: Sized + Clone,
    {
        filter_by_text(items, Self::search_text, query)
    }
}

/// Keep the items whose selected field contains `query`, ignoring case.
///
/// The source slice is left untouched; matches are cloned into a new vector
/// in their original order.
pub fn filter_by_text<T, F>(items: &[T], field: F, query: &str) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    let query = TextQuery::new(query);
    if query.is_empty() {
        return items.to_vec();
    }

    items
        .iter()
        .filter(|&item| query.matches(field(item)))
        .cloned()
        .collect()
}

/// One page of a (filtered) list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub num_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Map the items of this page, keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            num_pages: self.num_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Cut `items` into pages of `per_page` and return the 1-based `page`.
///
/// The first page always exists, even for an empty list. Any other page
/// outside `1..=num_pages` is `NotFound`.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> DomainResult<Page<T>> {
    if per_page == 0 {
        return Err(DomainError::validation("page size must be positive"));
    }

    let total = items.len();
    let num_pages = total.div_ceil(per_page).max(1);
    if page == 0 || page > num_pages {
        return Err(DomainError::not_found());
    }

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    Ok(Page {
        items,
        page,
        per_page,
        total,
        num_pages,
        has_next: page < num_pages,
        has_previous: page > 1,
    })
}
