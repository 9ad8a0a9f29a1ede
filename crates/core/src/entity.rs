//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Manufacturers, cars and drivers are entities: two records with the same
/// field values are still different rows if their ids differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
