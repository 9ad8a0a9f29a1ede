//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. A
/// license number is one: two drivers holding "ABC12345" hold the same value.
/// To "change" a value object, build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
