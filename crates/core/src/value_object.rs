//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity** and are **immutable**: two values with the
/// same attributes are the same value. `Price` is a value object, a `Product`
/// listing is an entity (see [`crate::Entity`]).
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Bracket { min: u64, max: Option<u64> }
///
/// impl ValueObject for Bracket {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
