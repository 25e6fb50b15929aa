//! Entity trait: identity that outlives attribute values.

/// Something with a stable identifier, e.g. a catalog listing or a user.
///
/// Two entities with the same id are the same entity even when their
/// attributes (price, location, display name) differ.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Identity comparison, ignoring attributes.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
