//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Catalog records are entities: two records with the same id describe the
/// same product, even if their prices or titles differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Whether `other` refers to the same entity (identity, not value).
    fn same_identity<E>(&self, other: &E) -> bool
    where
        E: Entity<Id = Self::Id>,
    {
        self.id() == other.id()
    }
}
