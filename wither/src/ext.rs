use wither_core::{Key, PropertyType, Wither};
use wither_reflect::{MutationSequence, PendingEdits, WithError, apply_edits};

/// `.with(...)` on every value that can be rebuilt.
///
/// Nothing is built until the returned sequence is resolved.
pub trait WitherExt: Wither {
    /// Starts a sequence that sets `key` to `value`.
    fn with<V: PropertyType>(&self, key: Key<Self, V>, value: V) -> MutationSequence<'_, Self> {
        MutationSequence::new(self).with(key, value)
    }

    /// Starts a sequence that sets `key` to `update` applied to its current
    /// value.
    fn with_updated<V, F>(&self, key: Key<Self, V>, update: F) -> MutationSequence<'_, Self>
    where
        V: PropertyType,
        F: Fn(V) -> V + Send + Sync + 'static,
    {
        MutationSequence::new(self).with_updated(key, update)
    }

    /// Starts an empty sequence
    fn mutate(&self) -> MutationSequence<'_, Self> {
        MutationSequence::new(self)
    }

    /// Builds a new instance with `edits` applied, right away.
    fn with_edits(&self, edits: &PendingEdits) -> Result<Self, WithError> {
        apply_edits(self, edits)
    }
}

impl<T: Wither> WitherExt for T {}
