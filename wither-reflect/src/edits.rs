use indexmap::IndexMap;
#[cfg(feature = "log")]
use owo_colors::OwoColorize;
use wither_core::{Key, NameCase, PropertyType, Selector, Value, Wither};

use crate::{Peek, WithError, debug, strategy};

/// A set of property values to apply to an instance, keyed by property name.
///
/// Adding a value for a name that is already present replaces it: the last
/// write wins, and the name moves to the end of the iteration order.
#[derive(Clone, Default)]
pub struct PendingEdits {
    edits: IndexMap<String, Value>,
}

impl PendingEdits {
    /// Creates an empty set of edits
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for the property `selector` denotes.
    pub fn add(&mut self, selector: impl Selector, value: Value) -> Result<&mut Self, WithError> {
        let name = selector.property_name()?;
        self.record(name, value);
        Ok(self)
    }

    /// Records `value` for the property `selector` denotes, erasing it first.
    /// A `value` that is already a [`Value`] is recorded as is.
    pub fn insert<V: PropertyType>(
        &mut self,
        selector: impl Selector,
        value: V,
    ) -> Result<&mut Self, WithError> {
        self.add(selector, Value::new(value))
    }

    /// Records `value` for the property `key` names.
    pub fn set<T, V: PropertyType>(&mut self, key: Key<T, V>, value: V) -> &mut Self {
        self.record(key.name(), Value::new(value));
        self
    }

    /// Number of distinct names with a pending value
    #[inline]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns true if there are no pending values
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// The pending value for `name`, as it was spelled when recorded
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.edits.get(name)
    }

    /// Names and values, oldest write first
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.edits.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub(crate) fn record(&mut self, name: &str, value: Value) {
        self.edits.shift_remove(name);
        self.edits.insert(name.to_owned(), value);
    }

    /// Folds names that normalize to the same key; the last write wins.
    pub(crate) fn normalized(&self, naming: NameCase) -> IndexMap<String, Value> {
        let mut edits = IndexMap::with_capacity(self.edits.len());
        for (name, value) in &self.edits {
            let key = naming.normalize(name).into_owned();
            edits.shift_remove(&key);
            edits.insert(key, value.clone());
        }
        edits
    }
}

impl core::fmt::Debug for PendingEdits {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.edits.iter()).finish()
    }
}

/// Builds a new instance from `instance`, with the properties named in
/// `edits` set to their pending values and every other property carried over.
///
/// `instance` is left untouched. With no edits, the result is a fresh copy.
pub fn apply_edits<T: Wither>(instance: &T, edits: &PendingEdits) -> Result<T, WithError> {
    let source = Peek::new(instance);
    let shape = source.shape();
    debug!(
        "Applying {} edit(s) to {}",
        edits.len().yellow(),
        shape.blue()
    );

    let built = strategy::rebuild(source, edits.normalized(shape.naming))?;
    instance
        .rewrap(built)
        .ok_or(WithError::InstanceMismatch { shape })
}
