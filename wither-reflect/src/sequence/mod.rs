//! Persistent chains of edits.
//!
//! Appending to a sequence never changes it: every `with` returns a new
//! sequence that shares its history with the old one. Sequences can be
//! branched, kept around, and resolved any number of times, from any thread.

use core::fmt::Display;
use core::marker::PhantomData;
use std::sync::Arc;

use im::{HashMap, OrdMap, Vector};
use indexmap::IndexMap;
#[cfg(feature = "log")]
use owo_colors::OwoColorize;
use wither_core::{Key, PropertyType, Selector, Value, Wither};

use crate::{PendingEdits, Peek, WithError, apply_edits, debug};

mod deferred;
pub use deferred::Deferred;
use deferred::{Entry, Write};

mod resolve;
use resolve::Resolver;

/// An ordered, persistent list of edits for values of type `T`, not yet tied
/// to any instance.
///
/// A later write to a name replaces every earlier write to that name, and
/// the name moves to the end of the sequence. Names are compared the way the
/// source's shape normalizes them, so `Age` and `age` are the same write once
/// the sequence is applied. Deferred values are not computed until then.
pub struct WithSequence<T> {
    /// write order → (name, write)
    entries: OrdMap<u64, (String, Arc<Write>)>,

    /// name, as written → orders of the writes still in `entries`
    index: HashMap<String, Vector<u64>>,

    next: u64,
    _marker: PhantomData<fn(&T) -> T>,
}

impl<T> WithSequence<T> {
    /// Creates an empty sequence
    pub fn new() -> Self {
        Self {
            entries: OrdMap::new(),
            index: HashMap::new(),
            next: 0,
            _marker: PhantomData,
        }
    }

    /// Returns a sequence that also sets `key` to `value`.
    pub fn with<V: PropertyType>(&self, key: Key<T, V>, value: V) -> Self {
        self.push(key.name(), Write::Value(Value::new(value)))
    }

    /// Returns a sequence that also sets the property `selector` denotes to
    /// an already erased `value`.
    pub fn with_value(&self, selector: impl Selector, value: Value) -> Result<Self, WithError> {
        let name = selector.property_name()?;
        Ok(self.push(name, Write::Value(value)))
    }

    /// Returns a sequence that also sets `key` to whatever `factory` returns
    /// when the sequence is applied.
    pub fn with_deferred<V, F>(&self, key: Key<T, V>, factory: F) -> Self
    where
        V: PropertyType,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.defer(key.name(), Deferred::new(factory))
    }

    /// Like [`Self::with_deferred`], for a factory that may fail.
    pub fn try_with_deferred<V, E, F>(&self, key: Key<T, V>, factory: F) -> Self
    where
        V: PropertyType,
        E: Display,
        F: Fn() -> Result<V, E> + Send + Sync + 'static,
    {
        self.defer(key.name(), Deferred::try_new(factory))
    }

    /// Returns a sequence that also sets `key` to `update` applied to the
    /// property's current value: the one written earlier in this sequence,
    /// or the source instance's if there is none.
    pub fn with_updated<V, F>(&self, key: Key<T, V>, update: F) -> Self
    where
        V: PropertyType,
        F: Fn(V) -> V + Send + Sync + 'static,
    {
        self.defer(key.name(), Deferred::updating(update))
    }

    /// Returns a sequence that also sets the property `selector` denotes to
    /// the result of `deferred`.
    pub fn with_factory(
        &self,
        selector: impl Selector,
        deferred: Deferred,
    ) -> Result<Self, WithError> {
        let name = selector.property_name()?;
        Ok(self.defer(name, deferred))
    }

    /// Number of distinct names written
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if nothing was written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `name` was written, spelled the same way
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Written names, oldest write first
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(|(order, (name, _))| {
                self.index.get(name).and_then(Vector::last) == Some(*order)
            })
            .map(|(_, (name, _))| name.as_str())
    }

    fn defer(&self, name: &str, deferred: Deferred) -> Self {
        self.push(name, Write::Deferred(deferred))
    }

    fn push(&self, name: &str, write: Write) -> Self {
        let mut next = self.clone();
        let mut orders = next.index.remove(name).unwrap_or_default();

        // earlier writes to `name` are shadowed, unless this one reads them
        if !write.takes_current() {
            for order in &orders {
                next.entries.remove(order);
            }
            orders.clear();
        }

        let order = next.next;
        next.next += 1;
        orders.push_back(order);
        next.entries.insert(order, (name.to_owned(), Arc::new(write)));
        next.index.insert(name.to_owned(), orders);
        next
    }
}

impl<T: Wither> WithSequence<T> {
    /// Ties this sequence to `source`.
    pub fn bind<'a>(&self, source: &'a T) -> MutationSequence<'a, T> {
        MutationSequence {
            source,
            sequence: self.clone(),
        }
    }

    /// Computes every entry against `source`, running deferred factories.
    ///
    /// Writes whose names normalize the same way for `source`'s shape are
    /// folded first: only the last one is resolved, and an updating factory
    /// sees the value of the write it replaced.
    pub fn resolve_edits(&self, source: &T) -> Result<PendingEdits, WithError> {
        let peek = Peek::new(source);
        let naming = peek.shape().naming;

        // normalized name → (name as last written, entry)
        let mut folded: IndexMap<String, (&str, Arc<Entry>)> = IndexMap::new();
        for (name, write) in self.entries.values() {
            let key = naming.normalize(name).into_owned();
            let prior = folded.shift_remove(&key).map(|(_, entry)| entry);
            let entry = Arc::new(Entry::chain(write, prior));
            folded.insert(key, (name.as_str(), entry));
        }

        let resolver = Resolver::new(peek);
        let mut edits = PendingEdits::new();
        for (name, entry) in folded.values() {
            edits.record(name, resolver.resolve(name, entry)?);
        }
        Ok(edits)
    }

    /// Builds a new instance from `source` with this sequence applied.
    /// `source` is left untouched.
    pub fn apply_to(&self, source: &T) -> Result<T, WithError> {
        debug!(
            "Resolving a sequence of {} against {}",
            self.len().yellow(),
            source.shape_of().blue()
        );
        let edits = self.resolve_edits(source)?;
        apply_edits(source, &edits)
    }
}

impl<T> Clone for WithSequence<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
            next: self.next,
            _marker: PhantomData,
        }
    }
}

impl<T> Default for WithSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for WithSequence<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.entries.values().map(|(name, entry)| (name, entry)))
            .finish()
    }
}

/// A [`WithSequence`] tied to the instance it will be applied to.
///
/// ```rust,ignore
/// let older = MutationSequence::new(&person)
///     .with(Person::AGE, Some(31))
///     .resolve()?;
/// ```
pub struct MutationSequence<'a, T> {
    source: &'a T,
    sequence: WithSequence<T>,
}

impl<'a, T: Wither> MutationSequence<'a, T> {
    /// Starts an empty sequence for `source`
    pub fn new(source: &'a T) -> Self {
        Self {
            source,
            sequence: WithSequence::new(),
        }
    }

    /// Returns a sequence that also sets `key` to `value`.
    pub fn with<V: PropertyType>(&self, key: Key<T, V>, value: V) -> Self {
        self.then(self.sequence.with(key, value))
    }

    /// Returns a sequence that also sets the property `selector` denotes to
    /// an already erased `value`.
    pub fn with_value(&self, selector: impl Selector, value: Value) -> Result<Self, WithError> {
        Ok(self.then(self.sequence.with_value(selector, value)?))
    }

    /// Returns a sequence that also sets `key` to whatever `factory` returns
    /// when the sequence is resolved.
    pub fn with_deferred<V, F>(&self, key: Key<T, V>, factory: F) -> Self
    where
        V: PropertyType,
        F: Fn() -> V + Send + Sync + 'static,
    {
        self.then(self.sequence.with_deferred(key, factory))
    }

    /// Like [`Self::with_deferred`], for a factory that may fail.
    pub fn try_with_deferred<V, E, F>(&self, key: Key<T, V>, factory: F) -> Self
    where
        V: PropertyType,
        E: Display,
        F: Fn() -> Result<V, E> + Send + Sync + 'static,
    {
        self.then(self.sequence.try_with_deferred(key, factory))
    }

    /// Returns a sequence that also sets `key` to `update` applied to the
    /// property's current value.
    pub fn with_updated<V, F>(&self, key: Key<T, V>, update: F) -> Self
    where
        V: PropertyType,
        F: Fn(V) -> V + Send + Sync + 'static,
    {
        self.then(self.sequence.with_updated(key, update))
    }

    /// Returns a sequence that also sets the property `selector` denotes to
    /// the result of `deferred`.
    pub fn with_factory(
        &self,
        selector: impl Selector,
        deferred: Deferred,
    ) -> Result<Self, WithError> {
        Ok(self.then(self.sequence.with_factory(selector, deferred)?))
    }

    /// Builds a new instance from the source with every edit applied.
    ///
    /// Deferred factories run now, once each. The source is left untouched,
    /// and the sequence can be resolved again.
    pub fn resolve(&self) -> Result<T, WithError> {
        self.sequence.apply_to(self.source)
    }

    /// The instance this sequence will be applied to
    #[inline]
    pub fn source(&self) -> &'a T {
        self.source
    }

    /// The edits, without the instance
    #[inline]
    pub fn sequence(&self) -> &WithSequence<T> {
        &self.sequence
    }

    /// The edits, without the instance
    pub fn into_sequence(self) -> WithSequence<T> {
        self.sequence
    }

    /// Number of distinct names written
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns true if nothing was written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns true if `name` was written, spelled the same way
    pub fn contains(&self, name: &str) -> bool {
        self.sequence.contains(name)
    }

    /// Written names, oldest write first
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sequence.names()
    }

    fn then(&self, sequence: WithSequence<T>) -> Self {
        Self {
            source: self.source,
            sequence,
        }
    }
}

impl<T> Clone for MutationSequence<'_, T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            sequence: self.sequence.clone(),
        }
    }
}

impl<T: Wither> core::fmt::Debug for MutationSequence<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MutationSequence")
            .field("source", &self.source.shape_of())
            .field("edits", &self.sequence)
            .finish()
    }
}
