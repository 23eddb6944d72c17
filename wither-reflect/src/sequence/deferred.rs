use core::any::type_name;
use core::fmt::Display;
use std::sync::Arc;

use wither_core::{PropertyType, Value};

type Factory = dyn Fn(Option<Value>) -> Result<Value, FactoryError> + Send + Sync;

/// A value that is only computed when the sequence holding it is resolved.
///
/// The factory runs once per resolution, and never if the entry is replaced
/// by a later write before that.
#[derive(Clone)]
pub struct Deferred {
    factory: Arc<Factory>,
    takes_current: bool,
    type_name: &'static str,
}

impl Deferred {
    /// Defers a call to `factory`.
    pub fn new<V, F>(factory: F) -> Self
    where
        V: PropertyType,
        F: Fn() -> V + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(move |_current: Option<Value>| -> Result<Value, FactoryError> {
                Ok(Value::new(factory()))
            }),
            takes_current: false,
            type_name: type_name::<V>(),
        }
    }

    /// Defers a call to a `factory` that may fail. Its error is reported as
    /// [`crate::WithError::FactoryFailed`] when the sequence is resolved.
    pub fn try_new<V, E, F>(factory: F) -> Self
    where
        V: PropertyType,
        E: Display,
        F: Fn() -> Result<V, E> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(move |_current: Option<Value>| -> Result<Value, FactoryError> {
                factory()
                    .map(Value::new)
                    .map_err(|err| FactoryError::Failed(err.to_string()))
            }),
            takes_current: false,
            type_name: type_name::<V>(),
        }
    }

    /// Defers a call to `update`, which receives the property's current
    /// value: the value written earlier in the sequence if there is one, the
    /// source instance's value otherwise.
    pub fn updating<V, F>(update: F) -> Self
    where
        V: PropertyType,
        F: Fn(V) -> V + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(move |current: Option<Value>| -> Result<Value, FactoryError> {
                let current = current.ok_or(FactoryError::NoCurrentValue)?;
                let current = current
                    .downcast::<V>()
                    .map_err(|value| FactoryError::TypeMismatch {
                        expected: type_name::<V>(),
                        actual: value.type_name(),
                    })?;
                Ok(Value::new(update(current)))
            }),
            takes_current: true,
            type_name: type_name::<V>(),
        }
    }

    /// Returns true if the factory wants the property's current value
    #[inline]
    pub fn takes_current(&self) -> bool {
        self.takes_current
    }

    /// Name of the type the factory produces
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn invoke(&self, current: Option<Value>) -> Result<Value, FactoryError> {
        (self.factory)(current)
    }
}

impl core::fmt::Debug for Deferred {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Deferred")
            .field("type", &self.type_name)
            .field("takes_current", &self.takes_current)
            .finish_non_exhaustive()
    }
}

/// What went wrong inside a deferred value
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FactoryError {
    /// The factory itself failed
    Failed(String),

    /// The current value handed to an updating factory had the wrong type
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// An updating factory was called without a current value
    NoCurrentValue,
}

/// One write in a sequence, as recorded
#[derive(Clone)]
pub(crate) enum Write {
    /// A concrete value
    Value(Value),

    /// A value computed when the sequence is resolved
    Deferred(Deferred),
}

impl Write {
    /// Returns true if resolving this write needs the value it replaces
    pub(crate) fn takes_current(&self) -> bool {
        matches!(self, Write::Deferred(deferred) if deferred.takes_current())
    }
}

impl core::fmt::Debug for Write {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Write::Value(value) => core::fmt::Debug::fmt(value, f),
            Write::Deferred(deferred) => core::fmt::Debug::fmt(deferred, f),
        }
    }
}

/// The latest write to a property, once writes to the same property have
/// been folded together
pub(crate) enum Entry {
    /// A concrete value
    Value(Value),

    /// A deferred value, and if it wants the current value, the entry it
    /// replaced
    Deferred {
        deferred: Deferred,
        prior: Option<Arc<Entry>>,
    },
}

impl Entry {
    /// Chains `write` onto `prior`, the entry it replaces. `prior` is only
    /// kept if resolving `write` will ask for it.
    pub(crate) fn chain(write: &Write, prior: Option<Arc<Entry>>) -> Self {
        match write {
            Write::Value(value) => Entry::Value(value.clone()),
            Write::Deferred(deferred) => Entry::Deferred {
                deferred: deferred.clone(),
                prior: prior.filter(|_| deferred.takes_current()),
            },
        }
    }
}
