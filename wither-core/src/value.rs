use core::any::Any;
use core::fmt;

/// Anything that can be stored in a property: it must be cloneable (so that
/// untouched properties can be copied from the source instance), debuggable,
/// and shareable across threads.
///
/// Nullable properties are modelled as `Option<V>`: `None` is a value like
/// any other, and setting it is not the same thing as leaving the property
/// alone.
pub trait PropertyType: Any + Clone + fmt::Debug + Send + Sync {}

impl<V> PropertyType for V where V: Any + Clone + fmt::Debug + Send + Sync {}

trait ErasedValue: Any + Send + Sync {
    fn clone_boxed(&self) -> Box<dyn ErasedValue>;
    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<V: PropertyType> ErasedValue for V {
    fn clone_boxed(&self) -> Box<dyn ErasedValue> {
        Box::new(self.clone())
    }

    fn fmt_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn type_name(&self) -> &'static str {
        core::any::type_name::<V>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

/// An owned, type-erased property value.
///
/// This is what travels between the source instance, pending edits, deferred
/// factories and constructors. It remembers the name of the type it was
/// created from so that mismatches can be reported legibly.
pub struct Value {
    inner: Box<dyn ErasedValue>,
}

impl Value {
    /// Erases `value`.
    ///
    /// A `value` that is already a [`Value`] is returned as is rather than
    /// wrapped a second time.
    pub fn new<V: PropertyType>(value: V) -> Self {
        let mut slot = Some(value);
        if let Some(Some(erased)) = (&mut slot as &mut dyn Any)
            .downcast_mut::<Option<Value>>()
            .map(Option::take)
        {
            return erased;
        }
        match slot {
            Some(value) => Self {
                inner: Box::new(value),
            },
            None => unreachable!("only an already erased value is taken out"),
        }
    }

    /// Name of the type stored in this value, as given by [`core::any::type_name`].
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    /// Returns true if this value holds a `V`
    #[inline]
    pub fn is<V: PropertyType>(&self) -> bool {
        self.inner.as_any().is::<V>()
    }

    /// Borrows the value as a `V`, if that's what it holds
    #[inline]
    pub fn downcast_ref<V: PropertyType>(&self) -> Option<&V> {
        self.inner.as_any().downcast_ref::<V>()
    }

    /// Takes the value out as a `V`, or gives it back unchanged if it holds
    /// something else.
    pub fn downcast<V: PropertyType>(self) -> Result<V, Value> {
        if !self.is::<V>() {
            return Err(self);
        }
        match self.inner.into_any().downcast::<V>() {
            Ok(value) => Ok(*value),
            // `is` said yes, so the downcast cannot fail, but there is no
            // going back from `Box<dyn Any>` to a `Value` either.
            Err(_) => unreachable!("value changed type between `is` and `downcast`"),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_boxed(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt_debug(f)
    }
}
