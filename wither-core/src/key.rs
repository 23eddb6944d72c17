use core::marker::PhantomData;

/// A typed token naming property `V` of `T`.
///
/// Keys are usually declared as associated constants next to the type:
///
/// ```
/// use wither_core::Key;
///
/// struct Student {
///     name: String,
/// }
///
/// impl Student {
///     const NAME: Key<Student, String> = Key::new("name");
/// }
///
/// assert_eq!(Student::NAME.name(), "name");
/// ```
///
/// Whether `T` actually has such a property is only checked when an edit is
/// applied, against `T`'s shape.
pub struct Key<T, V> {
    name: &'static str,
    _marker: PhantomData<fn(&T) -> V>,
}

impl<T, V> Key<T, V> {
    /// Creates a key for the property called `name`.
    ///
    /// # Panics
    ///
    /// If `name` is not a simple property name (see [`is_simple_access`]).
    /// In a `const` this is a compile-time error.
    pub const fn new(name: &'static str) -> Self {
        assert!(
            is_simple_access(name),
            "a key must name exactly one property, like `age`"
        );
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// Creates a key for the property called `name`, or explains why `name`
    /// does not denote a single property.
    pub fn parse(name: &'static str) -> Result<Self, SelectorError> {
        check(name)?;
        Ok(Self {
            name,
            _marker: PhantomData,
        })
    }

    /// The property name
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T, V> Clone for Key<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Key<T, V> {}

impl<T, V> PartialEq for Key<T, V> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T, V> Eq for Key<T, V> {}

impl<T, V> core::fmt::Debug for Key<T, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Key<{}>({})",
            core::any::type_name::<T>(),
            self.name
        )
    }
}

/// Something that denotes a single property of a type
pub trait Selector {
    /// Resolves the selector to a property name
    fn property_name(&self) -> Result<&str, SelectorError>;
}

impl<T, V> Selector for Key<T, V> {
    fn property_name(&self) -> Result<&str, SelectorError> {
        Ok(self.name)
    }
}

impl Selector for str {
    fn property_name(&self) -> Result<&str, SelectorError> {
        check(self)?;
        Ok(self)
    }
}

impl Selector for String {
    fn property_name(&self) -> Result<&str, SelectorError> {
        self.as_str().property_name()
    }
}

impl<S: Selector + ?Sized> Selector for &S {
    fn property_name(&self) -> Result<&str, SelectorError> {
        (**self).property_name()
    }
}

/// Resolves a selector to the name of the property it denotes.
pub fn resolve_name<S: Selector + ?Sized>(selector: &S) -> Result<&str, SelectorError> {
    selector.property_name()
}

/// Returns true if `name` is a plain identifier: not empty, made of letters,
/// digits and underscores, not starting with a digit. Paths (`a.b`), calls
/// (`a()`), indexing (`a[0]`) and anything with whitespace are rejected.
pub const fn is_simple_access(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes[0].is_ascii_digit() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        // non-ASCII bytes are let through so that unicode identifiers work
        if !(b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80) {
            return false;
        }
        i += 1;
    }
    true
}

fn check(name: &str) -> Result<(), SelectorError> {
    if name.is_empty() {
        Err(SelectorError::Empty)
    } else if !is_simple_access(name) {
        Err(SelectorError::NotSimpleAccess {
            selector: name.to_owned(),
        })
    } else {
        Ok(())
    }
}

/// Errors encountered when resolving a selector to a property name
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectorError {
    /// The selector was empty
    Empty,

    /// The selector does not denote a direct property access
    NotSimpleAccess {
        /// the offending selector
        selector: String,
    },
}

impl core::error::Error for SelectorError {}

impl core::fmt::Display for SelectorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SelectorError::Empty => write!(f, "Property name is empty"),
            SelectorError::NotSimpleAccess { selector } => {
                write!(f, "Cannot retrieve a property from '{selector}'")
            }
        }
    }
}
