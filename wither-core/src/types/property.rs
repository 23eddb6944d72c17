use core::any::{Any, type_name};
use core::marker::PhantomData;

use bitflags::bitflags;

use crate::{PropertyType, Value};

type GetFn = Box<dyn Fn(&dyn Any) -> Result<Value, PropertyError> + Send + Sync>;
type SetFn = Box<dyn Fn(&mut dyn Any, Value) -> Result<(), PropertyError> + Send + Sync>;

/// Describes a public property of a type: something that can be read from an
/// instance, written to an instance, or both.
#[non_exhaustive]
pub struct Property {
    /// Name of the property as declared (before normalization)
    pub name: &'static str,

    /// Declared type of the property, as given by [`core::any::type_name`]
    pub type_name: &'static str,

    /// Whether the property can be read and/or written
    pub flags: PropertyFlags,

    /// Doc comment lines
    pub doc: &'static [&'static str],

    vtable: PropertyVTable,
}

/// Erased accessors for a property
struct PropertyVTable {
    get: Option<GetFn>,
    set: Option<SetFn>,
}

impl Property {
    /// Returns a builder for a property of type `V` on instances of `T`
    pub fn builder<T, V>(name: &'static str) -> PropertyBuilder<T, V>
    where
        T: Any + Send + Sync,
        V: PropertyType,
    {
        PropertyBuilder::new(name)
    }

    /// Returns true if the property has a getter
    #[inline]
    pub fn is_readable(&self) -> bool {
        self.flags.contains(PropertyFlags::READABLE)
    }

    /// Returns true if the property has a setter
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.flags.contains(PropertyFlags::WRITABLE)
    }

    /// Reads the property from `instance`, which must be of the type this
    /// property was declared on.
    pub fn get(&self, instance: &dyn Any) -> Result<Value, PropertyError> {
        match &self.vtable.get {
            Some(get) => get(instance),
            None => Err(PropertyError::NotReadable),
        }
    }

    /// Writes `value` into the property of `instance`.
    pub fn set(&self, instance: &mut dyn Any, value: Value) -> Result<(), PropertyError> {
        match &self.vtable.set {
            Some(set) => set(instance, value),
            None => Err(PropertyError::NotWritable),
        }
    }
}

impl core::fmt::Debug for Property {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("type", &self.type_name)
            .field("flags", &format_args!("{}", self.flags))
            .finish()
    }
}

/// Builder for [`Property`]
pub struct PropertyBuilder<T, V> {
    name: &'static str,
    doc: &'static [&'static str],
    get: Option<GetFn>,
    set: Option<SetFn>,
    _marker: PhantomData<fn(&T) -> V>,
}

impl<T, V> PropertyBuilder<T, V>
where
    T: Any + Send + Sync,
    V: PropertyType,
{
    /// Creates a builder with neither getter nor setter
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            doc: &[],
            get: None,
            set: None,
            _marker: PhantomData,
        }
    }

    /// Sets the getter
    pub fn getter<F>(mut self, get: F) -> Self
    where
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.get = Some(Box::new(
            move |instance: &dyn Any| -> Result<Value, PropertyError> {
                let instance =
                    instance
                        .downcast_ref::<T>()
                        .ok_or(PropertyError::WrongInstance {
                            expected: type_name::<T>(),
                        })?;
                Ok(Value::new(get(instance)))
            },
        ));
        self
    }

    /// Sets the setter
    pub fn setter<F>(mut self, set: F) -> Self
    where
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.set = Some(Box::new(
            move |instance: &mut dyn Any, value: Value| -> Result<(), PropertyError> {
                let instance =
                    instance
                        .downcast_mut::<T>()
                        .ok_or(PropertyError::WrongInstance {
                            expected: type_name::<T>(),
                        })?;
                let value = value
                    .downcast::<V>()
                    .map_err(|value| PropertyError::TypeMismatch {
                        expected: type_name::<V>(),
                        actual: value.type_name(),
                    })?;
                set(instance, value);
                Ok(())
            },
        ));
        self
    }

    /// Sets the doc comment lines
    pub fn doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }

    /// Builds the Property
    pub fn build(self) -> Property {
        let mut flags = PropertyFlags::EMPTY;
        if self.get.is_some() {
            flags |= PropertyFlags::READABLE;
        }
        if self.set.is_some() {
            flags |= PropertyFlags::WRITABLE;
        }
        Property {
            name: self.name,
            type_name: type_name::<V>(),
            flags,
            doc: self.doc,
            vtable: PropertyVTable {
                get: self.get,
                set: self.set,
            },
        }
    }
}

bitflags! {
    /// What can be done with a property
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// An empty set of flags
        const EMPTY = 0;

        /// The property has a getter
        const READABLE = 1 << 0;

        /// The property has a setter, so it can be assigned after construction
        const WRITABLE = 1 << 1;
    }
}

impl Default for PropertyFlags {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl core::fmt::Display for PropertyFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }

        let flags = [
            (PropertyFlags::READABLE, "get"),
            (PropertyFlags::WRITABLE, "set"),
        ];

        let mut is_first = true;
        for (flag, name) in flags {
            if self.contains(flag) {
                if !is_first {
                    write!(f, "; ")?;
                }
                is_first = false;
                write!(f, "{}", name)?;
            }
        }

        Ok(())
    }
}

/// Errors encountered when reading or writing a property, or when feeding
/// arguments to a constructor
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PropertyError {
    /// The property has no getter
    NotReadable,

    /// The property has no setter
    NotWritable,

    /// The instance handed to an accessor is not of the type the property was
    /// declared on
    WrongInstance {
        /// the type the accessor expected
        expected: &'static str,
    },

    /// A value of the wrong type was written into a property
    TypeMismatch {
        /// the declared type of the property
        expected: &'static str,

        /// the type of the value someone tried to write
        actual: &'static str,
    },

    /// A constructor argument has the wrong type
    ArgumentMismatch {
        /// name of the parameter
        parameter: &'static str,

        /// type the constructor asked for
        expected: &'static str,

        /// type of the value that was supplied
        actual: &'static str,
    },

    /// A constructor asked for more arguments than it declared parameters
    MissingArgument {
        /// name of the parameter, if the constructor declared one at that position
        parameter: Option<&'static str>,

        /// 0-based position of the argument
        index: usize,
    },

    /// A constructor refused its arguments
    Rejected(String),
}

impl core::error::Error for PropertyError {}

impl core::fmt::Display for PropertyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PropertyError::NotReadable => write!(f, "Property has no getter"),
            PropertyError::NotWritable => write!(f, "Property has no setter"),
            PropertyError::WrongInstance { expected } => {
                write!(f, "Accessor called on something that isn't a {expected}")
            }
            PropertyError::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, actual)
            }
            PropertyError::ArgumentMismatch {
                parameter,
                expected,
                actual,
            } => write!(
                f,
                "Argument '{parameter}' has the wrong type: expected {expected}, got {actual}"
            ),
            PropertyError::MissingArgument { parameter, index } => match parameter {
                Some(parameter) => write!(f, "Missing argument '{parameter}' (#{index})"),
                None => write!(f, "Missing argument #{index}"),
            },
            PropertyError::Rejected(reason) => write!(f, "Constructor rejected its arguments: {reason}"),
        }
    }
}
