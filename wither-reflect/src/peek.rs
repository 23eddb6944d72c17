use core::any::Any;

use wither_core::{Property, PropertyError, Shape, Value, Wither};

use crate::WithError;

/// Lets you read from an instance through its [`Shape`]
#[derive(Clone, Copy)]
pub struct Peek<'mem> {
    data: &'mem dyn Any,
    shape: &'static Shape,
}

impl<'mem> Peek<'mem> {
    /// Creates a new `Peek` for `value`, looking through boxes to the
    /// concrete instance.
    pub fn new<T: Wither>(value: &'mem T) -> Self {
        Self {
            data: value.as_instance(),
            shape: value.shape_of(),
        }
    }

    /// Returns the shape of the concrete instance
    #[inline(always)]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Returns the concrete instance
    #[inline(always)]
    pub fn data(&self) -> &'mem dyn Any {
        self.data
    }

    /// Reads the property called `name`.
    pub fn get(&self, name: &str) -> Result<Value, WithError> {
        let property = self
            .shape
            .property(name)
            .ok_or_else(|| WithError::PropertyNotFound {
                shape: self.shape,
                property: name.to_owned(),
            })?;
        self.read(property)
            .map_err(|err| WithError::from_property(self.shape, name, err))
    }

    /// Reads `property`, which must belong to this instance's shape.
    #[inline]
    pub fn read(&self, property: &Property) -> Result<Value, PropertyError> {
        property.get(self.data)
    }

    /// Every property of the shape, with its current value if it could be
    /// read.
    pub fn properties(
        &self,
    ) -> impl Iterator<Item = (&'static Property, Result<Value, PropertyError>)> + '_ {
        self.shape
            .properties()
            .iter()
            .map(move |property| (property, self.read(property)))
    }
}

impl core::fmt::Debug for Peek<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut s = f.debug_struct(self.shape.type_identifier);
        for (property, value) in self.properties() {
            match value {
                Ok(value) => s.field(property.name, &value),
                Err(_) => s.field(property.name, &format_args!("<{}>", property.flags)),
            };
        }
        s.finish()
    }
}
