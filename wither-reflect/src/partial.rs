use core::any::Any;

#[cfg(feature = "log")]
use owo_colors::OwoColorize;
use wither_core::{Constructor, Property, Shape, Value};

use crate::{WithError, trace};

/// A freshly constructed instance whose properties are still being assigned.
pub struct Partial {
    shape: &'static Shape,
    value: Box<dyn Any + Send + Sync>,
}

impl Partial {
    /// Calls `constructor` of `shape` with one argument per parameter.
    pub fn construct(
        shape: &'static Shape,
        constructor: &Constructor,
        args: Vec<Value>,
    ) -> Result<Self, WithError> {
        trace!(
            "Constructing {} with ({})",
            shape.blue(),
            constructor.params.join(", ").yellow()
        );
        let value = constructor
            .invoke(args)
            .map_err(|err| WithError::from_property(shape, shape.type_identifier, err))?;
        Ok(Self { shape, value })
    }

    /// Returns the shape being built
    #[inline(always)]
    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    /// Assigns `value` to `property`, which the shape knows as `name`.
    pub fn set(&mut self, name: &str, property: &Property, value: Value) -> Result<(), WithError> {
        if !property.is_writable() {
            return Err(WithError::PropertyNotWritable {
                shape: self.shape,
                property: name.to_owned(),
            });
        }
        trace!("Setting {}::{} = {:?}", self.shape.blue(), name.yellow(), value);
        property
            .set(&mut *self.value, value)
            .map_err(|err| WithError::from_property(self.shape, name, err))
    }

    /// Returns the built instance
    pub fn build(self) -> Box<dyn Any + Send + Sync> {
        self.value
    }
}

impl core::fmt::Debug for Partial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Partial")
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}
