#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use core::any::Any;

mod macros;

// Type-erased property values
mod value;
pub use value::*;

// Typed property keys and selector resolution
mod key;
pub use key::*;

// Type definitions
mod types;
pub use types::*;

/// Allows querying the [`Shape`] of a type: its constructors and the
/// properties that can be read from, and written to, an instance.
///
/// The shape is built once and must stay the same for the lifetime of the
/// process; the usual way to do that is a `static` [`std::sync::LazyLock`].
pub trait Describe: Sized + Any + Send + Sync {
    /// The shape of this type
    fn shape() -> &'static Shape;
}

/// Object-safe view of a described value.
///
/// Traits whose objects should be rebuildable (see [`impl_wither!`]) take
/// this as a supertrait; it is implemented for every [`Describe`] type.
pub trait Instance: Any + Send + Sync {
    /// Shape of the concrete type of this value
    fn instance_shape(&self) -> &'static Shape;

    /// This value, as something the shape's accessors can read
    fn as_any(&self) -> &dyn Any;
}

impl<T: Describe> Instance for T {
    fn instance_shape(&self) -> &'static Shape {
        T::shape()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A nominal type whose values can be rebuilt with some properties changed.
///
/// For a concrete type, the nominal type and the runtime type are the same.
/// For a boxed trait object, the shape to inspect is only known once there is
/// an instance to look at, which is why every method here takes `&self`.
///
/// Use [`impl_wither!`] rather than implementing this by hand.
pub trait Wither: Sized + Send + Sync + 'static {
    /// Shape of the concrete runtime type behind this value
    fn shape_of(&self) -> &'static Shape;

    /// The concrete value, as something the shape's accessors can read
    fn as_instance(&self) -> &dyn Any;

    /// Turns a value freshly built from `self`'s shape back into `Self`.
    ///
    /// Returns `None` if `built` is not of a type `Self` can hold.
    fn rewrap(&self, built: Box<dyn Any + Send + Sync>) -> Option<Self>;
}
