use wither_core::{PropertyError, SelectorError, Shape};
use owo_colors::OwoColorize;

/// Errors that can occur when rebuilding a value with edits.
#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum WithError {
    /// A required argument was missing or meaningless, like an empty
    /// property name
    InvalidArgument {
        /// What was wrong with it
        reason: String,
    },

    /// A selector does not denote a single, direct property access
    InvalidSelector {
        /// The offending selector
        selector: String,
    },

    /// The type has no accessible constructor
    NoConstructorFound {
        /// The shape that could not be constructed
        shape: &'static Shape,
    },

    /// An edit names something that is neither a property nor a parameter
    /// of the primary constructor
    PropertyNotFound {
        /// The shape that was searched
        shape: &'static Shape,
        /// The name that was looked up
        property: String,
    },

    /// An edit targets a property that can only be set at construction time,
    /// or not at all
    PropertyNotWritable {
        /// The shape holding the property
        shape: &'static Shape,
        /// The property name
        property: String,
    },

    /// A property value was needed from the source, but the property has no
    /// getter
    PropertyNotReadable {
        /// The shape holding the property
        shape: &'static Shape,
        /// The property name
        property: String,
    },

    /// A constructor parameter was not edited, and the source has no readable
    /// property of the same name to take it from
    MissingSourceValue {
        /// The shape being constructed
        shape: &'static Shape,
        /// The constructor parameter
        parameter: &'static str,
    },

    /// A value does not have the type its destination expects
    TypeMismatch {
        /// The shape holding the property
        shape: &'static Shape,
        /// The property or constructor parameter
        property: String,
        /// The type that was expected
        expected: &'static str,
        /// The type that was supplied
        actual: &'static str,
    },

    /// The constructor refused its arguments
    ConstructorRejected {
        /// The shape being constructed
        shape: &'static Shape,
        /// Why
        reason: String,
    },

    /// A deferred value failed to produce a value
    FactoryFailed {
        /// The shape the value was meant for
        shape: &'static Shape,
        /// The property the value was meant for
        property: String,
        /// What the factory reported
        message: String,
    },

    /// A freshly built value could not be turned back into the type the
    /// edits were applied to
    InstanceMismatch {
        /// The shape that was built
        shape: &'static Shape,
    },
}

impl WithError {
    /// Attaches context to an error raised by a property accessor or a
    /// constructor of `shape`, working on `property`.
    pub fn from_property(shape: &'static Shape, property: &str, err: PropertyError) -> Self {
        match err {
            PropertyError::NotReadable => WithError::PropertyNotReadable {
                shape,
                property: property.to_owned(),
            },
            PropertyError::NotWritable => WithError::PropertyNotWritable {
                shape,
                property: property.to_owned(),
            },
            PropertyError::WrongInstance { .. } => WithError::InstanceMismatch { shape },
            PropertyError::TypeMismatch { expected, actual } => WithError::TypeMismatch {
                shape,
                property: property.to_owned(),
                expected,
                actual,
            },
            PropertyError::ArgumentMismatch {
                parameter,
                expected,
                actual,
            } => WithError::TypeMismatch {
                shape,
                property: parameter.to_owned(),
                expected,
                actual,
            },
            PropertyError::Rejected(reason) => WithError::ConstructorRejected { shape, reason },
            other => WithError::ConstructorRejected {
                shape,
                reason: other.to_string(),
            },
        }
    }
}

impl From<SelectorError> for WithError {
    fn from(err: SelectorError) -> Self {
        match err {
            SelectorError::NotSimpleAccess { selector } => WithError::InvalidSelector { selector },
            other => WithError::InvalidArgument {
                reason: other.to_string(),
            },
        }
    }
}

impl core::fmt::Display for WithError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WithError::InvalidArgument { reason } => {
                write!(f, "Invalid argument: {}", reason.red())
            }
            WithError::InvalidSelector { selector } => {
                write!(
                    f,
                    "Cannot retrieve a property from '{}': only direct property access is allowed",
                    selector.red()
                )
            }
            WithError::NoConstructorFound { shape } => {
                write!(f, "No accessible constructor found on '{}'", shape.blue())
            }
            WithError::PropertyNotFound { shape, property } => {
                write!(
                    f,
                    "'{}' has no property or constructor parameter named '{}'",
                    shape.blue(),
                    property.yellow()
                )
            }
            WithError::PropertyNotWritable { shape, property } => {
                write!(
                    f,
                    "Property '{}::{}' cannot be set",
                    shape.blue(),
                    property.yellow()
                )
            }
            WithError::PropertyNotReadable { shape, property } => {
                write!(
                    f,
                    "Property '{}::{}' cannot be read",
                    shape.blue(),
                    property.yellow()
                )
            }
            WithError::MissingSourceValue { shape, parameter } => {
                write!(
                    f,
                    "No value for constructor parameter '{}' of '{}': it was not edited, and there is no readable property to copy",
                    parameter.yellow(),
                    shape.blue()
                )
            }
            WithError::TypeMismatch {
                shape,
                property,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Wrong type for '{}::{}': expected {}, but got {}",
                    shape.blue(),
                    property.yellow(),
                    expected.green(),
                    actual.red()
                )
            }
            WithError::ConstructorRejected { shape, reason } => {
                write!(
                    f,
                    "Constructor of '{}' failed: {}",
                    shape.blue(),
                    reason.red()
                )
            }
            WithError::FactoryFailed {
                shape,
                property,
                message,
            } => {
                write!(
                    f,
                    "Deferred value for '{}::{}' failed: {}",
                    shape.blue(),
                    property.yellow(),
                    message.red()
                )
            }
            WithError::InstanceMismatch { shape } => {
                write!(
                    f,
                    "Built a '{}', which is not something the edited value can hold",
                    shape.blue()
                )
            }
        }
    }
}

impl core::error::Error for WithError {}
