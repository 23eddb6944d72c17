//! The three ways of rebuilding an instance, picked from the shape's
//! [`Construction`].

use core::any::Any;

use indexmap::IndexMap;
#[cfg(feature = "log")]
use owo_colors::OwoColorize;
use wither_core::{Construction, Shape, Value};

use crate::{Peek, WithError, debug};

mod constructor;
mod mixed;
mod property;

/// Edits keyed by normalized name, oldest write first
pub(crate) type Edits = IndexMap<String, Value>;

/// Builds a new instance of `source`'s shape, with `edits` applied.
pub(crate) fn rebuild(
    source: Peek<'_>,
    edits: Edits,
) -> Result<Box<dyn Any + Send + Sync>, WithError> {
    let shape = source.shape();
    let construction = shape
        .construction()
        .ok_or(WithError::NoConstructorFound { shape })?;
    validate(shape, &edits)?;

    debug!(
        "Rebuilding {} ({}) with {}",
        shape.blue(),
        construction.cyan(),
        edits.keys().map(String::as_str).collect::<Vec<_>>().join(", ").yellow()
    );

    let partial = match construction {
        Construction::PropertyOnly => property::rebuild(source, edits)?,
        Construction::ConstructorOnly => constructor::rebuild(source, edits)?,
        Construction::Mixed => mixed::rebuild(source, edits)?,
    };
    Ok(partial.build())
}

/// Every edit must name a property or a parameter of the primary constructor.
fn validate(shape: &'static Shape, edits: &Edits) -> Result<(), WithError> {
    match edits
        .keys()
        .find(|name| shape.property(name).is_none() && !shape.is_constructor_parameter(name))
    {
        Some(name) => Err(WithError::PropertyNotFound {
            shape,
            property: name.clone(),
        }),
        None => Ok(()),
    }
}
