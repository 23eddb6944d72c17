#[cfg(feature = "log")]
use owo_colors::OwoColorize;

use super::{Edits, constructor};
use crate::{Partial, Peek, WithError, trace};

/// Rebuilds through the primary constructor, then assigns the edited
/// properties it does not take, then copies over every other writable
/// property the constructor does not cover.
pub(super) fn rebuild(source: Peek<'_>, mut edits: Edits) -> Result<Partial, WithError> {
    let shape = source.shape();
    let edited: Vec<String> = edits.keys().cloned().collect();

    let mut partial = constructor::construct(source, &mut edits)?;

    for (name, value) in edits {
        let property = shape
            .property(&name)
            .ok_or_else(|| WithError::PropertyNotFound {
                shape,
                property: name.clone(),
            })?;
        partial.set(&name, property, value)?;
    }

    for (name, property) in shape.property_table() {
        if shape.is_constructor_parameter(name) || edited.iter().any(|edit| edit == name) {
            continue;
        }
        if property.is_readable() && property.is_writable() {
            let value = source
                .read(property)
                .map_err(|err| WithError::from_property(shape, name, err))?;
            partial.set(name, property, value)?;
        } else {
            trace!("Leaving {} as constructed", name.yellow());
        }
    }

    Ok(partial)
}
