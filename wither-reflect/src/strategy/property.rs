#[cfg(feature = "log")]
use owo_colors::OwoColorize;

use super::Edits;
use crate::{Partial, Peek, WithError, trace};

/// Rebuilds through the parameterless constructor, then assigns every
/// property: edited ones from `edits`, the others copied from the source.
pub(super) fn rebuild(source: Peek<'_>, mut edits: Edits) -> Result<Partial, WithError> {
    let shape = source.shape();
    let constructor = shape
        .primary_constructor()
        .ok_or(WithError::NoConstructorFound { shape })?;
    let mut partial = Partial::construct(shape, constructor, Vec::new())?;

    for (name, property) in shape.property_table() {
        if let Some(value) = edits.shift_remove(name) {
            partial.set(name, property, value)?;
        } else if property.is_readable() && property.is_writable() {
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
