#[cfg(feature = "log")]
use owo_colors::OwoColorize;

use super::Edits;
use crate::{Partial, Peek, WithError, trace};

/// Calls the primary constructor, taking each argument from the edit for
/// that parameter if there is one, and from the source instance otherwise.
///
/// Edits consumed as arguments are removed from `edits`.
pub(super) fn construct(source: Peek<'_>, edits: &mut Edits) -> Result<Partial, WithError> {
    let shape = source.shape();
    let constructor = shape
        .primary_constructor()
        .ok_or(WithError::NoConstructorFound { shape })?;

    let mut args = Vec::with_capacity(constructor.arity());
    for &param in constructor.params {
        let key = shape.normalize(param);
        let value = match edits.shift_remove(&*key) {
            Some(value) => {
                trace!("Parameter {} taken from edits", param.yellow());
                value
            }
            None => {
                let property = shape
                    .property(param)
                    .filter(|property| property.is_readable())
                    .ok_or(WithError::MissingSourceValue {
                        shape,
                        parameter: param,
                    })?;
                trace!("Parameter {} copied from source", param.yellow());
                source
                    .read(property)
                    .map_err(|err| WithError::from_property(shape, param, err))?
            }
        };
        args.push(value);
    }

    Partial::construct(shape, constructor, args)
}

/// Rebuilds through the primary constructor alone.
pub(super) fn rebuild(source: Peek<'_>, mut edits: Edits) -> Result<Partial, WithError> {
    let partial = construct(source, &mut edits)?;

    // what's left names properties the constructor has no parameter for
    match edits.keys().next() {
        Some(name) => Err(WithError::PropertyNotWritable {
            shape: source.shape(),
            property: name.clone(),
        }),
        None => Ok(partial),
    }
}
