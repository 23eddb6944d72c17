#[cfg(feature = "log")]
use owo_colors::OwoColorize;
use wither_core::Value;

use super::deferred::{Entry, FactoryError};
use crate::{Peek, WithError, trace};

/// Turns sequence entries into concrete values, reading current values from
/// `source` when nothing earlier in the sequence provides them.
pub(crate) struct Resolver<'mem> {
    source: Peek<'mem>,
}

impl<'mem> Resolver<'mem> {
    pub(crate) fn new(source: Peek<'mem>) -> Self {
        Self { source }
    }

    /// Produces the value `entry` stands for. Deferred factories run here.
    pub(crate) fn resolve(&self, name: &str, entry: &Entry) -> Result<Value, WithError> {
        match entry {
            Entry::Value(value) => Ok(value.clone()),
            Entry::Deferred { deferred, prior } => {
                let current = if deferred.takes_current() {
                    let current = match prior {
                        Some(prior) => self.resolve(name, prior)?,
                        None => self.source.get(name)?,
                    };
                    Some(current)
                } else {
                    None
                };

                trace!(
                    "Running deferred {} for {}",
                    deferred.type_name().cyan(),
                    name.yellow()
                );
                deferred
                    .invoke(current)
                    .map_err(|err| self.factory_error(name, err))
            }
        }
    }

    fn factory_error(&self, name: &str, err: FactoryError) -> WithError {
        let shape = self.source.shape();
        match err {
            FactoryError::Failed(message) => WithError::FactoryFailed {
                shape,
                property: name.to_owned(),
                message,
            },
            FactoryError::TypeMismatch { expected, actual } => WithError::TypeMismatch {
                shape,
                property: name.to_owned(),
                expected,
                actual,
            },
            FactoryError::NoCurrentValue => WithError::FactoryFailed {
                shape,
                property: name.to_owned(),
                message: "no current value to update".to_owned(),
            },
        }
    }
}
