use core::any::{Any, type_name};

use crate::{PropertyError, PropertyType, Value};

type InvokeFn =
    Box<dyn Fn(&mut Args) -> Result<Box<dyn Any + Send + Sync>, PropertyError> + Send + Sync>;

/// A way to create an instance of a type from positional arguments.
///
/// Parameter names are what edits and source properties are matched against
/// (after normalization with the shape's [`crate::NameCase`]), so they should
/// be spelled like the properties they initialize.
#[non_exhaustive]
pub struct Constructor {
    /// Parameter names, in positional order
    pub params: &'static [&'static str],

    /// Doc comment lines
    pub doc: &'static [&'static str],

    invoke: InvokeFn,
}

impl Constructor {
    /// Declares a constructor for `T` taking the given parameters.
    ///
    /// `build` pulls its arguments out of [`Args`] in order.
    pub fn new<T, F>(params: &'static [&'static str], build: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut Args) -> Result<T, PropertyError> + Send + Sync + 'static,
    {
        Self {
            params,
            doc: &[],
            invoke: Box::new(
                move |args: &mut Args| -> Result<Box<dyn Any + Send + Sync>, PropertyError> {
                    let built = build(args)?;
                    Ok(Box::new(built))
                },
            ),
        }
    }

    /// Sets the doc comment lines
    pub fn with_doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }

    /// Number of parameters
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Calls the constructor with one value per parameter.
    pub fn invoke(&self, values: Vec<Value>) -> Result<Box<dyn Any + Send + Sync>, PropertyError> {
        if values.len() < self.params.len() {
            return Err(PropertyError::MissingArgument {
                parameter: self.params.get(values.len()).copied(),
                index: values.len(),
            });
        }
        let mut args = Args {
            params: self.params,
            values: values.into_iter(),
            index: 0,
        };
        (self.invoke)(&mut args)
    }
}

impl core::fmt::Debug for Constructor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Constructor").field(&self.params).finish()
    }
}

/// Positional arguments handed to a [`Constructor`]
pub struct Args {
    params: &'static [&'static str],
    values: std::vec::IntoIter<Value>,
    index: usize,
}

impl Args {
    /// Takes the next argument as a `V`.
    pub fn take<V: PropertyType>(&mut self) -> Result<V, PropertyError> {
        let index = self.index;
        let parameter = self.params.get(index).copied();
        let value = self
            .values
            .next()
            .ok_or(PropertyError::MissingArgument { parameter, index })?;
        self.index += 1;

        value
            .downcast::<V>()
            .map_err(|value| PropertyError::ArgumentMismatch {
                parameter: parameter.unwrap_or("?"),
                expected: type_name::<V>(),
                actual: value.type_name(),
            })
    }

    /// Number of arguments not taken yet
    #[inline]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl core::fmt::Debug for Args {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Args")
            .field("params", &self.params)
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Picks the constructor with the most parameters. On a tie the first one
/// declared wins.
pub(crate) fn primary_index(constructors: &[Constructor]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (index, constructor) in constructors.iter().enumerate() {
        match best {
            Some((_, arity)) if arity >= constructor.arity() => {}
            _ => best = Some((index, constructor.arity())),
        }
    }
    best.map(|(index, _)| index)
}
