use super::{Constructor, NameCase, Property};

/// How a new instance of a type gets built from an old one plus edits.
///
/// This is inferred once, when the [`crate::Shape`] is built, purely from
/// the declared constructors and properties.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Construction {
    /// Build through a parameterless constructor, then assign every property
    /// through its setter.
    PropertyOnly,

    /// Build through the primary constructor only: every writable property is
    /// one of its parameters.
    ConstructorOnly,

    /// Build through the primary constructor, then assign the remaining
    /// writable properties through their setters.
    Mixed,
}

impl Construction {
    pub(crate) fn infer(
        naming: NameCase,
        properties: &[Property],
        primary: Option<&Constructor>,
    ) -> Option<Self> {
        let primary = primary?;
        if primary.params.is_empty() {
            return Some(Construction::PropertyOnly);
        }

        let outside_constructor = properties.iter().any(|property| {
            property.is_writable()
                && !primary
                    .params
                    .iter()
                    .any(|param| naming.matches(param, property.name))
        });

        if outside_constructor {
            Some(Construction::Mixed)
        } else {
            Some(Construction::ConstructorOnly)
        }
    }
}

impl core::fmt::Display for Construction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Construction::PropertyOnly => write!(f, "property-only"),
            Construction::ConstructorOnly => write!(f, "constructor-only"),
            Construction::Mixed => write!(f, "mixed constructor and properties"),
        }
    }
}
