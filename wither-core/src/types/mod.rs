//! structs describing what a type looks like to the engine

use core::any::{Any, TypeId};
use core::marker::PhantomData;
use std::borrow::Cow;

use indexmap::IndexMap;

mod naming;
pub use naming::*;

mod property;
pub use property::*;

mod constructor;
pub use constructor::*;

mod construction;
pub use construction::*;

use crate::PropertyType;

/// Schema of a type: its constructors and its property table.
///
/// Shapes are built once per type (see [`crate::Describe`]) and then only
/// ever read, so they can be shared freely across threads.
#[non_exhaustive]
pub struct Shape {
    /// Unique type identifier, provided by the compiler.
    pub id: TypeId,

    /// Identifier for the type, for display purposes
    pub type_identifier: &'static str,

    /// Doc comment lines
    pub doc: &'static [&'static str],

    /// How names are normalized before matching
    pub naming: NameCase,

    properties: Vec<Property>,
    constructors: Vec<Constructor>,

    /// normalized name → index into `properties`
    table: IndexMap<String, usize>,
    primary: Option<usize>,
    construction: Option<Construction>,
}

impl Shape {
    /// Returns a builder for the shape of `T`.
    pub fn builder<T: Any + Send + Sync>(type_identifier: &'static str) -> ShapeBuilder<T> {
        ShapeBuilder::new(type_identifier)
    }

    /// Check if this shape is of the given type
    pub fn is_type<Other: Any>(&self) -> bool {
        self.id == TypeId::of::<Other>()
    }

    /// Normalizes `name` with this shape's [`NameCase`]
    #[inline]
    pub fn normalize<'a>(&self, name: &'a str) -> Cow<'a, str> {
        self.naming.normalize(name)
    }

    /// All properties, in declaration order
    #[inline]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Looks a property up by name. The name is normalized first.
    pub fn property(&self, name: &str) -> Option<&Property> {
        let key = self.normalize(name);
        self.table
            .get(&*key)
            .map(|&index| &self.properties[index])
    }

    /// The property table: normalized name and property, in declaration order.
    ///
    /// When two properties normalize to the same name, only the first one
    /// declared is reachable through the table.
    pub fn property_table(&self) -> impl Iterator<Item = (&str, &Property)> + '_ {
        self.table
            .iter()
            .map(|(name, &index)| (name.as_str(), &self.properties[index]))
    }

    /// All constructors, in declaration order
    #[inline]
    pub fn constructors(&self) -> &[Constructor] {
        &self.constructors
    }

    /// The constructor with the most parameters (first declared on a tie), if
    /// the type has any constructor at all.
    pub fn primary_constructor(&self) -> Option<&Constructor> {
        self.primary.map(|index| &self.constructors[index])
    }

    /// Returns true if `name` is a parameter of the primary constructor. The
    /// name is normalized first.
    pub fn is_constructor_parameter(&self, name: &str) -> bool {
        self.primary_constructor().is_some_and(|constructor| {
            constructor
                .params
                .iter()
                .any(|param| self.naming.matches(param, name))
        })
    }

    /// How instances of this type get rebuilt, or `None` if the type has no
    /// constructor.
    #[inline]
    pub fn construction(&self) -> Option<Construction> {
        self.construction
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Shape {}

impl core::hash::Hash for Shape {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl core::fmt::Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.type_identifier)
    }
}

impl core::fmt::Debug for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut debug_struct = f.debug_struct("Shape");
        debug_struct.field("type", &format_args!("{}", self));

        if let Some(construction) = self.construction {
            debug_struct.field("construction", &format_args!("{construction}"));
        }
        if let Some(primary) = self.primary_constructor() {
            debug_struct.field("primary", &primary.params);
        }
        debug_struct.field("properties", &self.properties);

        debug_struct.finish()
    }
}

/// Builder for [`Shape`]
pub struct ShapeBuilder<T> {
    type_identifier: &'static str,
    doc: &'static [&'static str],
    naming: NameCase,
    properties: Vec<Property>,
    constructors: Vec<Constructor>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ShapeBuilder<T> {
    /// Creates a new `ShapeBuilder` with no constructors and no properties.
    pub fn new(type_identifier: &'static str) -> Self {
        Self {
            type_identifier,
            doc: &[],
            naming: NameCase::default(),
            properties: Vec::new(),
            constructors: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Sets the `doc` field of the `ShapeBuilder`.
    #[inline]
    pub fn doc(mut self, doc: &'static [&'static str]) -> Self {
        self.doc = doc;
        self
    }

    /// Sets the naming rule used to match edits, properties and parameters.
    #[inline]
    pub fn naming(mut self, naming: NameCase) -> Self {
        self.naming = naming;
        self
    }

    /// Declares a constructor taking `params`, in that order.
    pub fn constructor<F>(mut self, params: &'static [&'static str], build: F) -> Self
    where
        F: Fn(&mut Args) -> Result<T, PropertyError> + Send + Sync + 'static,
    {
        self.constructors.push(Constructor::new(params, build));
        self
    }

    /// Declares a parameterless constructor backed by [`Default`].
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(&[], |_| Ok(T::default()))
    }

    /// Declares a read-only property.
    pub fn property<V, G>(self, name: &'static str, get: G) -> Self
    where
        V: PropertyType,
        G: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.property_with(PropertyBuilder::<T, V>::new(name).getter(get))
    }

    /// Declares a property with both a getter and a setter.
    pub fn property_mut<V, G, S>(self, name: &'static str, get: G, set: S) -> Self
    where
        V: PropertyType,
        G: Fn(&T) -> V + Send + Sync + 'static,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.property_with(PropertyBuilder::<T, V>::new(name).getter(get).setter(set))
    }

    /// Declares a property from a [`PropertyBuilder`], for anything the
    /// shortcuts don't cover (write-only properties, docs).
    pub fn property_with<V: PropertyType>(mut self, property: PropertyBuilder<T, V>) -> Self {
        self.properties.push(property.build());
        self
    }

    /// Builds a `Shape` from the `ShapeBuilder`, computing the property
    /// table, the primary constructor and the construction strategy.
    pub fn build(self) -> Shape {
        let mut table = IndexMap::with_capacity(self.properties.len());
        for (index, property) in self.properties.iter().enumerate() {
            table
                .entry(self.naming.normalize(property.name).into_owned())
                .or_insert(index);
        }

        let primary = primary_index(&self.constructors);
        let construction = Construction::infer(
            self.naming,
            &self.properties,
            primary.map(|index| &self.constructors[index]),
        );

        Shape {
            id: TypeId::of::<T>(),
            type_identifier: self.type_identifier,
            doc: self.doc,
            naming: self.naming,
            properties: self.properties,
            constructors: self.constructors,
            table,
            primary,
            construction,
        }
    }
}
