use std::sync::LazyLock;

use wither_core::{
    Describe, Instance, Key, PropertyBuilder, PropertyError, Shape, impl_wither,
};

/// id, name, age
pub type Fields = (Option<&'static str>, Option<&'static str>, Option<u32>);

pub fn owned(s: Option<&str>) -> Option<String> {
    s.map(str::to_owned)
}

/// Every property is read-only: rebuilt through the constructor alone.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceWithConstructor {
    id: Option<String>,
    name: Option<String>,
    age: Option<u32>,
}

impl SourceWithConstructor {
    pub const ID: Key<Self, Option<String>> = Key::new("id");
    pub const NAME: Key<Self, Option<String>> = Key::new("name");
    pub const AGE: Key<Self, Option<u32>> = Key::new("age");
}

impl From<Fields> for SourceWithConstructor {
    fn from((id, name, age): Fields) -> Self {
        Self {
            id: owned(id),
            name: owned(name),
            age,
        }
    }
}

impl Describe for SourceWithConstructor {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::builder::<SourceWithConstructor>("SourceWithConstructor")
                .constructor(&["id", "name", "age"], |args| {
                    Ok(SourceWithConstructor {
                        id: args.take()?,
                        name: args.take()?,
                        age: args.take()?,
                    })
                })
                .property("Id", |s: &SourceWithConstructor| s.id.clone())
                .property("Name", |s: &SourceWithConstructor| s.name.clone())
                .property("Age", |s: &SourceWithConstructor| s.age)
                .build()
        });
        &SHAPE
    }
}

/// Parameterless constructor, every property settable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceWithSetters {
    id: Option<String>,
    name: Option<String>,
    age: Option<u32>,
}

impl SourceWithSetters {
    pub const ID: Key<Self, Option<String>> = Key::new("id");
    pub const NAME: Key<Self, Option<String>> = Key::new("name");
    pub const AGE: Key<Self, Option<u32>> = Key::new("age");
}

impl From<Fields> for SourceWithSetters {
    fn from((id, name, age): Fields) -> Self {
        Self {
            id: owned(id),
            name: owned(name),
            age,
        }
    }
}

impl Describe for SourceWithSetters {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::builder::<SourceWithSetters>("SourceWithSetters")
                .default_constructor()
                .property_mut(
                    "Id",
                    |s: &SourceWithSetters| s.id.clone(),
                    |s, v| s.id = v,
                )
                .property_mut(
                    "Name",
                    |s: &SourceWithSetters| s.name.clone(),
                    |s, v| s.name = v,
                )
                .property_mut("Age", |s: &SourceWithSetters| s.age, |s, v| s.age = v)
                .build()
        });
        &SHAPE
    }
}

/// `id` and `name` go through the constructor, `age` through its setter.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceWithMixedConstructorAndSetters {
    id: Option<String>,
    name: Option<String>,
    age: Option<u32>,
}

impl SourceWithMixedConstructorAndSetters {
    pub const ID: Key<Self, Option<String>> = Key::new("id");
    pub const NAME: Key<Self, Option<String>> = Key::new("name");
    pub const AGE: Key<Self, Option<u32>> = Key::new("age");
}

impl From<Fields> for SourceWithMixedConstructorAndSetters {
    fn from((id, name, age): Fields) -> Self {
        Self {
            id: owned(id),
            name: owned(name),
            age,
        }
    }
}

impl Describe for SourceWithMixedConstructorAndSetters {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::builder::<SourceWithMixedConstructorAndSetters>(
                "SourceWithMixedConstructorAndSetters",
            )
            .constructor(&["id", "name"], |args| {
                Ok(SourceWithMixedConstructorAndSetters {
                    id: args.take()?,
                    name: args.take()?,
                    age: None,
                })
            })
            .property("Id", |s: &SourceWithMixedConstructorAndSetters| {
                s.id.clone()
            })
            .property("Name", |s: &SourceWithMixedConstructorAndSetters| {
                s.name.clone()
            })
            .property_mut(
                "Age",
                |s: &SourceWithMixedConstructorAndSetters| s.age,
                |s, v| s.age = v,
            )
            .build()
        });
        &SHAPE
    }
}

impl_wither!(
    SourceWithConstructor,
    SourceWithSetters,
    SourceWithMixedConstructorAndSetters
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum House {
    Gryffindor,
    Slytherin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub name: String,
    pub house: House,
}

impl Student {
    pub const NAME: Key<Self, String> = Key::new("name");
    pub const HOUSE: Key<Self, House> = Key::new("house");

    pub fn new(name: &str, house: House) -> Self {
        Self {
            name: name.to_owned(),
            house,
        }
    }
}

impl Describe for Student {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::builder::<Student>("Student")
                .constructor(&["name", "house"], |args| {
                    Ok(Student {
                        name: args.take()?,
                        house: args.take()?,
                    })
                })
                .property("Name", |s: &Student| s.name.clone())
                .property("House", |s: &Student| s.house)
                .build()
        });
        &SHAPE
    }
}

/// Parameterless constructor, with a read-only and a write-only property.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub volume: u8,
    pub serial: u64,
    pub password: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 5,
            serial: 1000,
            password: None,
        }
    }
}

impl Settings {
    pub const VOLUME: Key<Self, u8> = Key::new("volume");
    pub const SERIAL: Key<Self, u64> = Key::new("serial");
    pub const PASSWORD: Key<Self, Option<String>> = Key::new("password");
}

impl Describe for Settings {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::builder::<Settings>("Settings")
                .default_constructor()
                .property_mut("Volume", |s: &Settings| s.volume, |s, v| s.volume = v)
                .property("Serial", |s: &Settings| s.serial)
                .property_with(
                    PropertyBuilder::<Settings, Option<String>>::new("Password")
                        .setter(|s, v| s.password = v),
                )
                .build()
        });
        &SHAPE
    }
}

/// The constructor takes a `secret` that no property exposes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    secret: String,
    pub label: String,
}

impl Token {
    pub const SECRET: Key<Self, String> = Key::new("secret");
    pub const LABEL: Key<Self, String> = Key::new("label");

    pub fn new(secret: &str, label: &str) -> Self {
        Self {
            secret: secret.to_owned(),
            label: label.to_owned(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl Describe for Token {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::builder::<Token>("Token")
                .constructor(&["secret", "label"], |args| {
                    Ok(Token {
                        secret: args.take()?,
                        label: args.take()?,
                    })
                })
                .property("Label", |t: &Token| t.label.clone())
                .build()
        });
        &SHAPE
    }
}

/// The constructor refuses values above 100.
#[derive(Debug, Clone, PartialEq)]
pub struct Percentage {
    pub value: u8,
}

impl Percentage {
    pub const VALUE: Key<Self, u8> = Key::new("value");
}

impl Describe for Percentage {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::builder::<Percentage>("Percentage")
                .constructor(&["value"], |args| {
                    let value: u8 = args.take()?;
                    if value > 100 {
                        return Err(PropertyError::Rejected(format!(
                            "{value} is more than 100"
                        )));
                    }
                    Ok(Percentage { value })
                })
                .property("Value", |p: &Percentage| p.value)
                .build()
        });
        &SHAPE
    }
}

/// Readable, but there is no way to build one.
#[derive(Debug, Clone, PartialEq)]
pub struct Opaque {
    pub value: u32,
}

impl Opaque {
    pub const VALUE: Key<Self, u32> = Key::new("value");
}

impl Describe for Opaque {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::builder::<Opaque>("Opaque")
                .property("Value", |o: &Opaque| o.value)
                .build()
        });
        &SHAPE
    }
}

impl_wither!(Student, Settings, Token, Percentage, Opaque, Dog, Cat);

pub trait Animal: Instance {
    fn speak(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dog {
    pub name: String,
    pub good: bool,
}

impl Dog {
    pub const NAME: Key<Self, String> = Key::new("name");
}

impl Animal for Dog {
    fn speak(&self) -> String {
        format!("{} says woof", self.name)
    }
}

impl Describe for Dog {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::builder::<Dog>("Dog")
                .constructor(&["name"], |args| {
                    Ok(Dog {
                        name: args.take()?,
                        good: true,
                    })
                })
                .property("Name", |d: &Dog| d.name.clone())
                .property_mut("Good", |d: &Dog| d.good, |d, v| d.good = v)
                .build()
        });
        &SHAPE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cat {
    pub name: String,
    pub lives: u8,
}

impl Animal for Cat {
    fn speak(&self) -> String {
        format!("{} ignores you", self.name)
    }
}

impl Describe for Cat {
    fn shape() -> &'static Shape {
        static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
            Shape::builder::<Cat>("Cat")
                .constructor(&["name", "lives"], |args| {
                    Ok(Cat {
                        name: args.take()?,
                        lives: args.take()?,
                    })
                })
                .property("Name", |c: &Cat| c.name.clone())
                .property("Lives", |c: &Cat| c.lives)
                .build()
        });
        &SHAPE
    }
}

impl_wither!(dyn Animal => Dog, Cat);

/// Only dogs can be rebuilt behind this trait.
pub trait Pet: Instance {}

impl Pet for Dog {}
impl Pet for Cat {}

impl_wither!(dyn Pet => Dog);
