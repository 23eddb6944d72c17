use wither_core::{Describe, Key, Wither};
use wither_reflect::{MutationSequence, WithError};
use wither_testhelpers::test;

use crate::fixtures::{Animal, Cat, Dog, Pet};

const NAME: Key<Box<dyn Animal>, String> = Key::new("name");

#[test]
fn rebuilds_the_concrete_type_behind_a_trait_object() {
    let pets: Vec<Box<dyn Animal>> = vec![
        Box::new(Dog {
            name: "Fang".to_owned(),
            good: false,
        }),
        Box::new(Cat {
            name: "Mrs Norris".to_owned(),
            lives: 9,
        }),
    ];

    let renamed = pets
        .iter()
        .map(|pet| MutationSequence::new(pet).with(NAME, "Padfoot".to_owned()).resolve())
        .collect::<Result<Vec<_>, _>>()?;

    assert_eq!(renamed[0].speak(), "Padfoot says woof");
    assert_eq!(renamed[1].speak(), "Padfoot ignores you");

    // properties only the concrete type knows about are carried over
    let dog = renamed[0].as_any().downcast_ref::<Dog>().unwrap();
    assert!(!dog.good);
    let cat = renamed[1].as_any().downcast_ref::<Cat>().unwrap();
    assert_eq!(cat.lives, 9);

    assert_eq!(pets[0].speak(), "Fang says woof");
}

#[test]
fn shape_comes_from_the_runtime_type() {
    let pet: Box<dyn Animal> = Box::new(Cat {
        name: "Crookshanks".to_owned(),
        lives: 9,
    });
    assert_eq!(pet.shape_of(), Cat::shape());

    // cats have no `good` property, whatever dogs do
    let err = MutationSequence::new(&pet)
        .with(Key::<Box<dyn Animal>, bool>::new("good"), true)
        .resolve()
        .err()
        .expect("cats have no `good` property");
    assert_eq!(
        err,
        WithError::PropertyNotFound {
            shape: Cat::shape(),
            property: "good".to_owned(),
        }
    );
}

#[test]
fn built_value_must_fit_back_in_the_box() {
    let dog: Box<dyn Pet> = Box::new(Dog {
        name: "Fang".to_owned(),
        good: true,
    });
    let renamed = MutationSequence::new(&dog)
        .with(Key::<Box<dyn Pet>, String>::new("name"), "Fluffy".to_owned())
        .resolve()?;
    assert_eq!(renamed.as_any().downcast_ref::<Dog>().unwrap().name, "Fluffy");

    let cat: Box<dyn Pet> = Box::new(Cat {
        name: "Crookshanks".to_owned(),
        lives: 9,
    });
    let err = MutationSequence::new(&cat)
        .with(Key::<Box<dyn Pet>, String>::new("name"), "Fluffy".to_owned())
        .resolve()
        .err()
        .expect("a cat cannot be boxed as a pet");
    assert_eq!(
        err,
        WithError::InstanceMismatch {
            shape: Cat::shape()
        }
    );
}

#[test]
fn concrete_types_work_directly_too() {
    let dog = Dog {
        name: "Fang".to_owned(),
        good: false,
    };
    let renamed = MutationSequence::new(&dog)
        .with(Dog::NAME, "Fluffy".to_owned())
        .resolve()?;
    assert_eq!(
        renamed,
        Dog {
            name: "Fluffy".to_owned(),
            good: false,
        }
    );
}
