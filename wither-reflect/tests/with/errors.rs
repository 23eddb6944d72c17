use wither_core::{Describe, Value};
use wither_reflect::{MutationSequence, PendingEdits, WithError, WithSequence, apply_edits};
use wither_testhelpers::test;

use crate::fixtures::{
    Opaque, Percentage, Settings, SourceWithConstructor, SourceWithSetters, Token, owned,
};

#[test]
fn unknown_property() {
    let source = SourceWithSetters::from((None, None, None));
    let mut edits = PendingEdits::new();
    edits.insert("nickname", owned(Some("Ronnie")))?;

    let err = apply_edits(&source, &edits).unwrap_err();
    assert_eq!(
        err,
        WithError::PropertyNotFound {
            shape: SourceWithSetters::shape(),
            property: "nickname".to_owned(),
        }
    );
    assert!(err.to_string().contains("nickname"));
    assert_eq!(source, SourceWithSetters::from((None, None, None)));
}

#[test]
fn unknown_property_is_reported_before_anything_is_built() {
    let source = Percentage { value: 10 };
    let mut edits = PendingEdits::new();
    edits.insert("value", 200u8)?;
    edits.insert("ratio", 0.5f64)?;

    // the constructor would reject 200, but validation comes first
    let err = apply_edits(&source, &edits).unwrap_err();
    assert!(matches!(err, WithError::PropertyNotFound { property, .. } if property == "ratio"));
}

#[test]
fn read_only_property_of_a_settable_type() {
    let source = Settings::default();
    let err = MutationSequence::new(&source)
        .with(Settings::SERIAL, 42)
        .resolve()
        .unwrap_err();
    assert_eq!(
        err,
        WithError::PropertyNotWritable {
            shape: Settings::shape(),
            property: "serial".to_owned(),
        }
    );
}

#[test]
fn read_only_properties_are_left_as_constructed() {
    let source = Settings {
        volume: 9,
        serial: 31337,
        password: Some("hunter2".to_owned()),
    };
    let result = MutationSequence::new(&source)
        .with(Settings::VOLUME, 11)
        .resolve()?;

    assert_eq!(result.volume, 11);
    // neither can be copied: one has no setter, the other no getter
    assert_eq!(result.serial, 1000);
    assert_eq!(result.password, None);

    let result = MutationSequence::new(&source)
        .with(Settings::PASSWORD, Some("correct horse".to_owned()))
        .resolve()?;
    assert_eq!(result.password.as_deref(), Some("correct horse"));
    assert_eq!(result.volume, 9);
}

#[test]
fn updating_a_write_only_property() {
    let source = Settings::default();
    let err = MutationSequence::new(&source)
        .with_updated(Settings::PASSWORD, |password| password)
        .resolve()
        .unwrap_err();
    assert_eq!(
        err,
        WithError::PropertyNotReadable {
            shape: Settings::shape(),
            property: "password".to_owned(),
        }
    );
}

#[test]
fn constructor_parameter_without_a_property() {
    let source = Token::new("s3cr3t", "ci");

    let err = MutationSequence::new(&source)
        .with(Token::LABEL, "deploy".to_owned())
        .resolve()
        .unwrap_err();
    assert_eq!(
        err,
        WithError::MissingSourceValue {
            shape: Token::shape(),
            parameter: "secret",
        }
    );

    // supplying it explicitly is fine
    let rotated = MutationSequence::new(&source)
        .with(Token::SECRET, "n3w".to_owned())
        .resolve()?;
    assert_eq!(rotated.secret(), "n3w");
    assert_eq!(rotated.label, "ci");
}

#[test]
fn no_constructor() {
    let source = Opaque { value: 1 };
    let err = MutationSequence::new(&source)
        .with(Opaque::VALUE, 2)
        .resolve()
        .unwrap_err();
    assert_eq!(
        err,
        WithError::NoConstructorFound {
            shape: Opaque::shape()
        }
    );
}

#[test]
fn constructor_rejects_its_arguments() {
    let source = Percentage { value: 50 };
    let err = MutationSequence::new(&source)
        .with(Percentage::VALUE, 101)
        .resolve()
        .unwrap_err();
    assert_eq!(
        err,
        WithError::ConstructorRejected {
            shape: Percentage::shape(),
            reason: "101 is more than 100".to_owned(),
        }
    );
}

#[test]
fn wrong_value_type() {
    let mut edits = PendingEdits::new();
    edits.insert("age", "forty".to_owned())?;

    // through a setter
    let err = apply_edits(&SourceWithSetters::from((None, None, None)), &edits).unwrap_err();
    assert!(matches!(
        err,
        WithError::TypeMismatch { property, expected, .. }
            if property == "age" && expected == core::any::type_name::<Option<u32>>()
    ));

    // through a constructor argument
    let err = apply_edits(&SourceWithConstructor::from((None, None, None)), &edits).unwrap_err();
    assert!(matches!(
        err,
        WithError::TypeMismatch { property, actual, .. }
            if property == "age" && actual == core::any::type_name::<String>()
    ));
}

#[test]
fn failing_factory() {
    let source = SourceWithConstructor::from((None, None, None));
    let err = MutationSequence::new(&source)
        .try_with_deferred(SourceWithConstructor::NAME, || {
            Err::<Option<String>, _>("directory is offline")
        })
        .resolve()
        .unwrap_err();
    assert_eq!(
        err,
        WithError::FactoryFailed {
            shape: SourceWithConstructor::shape(),
            property: "name".to_owned(),
            message: "directory is offline".to_owned(),
        }
    );
}

#[test]
fn selectors_must_name_a_single_property() {
    let sequence = WithSequence::<SourceWithSetters>::new();

    let err = sequence
        .with_value("address.city", Value::new(owned(Some("Hogsmeade"))))
        .unwrap_err();
    assert_eq!(
        err,
        WithError::InvalidSelector {
            selector: "address.city".to_owned()
        }
    );

    let err = sequence
        .with_value("", Value::new(owned(None)))
        .unwrap_err();
    assert!(matches!(err, WithError::InvalidArgument { .. }));

    let mut edits = PendingEdits::new();
    assert!(edits.insert("name()", 1u32).is_err());
    assert!(edits.insert("tags[0]", 1u32).is_err());
    assert!(edits.is_empty());
}
