use crate::{prepare, silent_logs, single_row};
use bindery::{AsValue, BindErrorKind, Executor, Parameter, PlainMap, Prepared, Scalar, Value};
use std::collections::BTreeMap;

pub async fn named<E: Executor>(executor: &mut E) {
    // Bare keys match prefixed names
    let mut prepared = prepare(executor, "SELECT :id, :name").await;
    assert_eq!(prepared.parameter_name(1).as_deref(), Some(":id"));
    assert_eq!(prepared.parameter_index(":name"), Some(2));
    let mut map = PlainMap::new();
    map.insert("id", 7.into());
    map.insert("name", "x".into());
    prepared.bind(map).expect("Failed to bind the map");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Integer(7), Scalar::Text("x".into())]
    );

    // Key order does not matter
    let mut prepared = prepare(executor, "SELECT :a, :b, :c").await;
    let map: PlainMap = [
        ("c", Value::Number(3.0)),
        ("a", Value::Number(1.0)),
        ("b", Value::Number(2.0)),
    ]
    .into_iter()
    .collect();
    prepared.bind(map).expect("Failed to bind the map");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Integer(1), Scalar::Integer(2), Scalar::Integer(3)]
    );

    // Every marker, and keys given with their marker
    let mut prepared = prepare(executor, "SELECT :colon, @at, $dollar, @verbatim").await;
    prepared
        .bind(BTreeMap::from([
            ("colon", "c".as_value()),
            ("at", "a".as_value()),
            ("dollar", "d".as_value()),
            ("@verbatim", "v".as_value()),
        ]))
        .expect("Failed to bind every parameter marker");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [
            Scalar::Text("c".into()),
            Scalar::Text("a".into()),
            Scalar::Text("d".into()),
            Scalar::Text("v".into()),
        ]
    );

    // Unknown key: earlier keys are bound, later ones are not touched
    let mut prepared = prepare(executor, "SELECT :first, :last").await;
    let mut map = PlainMap::new();
    map.insert("first", 1.into());
    map.insert("middle", 2.into());
    map.insert("last", 3.into());
    silent_logs! {
        let error = prepared
            .bind(map)
            .err()
            .expect("An unknown key must fail");
        assert_eq!(error.kind(), BindErrorKind::UnknownParameterName);
        assert_eq!(error.parameter(), Some(&Parameter::Name("middle".into())));
    }
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Integer(1), Scalar::Null]
    );

    // Values must be scalars
    let mut prepared = prepare(executor, "SELECT :list").await;
    silent_logs! {
        let error = prepared
            .bind(BTreeMap::from([("list", vec![1_i32, 2])]))
            .err()
            .expect("A nested array must fail");
        assert_eq!(error.kind(), BindErrorKind::UnsupportedNestedType);
        assert_eq!(error.parameter(), Some(&Parameter::Name("list".into())));
    }

    // Null values
    let mut prepared = prepare(executor, "SELECT :maybe").await;
    prepared
        .bind(BTreeMap::from([("maybe", None::<i32>)]))
        .expect("Failed to bind a null value");
    assert_eq!(single_row(executor, &mut prepared).await, [Scalar::Null]);
}
