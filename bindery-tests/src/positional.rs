use crate::{prepare, silent_logs, single_row};
use bindery::{
    ArrayLike, AsValue, BindErrorKind, Binder, Executor, Parameter, Prepared, Scalar, Value,
    stream::{StreamExt, TryStreamExt},
};
use std::pin::pin;

pub async fn positional<E: Executor>(executor: &mut E) {
    // One value per anonymous slot
    let mut prepared = prepare(executor, "SELECT ?, ?, ?").await;
    prepared
        .bind(["a".as_value(), 5_i32.as_value(), Value::Null])
        .expect("Failed to bind the array");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Text("a".into()), Scalar::Integer(5), Scalar::Null]
    );

    // The statement can be run again with new values
    prepared
        .bind(vec![1.5_f64, 2.5, 3.5])
        .expect("Failed to rebind the array");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Double(1.5), Scalar::Double(2.5), Scalar::Double(3.5)]
    );

    // One element too many, the valid prefix stays bound
    let mut prepared = prepare(executor, "SELECT ?, ?").await;
    silent_logs! {
        let error = prepared
            .bind(vec!["x", "y", "z"])
            .err()
            .expect("Binding more values than slots must fail");
        assert_eq!(error.kind(), BindErrorKind::ParameterIndexOutOfRange);
        assert_eq!(error.parameter(), Some(&Parameter::Index(3)));
    }
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Text("x".into()), Scalar::Text("y".into())]
    );

    // Fewer values than slots leave the rest null
    let mut prepared = prepare(executor, "SELECT ?, ?, ?").await;
    prepared.bind(vec![10_i64]).expect("Failed to bind a short array");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Integer(10), Scalar::Null, Scalar::Null]
    );

    // Numbered slots are anonymous slots too
    let mut prepared = prepare(executor, "SELECT ?2, ?1").await;
    assert_eq!(prepared.parameter_count(), 2);
    prepared
        .bind(vec!["first", "second"])
        .expect("Failed to bind numbered parameters");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Text("second".into()), Scalar::Text("first".into())]
    );

    // Holes in an array-like read as undefined
    let mut prepared = prepare(executor, "SELECT ?, ?, ?").await;
    prepared
        .bind(ArrayLike::with_length(
            Some(3.0),
            vec![Value::Number(1.0)],
        ))
        .expect("Failed to bind a sparse array-like");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Integer(1), Scalar::Null, Scalar::Null]
    );

    // Broken lengths touch nothing
    let mut prepared = prepare(executor, "SELECT ?").await;
    let mut binder = Binder::new(&mut prepared);
    for length in [None, Some(-1.0), Some(1.5), Some(f64::INFINITY), Some(f64::NAN)] {
        silent_logs! {
            let error = binder
                .bind(&Value::Array(ArrayLike::with_length(length, vec!["a".into()])))
                .expect_err("An invalid length must fail");
            assert_eq!(error.kind(), BindErrorKind::InvalidArrayLength);
        }
    }
    assert_eq!(single_row(executor, &mut prepared).await, [Scalar::Null]);

    // Containers inside containers
    let mut prepared = prepare(executor, "SELECT ?, ?").await;
    silent_logs! {
        let error = prepared
            .bind(vec![Value::Number(1.0), vec![2_i32].as_value()])
            .err()
            .expect("A nested array must fail");
        assert_eq!(error.kind(), BindErrorKind::UnsupportedNestedType);
        assert_eq!(error.parameter(), Some(&Parameter::Index(2)));
    }
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Integer(1), Scalar::Null]
    );

    // A run abandoned after its first row can be rebound and run again
    let mut prepared = prepare(
        executor,
        "SELECT value + ? FROM (SELECT 1 AS value UNION ALL SELECT 2)",
    )
    .await;
    prepared.bind(10_i32).expect("Failed to bind the first value");
    {
        let mut rows = pin!(executor.fetch(&mut prepared));
        let first = rows
            .next()
            .await
            .expect("Expected a first row")
            .expect("Failed to read the first row");
        assert_eq!(&*first.values, [Scalar::Integer(11)]);
    }
    prepared
        .bind(20_i32)
        .expect("Failed to rebind after a partial run");
    let rows = executor
        .fetch(&mut prepared)
        .map_ok(|row| row.values.into_vec())
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to run the rebound query");
    assert_eq!(rows, [[Scalar::Integer(21)], [Scalar::Integer(22)]]);
}
