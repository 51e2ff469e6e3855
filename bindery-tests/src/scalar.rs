use crate::{prepare, silent_logs, single_row};
use bindery::{AsValue, BindErrorKind, Binder, Executor, Prepared, Scalar, Value};

pub async fn scalar<E: Executor>(executor: &mut E) {
    // Single text into a one slot statement
    let mut prepared = prepare(executor, "SELECT ?").await;
    prepared.bind("solo").expect("Failed to bind a single scalar");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Text("solo".into())]
    );

    // Same value, no slots
    let mut prepared = prepare(executor, "SELECT 1").await;
    assert_eq!(prepared.parameter_count(), 0);
    silent_logs! {
        let error = prepared.bind("solo").err().expect("Binding to a statement without parameters must fail");
        assert_eq!(error.kind(), BindErrorKind::ParameterIndexOutOfRange);
    }

    // Numbers
    let mut prepared = prepare(executor, "SELECT ?, ?, ?, ?, ?").await;
    prepared
        .bind([
            3_i32.as_value(),
            3.5_f64.as_value(),
            9007199254740993_i64.as_value(),
            (-42_i32).as_value(),
            9007199254740991_i64.as_value(),
        ])
        .expect("Failed to bind numbers");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [
            Scalar::Integer(3),
            Scalar::Double(3.5),
            Scalar::Double(9007199254740992.0),
            Scalar::Integer(-42),
            Scalar::Integer(9007199254740991),
        ]
    );

    // Text keeps embedded NUL bytes, buffers keep their length
    let mut prepared = prepare(executor, "SELECT ?, length(CAST(? AS BLOB)), ?, ?, ?").await;
    prepared
        .bind(vec![
            Value::Text("nul\0inside".into()),
            Value::Text("nul\0inside".into()),
            Value::Buffer(Box::new([])),
            Value::Buffer(Box::new([0, 1, 2, 255])),
            Value::Text("".into()),
        ])
        .expect("Failed to bind text and buffers");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [
            Scalar::Text("nul\0inside".into()),
            Scalar::Integer(10),
            Scalar::Blob(Box::new([])),
            Scalar::Blob(Box::new([0, 1, 2, 255])),
            Scalar::Text("".into()),
        ]
    );

    // Empty blob is not null
    let mut prepared = prepare(executor, "SELECT ? IS NULL, typeof(?)").await;
    prepared
        .bind([Value::Buffer(Box::new([])), Value::Buffer(Box::new([]))])
        .expect("Failed to bind empty buffers");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Integer(0), Scalar::Text("blob".into())]
    );

    // Unsupported values leave the statement untouched
    let mut prepared = prepare(executor, "SELECT ?").await;
    let mut binder = Binder::new(&mut prepared);
    silent_logs! {
        let error = binder.bind(&Value::other("symbol")).expect_err("A symbol cannot be bound");
        assert_eq!(error.kind(), BindErrorKind::UnsupportedValueType);
        assert_eq!(binder.error(), Some(error.message()));
    }
    binder.bind(&Value::Null).expect("Failed to bind null");
    assert_eq!(binder.error(), None);
    assert_eq!(single_row(executor, &mut prepared).await, [Scalar::Null]);
}
