use crate::{prepare, silent_logs, single_row};
use bindery::{AsValue, BindErrorKind, Binder, Executor, Parameter, PlainMap, Scalar, Value};

pub async fn arguments<E: Executor>(executor: &mut E) {
    // One cursor across scalars and arrays
    let mut prepared = prepare(executor, "SELECT ?, ?, ?, ?").await;
    let mut binder = Binder::new(&mut prepared);
    binder
        .bind_arguments(&[
            1_i32.as_value(),
            vec![2_i32, 3].as_value(),
            4_i32.as_value(),
        ])
        .expect("Failed to bind the arguments");
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [
            Scalar::Integer(1),
            Scalar::Integer(2),
            Scalar::Integer(3),
            Scalar::Integer(4),
        ]
    );

    // Maps do not move the cursor
    let mut prepared = prepare(executor, "SELECT ?, :named, ?").await;
    let mut named = PlainMap::new();
    named.insert("named", "n".into());
    let mut binder = Binder::new(&mut prepared);
    binder
        .bind_arguments(&["a".as_value(), Value::Map(named)])
        .expect("Failed to bind the arguments");
    assert_eq!(binder.error(), None);
    assert_eq!(
        single_row(executor, &mut prepared).await,
        [Scalar::Text("a".into()), Scalar::Text("n".into()), Scalar::Null]
    );

    // Overflow across arguments
    let mut prepared = prepare(executor, "SELECT ?, ?").await;
    let mut binder = Binder::new(&mut prepared);
    silent_logs! {
        let error = binder
            .bind_arguments(&[vec![1_i32, 2].as_value(), 3_i32.as_value()])
            .expect_err("Too many arguments must fail");
        assert_eq!(error.kind(), BindErrorKind::ParameterIndexOutOfRange);
        assert_eq!(error.parameter(), Some(&Parameter::Index(3)));
        assert!(binder.error().is_some());
    }
}
