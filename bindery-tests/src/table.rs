use crate::{prepare, single_row};
use bindery::{AsValue, Executor, PlainMap, Prepared, Scalar, Value, stream::TryStreamExt};
use indoc::indoc;

pub async fn table<E: Executor>(executor: &mut E) {
    let mut create = prepare(
        executor,
        indoc! {"
            CREATE TABLE IF NOT EXISTS bindery_items (
                id INTEGER PRIMARY KEY,
                name TEXT,
                price REAL,
                payload BLOB
            )
        "},
    )
    .await;
    executor
        .execute(&mut create)
        .await
        .expect("Failed to create the table");
    let mut clear = prepare(executor, "DELETE FROM bindery_items").await;
    executor
        .execute(&mut clear)
        .await
        .expect("Failed to clear the table");

    // One statement, reused for every row
    let mut insert = prepare(
        executor,
        "INSERT INTO bindery_items (id, name, price, payload) VALUES (?, ?, ?, ?)",
    )
    .await;
    let rows = [
        vec![1_i32.as_value(), "apple".as_value(), 0.5_f64.as_value(), Value::Null],
        vec![2_i32.as_value(), "pear".as_value(), 1_i32.as_value(), b"\x01\x02".as_slice().as_value()],
        vec![3_i32.as_value(), Value::Null, 2.25_f64.as_value(), Value::Buffer(Box::new([]))],
    ];
    for row in rows {
        insert.bind(row).expect("Failed to bind the row");
        let affected = executor
            .execute(&mut insert)
            .await
            .expect("Failed to insert the row");
        assert_eq!(affected.rows_affected, 1);
    }

    // Named lookup
    let mut select = prepare(
        executor,
        "SELECT name, price, payload FROM bindery_items WHERE id = :id",
    )
    .await;
    let mut params = PlainMap::new();
    params.insert("id", 2.into());
    select.bind(params).expect("Failed to bind the id");
    assert_eq!(
        single_row(executor, &mut select).await,
        [
            Scalar::Text("pear".into()),
            Scalar::Double(1.0),
            Scalar::Blob(Box::new([1, 2])),
        ]
    );

    // Typed comparison on the bound values
    let mut select = prepare(
        executor,
        "SELECT id FROM bindery_items WHERE price > @min ORDER BY id",
    )
    .await;
    let mut params = PlainMap::new();
    params.insert("min", 0.75.into());
    select.bind(params).expect("Failed to bind the minimum");
    let ids = executor
        .fetch(&mut select)
        .map_ok(|row| row.values[0].clone())
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to select the items");
    assert_eq!(ids, [Scalar::Integer(2), Scalar::Integer(3)]);

    // Zero-length payload is stored as a blob
    let mut select = prepare(
        executor,
        "SELECT typeof(payload) FROM bindery_items WHERE id = 3",
    )
    .await;
    assert_eq!(
        single_row(executor, &mut select).await,
        [Scalar::Text("blob".into())]
    );
}
