#[cfg(test)]
mod tests {
    use bindery_core::{
        ArrayLike, AsValue, BindErrorKind, Binder, Error, Parameter, PlainMap, Prepared, Result,
        Scalar, Value,
    };
    use std::{collections::BTreeMap, error::Error as _, fmt};

    /// In memory statement recording every setter call.
    #[derive(Default)]
    struct Recording {
        names: Vec<Option<String>>,
        slots: Vec<Scalar>,
        calls: Vec<u32>,
        failing: Option<u32>,
    }

    impl Recording {
        fn anonymous(count: usize) -> Self {
            Self {
                names: vec![None; count],
                slots: vec![Scalar::Null; count],
                ..Default::default()
            }
        }

        fn named(names: &[&str]) -> Self {
            Self {
                names: names.iter().map(|v| Some(v.to_string())).collect(),
                slots: vec![Scalar::Null; names.len()],
                ..Default::default()
            }
        }

        fn set(&mut self, index: u32, value: Scalar) -> Result<()> {
            assert!(
                index >= 1 && index as usize <= self.slots.len(),
                "Setter called with an invalid index {}",
                index
            );
            if self.failing == Some(index) {
                return Err(Error::msg("out of memory"));
            }
            self.calls.push(index);
            self.slots[index as usize - 1] = value;
            Ok(())
        }
    }

    impl fmt::Display for Recording {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "RECORDING({})", self.slots.len())
        }
    }

    impl Prepared for Recording {
        fn parameter_count(&self) -> u32 {
            self.slots.len() as u32
        }
        fn parameter_index(&self, name: &str) -> Option<u32> {
            self.names
                .iter()
                .position(|v| v.as_deref() == Some(name))
                .map(|i| i as u32 + 1)
        }
        fn parameter_name(&self, index: u32) -> Option<String> {
            self.names.get(index.checked_sub(1)? as usize)?.clone()
        }
        fn bind_int64(&mut self, index: u32, value: i64) -> Result<()> {
            self.set(index, Scalar::Integer(value))
        }
        fn bind_double(&mut self, index: u32, value: f64) -> Result<()> {
            self.set(index, Scalar::Double(value))
        }
        fn bind_text(&mut self, index: u32, value: &str) -> Result<()> {
            self.set(index, Scalar::Text(value.into()))
        }
        fn bind_blob(&mut self, index: u32, value: &[u8]) -> Result<()> {
            self.set(index, Scalar::Blob(value.into()))
        }
        fn bind_null(&mut self, index: u32) -> Result<()> {
            self.set(index, Scalar::Null)
        }
        fn clear_bindings(&mut self) -> Result<()> {
            self.slots.fill(Scalar::Null);
            Ok(())
        }
    }

    fn text(v: &str) -> Scalar {
        Scalar::Text(v.into())
    }

    #[test]
    fn anonymous_scenario() {
        let mut statement = Recording::anonymous(3);
        statement
            .bind(["a".as_value(), 5_i32.as_value(), Value::Null])
            .expect("Failed to bind");
        assert_eq!(statement.slots, [text("a"), Scalar::Integer(5), Scalar::Null]);
        assert_eq!(statement.calls, [1, 2, 3]);
    }

    #[test]
    fn named_scenario() {
        let mut statement = Recording::named(&[":id", ":name"]);
        let params: PlainMap = [("id", 7_i32.as_value()), ("name", "x".as_value())]
            .into_iter()
            .collect();
        statement.bind(params).expect("Failed to bind");
        assert_eq!(statement.slots, [Scalar::Integer(7), text("x")]);
    }

    #[test]
    fn single_scalar() {
        let mut statement = Recording::anonymous(1);
        statement.bind("solo").expect("Failed to bind");
        assert_eq!(statement.slots, [text("solo")]);

        let mut statement = Recording::anonymous(0);
        let mut binder = Binder::new(&mut statement);
        let error = binder
            .bind(&"solo".as_value())
            .expect_err("No slot to bind to");
        assert_eq!(error.kind(), BindErrorKind::ParameterIndexOutOfRange);
        assert_eq!(error.parameter(), Some(&Parameter::Index(1)));
        assert_eq!(
            error.message(),
            "Parameter index 1 is out of range, the statement has 0 parameters"
        );
        assert!(statement.calls.is_empty());
    }

    #[test]
    fn array_fills_every_slot() {
        for n in 0..8 {
            let mut statement = Recording::anonymous(n);
            let values: Vec<_> = (0..n as i32).map(|i| i * 10).collect();
            statement.bind(values.clone()).expect("Failed to bind");
            let expected: Vec<_> = values.iter().map(|v| Scalar::Integer(*v as i64)).collect();
            assert_eq!(statement.slots, expected);
        }
    }

    #[test]
    fn array_one_too_long() {
        for n in 0..8 {
            let mut statement = Recording::anonymous(n);
            let values: Vec<_> = (0..=n).map(|i| format!("v{}", i)).collect();
            let mut binder = Binder::new(&mut statement);
            let error = binder
                .bind(&values.clone().as_value())
                .expect_err("One value too many");
            assert_eq!(error.kind(), BindErrorKind::ParameterIndexOutOfRange);
            assert_eq!(error.parameter(), Some(&Parameter::Index(n as u32 + 1)));
            assert_eq!(binder.error(), Some(error.message()));
            let prefix: Vec<_> = values[..n].iter().map(|v| text(v)).collect();
            assert_eq!(statement.slots, prefix);
            assert_eq!(statement.calls, (1..=n as u32).collect::<Vec<_>>());
        }
    }

    #[test]
    fn map_order_does_not_matter() {
        let entries = [("a", 1_i32), ("b", 2), ("c", 3)];
        let orders = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];
        for order in orders {
            let mut statement = Recording::named(&["$c", "@a", ":b"]);
            let map: PlainMap = order
                .iter()
                .map(|i| (entries[*i].0, entries[*i].1.as_value()))
                .collect();
            statement.bind(map).expect("Failed to bind");
            assert_eq!(
                statement.slots,
                [Scalar::Integer(3), Scalar::Integer(1), Scalar::Integer(2)]
            );
        }
    }

    #[test]
    fn prefixes_are_tried_in_order() {
        let mut statement = Recording::named(&["$x", "@x", ":x"]);
        statement
            .bind(BTreeMap::from([("x", 1)]))
            .expect("Failed to bind");
        assert_eq!(statement.calls, [3]);

        let mut statement = Recording::named(&["$x", "@x"]);
        statement
            .bind(BTreeMap::from([("x", 1)]))
            .expect("Failed to bind");
        assert_eq!(statement.calls, [2]);

        let mut statement = Recording::named(&["$x", "x"]);
        statement
            .bind(BTreeMap::from([("x", 1)]))
            .expect("Failed to bind");
        assert_eq!(statement.calls, [2]);
    }

    #[test]
    fn unknown_key_stops_binding() {
        let mut statement = Recording::named(&[":a", ":b", ":c"]);
        let mut map = PlainMap::new();
        map.insert("a", "first".into());
        map.insert("nope", "second".into());
        map.insert("c", "third".into());
        let mut binder = Binder::new(&mut statement);
        let error = binder
            .bind(&Value::Map(map))
            .expect_err("Unknown key must fail");
        assert_eq!(error.kind(), BindErrorKind::UnknownParameterName);
        assert_eq!(error.parameter(), Some(&Parameter::Name("nope".into())));
        assert_eq!(error.message(), "The statement has no parameter named `nope`");
        assert_eq!(statement.slots, [text("first"), Scalar::Null, Scalar::Null]);
        assert_eq!(statement.calls, [1]);
    }

    #[test]
    fn number_typing() {
        let mut statement = Recording::anonymous(6);
        for _ in 0..3 {
            statement
                .bind([
                    3.0, 3.5, 9007199254740993.0, -9007199254740991.0, -0.0, 1e300,
                ])
                .expect("Failed to bind");
            assert_eq!(
                statement.slots,
                [
                    Scalar::Integer(3),
                    Scalar::Double(3.5),
                    Scalar::Double(9007199254740992.0),
                    Scalar::Integer(-9007199254740991),
                    Scalar::Integer(0),
                    Scalar::Double(1e300),
                ]
            );
        }
    }

    #[test]
    fn text_and_buffers() {
        let mut statement = Recording::anonymous(3);
        statement
            .bind([
                Value::Text("a\0b".into()),
                Value::Buffer(Box::new([])),
                Value::Buffer(Box::new([9, 8, 7])),
            ])
            .expect("Failed to bind");
        assert_eq!(
            statement.slots,
            [
                text("a\0b"),
                Scalar::Blob(Box::new([])),
                Scalar::Blob(Box::new([9, 8, 7])),
            ]
        );
        assert!(!statement.slots[1].is_null());
    }

    #[test]
    fn nested_containers() {
        let mut statement = Recording::anonymous(2);
        let mut binder = Binder::new(&mut statement);
        let error = binder
            .bind(&vec![Value::Null, Value::Map(PlainMap::new())].as_value())
            .expect_err("Nested map must fail");
        assert_eq!(error.kind(), BindErrorKind::UnsupportedNestedType);
        assert_eq!(error.parameter(), Some(&Parameter::Index(2)));
        assert_eq!(statement.calls, [1]);

        let mut statement = Recording::named(&[":list"]);
        let mut binder = Binder::new(&mut statement);
        let error = binder
            .bind(&BTreeMap::from([("list", vec![1])]).as_value())
            .expect_err("Nested array must fail");
        assert_eq!(error.kind(), BindErrorKind::UnsupportedNestedType);
        assert_eq!(error.parameter(), Some(&Parameter::Name("list".into())));
        assert!(statement.calls.is_empty());
    }

    #[test]
    fn unsupported_values() {
        let mut statement = Recording::anonymous(1);
        let mut binder = Binder::new(&mut statement);
        let error = binder
            .bind(&Value::other("function"))
            .expect_err("Functions cannot be bound");
        assert_eq!(error.kind(), BindErrorKind::UnsupportedValueType);
        assert!(error.message().contains("function"));

        // The range is checked first
        let mut statement = Recording::anonymous(1);
        let mut binder = Binder::new(&mut statement);
        let error = binder
            .bind(&vec![Value::Null, Value::other("symbol")].as_value())
            .expect_err("Out of range");
        assert_eq!(error.kind(), BindErrorKind::ParameterIndexOutOfRange);
    }

    #[test]
    fn invalid_lengths() {
        for length in [None, Some(-1.0), Some(0.5), Some(f64::NAN), Some(f64::NEG_INFINITY)] {
            let mut statement = Recording::anonymous(2);
            let mut binder = Binder::new(&mut statement);
            let error = binder
                .bind(&ArrayLike::with_length(length, vec![1.into(), 2.into()]).as_value())
                .expect_err("Invalid length");
            assert_eq!(error.kind(), BindErrorKind::InvalidArrayLength);
            assert_eq!(error.parameter(), None);
            assert!(statement.calls.is_empty());
        }
    }

    #[test]
    fn reported_length_wins() {
        let mut statement = Recording::anonymous(3);
        statement
            .bind(ArrayLike::with_length(
                Some(2.0),
                vec![1.into(), 2.into(), 3.into()],
            ))
            .expect("Failed to bind");
        assert_eq!(statement.calls, [1, 2]);

        let mut statement = Recording::anonymous(3);
        statement.slots[2] = text("stale");
        statement
            .bind(ArrayLike::with_length(Some(3.0), vec![1.into()]))
            .expect("Failed to bind");
        assert_eq!(statement.slots, [Scalar::Integer(1), Scalar::Null, Scalar::Null]);
    }

    #[test]
    fn setter_failure() {
        let mut statement = Recording::anonymous(3);
        statement.failing = Some(2);
        let mut binder = Binder::new(&mut statement);
        let error = binder
            .bind(&vec![1, 2, 3].as_value())
            .expect_err("Setter failure");
        assert_eq!(error.kind(), BindErrorKind::UnderlyingBindFailure);
        assert_eq!(error.parameter(), Some(&Parameter::Index(2)));
        assert_eq!(error.message(), "Cannot bind parameter 2: out of memory");
        assert_eq!(
            error.source().map(|e| e.to_string()).as_deref(),
            Some("out of memory")
        );
        assert_eq!(statement.calls, [1]);
    }

    #[test]
    fn error_accessor_resets() {
        let mut statement = Recording::anonymous(1);
        let mut binder = Binder::new(&mut statement);
        assert_eq!(binder.error(), None);
        assert!(binder.bind(&vec![1, 2].as_value()).is_err());
        assert!(binder.error().is_some());
        binder.bind(&1_i32.as_value()).expect("Failed to bind");
        assert_eq!(binder.error(), None);
    }

    #[test]
    fn argument_list() {
        let mut statement = Recording::named(&["?1", ":n", "?3", "?4"]);
        let mut named = PlainMap::new();
        named.insert("n", "named".into());
        Binder::new(&mut statement)
            .bind_arguments(&[
                1_i32.as_value(),
                Value::Map(named),
                vec![2].as_value(),
                Value::Null,
            ])
            .expect("Failed to bind");
        assert_eq!(
            statement.slots,
            [
                Scalar::Integer(1),
                Scalar::Integer(2),
                Scalar::Null,
                Scalar::Null
            ]
        );
        assert_eq!(statement.calls, [1, 2, 2, 3]);
    }

    #[test]
    fn anyhow_interop() {
        fn bind_all(statement: &mut Recording) -> Result<()> {
            statement.bind(vec!["a", "b"])?;
            Ok(())
        }
        let mut statement = Recording::anonymous(1);
        let error = bind_all(&mut statement).expect_err("Too many values");
        assert!(error.to_string().contains("out of range"));
    }
}
