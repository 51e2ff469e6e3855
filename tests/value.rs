#[cfg(test)]
mod tests {
    use bindery::{ArrayLike, AsValue, PlainMap, Value};
    use std::{
        borrow::Cow,
        collections::{BTreeMap, HashMap, VecDeque},
        rc::Rc,
        sync::Arc,
    };

    #[test]
    fn value_numbers() {
        assert_eq!(1_i8.as_value(), Value::Number(1.0));
        assert_eq!((-2_i16).as_value(), Value::Number(-2.0));
        assert_eq!(3_u32.as_value(), Value::Number(3.0));
        assert_eq!(0.5_f32.as_value(), Value::Number(0.5));
        assert_eq!(Value::from(7_u8), Value::Number(7.0));
        // Past 2^53 the host model rounds
        assert_eq!(
            9007199254740993_u64.as_value(),
            Value::Number(9007199254740992.0)
        );
    }

    #[test]
    fn value_text() {
        assert_eq!("a".as_value(), Value::Text("a".into()));
        assert_eq!(String::from("b").as_value(), Value::Text("b".into()));
        assert_eq!('c'.as_value(), Value::Text("c".into()));
        assert_eq!(
            Cow::Borrowed("d").as_value(),
            Value::Text("d".into())
        );
        assert_eq!(Value::from("e").type_name(), "string");
    }

    #[test]
    fn value_buffers() {
        let bytes: &[u8] = &[1, 2, 3];
        assert_eq!(bytes.as_value(), Value::Buffer(Box::new([1, 2, 3])));
        let empty: Box<[u8]> = Box::new([]);
        assert_eq!(empty.as_value(), Value::Buffer(Box::new([])));
        assert_ne!(Value::Buffer(Box::new([])), Value::Null);
    }

    #[test]
    fn value_null() {
        assert_eq!(().as_value(), Value::Null);
        assert_eq!(None::<i32>.as_value(), Value::Null);
        assert_eq!(Some(4_i32).as_value(), Value::Number(4.0));
        assert_eq!(Value::default(), Value::Null);
    }

    #[test]
    fn value_arrays() {
        let expected = Value::Array(ArrayLike::new(vec![
            Value::Number(1.0),
            Value::Number(2.0),
        ]));
        assert_eq!(vec![1_i32, 2].as_value(), expected);
        assert_eq!([1_i32, 2].as_value(), expected);
        assert_eq!(VecDeque::from([1_i32, 2]).as_value(), expected);
        let Value::Array(array) = vec![Some("x"), None].as_value() else {
            panic!("Expected an array");
        };
        assert_eq!(array.reported_length(), Some(2.0));
        assert_eq!(array.get(1), Some(&Value::Null));
        assert_eq!(array.get(2), None);
        assert!(vec![vec![1_i32]].as_value().is_container());
    }

    #[test]
    fn value_maps() {
        let Value::Map(map) = BTreeMap::from([("b", 2_i32), ("a", 1)]).as_value() else {
            panic!("Expected a map");
        };
        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        let Value::Map(map) = HashMap::from([(String::from("k"), "v")]).as_value() else {
            panic!("Expected a map");
        };
        assert_eq!(map.get("k"), Some(&Value::Text("v".into())));
        assert_eq!(PlainMap::new().as_value().type_name(), "object");
    }

    #[test]
    fn value_wrappers() {
        assert_eq!(Box::new(1_i32).as_value(), Value::Number(1.0));
        assert_eq!(Arc::new("s").as_value(), Value::Text("s".into()));
        assert_eq!(Rc::new(2.5_f64).as_value(), Value::Number(2.5));
        assert_eq!((&Value::Null).as_value(), Value::Null);
        assert_eq!(Value::other("symbol").type_name(), "symbol");
    }
}
