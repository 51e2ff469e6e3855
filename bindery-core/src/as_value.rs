use crate::{ArrayLike, PlainMap, Value};
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap, VecDeque},
    rc::Rc,
    sync::Arc,
};

/// Conversion of native Rust values into the host [`Value`] model.
///
/// Numbers go through `f64`, the host number representation: integers beyond
/// `MAX_SAFE_INTEGER` lose precision here exactly like they would in the host, and are
/// later bound as doubles.
///
/// # Examples
/// ```rust
/// use bindery_core::{AsValue, Value};
/// assert_eq!(42i32.as_value(), Value::Number(42.0));
/// assert_eq!("solo".as_value(), Value::Text("solo".into()));
/// ```
pub trait AsValue {
    fn as_value(self) -> Value;
}

impl AsValue for Value {
    fn as_value(self) -> Value {
        self
    }
}

impl AsValue for &Value {
    fn as_value(self) -> Value {
        self.clone()
    }
}

macro_rules! impl_as_value {
    ($source:ty, $variant:path, |$v:ident| $expr:expr) => {
        impl AsValue for $source {
            fn as_value(self) -> Value {
                let $v = self;
                $variant($expr)
            }
        }
        impl From<$source> for Value {
            fn from(value: $source) -> Self {
                value.as_value()
            }
        }
    };
}

impl_as_value!(i8, Value::Number, |v| v as f64);
impl_as_value!(i16, Value::Number, |v| v as f64);
impl_as_value!(i32, Value::Number, |v| v as f64);
impl_as_value!(i64, Value::Number, |v| v as f64);
impl_as_value!(u8, Value::Number, |v| v as f64);
impl_as_value!(u16, Value::Number, |v| v as f64);
impl_as_value!(u32, Value::Number, |v| v as f64);
impl_as_value!(u64, Value::Number, |v| v as f64);
impl_as_value!(isize, Value::Number, |v| v as f64);
impl_as_value!(usize, Value::Number, |v| v as f64);
impl_as_value!(f32, Value::Number, |v| v as f64);
impl_as_value!(f64, Value::Number, |v| v);
impl_as_value!(char, Value::Text, |v| v.to_string());
impl_as_value!(String, Value::Text, |v| v);
impl_as_value!(&str, Value::Text, |v| v.to_owned());
impl_as_value!(Cow<'_, str>, Value::Text, |v| v.into_owned());
impl_as_value!(Box<[u8]>, Value::Buffer, |v| v);
impl_as_value!(&[u8], Value::Buffer, |v| v.into());
impl_as_value!(ArrayLike, Value::Array, |v| v);
impl_as_value!(PlainMap, Value::Map, |v| v);

impl AsValue for () {
    fn as_value(self) -> Value {
        Value::Null
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => Value::Null,
        }
    }
}

impl<T: AsValue> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.as_value()
    }
}

macro_rules! impl_as_value {
    ($list:ident) => {
        impl<T: AsValue> AsValue for $list<T> {
            fn as_value(self) -> Value {
                Value::Array(self.into_iter().map(AsValue::as_value).collect())
            }
        }
        impl<T: AsValue> From<$list<T>> for Value {
            fn from(value: $list<T>) -> Self {
                value.as_value()
            }
        }
    };
}

impl_as_value!(Vec);
impl_as_value!(VecDeque);

impl<T: AsValue, const N: usize> AsValue for [T; N] {
    fn as_value(self) -> Value {
        Value::Array(self.into_iter().map(AsValue::as_value).collect())
    }
}

impl<T: AsValue, const N: usize> From<[T; N]> for Value {
    fn from(value: [T; N]) -> Self {
        value.as_value()
    }
}

macro_rules! impl_as_value {
    ($map:ident) => {
        impl<K: Into<String>, V: AsValue> AsValue for $map<K, V> {
            fn as_value(self) -> Value {
                Value::Map(self.into_iter().map(|(k, v)| (k, v.as_value())).collect())
            }
        }
        impl<K: Into<String>, V: AsValue> From<$map<K, V>> for Value {
            fn from(value: $map<K, V>) -> Self {
                value.as_value()
            }
        }
    };
}

impl_as_value!(BTreeMap);
impl_as_value!(HashMap);

impl<T: AsValue> AsValue for Box<T> {
    fn as_value(self) -> Value {
        (*self).as_value()
    }
}

macro_rules! impl_as_value {
    ($wrapper:ident) => {
        impl<T: AsValue + Clone> AsValue for $wrapper<T> {
            fn as_value(self) -> Value {
                $wrapper::unwrap_or_clone(self).as_value()
            }
        }
    };
}

impl_as_value!(Arc);
impl_as_value!(Rc);
