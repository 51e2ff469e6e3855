use indexmap::IndexMap;
use std::{borrow::Cow, fmt};

/// Largest integer the host number model represents exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: f64 = 9007199254740991.0;

/// A host value, already classified by the host bridge.
///
/// The binder only ever inspects this closed set of variants. Containers (`Array`, `Map`)
/// are accepted at the top level of a bind call, scalars everywhere.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Number(f64),
    Text(String),
    Buffer(Box<[u8]>),
    Array(ArrayLike),
    Map(PlainMap),
    /// Anything the host could not classify (symbols, functions, opaque objects).
    Other(Cow<'static, str>),
}

impl Value {
    pub fn other(type_name: impl Into<Cow<'static, str>>) -> Self {
        Value::Other(type_name.into())
    }

    /// Host-facing name of the variant, used in error messages.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Number(..) => "number",
            Value::Text(..) => "string",
            Value::Buffer(..) => "buffer",
            Value::Array(..) => "array",
            Value::Map(..) => "object",
            Value::Other(name) => name.as_ref(),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(..) | Value::Map(..))
    }
}

/// Positional container as reported by the host.
///
/// The reported `length` is kept apart from the stored elements: a host array-like can
/// claim any length, including a missing or malformed one. Positions below the length that
/// have no stored element read as undefined.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ArrayLike {
    length: Option<f64>,
    elements: Vec<Value>,
}

impl ArrayLike {
    pub fn new(elements: Vec<Value>) -> Self {
        Self {
            length: Some(elements.len() as f64),
            elements,
        }
    }

    /// Array-like with a host reported `length` that may disagree with `elements`.
    pub fn with_length(length: Option<f64>, elements: Vec<Value>) -> Self {
        Self { length, elements }
    }

    pub fn reported_length(&self) -> Option<f64> {
        self.length
    }

    /// Element at `index`, `None` when the host has nothing stored there.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[Value] {
        &self.elements
    }

    pub fn push(&mut self, value: Value) {
        self.elements.push(value);
        self.length = Some(self.elements.len() as f64);
    }
}

impl FromIterator<Value> for ArrayLike {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Key/value container preserving insertion order.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PlainMap {
    entries: IndexMap<String, Value>,
}

impl PlainMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Inserts or replaces `key`. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for PlainMap {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let mut map = PlainMap::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// The content of a single statement slot or result cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Integer(i64),
    Double(f64),
    Text(String),
    Blob(Box<[u8]>),
}

impl Scalar {
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("NULL"),
            Scalar::Integer(v) => write!(f, "{}", v),
            Scalar::Double(v) => write!(f, "{:?}", v),
            Scalar::Text(v) => write!(f, "{:?}", v),
            Scalar::Blob(v) => write!(f, "<blob {} bytes>", v.len()),
        }
    }
}

/// Integer reading of a host number, when it has one.
///
/// Only values with no fractional part inside the exactly representable range qualify,
/// anything else (including NaN and infinities) is a double.
pub fn exact_integer(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        Some(value as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_classification() {
        assert_eq!(exact_integer(3.0), Some(3));
        assert_eq!(exact_integer(-0.0), Some(0));
        assert_eq!(exact_integer(MAX_SAFE_INTEGER), Some(9007199254740991));
        assert_eq!(exact_integer(-MAX_SAFE_INTEGER), Some(-9007199254740991));
        assert_eq!(exact_integer(3.5), None);
        assert_eq!(exact_integer(9007199254740993.0), None);
        assert_eq!(exact_integer(f64::NAN), None);
        assert_eq!(exact_integer(f64::INFINITY), None);
    }

    #[test]
    fn map_keeps_insertion_order() {
        let mut map = PlainMap::new();
        map.insert("b", Value::Number(1.0));
        map.insert("a", Value::Number(2.0));
        assert_eq!(map.insert("b", Value::Null), Some(Value::Number(1.0)));
        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(map.get("b"), Some(&Value::Null));
    }

    #[test]
    fn large_map_from_pairs() {
        let map: PlainMap = (0..50_000)
            .map(|i| (format!("k{}", i), Value::Number(i as f64)))
            .chain([("k7".to_string(), Value::Null)])
            .collect();
        assert_eq!(map.len(), 50_000);
        assert_eq!(map.iter().nth(7), Some(("k7", &Value::Null)));
        assert_eq!(map.iter().last(), Some(("k49999", &Value::Number(49999.0))));
        assert_eq!(map.get("k25000"), Some(&Value::Number(25000.0)));
    }
}
