use crate::{
    ArrayLike, BindError, Parameter, PlainMap, Prepared, Value, exact_integer, resolve_parameter,
    truncate_long,
};
use std::slice;

/// Position of the next anonymous slot, starting at 1.
///
/// The cursor is passed by value through the positional routines and returned updated,
/// it never outlives a bind call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnonymousCursor(u32);

impl AnonymousCursor {
    pub const fn new() -> Self {
        Self(1)
    }

    pub fn position(&self) -> u32 {
        self.0
    }

    /// Returns the current slot and moves past it.
    pub fn advance(&mut self) -> u32 {
        let index = self.0;
        self.0 = self.0.saturating_add(1);
        index
    }
}

impl Default for AnonymousCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Binds host values to the parameter slots of a prepared statement.
///
/// The shape of the value picks the mode:
/// * [`Value::Array`] binds its elements to consecutive anonymous slots starting at 1.
/// * [`Value::Map`] binds each entry to the slot whose declared name matches the key,
///   either verbatim or with one of the [`PARAMETER_PREFIXES`](crate::PARAMETER_PREFIXES).
/// * Anything else binds to slot 1.
///
/// Binding stops at the first error. Slots written before it keep their values, the
/// statement has no notion of transactional binding.
pub struct Binder<'s, P: Prepared + ?Sized> {
    statement: &'s mut P,
    parameter_count: u32,
    error: Option<String>,
}

impl<'s, P: Prepared + ?Sized> Binder<'s, P> {
    pub fn new(statement: &'s mut P) -> Self {
        let parameter_count = statement.parameter_count();
        Self {
            statement,
            parameter_count,
            error: None,
        }
    }

    pub fn parameter_count(&self) -> u32 {
        self.parameter_count
    }

    /// Bind one top-level value.
    ///
    /// A map is meant to be bound once, on a statement with no earlier positional
    /// bindings. Mixing both on the same statement is left to the caller: slots are
    /// simply overwritten in call order, nothing is reset or merged.
    pub fn bind(&mut self, value: &Value) -> Result<(), BindError> {
        self.bind_arguments(slice::from_ref(value))
    }

    /// Bind a whole argument list. Every argument is dispatched like a top-level value
    /// and a single anonymous cursor runs across all of them, so `(1, [2, 3], 4)` fills
    /// slots 1 to 4.
    pub fn bind_arguments(&mut self, arguments: &[Value]) -> Result<(), BindError> {
        self.error = None;
        let result = arguments
            .iter()
            .try_fold(AnonymousCursor::new(), |cursor, argument| {
                self.bind_argument(argument, cursor)
            });
        match result {
            Ok(..) => Ok(()),
            Err(error) => {
                log::error!(
                    "{:#}\nWhile binding the query:\n{}",
                    error,
                    truncate_long(&self.statement.to_string())
                );
                self.error = Some(error.message().to_owned());
                Err(error)
            }
        }
    }

    /// Message of the last failed bind call, `None` if it succeeded.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn bind_argument(
        &mut self,
        argument: &Value,
        mut cursor: AnonymousCursor,
    ) -> Result<AnonymousCursor, BindError> {
        match argument {
            Value::Array(array) => self.bind_array(array, cursor),
            Value::Map(map) => {
                self.bind_map(map)?;
                Ok(cursor)
            }
            value => {
                let index = cursor.advance();
                self.bind_value(value, index, None)?;
                Ok(cursor)
            }
        }
    }

    fn bind_array(
        &mut self,
        array: &ArrayLike,
        mut cursor: AnonymousCursor,
    ) -> Result<AnonymousCursor, BindError> {
        let length = array_length(array)?;
        log::debug!(
            "Binding {} positional values from parameter {}",
            length,
            cursor.position()
        );
        for i in 0..length {
            let element = array.get(i).unwrap_or(&Value::Null);
            let index = cursor.advance();
            self.bind_value(element, index, None)?;
        }
        Ok(cursor)
    }

    fn bind_map(&mut self, map: &PlainMap) -> Result<(), BindError> {
        log::debug!("Binding {} named values", map.len());
        for (key, value) in map.iter() {
            let index = resolve_parameter(&*self.statement, key)
                .ok_or_else(|| BindError::unknown_name(key))?;
            self.bind_value(value, index, Some(key))?;
        }
        Ok(())
    }

    /// Writes a scalar into `index`. Containers never reach the statement setters.
    fn bind_value(
        &mut self,
        value: &Value,
        index: u32,
        name: Option<&str>,
    ) -> Result<(), BindError> {
        let parameter = || match name {
            Some(name) => Parameter::Name(name.to_owned()),
            None => Parameter::Index(index),
        };
        if index < 1 || index > self.parameter_count {
            return Err(BindError::out_of_range(
                parameter(),
                index,
                self.parameter_count,
            ));
        }
        log::trace!("Binding {} to parameter {}", value.type_name(), index);
        let result = match value {
            Value::Null => self.statement.bind_null(index),
            Value::Number(v) => match exact_integer(*v) {
                Some(v) => self.statement.bind_int64(index, v),
                None => self.statement.bind_double(index, *v),
            },
            Value::Text(v) => self.statement.bind_text(index, v),
            Value::Buffer(v) => self.statement.bind_blob(index, v),
            Value::Array(..) | Value::Map(..) => {
                return Err(BindError::nested(parameter(), value.type_name()));
            }
            Value::Other(type_name) => {
                return Err(BindError::unsupported_type(parameter(), type_name));
            }
        };
        result.map_err(|e| BindError::underlying(parameter(), e))
    }
}

fn array_length(array: &ArrayLike) -> Result<usize, BindError> {
    match array.reported_length() {
        Some(length) if length.is_finite() && length >= 0.0 && length.fract() == 0.0 => {
            Ok(length as usize)
        }
        length => Err(BindError::invalid_length(length)),
    }
}
