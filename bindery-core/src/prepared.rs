use crate::{AsValue, BindError, Binder, Result};
use std::fmt::Display;

/// A backend-prepared statement, seen from the parameter side.
///
/// Drivers expose the declared parameters and one setter per scalar kind. Slot indices
/// are 1-based and callers guarantee they are in `1..=parameter_count()`.
///
/// `Display` should print the statement text, it ends up in error messages.
///
/// Methods returning `&mut Self` allow fluent chaining:
/// ```rust,ignore
/// prepared.bind([42.as_value(), "hello".as_value()])?;
/// ```
pub trait Prepared: Send + Display {
    /// Total number of declared parameter slots.
    fn parameter_count(&self) -> u32;
    /// Slot index of the parameter declared with exactly this name (marker included).
    fn parameter_index(&self, name: &str) -> Option<u32>;
    /// Declared name of a slot, `None` for anonymous ones.
    fn parameter_name(&self, index: u32) -> Option<String>;

    fn bind_int64(&mut self, index: u32, value: i64) -> Result<()>;
    fn bind_double(&mut self, index: u32, value: f64) -> Result<()>;
    /// Text is bound with its exact byte length, NUL bytes included.
    fn bind_text(&mut self, index: u32, value: &str) -> Result<()>;
    /// An empty slice binds a zero-length blob, never null.
    fn bind_blob(&mut self, index: u32, value: &[u8]) -> Result<()>;
    fn bind_null(&mut self, index: u32) -> Result<()>;

    /// Reset every slot to null.
    fn clear_bindings(&mut self) -> Result<()>;

    /// Bind a value (scalar, array or map) through a fresh [`Binder`].
    fn bind<V: AsValue>(&mut self, value: V) -> std::result::Result<&mut Self, BindError>
    where
        Self: Sized,
    {
        Binder::new(self).bind(&value.as_value())?;
        Ok(self)
    }
}
