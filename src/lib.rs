//! Bind dynamically typed host values to the parameters of prepared SQL statements.
//!
//! ```rust,ignore
//! let mut prepared = connection.prepare("SELECT :id, :name".into()).await?;
//! let mut params = PlainMap::new();
//! params.insert("id", 7.into());
//! params.insert("name", "x".into());
//! prepared.bind(params)?;
//! ```
pub use bindery_core::*;
