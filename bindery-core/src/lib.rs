mod as_value;
mod binder;
mod connection;
mod driver;
mod error;
mod executor;
mod naming;
mod prepared;
mod query;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use binder::*;
pub use connection::*;
pub use driver::*;
pub use error::*;
pub use executor::*;
pub use naming::*;
pub use prepared::*;
pub use query::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}
pub use ::futures::future;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
