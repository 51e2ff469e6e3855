use crate::{Connection, Prepared, Result};
use std::{borrow::Cow, future::Future};

pub trait Driver {
    type Connection: Connection<Prepared = Self::Prepared>;
    type Prepared: Prepared;

    /// URL scheme handled by the driver.
    const NAME: &'static str;

    fn connect(&self, url: Cow<'static, str>) -> impl Future<Output = Result<Self::Connection>> {
        <Self::Connection as Connection>::connect(url)
    }
}
