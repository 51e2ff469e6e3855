use crate::{Executor, Result};
use std::{borrow::Cow, future::Future};

pub trait Connection: Executor {
    /// Open a connection to the database at `url` (`<driver>://<location>`).
    fn connect(url: Cow<'static, str>) -> impl Future<Output = Result<Self>>;
}
