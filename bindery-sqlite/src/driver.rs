use crate::{SqliteConnection, SqlitePrepared};
use bindery_core::Driver;

#[derive(Debug, Default)]
pub struct SqliteDriver {}

impl SqliteDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for SqliteDriver {
    type Connection = SqliteConnection;
    type Prepared = SqlitePrepared;

    const NAME: &'static str = "sqlite";
}
