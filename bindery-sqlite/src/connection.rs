use crate::{CBox, SqliteDriver, SqlitePrepared, error_message_from_ptr};
use async_stream::try_stream;
use bindery_core::{
    Connection, Context, Driver, Error, Executor, QueryResult, Result, RowLabeled, RowsAffected,
    stream::Stream, truncate_long,
};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI, sqlite3,
    sqlite3_busy_timeout, sqlite3_changes64, sqlite3_close, sqlite3_errmsg, sqlite3_finalize,
    sqlite3_last_insert_rowid, sqlite3_open_v2, sqlite3_prepare_v2, sqlite3_stmt,
};
use std::{
    borrow::Cow,
    ffi::{CStr, CString, c_int},
    ptr,
    sync::atomic::{AtomicPtr, Ordering},
    time::Duration,
};
use tokio::task::spawn_blocking;

/// How long a statement waits on a locked database before failing with `SQLITE_BUSY`.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct SqliteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

impl SqliteConnection {
    /// Replace the busy timeout, zero fails immediately on a locked database.
    pub fn set_busy_timeout(&mut self, timeout: Duration) -> Result<()> {
        let millis = timeout.as_millis().min(c_int::MAX as u128) as c_int;
        let rc = unsafe { sqlite3_busy_timeout(*self.connection, millis) };
        if rc != SQLITE_OK {
            let error = unsafe {
                Error::msg(error_message_from_ptr(&sqlite3_errmsg(*self.connection)).to_string())
            }
            .context("Cannot set the busy timeout");
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(())
    }

    fn changes(&self) -> RowsAffected {
        unsafe {
            RowsAffected {
                rows_affected: sqlite3_changes64(*self.connection).max(0) as u64,
                last_affected_id: Some(sqlite3_last_insert_rowid(*self.connection)),
            }
        }
    }
}

impl Executor for SqliteConnection {
    type Prepared = SqlitePrepared;

    async fn prepare(&mut self, sql: String) -> Result<SqlitePrepared> {
        let connection = AtomicPtr::new(*self.connection);
        let context = format!("While preparing the query:\n{}", truncate_long(&sql));
        let statement = spawn_blocking(move || unsafe {
            let connection = connection.load(Ordering::Relaxed);
            let len = sql.len();
            let sql = match CString::new(sql) {
                Ok(sql) => sql,
                Err(e) => {
                    let error = Error::new(e)
                        .context("Could not create a CString from the query String")
                        .context(context);
                    log::error!("{:#}", error);
                    return Err(error);
                }
            };
            let mut statement: CBox<*mut sqlite3_stmt> = CBox::new(ptr::null_mut(), |p| {
                sqlite3_finalize(p);
            });
            let mut tail = ptr::null();
            let rc = sqlite3_prepare_v2(
                connection,
                sql.as_ptr(),
                len as c_int,
                &mut *statement,
                &mut tail,
            );
            if rc != SQLITE_OK {
                let error =
                    Error::msg(error_message_from_ptr(&sqlite3_errmsg(connection)).to_string())
                        .context(context);
                log::error!("{:#}", error);
                return Err(error);
            }
            if statement.is_null() {
                let error = Error::msg("The query does not contain any statement").context(context);
                log::error!("{:#}", error);
                return Err(error);
            }
            if !tail.is_null()
                && !CStr::from_ptr(tail)
                    .to_bytes()
                    .iter()
                    .all(u8::is_ascii_whitespace)
            {
                let error =
                    Error::msg("Cannot prepare more than one statement at a time").context(context);
                log::error!("{:#}", error);
                return Err(error);
            }
            Ok(statement)
        })
        .await?;
        Ok(SqlitePrepared::new(statement?))
    }

    fn run<'s>(
        &'s mut self,
        prepared: &'s mut SqlitePrepared,
    ) -> impl Stream<Item = Result<QueryResult>> + Send + 's {
        try_stream! {
            prepared.reset();
            let labels = prepared.labels()?;
            while let Some(values) = prepared.step()? {
                yield QueryResult::Row(RowLabeled::new(labels.clone(), values));
            }
            if labels.is_empty() {
                yield QueryResult::Affected(self.changes());
            }
        }
    }
}

impl Connection for SqliteConnection {
    async fn connect(url: Cow<'static, str>) -> Result<SqliteConnection> {
        let prefix = format!("{}://", SqliteDriver::NAME);
        if !url.starts_with(&prefix) {
            let error = Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                &prefix
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        let context = || format!("Error while decoding connection URL: `{}`", url);
        let location = CString::new(format!("file:{}", url.trim_start_matches(&prefix)))
            .with_context(context)?;
        let mut connection: CBox<*mut sqlite3>;
        let rc;
        unsafe {
            connection = CBox::new(ptr::null_mut(), |p| {
                sqlite3_close(p);
            });
            rc = sqlite3_open_v2(
                location.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE | SQLITE_OPEN_URI,
                ptr::null(),
            );
        }
        if rc != SQLITE_OK {
            let error = unsafe {
                Error::msg(error_message_from_ptr(&sqlite3_errmsg(*connection)).to_string())
            }
            .context(format!("Cannot open the sqlite database `{}`", url));
            log::error!("{:#}", error);
            return Err(error);
        }
        let mut connection = Self { connection };
        connection.set_busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
        Ok(connection)
    }
}
