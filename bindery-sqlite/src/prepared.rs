use crate::{
    CBox, error_message_from_ptr,
    extract::{extract_name, extract_value},
};
use bindery_core::{Error, Prepared, Result, Row, RowNames, truncate_long};
use libsqlite3_sys::*;
use std::{
    ffi::{CStr, CString, c_int},
    fmt::{self, Display},
    os::raw::{c_char, c_void},
};

pub struct SqlitePrepared {
    pub(crate) statement: CBox<*mut sqlite3_stmt>,
}

impl SqlitePrepared {
    pub(crate) fn new(statement: CBox<*mut sqlite3_stmt>) -> Self {
        unsafe {
            sqlite3_clear_bindings(*statement);
        }
        Self { statement }
    }

    /// Statement text as it was prepared.
    pub fn sql(&self) -> &str {
        unsafe {
            let sql = sqlite3_sql(*self.statement);
            if sql.is_null() {
                return "";
            }
            CStr::from_ptr(sql).to_str().unwrap_or_default()
        }
    }

    fn last_error(&self) -> Error {
        unsafe {
            Error::msg(
                error_message_from_ptr(&sqlite3_errmsg(sqlite3_db_handle(*self.statement)))
                    .to_string(),
            )
        }
    }

    /// Rewind the statement, a run abandoned before its last row leaves it mid-step.
    pub(crate) fn reset(&mut self) {
        unsafe {
            sqlite3_reset(*self.statement);
        }
    }

    /// Set one slot, rewinding first since a statement cannot be bound while it is running.
    fn bind_with(
        &mut self,
        index: u32,
        bind: impl FnOnce(*mut sqlite3_stmt, c_int) -> c_int,
    ) -> Result<()> {
        self.reset();
        let rc = bind(*self.statement, index as c_int);
        if rc != SQLITE_OK {
            let error = self
                .last_error()
                .context(format!("While binding the query:\n{}", truncate_long(self.sql())));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(())
    }

    pub(crate) fn labels(&self) -> Result<RowNames> {
        unsafe {
            let count = sqlite3_column_count(*self.statement);
            (0..count)
                .map(|i| extract_name(*self.statement, i))
                .collect()
        }
    }

    /// Advance to the next row. At the end, or on error, the statement is reset so it can
    /// run again with the same bindings. A busy database surfaces as an error once the
    /// connection's busy timeout has elapsed.
    pub(crate) fn step(&mut self) -> Result<Option<Row>> {
        unsafe {
            loop {
                match sqlite3_step(*self.statement) {
                    SQLITE_DONE => {
                        sqlite3_reset(*self.statement);
                        return Ok(None);
                    }
                    SQLITE_ROW => {
                        let count = sqlite3_column_count(*self.statement);
                        let row = (0..count)
                            .map(|i| extract_value(*self.statement, i))
                            .collect::<Result<Row>>();
                        if row.is_err() {
                            sqlite3_reset(*self.statement);
                        }
                        return row.map(Some);
                    }
                    _ => {
                        let error = self.last_error().context(format!(
                            "While running the query:\n{}",
                            truncate_long(self.sql())
                        ));
                        sqlite3_reset(*self.statement);
                        log::error!("{:#}", error);
                        return Err(error);
                    }
                }
            }
        }
    }
}

impl Prepared for SqlitePrepared {
    fn parameter_count(&self) -> u32 {
        unsafe { sqlite3_bind_parameter_count(*self.statement).max(0) as u32 }
    }

    fn parameter_index(&self, name: &str) -> Option<u32> {
        let name = CString::new(name).ok()?;
        let index = unsafe { sqlite3_bind_parameter_index(*self.statement, name.as_ptr()) };
        (index > 0).then_some(index as u32)
    }

    fn parameter_name(&self, index: u32) -> Option<String> {
        unsafe {
            let name = sqlite3_bind_parameter_name(*self.statement, index as c_int);
            if name.is_null() {
                return None;
            }
            Some(CStr::from_ptr(name).to_string_lossy().into_owned())
        }
    }

    fn bind_int64(&mut self, index: u32, value: i64) -> Result<()> {
        self.bind_with(index, |statement, index| unsafe {
            sqlite3_bind_int64(statement, index, value)
        })
    }

    fn bind_double(&mut self, index: u32, value: f64) -> Result<()> {
        self.bind_with(index, |statement, index| unsafe {
            sqlite3_bind_double(statement, index, value)
        })
    }

    fn bind_text(&mut self, index: u32, value: &str) -> Result<()> {
        self.bind_with(index, |statement, index| unsafe {
            sqlite3_bind_text64(
                statement,
                index,
                value.as_ptr() as *const c_char,
                value.len() as sqlite3_uint64,
                SQLITE_TRANSIENT(),
                SQLITE_UTF8 as u8,
            )
        })
    }

    fn bind_blob(&mut self, index: u32, value: &[u8]) -> Result<()> {
        // A null data pointer would bind NULL
        self.bind_with(index, |statement, index| unsafe {
            if value.is_empty() {
                sqlite3_bind_zeroblob(statement, index, 0)
            } else {
                sqlite3_bind_blob64(
                    statement,
                    index,
                    value.as_ptr() as *const c_void,
                    value.len() as sqlite3_uint64,
                    SQLITE_TRANSIENT(),
                )
            }
        })
    }

    fn bind_null(&mut self, index: u32) -> Result<()> {
        self.bind_with(index, |statement, index| unsafe {
            sqlite3_bind_null(statement, index)
        })
    }

    fn clear_bindings(&mut self) -> Result<()> {
        let rc = unsafe { sqlite3_clear_bindings(*self.statement) };
        if rc != SQLITE_OK {
            let error = self.last_error().context("Cannot clear the bindings");
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(())
    }
}

impl Display for SqlitePrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}
