use crate::{
    Prepared, QueryResult, Result, RowLabeled, RowsAffected,
    stream::{Stream, StreamExt, TryStreamExt},
};
use std::future::Future;

/// Compiles statements and runs them once their parameters are bound.
pub trait Executor: Send + Sized {
    type Prepared: Prepared;

    /// Compile exactly one statement.
    fn prepare(&mut self, sql: String) -> impl Future<Output = Result<Self::Prepared>> + Send;

    /// Run the prepared statement with its current bindings, yielding rows and modify
    /// results. The statement can be run again afterwards.
    fn run<'s>(
        &'s mut self,
        prepared: &'s mut Self::Prepared,
    ) -> impl Stream<Item = Result<QueryResult>> + Send + 's;

    /// Execute the statement and return the rows.
    fn fetch<'s>(
        &'s mut self,
        prepared: &'s mut Self::Prepared,
    ) -> impl Stream<Item = Result<RowLabeled>> + Send + 's {
        self.run(prepared).filter_map(|v| async move {
            match v {
                Ok(QueryResult::Row(v)) => Some(Ok(v)),
                Err(e) => Some(Err(e)),
                _ => None,
            }
        })
    }

    /// Execute the statement and return the total number of rows affected.
    fn execute<'s>(
        &'s mut self,
        prepared: &'s mut Self::Prepared,
    ) -> impl Future<Output = Result<RowsAffected>> + Send + 's {
        self.run(prepared)
            .filter_map(|v| async move {
                match v {
                    Ok(QueryResult::Affected(v)) => Some(Ok(v)),
                    Err(e) => Some(Err(e)),
                    _ => None,
                }
            })
            .try_collect()
    }
}
