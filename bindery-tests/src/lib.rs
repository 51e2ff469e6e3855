mod arguments;
mod named;
mod positional;
mod scalar;
mod table;

use arguments::arguments;
use bindery::{Executor, Scalar, stream::TryStreamExt};
use log::LevelFilter;
use named::named;
use positional::positional;
use scalar::scalar;
use std::env;
use table::table;

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

pub async fn execute_tests<E: Executor>(mut executor: E) {
    scalar(&mut executor).await;
    positional(&mut executor).await;
    named(&mut executor).await;
    arguments(&mut executor).await;
    table(&mut executor).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}

/// Runs a statement expected to produce exactly one row and returns its values.
pub(crate) async fn single_row<E: Executor>(
    executor: &mut E,
    prepared: &mut E::Prepared,
) -> Vec<Scalar> {
    let mut rows = executor
        .fetch(prepared)
        .try_collect::<Vec<_>>()
        .await
        .expect("Failed to run the query");
    assert_eq!(rows.len(), 1, "Expected exactly one row");
    rows.pop().expect("Expected one row").values.into_vec()
}

pub(crate) async fn prepare<E: Executor>(executor: &mut E, sql: &str) -> E::Prepared {
    executor
        .prepare(sql.to_string())
        .await
        .unwrap_or_else(|e| panic!("Failed to prepare `{}`: {:#}", sql, e))
}
