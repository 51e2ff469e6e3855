#[cfg(test)]
mod tests {
    use bindery_core::Driver;
    use bindery_sqlite::SqliteDriver;
    use bindery_tests::{execute_tests, init_logs};

    #[tokio::test]
    async fn sqlite() {
        init_logs();
        let driver = SqliteDriver::new();
        let connection = driver
            .connect("sqlite://:memory:".into())
            .await
            .expect("Could not open the database");
        execute_tests(connection).await;
    }
}
