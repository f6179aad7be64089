//! Database connection and query utilities

pub use sea_orm;
mod connection;

pub use connection::{establish_connection, DbConnection};

// Export test utilities for use by other crates in their tests
pub mod test_utils;

#[cfg(test)]
mod tests {
    use super::test_utils::TestDatabase;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn test_migrations_create_tickets_table() -> anyhow::Result<()> {
        let test_db = TestDatabase::new().await?;

        let stmt = sea_orm::Statement::from_string(
            test_db.db.get_database_backend(),
            "SELECT COUNT(*) FROM tickets".to_owned(),
        );

        let query_result = test_db.db.query_one(stmt).await?;
        assert!(query_result.is_some());

        Ok(())
    }
}
