//! Database connection and test utilities

pub use sea_orm;
mod connection;

pub use connection::{establish_connection, DbConnection};

// Export test utilities for use by other crates in their tests
pub mod test_utils;

#[cfg(test)]
mod tests {
    use super::*;
    use inboxlink_core::{DatabaseConfig, ServiceError};
    use sea_orm::{ConnectionTrait, Statement};

    #[tokio::test]
    async fn test_establish_connection() -> anyhow::Result<()> {
        let db = establish_connection(&DatabaseConfig::new("sqlite::memory:")).await?;

        let result = Statement::from_string(db.get_database_backend(), "SELECT 1".to_owned());
        let query_result = db.query_one(result).await?;
        assert!(query_result.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_establish_connection_runs_migrations() -> anyhow::Result<()> {
        let db = establish_connection(&DatabaseConfig::new("sqlite::memory:")).await?;

        let result = Statement::from_string(
            db.get_database_backend(),
            "SELECT COUNT(*) AS total FROM integrations".to_owned(),
        );
        let row = db.query_one(result).await?.expect("count row");
        let total: i64 = row.try_get("", "total")?;
        assert_eq!(total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_establish_connection_rejects_bad_url() {
        let result = establish_connection(&DatabaseConfig::new("nosuchdb://nowhere")).await;
        assert!(matches!(result, Err(ServiceError::Database(_))));
    }
}
