//! Test utilities for database integration tests
//!
//! Every `TestDatabase` is a private in-memory SQLite database with the
//! full schema applied, so tests never share state and need no container.

use crate::DbConnection;
use inboxlink_migrations::Migrator;
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

const MEMORY_URL: &str = "sqlite::memory:";

/// Isolated test database
pub struct TestDatabase {
    pub db: Arc<DbConnection>,
}

impl TestDatabase {
    /// Create an empty in-memory database without any tables
    pub async fn new() -> anyhow::Result<Self> {
        let mut opt = ConnectOptions::new(MEMORY_URL);
        // Each connection to :memory: opens a separate database
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(opt).await?;

        Ok(TestDatabase { db: Arc::new(db) })
    }

    /// Create an in-memory database with all migrations applied
    pub async fn with_migrations() -> anyhow::Result<Self> {
        Self::with_custom_migrations::<Migrator>().await
    }

    /// Create an in-memory database using any `MigratorTrait` implementation
    pub async fn with_custom_migrations<M>() -> anyhow::Result<Self>
    where
        M: MigratorTrait,
    {
        let test_db = Self::new().await?;
        M::up(test_db.db.as_ref(), None).await?;
        Ok(test_db)
    }

    pub fn connection(&self) -> &DbConnection {
        self.db.as_ref()
    }

    pub fn connection_arc(&self) -> Arc<DbConnection> {
        self.db.clone()
    }

    /// Execute raw SQL for testing
    pub async fn execute_sql(&self, sql: &str) -> anyhow::Result<ExecResult> {
        let statement = Statement::from_string(self.db.get_database_backend(), sql.to_owned());
        let result = self.db.execute(statement).await.map_err(anyhow::Error::from)?;
        Ok(result)
    }

    /// Query raw SQL and return results
    pub async fn query_sql(&self, sql: &str) -> anyhow::Result<Vec<QueryResult>> {
        let statement = Statement::from_string(self.db.get_database_backend(), sql.to_owned());
        let result = self.db.query_all(statement).await.map_err(anyhow::Error::from)?;
        Ok(result)
    }

    /// Count rows in a table
    pub async fn count_rows(&self, table: &str) -> anyhow::Result<i64> {
        let rows = self
            .query_sql(&format!("SELECT COUNT(*) AS total FROM {table}"))
            .await?;
        let total = rows
            .first()
            .map(|row| row.try_get::<i64>("", "total"))
            .transpose()?
            .unwrap_or(0);
        Ok(total)
    }
}
