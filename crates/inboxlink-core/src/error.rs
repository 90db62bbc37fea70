//! Error type shared by the storage layer

use thiserror::Error;

/// Failures while opening or preparing the database
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_failing_stage() {
        let connect = ServiceError::Database("connection refused".to_string());
        let migrate = ServiceError::Migration("table already exists".to_string());

        assert_eq!(connect.to_string(), "Database error: connection refused");
        assert_eq!(migrate.to_string(), "Migration error: table already exists");
    }
}
