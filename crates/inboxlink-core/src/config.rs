//! Configuration management utilities

use serde::{Deserialize, Serialize};

const SQLITE_MEMORY_PREFIX: &str = "sqlite::memory:";

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// An in-memory SQLite database only lives as long as its single connection.
    pub fn is_in_memory(&self) -> bool {
        self.url.starts_with(SQLITE_MEMORY_PREFIX)
    }

    /// Pool bounds, clamped to one connection for in-memory databases.
    pub fn pool_bounds(&self) -> (u32, u32) {
        if self.is_in_memory() {
            return (1, 1);
        }
        let max = self.max_connections.max(1);
        (self.min_connections.min(max), max)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: SQLITE_MEMORY_PREFIX.to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub database: DatabaseConfig,
}

impl ServerConfig {
    pub fn new(address: impl Into<String>, database_url: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            database: DatabaseConfig::new(database_url),
        }
    }
}
