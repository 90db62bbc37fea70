use inboxlink_core::config::{DatabaseConfig, ServerConfig};

#[test]
fn test_database_config_serialization() {
    let config = DatabaseConfig {
        url: "postgresql://localhost:5432/inboxlink".to_string(),
        max_connections: 10,
        min_connections: 1,
    };

    let serialized = serde_json::to_string(&config).unwrap();
    assert!(serialized.contains("postgresql://localhost:5432/inboxlink"));

    let deserialized: DatabaseConfig = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized.url, config.url);
    assert_eq!(deserialized.max_connections, config.max_connections);
    assert_eq!(deserialized.min_connections, config.min_connections);
}

#[test]
fn test_in_memory_pool_is_single_connection() {
    let config = DatabaseConfig::new("sqlite::memory:");

    assert!(config.is_in_memory());
    assert_eq!(config.pool_bounds(), (1, 1));
}

#[test]
fn test_pool_bounds_are_clamped() {
    let config = DatabaseConfig {
        url: "postgresql://localhost/inboxlink".to_string(),
        max_connections: 0,
        min_connections: 5,
    };

    assert!(!config.is_in_memory());
    assert_eq!(config.pool_bounds(), (1, 1));

    let config = DatabaseConfig {
        max_connections: 20,
        min_connections: 2,
        ..config
    };
    assert_eq!(config.pool_bounds(), (2, 20));
}

#[test]
fn test_server_config_new() {
    let config = ServerConfig::new("127.0.0.1:4000", "sqlite://inboxlink.db?mode=rwc");

    assert_eq!(config.address, "127.0.0.1:4000");
    assert_eq!(config.database.url, "sqlite://inboxlink.db?mode=rwc");
    assert_eq!(config.database.max_connections, 10);
}
