use roster::config::{Config, DatabaseConfig};
use roster::paging::Sort;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.database.url, "sqlite://roster.db?mode=rwc");
    assert_eq!(config.database.max_connections, 4);
    assert!(!config.database.sqlx_logging);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.paging.default_page_size, 20);
    assert_eq!(config.paging.max_page_size, 2000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    config.database.url = "postgres://localhost/roster".to_string();
    assert!(config.validate().is_err());

    config.database = DatabaseConfig::in_memory();
    assert!(config.validate().is_ok());

    // Pooled connections to an in-memory database do not share data
    config.database.max_connections = 4;
    assert!(config.validate().is_err());

    config.database = DatabaseConfig::default();
    config.database.min_connections = 10;
    assert!(config.validate().is_err());

    config.database = DatabaseConfig::default();
    config.logging.level = "loud".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "debug".to_string();
    config.paging.default_page_size = 5000;
    assert!(config.validate().is_err());
}

#[test]
fn test_load_from_file() {
    let dir = std::env::temp_dir().join("roster-config-test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("roster.toml");
    std::fs::write(
        &path,
        r#"
[database]
url = "sqlite::memory:"
max_connections = 1

[paging]
default_page_size = 5
"#,
    )
    .unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert!(config.database.is_in_memory());
    assert_eq!(config.database.max_connections, 1);
    assert_eq!(config.paging.default_page_size, 5);
    // Unspecified sections keep their defaults
    assert_eq!(config.paging.max_page_size, 2000);
    assert_eq!(config.logging.level, "info");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_generate_default_config_round_trips() {
    let path = std::env::temp_dir().join("roster-generate-test").join("config.toml");
    Config::generate_default_config(&path).unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.database.url, Config::default().database.url);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_page_request_from_config() {
    let config = Config::default();

    let request = config.paging.page_request(1, None, Sort::unsorted()).unwrap();
    assert_eq!(request.size(), 20);
    assert_eq!(request.offset(), 20);

    let request = config.paging.page_request(0, Some(0), Sort::unsorted()).unwrap();
    assert_eq!(request.size(), 1);

    let request = config.paging.page_request(0, Some(100_000), Sort::unsorted()).unwrap();
    assert_eq!(request.size(), 2000);
}
