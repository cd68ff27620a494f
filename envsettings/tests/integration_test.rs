//! Integration tests

use envsettings::{EnvSettings, SettingsError};
use rust_decimal::Decimal;
use serde::Deserialize;
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::str::FromStr;

fn store(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Deserialize, EnvSettings)]
struct BasicConfig {
    #[env(string)]
    pub database_url: String,

    #[env(string, var = "API_TOKEN")]
    pub api_key: String,
}

#[derive(Debug, Deserialize, EnvSettings)]
struct ConfigWithDefaults {
    #[env(string, default = "127.0.0.1:8080")]
    pub server_addr: String,

    #[env(integer, min = 1, max = 100, default = 10)]
    pub max_connections: u32,

    #[env(boolean, default = false)]
    pub debug_mode: bool,

    #[env(float, min = 0.0, max = 1.0, default = 0.5)]
    pub sample_rate: f64,
}

#[test]
#[serial]
fn test_basic_config() {
    env::set_var("DATABASE_URL", "postgres://localhost/test");
    env::set_var("API_TOKEN", "test_api_key");

    let config = BasicConfig::from_env().unwrap();
    assert_eq!(config.database_url, "postgres://localhost/test");
    assert_eq!(config.api_key, "test_api_key");

    env::remove_var("DATABASE_URL");
    env::remove_var("API_TOKEN");
}

#[test]
#[serial]
fn test_missing_required_field() {
    env::remove_var("DATABASE_URL");
    env::set_var("API_TOKEN", "test_api_key");

    let result = BasicConfig::from_env();
    let err = result.unwrap_err();
    match err.downcast_ref::<SettingsError>() {
        Some(SettingsError::MissingValue { field, var }) => {
            assert_eq!(field, "database_url");
            assert_eq!(var, "DATABASE_URL");
        }
        other => panic!("Expected MissingValue error, got {other:?}"),
    }

    env::remove_var("API_TOKEN");
}

#[test]
fn test_config_with_defaults() {
    let config: ConfigWithDefaults = envsettings::populate(&store(&[])).unwrap();
    assert_eq!(config.server_addr, "127.0.0.1:8080");
    assert_eq!(config.max_connections, 10);
    assert!(!config.debug_mode);
    assert_eq!(config.sample_rate, 0.5);
}

#[test]
fn test_config_override_defaults() {
    let env = store(&[
        ("SERVER_ADDR", "0.0.0.0:9090"),
        ("MAX_CONNECTIONS", "20"),
        ("DEBUG_MODE", "Yes"),
        ("SAMPLE_RATE", "0,25"),
    ]);

    let config: ConfigWithDefaults = envsettings::populate(&env).unwrap();
    assert_eq!(config.server_addr, "0.0.0.0:9090");
    assert_eq!(config.max_connections, 20);
    assert!(config.debug_mode);
    assert_eq!(config.sample_rate, 0.25);
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let env = store(&[("MAX_CONNECTIONS", "150"), ("SAMPLE_RATE", "-3")]);

    let config: ConfigWithDefaults = envsettings::populate(&env).unwrap();
    assert_eq!(config.max_connections, 100);
    assert_eq!(config.sample_rate, 0.0);
}

#[test]
fn test_unparsable_value_falls_back_to_default() {
    let env = store(&[("MAX_CONNECTIONS", "lots")]);

    let config: ConfigWithDefaults = envsettings::populate(&env).unwrap();
    assert_eq!(config.max_connections, 10);
}

#[test]
fn test_parse_error() {
    #[derive(Debug, Deserialize, EnvSettings)]
    #[allow(dead_code)]
    struct Strict {
        #[env(integer)]
        pub workers: i64,
    }

    let result = envsettings::populate::<Strict, _>(&store(&[("WORKERS", "many")]));
    let err = result.unwrap_err();
    assert!(matches!(err, SettingsError::Conversion { .. }));
    assert!(err.to_string().contains("WORKERS"));
}

#[derive(Debug, Deserialize, EnvSettings)]
struct ConfigWithLists {
    #[env(string_list, default = vec!["localhost"])]
    pub hosts: Vec<String>,

    #[env(integer_list, var = "PORTS", min = 1, max = 65535, element_default = 80)]
    pub ports: Vec<u16>,

    #[env(boolean_list, default = Vec::<bool>::new())]
    pub flags: Vec<bool>,
}

#[test]
fn test_list_fields() {
    let env = store(&[
        ("HOSTS", "a.example, b.example,,c.example"),
        ("PORTS", "443, 0, nope, 99999"),
        ("FLAGS", "yes,no,1"),
    ]);

    let config: ConfigWithLists = envsettings::populate(&env).unwrap();
    assert_eq!(config.hosts, vec!["a.example", "b.example", "c.example"]);
    assert_eq!(config.ports, vec![443, 1, 80, 65535]);
    assert_eq!(config.flags, vec![true, false, true]);
}

#[test]
fn test_list_defaults_and_empty_value() {
    let env = store(&[("PORTS", "")]);

    let config: ConfigWithLists = envsettings::populate(&env).unwrap();
    assert_eq!(config.hosts, vec!["localhost"]);
    assert!(config.ports.is_empty());
    assert!(config.flags.is_empty());
}

#[derive(Debug, Deserialize, PartialEq)]
struct Endpoint {
    pub host: String,
    pub port: u16,
}

fn default_labels() -> Vec<&'static str> {
    vec!["default"]
}

#[derive(Debug, Deserialize, EnvSettings)]
struct ConfigWithJson {
    #[env(json, var = "ENDPOINT")]
    pub endpoint: Endpoint,

    #[env(json, default = serde_json::json!({}))]
    pub metadata: HashMap<String, String>,

    #[env(string_list, default_factory = default_labels)]
    pub labels: Vec<String>,
}

#[test]
fn test_json_deserialization() {
    let env = store(&[
        ("ENDPOINT", r#"{"host":"db.internal","port":5432}"#),
        ("METADATA", r#"{"region":"eu"}"#),
    ]);

    let config: ConfigWithJson = envsettings::populate(&env).unwrap();
    assert_eq!(
        config.endpoint,
        Endpoint {
            host: "db.internal".to_string(),
            port: 5432,
        }
    );
    assert_eq!(config.metadata.get("region"), Some(&"eu".to_string()));
    assert_eq!(config.labels, vec!["default"]);
}

#[test]
fn test_json_type_mismatch_is_construct_error() {
    let env = store(&[("ENDPOINT", r#"{"host":"db.internal"}"#)]);

    let result = envsettings::populate::<ConfigWithJson, _>(&env);
    assert!(matches!(
        result,
        Err(SettingsError::Construct { ref record, .. }) if record == "ConfigWithJson"
    ));
}

#[derive(Debug, Deserialize, PartialEq, EnvSettings)]
struct DatabaseSettings {
    #[env(string, var = "DB_HOST", default = "localhost")]
    pub host: String,

    #[env(integer, var = "DB_PORT", min = 1, max = 65535, default = 5432)]
    pub port: u16,
}

#[derive(Debug, Deserialize, PartialEq, EnvSettings)]
struct CacheSettings {
    #[env(integer, var = "CACHE_TTL", default = 60)]
    pub ttl: i64,
}

#[derive(Debug, Deserialize, PartialEq, EnvSettings)]
struct AppSettings {
    #[env(string, var = "APP_NAME")]
    pub name: String,

    #[env(nested)]
    pub database: DatabaseSettings,

    #[env(nested)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub started: bool,
}

#[test]
fn test_nested_settings_from_flat_store() {
    let env = store(&[
        ("APP_NAME", "billing"),
        ("DB_HOST", "db.internal"),
        ("CACHE_TTL", "300"),
    ]);

    let settings: AppSettings = envsettings::populate(&env).unwrap();
    assert_eq!(
        settings,
        AppSettings {
            name: "billing".to_string(),
            database: DatabaseSettings {
                host: "db.internal".to_string(),
                port: 5432,
            },
            cache: CacheSettings { ttl: 300 },
            started: false,
        }
    );
}

#[test]
fn test_nested_error_aborts_population() {
    let env = store(&[("DB_PORT", "5432")]);

    let result = envsettings::populate::<AppSettings, _>(&env);
    assert!(matches!(
        result,
        Err(SettingsError::MissingValue { ref var, .. }) if var == "APP_NAME"
    ));
}

#[derive(Debug, Deserialize, EnvSettings)]
#[env(prefix = "SVC_")]
struct ConfigWithPrefix {
    #[env(string)]
    pub database_url: String,

    #[env(integer, default = 8080)]
    pub port: u16,

    #[env(string, var = "DB")]
    pub db: String,
}

#[test]
fn test_prefix() {
    let env = store(&[
        ("SVC_DATABASE_URL", "postgres://localhost/db"),
        ("SVC_DB", "primary"),
    ]);

    let config: ConfigWithPrefix = envsettings::populate(&env).unwrap();
    assert_eq!(config.database_url, "postgres://localhost/db");
    assert_eq!(config.port, 8080);
    assert_eq!(config.db, "primary");
}

#[derive(Debug, Deserialize, EnvSettings)]
#[allow(dead_code)]
struct ConfigWithoutCast {
    #[env(var = "RAW_PORT")]
    pub port: i64,
}

#[test]
fn test_missing_cast() {
    let result = envsettings::populate::<ConfigWithoutCast, _>(&store(&[("RAW_PORT", "1")]));
    match result {
        Err(SettingsError::MissingCast { record, field }) => {
            assert_eq!(record, "ConfigWithoutCast");
            assert_eq!(field, "port");
        }
        other => panic!("Expected MissingCast error, got {other:?}"),
    }
}

#[derive(Debug, Deserialize, EnvSettings)]
struct ConfigWithDecimal {
    #[env(decimal, min = Decimal::ZERO, default = Decimal::new(995, 2))]
    pub price: Decimal,

    #[env(decimal_list, var = "TIERS")]
    pub tiers: Vec<Decimal>,
}

#[test]
fn test_decimal_fields() {
    let env = store(&[("PRICE", "-1"), ("TIERS", "1,5;2.25")]);
    // "1,5;2.25" splits on commas into "1" and "5;2.25"
    assert!(envsettings::populate::<ConfigWithDecimal, _>(&env).is_err());

    let env = store(&[("TIERS", "1, 2.25")]);
    let config: ConfigWithDecimal = envsettings::populate(&env).unwrap();
    assert_eq!(config.price, Decimal::from_str("9.95").unwrap());
    assert_eq!(
        config.tiers,
        vec![Decimal::from(1), Decimal::from_str("2.25").unwrap()]
    );

    let env = store(&[("PRICE", "-1"), ("TIERS", "")]);
    let config: ConfigWithDecimal = envsettings::populate(&env).unwrap();
    assert_eq!(config.price, Decimal::ZERO);
}

#[test]
fn test_raw_identifier_field_name() {
    #[derive(Debug, Deserialize, EnvSettings)]
    struct Kinded {
        #[env(string, default = "basic")]
        pub r#type: String,
    }

    let config: Kinded = envsettings::populate(&store(&[("TYPE", "advanced")])).unwrap();
    assert_eq!(config.r#type, "advanced");
}

#[test]
fn test_describe_derived_settings() {
    use envsettings::Settings;

    let lines = envsettings::describe(&AppSettings::schema());
    assert_eq!(
        lines,
        vec!["APP_NAME=", "DB_HOST=localhost", "DB_PORT=5432", "CACHE_TTL=60"]
    );
}

#[test]
fn test_describe_ignores_environment() {
    use envsettings::Settings;

    let lines = envsettings::describe(&ConfigWithLists::schema());
    assert_eq!(lines, vec!["HOSTS=localhost", "PORTS=", "FLAGS="]);
}

#[test]
fn test_env_file_then_populate() {
    use std::fs;
    use tempfile::TempDir;

    let root = TempDir::new().unwrap();
    let project = root.path().join("project");
    let nested = project.join("src").join("bin");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        project.join(".env"),
        "app_name=from-file\ndb_port = 6543\ncache_ttl=5\n",
    )
    .unwrap();

    let mut env = store(&[("APP_NAME", "from-store"), ("DB_HOST", "kept")]);
    let loaded = envsettings::load_env_file_from(&nested, &mut env);
    assert!(loaded.is_some());

    let settings: AppSettings = envsettings::populate(&env).unwrap();
    assert_eq!(settings.name, "from-file");
    assert_eq!(settings.database.host, "kept");
    assert_eq!(settings.database.port, 6543);
    assert_eq!(settings.cache.ttl, 5);
}

#[test]
#[serial]
fn test_env_file_into_process_env() {
    use envsettings::ProcessEnv;
    use std::fs;
    use tempfile::TempDir;

    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "database_url=postgres://file/db\napi_token=file-token\n",
    )
    .unwrap();
    env::remove_var("DATABASE_URL");
    env::remove_var("API_TOKEN");

    envsettings::load_env_file_from(dir.path(), &mut ProcessEnv);
    let config = BasicConfig::from_env().unwrap();
    assert_eq!(config.database_url, "postgres://file/db");
    assert_eq!(config.api_key, "file-token");

    env::remove_var("DATABASE_URL");
    env::remove_var("API_TOKEN");
}

#[test]
fn test_version() {
    assert_eq!(envsettings::VERSION, env!("CARGO_PKG_VERSION"));
}
