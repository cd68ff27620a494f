//! Example with settings composed of sub-settings

use envsettings::EnvSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize, EnvSettings)]
struct DatabaseSettings {
    #[env(string, var = "DB_HOST", default = "localhost")]
    pub host: String,

    #[env(integer, var = "DB_PORT", min = 1, max = 65535, default = 5432)]
    pub port: u16,

    #[env(integer, var = "DB_POOL", min = 1, max = 64, default = 8)]
    pub pool_size: u32,
}

#[derive(Debug, Deserialize, EnvSettings)]
struct HttpSettings {
    #[env(string, var = "HTTP_BIND", default = "0.0.0.0:8080")]
    pub bind: String,

    #[env(float, var = "HTTP_TIMEOUT", min = 0.1, default = 30.0)]
    pub timeout_secs: f64,
}

#[derive(Debug, Deserialize, EnvSettings)]
struct AppSettings {
    #[env(string, var = "APP_NAME")]
    pub name: String,

    #[env(nested)]
    pub database: DatabaseSettings,

    #[env(nested)]
    pub http: HttpSettings,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // All levels read from the same flat environment
    std::env::set_var("APP_NAME", "billing");
    std::env::set_var("DB_HOST", "db.internal");
    std::env::set_var("HTTP_TIMEOUT", "2,5");

    let settings = AppSettings::from_env()?;

    println!("Settings for {}:", settings.name);
    println!(
        "  Database: {}:{} (pool {})",
        settings.database.host, settings.database.port, settings.database.pool_size
    );
    println!(
        "  HTTP: {} (timeout {}s)",
        settings.http.bind, settings.http.timeout_secs
    );

    Ok(())
}
