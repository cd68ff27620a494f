//! Basic usage example

use envsettings::EnvSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize, EnvSettings)]
struct Config {
    #[env(string)]
    pub database_url: String, // DATABASE_URL (required)

    #[env(integer, min = 1, max = 65535, default = 8080)]
    pub port: u16, // PORT

    #[env(boolean, default = false)]
    pub debug: bool, // DEBUG
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("PORT", "70000"); // clamped to 65535
    std::env::set_var("DEBUG", "yes");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Port: {}", config.port);
    println!("  Debug: {}", config.debug);

    Ok(())
}
