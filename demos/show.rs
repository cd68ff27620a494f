//! Example listing the variables a settings type reads

use envsettings::EnvSettings;
use serde::Deserialize;

#[derive(Debug, Deserialize, EnvSettings)]
#[allow(dead_code)]
struct DatabaseSettings {
    #[env(string, var = "DB_URL")]
    pub url: String,

    #[env(integer, var = "DB_POOL", default = 8)]
    pub pool_size: u32,
}

#[derive(Debug, Deserialize, EnvSettings)]
#[env(prefix = "APP_")]
#[allow(dead_code)]
struct AppSettings {
    #[env(string, default = "info")]
    pub log_level: String, // APP_LOG_LEVEL

    #[env(string_list, default = vec!["en", "de"])]
    pub languages: Vec<String>, // APP_LANGUAGES

    #[env(nested)]
    pub database: DatabaseSettings,
}

fn main() -> anyhow::Result<()> {
    // Prints:
    //   APP_LOG_LEVEL=info
    //   APP_LANGUAGES=en,de
    //   DB_URL=
    //   DB_POOL=8
    envsettings::show::<AppSettings>()?;
    Ok(())
}
