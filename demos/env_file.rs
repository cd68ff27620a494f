//! Example loading a .env file before reading settings

use envsettings::{EnvSettings, ProcessEnv};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize, EnvSettings)]
struct Config {
    #[env(string)]
    pub service_name: String,

    #[env(integer, default = 4)]
    pub workers: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // .env at the top of the tree, loaded from two directories below it
    let root = tempfile::TempDir::new()?;
    let start = root.path().join("services").join("worker");
    fs::create_dir_all(&start)?;
    fs::write(root.path().join(".env"), "service_name=worker\nworkers=16\n")?;

    match envsettings::load_env_file_from(&start, &mut ProcessEnv) {
        Some(path) => println!("Loaded {}", path.display()),
        None => println!("No .env file found"),
    }

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Service: {}", config.service_name);
    println!("  Workers: {}", config.workers);

    Ok(())
}
