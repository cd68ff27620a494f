//! Example demonstrating list and JSON fields

use envsettings::EnvSettings;
use serde::Deserialize;
use std::collections::HashMap;

fn default_origins() -> Vec<&'static str> {
    vec!["http://localhost:3000"]
}

#[derive(Debug, Deserialize, EnvSettings)]
struct Config {
    // Comma-separated, blank pieces dropped
    #[env(string_list, default_factory = default_origins)]
    pub allowed_origins: Vec<String>,

    // Each element clamped; unparsable elements become 80
    #[env(integer_list, min = 1, max = 65535, element_default = 80)]
    pub ports: Vec<u16>,

    // JSON object
    #[env(json, default = serde_json::json!({}))]
    pub labels: HashMap<String, String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    std::env::set_var("PORTS", "443, 8443,, http");
    std::env::set_var("LABELS", r#"{"team":"payments","tier":"1"}"#);

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Allowed origins: {:?}", config.allowed_origins);
    println!("  Ports: {:?}", config.ports);
    println!("  Labels: {:?}", config.labels);

    Ok(())
}
