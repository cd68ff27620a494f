//! Example building a schema by hand instead of deriving it

use envsettings::{Bounds, Cast, CastError, Field, Schema, Settings, Value};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct Config {
    pub region: String,
    pub retries: i64,
    #[serde(with = "secs")]
    pub timeout: Duration,
}

mod secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

/// Accepts `30`, `30s` or `2m`, producing seconds.
fn duration_secs(raw: &str) -> Result<Value, CastError> {
    let raw = raw.trim();
    let (number, scale) = match raw.strip_suffix('m') {
        Some(minutes) => (minutes, 60),
        None => (raw.strip_suffix('s').unwrap_or(raw), 1),
    };
    number
        .parse::<i64>()
        .map(|n| Value::Int(n * scale))
        .map_err(CastError::custom)
}

impl Settings for Config {
    fn schema() -> Schema {
        Schema::new("Config")
            .field("region", Field::string("REGION").with_default("eu-west-1"))
            .field("retries", Field::integer("RETRIES", Bounds::new().min(0).max(10).with_default(3)))
            .field(
                "timeout",
                Field::new()
                    .with_var("TIMEOUT")
                    .with_cast(Cast::custom(duration_secs))
                    .with_default(30),
            )
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let env = HashMap::from([
        ("RETRIES".to_string(), "25".to_string()),
        ("TIMEOUT".to_string(), "2m".to_string()),
    ]);

    let config: Config = envsettings::populate(&env)?;

    println!("Configuration loaded:");
    println!("  Region: {}", config.region);
    println!("  Retries: {}", config.retries);
    println!("  Timeout: {:?}", config.timeout);

    Ok(())
}
