//! Populating settings records from an environment store

use crate::error::SettingsError;
use crate::field::Field;
use crate::schema::{FieldDef, FieldType, Schema, Settings};
use crate::store::{EnvStore, ProcessEnv};
use crate::value::{Record, Value};

/// Populate a record of type `T` from `env`.
///
/// Fields are resolved in declaration order; nested records read from the
/// same store. The first error aborts the whole call.
///
/// # Errors
///
/// - A field specification has no cast ([`SettingsError::MissingCast`])
/// - A variable is unset and the field has no default ([`SettingsError::MissingValue`])
/// - A raw value cannot be converted ([`SettingsError::Conversion`])
/// - The values do not fit the record type ([`SettingsError::Construct`])
pub fn populate<T, S>(env: &S) -> Result<T, SettingsError>
where
    T: Settings,
    S: EnvStore + ?Sized,
{
    let schema = T::schema();
    let record = populate_record(&schema, env)?;
    serde_json::from_value(record.to_json()).map_err(|source| SettingsError::Construct {
        record: schema.name().to_string(),
        source,
    })
}

/// Populate a record of type `T` from the process environment.
pub fn from_env<T: Settings>() -> Result<T, SettingsError> {
    populate(&ProcessEnv)
}

/// Resolve every environment-backed field of `schema` into a [`Record`].
///
/// Fields without a specification are left out of the record.
pub fn populate_record<S>(schema: &Schema, env: &S) -> Result<Record, SettingsError>
where
    S: EnvStore + ?Sized,
{
    let mut record = Record::new();
    for def in schema.fields() {
        match (&def.ty, &def.spec) {
            (FieldType::Record(nested), spec) => {
                if let Some(spec) = spec {
                    warn_misuse(schema, def, nested, spec);
                }
                let value = populate_record(nested, env)?;
                record.insert(def.name.as_str(), Value::Record(value));
            }
            (FieldType::Value, Some(spec)) => {
                let value = resolve_field(schema, def, spec, env)?;
                record.insert(def.name.as_str(), value);
            }
            (FieldType::Value, None) => continue,
        }
    }
    Ok(record)
}

fn resolve_field<S>(
    schema: &Schema,
    def: &FieldDef,
    spec: &Field,
    env: &S,
) -> Result<Value, SettingsError>
where
    S: EnvStore + ?Sized,
{
    let cast = spec.cast().ok_or_else(|| SettingsError::MissingCast {
        record: schema.name().to_string(),
        field: def.name.clone(),
    })?;
    let var = spec.var().unwrap_or_default();

    match spec.var().and_then(|name| env.get(name)) {
        Some(raw) => cast
            .apply(&raw)
            .map_err(|source| SettingsError::Conversion {
                field: def.name.clone(),
                var: var.to_string(),
                source,
            }),
        None => {
            let value = spec
                .resolve_default()
                .map_err(|_| SettingsError::missing(def.name.as_str(), var))?;
            tracing::debug!(
                record = schema.name(),
                field = def.name.as_str(),
                var,
                "variable not set, using default"
            );
            Ok(value)
        }
    }
}

fn warn_misuse(parent: &Schema, def: &FieldDef, nested: &Schema, spec: &Field) {
    if spec.cast().is_some() {
        tracing::warn!(
            target: "envsettings::misuse",
            record = parent.name(),
            field = def.name.as_str(),
            "cast can not be used on sub-settings; check \"{}\" at \"{}\"",
            nested.name(),
            parent.name()
        );
    }
    if spec.has_default() {
        tracing::warn!(
            target: "envsettings::misuse",
            record = parent.name(),
            field = def.name.as_str(),
            "neither default nor default factory can be used on sub-settings; check \"{}\" at \"{}\"",
            nested.name(),
            parent.name()
        );
    }
}
