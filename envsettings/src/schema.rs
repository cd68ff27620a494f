//! Explicit description of a settings record's fields.

use crate::field::Field;
use serde::de::DeserializeOwned;

/// A record type that can be populated from the environment.
///
/// `schema` lists the fields in declaration order; the populated values are
/// then deserialized into `Self`, so every field name in the schema must
/// match a field of the type. Usually implemented with
/// `#[derive(EnvSettings)]`.
pub trait Settings: DeserializeOwned {
    fn schema() -> Schema;
}

/// Declared type of a field.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// A single value, environment-backed or not.
    Value,
    /// A nested settings record.
    Record(Schema),
}

/// One declared field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: FieldType,
    /// The field's specification, if it has one.
    pub spec: Option<Field>,
}

/// Ordered fields of a settings record.
///
/// ```rust
/// use envsettings::{cast::Bounds, Field, Schema};
///
/// let database = Schema::new("Database")
///     .field("url", Field::string("DATABASE_URL"))
///     .field("pool", Field::integer("DATABASE_POOL", Bounds::new().min(1).with_default(4)));
///
/// let app = Schema::new("App")
///     .field("debug", Field::boolean("DEBUG").with_default(false))
///     .nested("database", database)
///     .plain("started_at");
///
/// assert_eq!(app.fields().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add an environment-backed field.
    pub fn field(mut self, name: impl Into<String>, spec: Field) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            ty: FieldType::Value,
            spec: Some(spec),
        });
        self
    }

    /// Add a field the environment does not back.
    ///
    /// Population skips it; the record type must supply its value through
    /// `#[serde(default)]`.
    pub fn plain(mut self, name: impl Into<String>) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            ty: FieldType::Value,
            spec: None,
        });
        self
    }

    /// Add a nested record populated from the same environment.
    pub fn nested(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            ty: FieldType::Record(schema),
            spec: None,
        });
        self
    }

    /// Add a nested record that also carries a specification.
    ///
    /// A cast or default on `spec` has no effect on a nested record and is
    /// reported as a warning during population.
    pub fn nested_with(mut self, name: impl Into<String>, schema: Schema, spec: Field) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            ty: FieldType::Record(schema),
            spec: Some(spec),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }
}
