//! Attribute parsing for `#[env(...)]` annotations.
//!
//! This module extracts and validates settings attributes from the struct and
//! its fields during macro expansion.

use syn::{DeriveInput, Expr, Field, Lit, Path};

/// Field kind named by a bare identifier inside `#[env(...)]`.
///
/// Each kind except `Nested` maps to the `envsettings::Field` factory of the
/// same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Integer,
    Float,
    Number,
    Decimal,
    Boolean,
    Json,
    StringList,
    IntegerList,
    FloatList,
    NumberList,
    DecimalList,
    BooleanList,
    JsonList,
    Nested,
}

impl Kind {
    fn from_ident(ident: &str) -> Option<Self> {
        let kind = match ident {
            "string" => Self::String,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "number" => Self::Number,
            "decimal" => Self::Decimal,
            "boolean" => Self::Boolean,
            "json" => Self::Json,
            "string_list" => Self::StringList,
            "integer_list" => Self::IntegerList,
            "float_list" => Self::FloatList,
            "number_list" => Self::NumberList,
            "decimal_list" => Self::DecimalList,
            "boolean_list" => Self::BooleanList,
            "json_list" => Self::JsonList,
            "nested" => Self::Nested,
            _ => return None,
        };
        Some(kind)
    }

    /// Name of the `envsettings::Field` factory.
    pub fn factory(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Number => "number",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Json => "json",
            Self::StringList => "string_list",
            Self::IntegerList => "integer_list",
            Self::FloatList => "float_list",
            Self::NumberList => "number_list",
            Self::DecimalList => "decimal_list",
            Self::BooleanList => "boolean_list",
            Self::JsonList => "json_list",
            Self::Nested => "nested",
        }
    }

    /// Scalar kind whose factory takes `Bounds`.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Float | Self::Number | Self::Decimal
        )
    }

    /// List kind whose factory takes element `Bounds`.
    pub fn is_numeric_list(self) -> bool {
        matches!(
            self,
            Self::IntegerList | Self::FloatList | Self::NumberList | Self::DecimalList
        )
    }
}

/// Parsed `#[env(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Whether the field carries any `#[env]` attribute.
    ///
    /// Fields without one are not environment-backed.
    pub present: bool,

    /// Field kind; `None` yields a specification without a cast.
    pub kind: Option<Kind>,

    /// Custom environment variable name override.
    ///
    /// If `None`, the field name is converted to upper case.
    pub var: Option<String>,

    /// Lower clamp for numeric kinds (elements, for lists).
    pub min: Option<Expr>,

    /// Upper clamp for numeric kinds (elements, for lists).
    pub max: Option<Expr>,

    /// Value used when the variable is unset.
    pub default: Option<Expr>,

    /// Parse fallback for elements of numeric lists.
    pub element_default: Option<Expr>,

    /// Function producing a fresh default on every population.
    pub default_factory: Option<Path>,
}

impl FieldAttrs {
    /// Extract and validate `#[env(...)]` attributes from a struct field.
    ///
    /// Attributes other than `env` are left for other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }
            attrs.present = true;

            attr.parse_nested_meta(|meta| {
                // var = "..."
                if meta.path.is_ident("var") {
                    let value = meta.value()?;
                    let lit: Lit = value.parse()?;
                    let Lit::Str(s) = lit else {
                        return Err(meta.error("var must be a string literal"));
                    };
                    attrs.var = Some(s.value());
                    return Ok(());
                }

                if meta.path.is_ident("min") {
                    attrs.min = Some(meta.value()?.parse()?);
                    return Ok(());
                }

                if meta.path.is_ident("max") {
                    attrs.max = Some(meta.value()?.parse()?);
                    return Ok(());
                }

                if meta.path.is_ident("default") {
                    attrs.default = Some(meta.value()?.parse()?);
                    return Ok(());
                }

                if meta.path.is_ident("element_default") {
                    attrs.element_default = Some(meta.value()?.parse()?);
                    return Ok(());
                }

                // default_factory = path::to::function
                if meta.path.is_ident("default_factory") {
                    attrs.default_factory = Some(meta.value()?.parse()?);
                    return Ok(());
                }

                // bare kind identifier
                let kind = meta
                    .path
                    .get_ident()
                    .and_then(|ident| Kind::from_ident(&ident.to_string()));
                if let Some(kind) = kind {
                    if let Some(previous) = attrs.kind {
                        return Err(meta.error(format!(
                            "conflicting kinds `{}` and `{}`",
                            previous.factory(),
                            kind.factory()
                        )));
                    }
                    attrs.kind = Some(kind);
                    return Ok(());
                }

                Err(meta.error("unsupported env attribute"))
            })?;
        }

        attrs.validate(field)?;
        Ok(attrs)
    }

    fn validate(&self, field: &Field) -> syn::Result<()> {
        let kind = self.kind;
        let takes_bounds = kind.is_some_and(|k| k.is_numeric() || k.is_numeric_list());

        if (self.min.is_some() || self.max.is_some()) && !takes_bounds {
            return Err(syn::Error::new_spanned(
                field,
                "min/max are only supported on numeric kinds",
            ));
        }

        if self.element_default.is_some() && !kind.is_some_and(Kind::is_numeric_list) {
            return Err(syn::Error::new_spanned(
                field,
                "element_default is only supported on numeric list kinds",
            ));
        }

        Ok(())
    }
}

/// Parsed `#[env(...)]` attributes from the struct itself.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Prefix added to every variable name.
    pub prefix: String,
}

impl StructAttrs {
    pub fn from_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &input.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("prefix") {
                    let value = meta.value()?;
                    let lit: Lit = value.parse()?;
                    let Lit::Str(s) = lit else {
                        return Err(meta.error("prefix must be a string literal"));
                    };
                    attrs.prefix = s.value();
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level env attribute"))
            })?;
        }

        Ok(attrs)
    }
}
