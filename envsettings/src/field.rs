//! Per-field specifications: which variable to read, how to cast it, and
//! what to fall back to.

use crate::cast::{Bounds, Cast};
use crate::error::SettingsError;
use crate::value::Value;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

type DefaultFactory = dyn Fn() -> Value + Send + Sync;

/// How one settings field is sourced from the environment.
///
/// Built once when the schema is declared and shared by every population.
/// The typed factories ([`Field::integer`], [`Field::string_list`], ...) set
/// the matching [`Cast`]; numeric factories also copy the fallback of their
/// [`Bounds`] into the field default, so the same value is used when the
/// variable is missing and when it fails to parse.
///
/// ```rust
/// use envsettings::{cast::Bounds, Field};
///
/// let port = Field::integer("PORT", Bounds::new().min(1).max(65535).with_default(8080));
/// assert_eq!(port.var(), Some("PORT"));
/// assert!(port.has_default());
///
/// let hosts = Field::string_list("HOSTS").with_default(vec!["localhost"]);
/// assert_eq!(hosts.resolve_default().unwrap().to_string(), "localhost");
/// ```
#[derive(Clone, Default)]
pub struct Field {
    var: Option<String>,
    cast: Option<Cast>,
    default: Option<Value>,
    default_factory: Option<Arc<DefaultFactory>>,
}

impl Field {
    /// An empty specification: no variable, no cast, no default.
    pub fn new() -> Self {
        Self::default()
    }

    fn typed(var: impl Into<String>, cast: Cast) -> Self {
        Self {
            var: Some(var.into()),
            cast: Some(cast),
            ..Self::default()
        }
    }

    fn typed_with(var: impl Into<String>, cast: Cast, default: Option<Value>) -> Self {
        Self {
            default,
            ..Self::typed(var, cast)
        }
    }

    pub fn string(var: impl Into<String>) -> Self {
        Self::typed(var, Cast::Str)
    }

    pub fn boolean(var: impl Into<String>) -> Self {
        Self::typed(var, Cast::Bool)
    }

    pub fn integer(var: impl Into<String>, bounds: Bounds<i64>) -> Self {
        let default = bounds.default.map(Value::Int);
        Self::typed_with(var, Cast::Int(bounds), default)
    }

    pub fn float(var: impl Into<String>, bounds: Bounds<f64>) -> Self {
        let default = bounds.default.map(Value::Float);
        Self::typed_with(var, Cast::Float(bounds), default)
    }

    /// Alias of [`Field::float`].
    pub fn number(var: impl Into<String>, bounds: Bounds<f64>) -> Self {
        Self::float(var, bounds)
    }

    pub fn decimal(var: impl Into<String>, bounds: Bounds<Decimal>) -> Self {
        let default = bounds.default.map(Value::Decimal);
        Self::typed_with(var, Cast::Decimal(bounds), default)
    }

    pub fn json(var: impl Into<String>) -> Self {
        Self::typed(var, Cast::Json)
    }

    /// A comma-separated list whose pieces are converted with `element`.
    ///
    /// The list default is set with [`Field::with_default`] and is separate
    /// from any fallback configured on the element cast.
    pub fn list(var: impl Into<String>, element: Cast) -> Self {
        Self::typed(var, Cast::list_of(element))
    }

    pub fn string_list(var: impl Into<String>) -> Self {
        Self::list(var, Cast::Str)
    }

    pub fn boolean_list(var: impl Into<String>) -> Self {
        Self::list(var, Cast::Bool)
    }

    pub fn integer_list(var: impl Into<String>, element: Bounds<i64>) -> Self {
        Self::list(var, Cast::Int(element))
    }

    pub fn float_list(var: impl Into<String>, element: Bounds<f64>) -> Self {
        Self::list(var, Cast::Float(element))
    }

    /// Alias of [`Field::float_list`].
    pub fn number_list(var: impl Into<String>, element: Bounds<f64>) -> Self {
        Self::float_list(var, element)
    }

    pub fn decimal_list(var: impl Into<String>, element: Bounds<Decimal>) -> Self {
        Self::list(var, Cast::Decimal(element))
    }

    pub fn json_list(var: impl Into<String>) -> Self {
        Self::list(var, Cast::Json)
    }

    pub fn with_var(mut self, var: impl Into<String>) -> Self {
        self.var = Some(var.into());
        self
    }

    pub fn with_cast(mut self, cast: Cast) -> Self {
        self.cast = Some(cast);
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Produce the default by calling `factory` on every resolution.
    pub fn with_default_factory<F, V>(mut self, factory: F) -> Self
    where
        F: Fn() -> V + Send + Sync + 'static,
        V: Into<Value>,
    {
        self.default_factory = Some(Arc::new(move || factory().into()));
        self
    }

    pub fn var(&self) -> Option<&str> {
        self.var.as_deref()
    }

    pub fn cast(&self) -> Option<&Cast> {
        self.cast.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some() || self.default_factory.is_some()
    }

    /// A fresh copy of the default value.
    ///
    /// The stored default wins over the factory. Fails with
    /// [`SettingsError::MissingValue`] when neither is set.
    pub fn resolve_default(&self) -> Result<Value, SettingsError> {
        if let Some(default) = &self.default {
            return Ok(default.clone());
        }
        if let Some(factory) = &self.default_factory {
            return Ok(factory());
        }
        Err(SettingsError::missing("", self.var().unwrap_or_default()))
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("var", &self.var)
            .field("cast", &self.cast)
            .field("default", &self.default)
            .field("default_factory", &self.default_factory.as_ref().map(|_| ".."))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_integer_copies_bounds_default() {
        let field = Field::integer("PORT", Bounds::new().with_default(5));
        assert_eq!(field.resolve_default().unwrap(), Value::Int(5));
    }

    #[test]
    fn test_string_without_default() {
        let field = Field::string("HOST");
        assert!(!field.has_default());
        assert!(matches!(
            field.resolve_default(),
            Err(SettingsError::MissingValue { ref var, .. }) if var == "HOST"
        ));
    }

    #[test]
    fn test_default_is_copied() {
        let field = Field::string_list("TAGS").with_default(vec!["a", "b"]);
        let mut first = field.resolve_default().unwrap();
        if let Value::List(items) = &mut first {
            items.push(Value::from("c"));
        }
        assert_eq!(field.resolve_default().unwrap(), Value::from(vec!["a", "b"]));
    }

    #[test]
    fn test_default_factory_called_per_resolution() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let field = Field::integer_list("IDS", Bounds::none()).with_default_factory(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Vec::<i64>::new()
        });

        assert!(field.has_default());
        field.resolve_default().unwrap();
        field.resolve_default().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_value_wins_over_factory() {
        let field = Field::string("NAME")
            .with_default("value")
            .with_default_factory(|| "factory");
        assert_eq!(field.resolve_default().unwrap(), Value::from("value"));
    }

    #[test]
    fn test_list_element_default_is_not_field_default() {
        let field = Field::integer_list("PORTS", Bounds::new().with_default(80));
        assert!(!field.has_default());
        let value = field.cast().unwrap().apply("443, nope").unwrap();
        assert_eq!(value, Value::from(vec![443i64, 80]));
    }

    #[test]
    fn test_new_has_nothing() {
        let field = Field::new();
        assert!(field.var().is_none());
        assert!(field.cast().is_none());
        assert!(!field.has_default());
    }
}
