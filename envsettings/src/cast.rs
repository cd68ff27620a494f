//! Conversions from raw environment strings into typed values.
//!
//! Every cast accepts either a raw string or an already-typed [`Value`].
//! Strings are trimmed and lower-cased before parsing; typed values skip
//! parsing. Numeric casts then clamp the result into the optional
//! `min`/`max` range of their [`Bounds`], so out-of-range input is altered
//! rather than rejected.
//!
//! ```rust
//! use envsettings::cast::{self, Bounds};
//!
//! assert_eq!(cast::integer("150", &Bounds::new().max(100)).unwrap(), 100);
//! assert_eq!(cast::float("3,14", &Bounds::none()).unwrap(), 3.14);
//! assert!(cast::boolean("Yes").unwrap());
//! assert_eq!(cast::list("a, b,,c", |s| Ok(s.to_string())).unwrap(), vec!["a", "b", "c"]);
//! ```

use crate::error::CastError;
use crate::value::Value;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Strings the boolean cast treats as `true`. Anything else is `false`.
const TRUTHY: [&str; 5] = ["1", "t", "y", "true", "yes"];

/// Optional clamping range and parse fallback for a numeric cast.
///
/// `default` is substituted only when a raw string fails to parse; the
/// substituted value is still clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub default: Option<T>,
}

impl<T> Default for Bounds<T> {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            default: None,
        }
    }
}

impl<T> Bounds<T> {
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// No clamping and no fallback.
    pub fn none() -> Self {
        Self::new()
    }

    pub fn min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_default(mut self, default: T) -> Self {
        self.default = Some(default);
        self
    }
}

impl<T: PartialOrd + Copy> Bounds<T> {
    fn clamp(&self, mut value: T) -> T {
        if let Some(min) = self.min {
            if value < min {
                value = min;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                value = max;
            }
        }
        value
    }
}

trait Numeric: Copy + PartialOrd {
    const NAME: &'static str;
    /// Accept `,` as the decimal separator when no `.` is present.
    const DECIMAL_COMMA: bool;

    fn from_typed(value: &Value) -> Option<Self>;
    fn parse(text: &str) -> Result<Self, String>;
}

impl Numeric for i64 {
    const NAME: &'static str = "int";
    const DECIMAL_COMMA: bool = false;

    fn from_typed(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    fn parse(text: &str) -> Result<Self, String> {
        text.parse().map_err(|e: std::num::ParseIntError| e.to_string())
    }
}

impl Numeric for f64 {
    const NAME: &'static str = "float";
    const DECIMAL_COMMA: bool = true;

    fn from_typed(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    fn parse(text: &str) -> Result<Self, String> {
        let parsed: f64 = text
            .parse()
            .map_err(|e: std::num::ParseFloatError| e.to_string())?;
        if !parsed.is_finite() {
            return Err("non-finite float".to_string());
        }
        Ok(parsed)
    }
}

impl Numeric for Decimal {
    const NAME: &'static str = "decimal";
    const DECIMAL_COMMA: bool = true;

    fn from_typed(value: &Value) -> Option<Self> {
        match value {
            Value::Decimal(d) => Some(*d),
            Value::Int(i) => Some(Decimal::from(*i)),
            _ => None,
        }
    }

    fn parse(text: &str) -> Result<Self, String> {
        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|e| e.to_string())
    }
}

fn numeric<T: Numeric>(raw: Value, bounds: &Bounds<T>) -> Result<T, CastError> {
    let value = match raw {
        Value::Str(raw) => {
            let mut text = raw.trim().to_lowercase();
            if T::DECIMAL_COMMA && !text.contains('.') && text.contains(',') {
                text = text.replacen(',', ".", 1);
            }
            match (T::parse(&text), bounds.default) {
                (Ok(parsed), _) => parsed,
                (Err(_), Some(fallback)) => fallback,
                (Err(message), None) => {
                    return Err(CastError::Parse {
                        value: raw,
                        type_name: T::NAME,
                        message,
                    })
                }
            }
        }
        other => T::from_typed(&other).ok_or(CastError::Type {
            expected: T::NAME,
            found: other.kind(),
        })?,
    };
    Ok(bounds.clamp(value))
}

/// Cast to `bool`.
///
/// Integers follow their truthiness. Strings are `true` only when they are
/// one of `1`, `t`, `y`, `true`, `yes` (case-insensitive, trimmed); every
/// other string, including typos, is `false`.
pub fn boolean(raw: impl Into<Value>) -> Result<bool, CastError> {
    match raw.into() {
        Value::Bool(b) => Ok(b),
        Value::Int(i) => Ok(i != 0),
        Value::Str(s) => Ok(TRUTHY.contains(&s.trim().to_lowercase().as_str())),
        other => Err(CastError::Type {
            expected: "bool",
            found: other.kind(),
        }),
    }
}

/// Cast to `i64`, clamped into `bounds`.
pub fn integer(raw: impl Into<Value>, bounds: &Bounds<i64>) -> Result<i64, CastError> {
    numeric(raw.into(), bounds)
}

/// Cast to `f64`, clamped into `bounds`.
///
/// A string without `.` has its first `,` read as the decimal separator.
/// `inf` and `nan` are parse failures, so the fallback applies to them.
pub fn float(raw: impl Into<Value>, bounds: &Bounds<f64>) -> Result<f64, CastError> {
    numeric(raw.into(), bounds)
}

/// Cast to [`Decimal`], clamped into `bounds`. Same separator rule as [`float`].
pub fn decimal(raw: impl Into<Value>, bounds: &Bounds<Decimal>) -> Result<Decimal, CastError> {
    numeric(raw.into(), bounds)
}

/// Decode JSON text.
pub fn json(raw: impl AsRef<[u8]>) -> Result<serde_json::Value, CastError> {
    Ok(serde_json::from_slice(raw.as_ref())?)
}

/// Split on `,`, drop blank pieces, and cast each trimmed piece with `element`.
///
/// Order and duplicates are preserved; an empty string yields an empty list.
pub fn list<T, F>(raw: &str, mut element: F) -> Result<Vec<T>, CastError>
where
    F: FnMut(&str) -> Result<T, CastError>,
{
    raw.trim()
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| element(piece))
        .collect()
}

type CustomFn = dyn Fn(&str) -> Result<Value, CastError> + Send + Sync;

/// The conversion a field applies to its raw environment string.
#[derive(Clone)]
pub enum Cast {
    Str,
    Bool,
    Int(Bounds<i64>),
    Float(Bounds<f64>),
    Decimal(Bounds<Decimal>),
    Json,
    List(Box<Cast>),
    Custom(Arc<CustomFn>),
}

impl Cast {
    /// Wrap a user function as a cast.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CastError> + Send + Sync + 'static,
    {
        Cast::Custom(Arc::new(f))
    }

    pub fn list_of(element: Cast) -> Self {
        Cast::List(Box::new(element))
    }

    pub fn apply(&self, raw: &str) -> Result<Value, CastError> {
        match self {
            Cast::Str => Ok(Value::Str(raw.to_string())),
            Cast::Bool => boolean(raw).map(Value::Bool),
            Cast::Int(bounds) => integer(raw, bounds).map(Value::Int),
            Cast::Float(bounds) => float(raw, bounds).map(Value::Float),
            Cast::Decimal(bounds) => decimal(raw, bounds).map(Value::Decimal),
            Cast::Json => json(raw).map(Value::Json),
            Cast::List(element) => list(raw, |piece| element.apply(piece)).map(Value::List),
            Cast::Custom(f) => f(raw),
        }
    }
}

impl fmt::Debug for Cast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cast::Str => f.write_str("Str"),
            Cast::Bool => f.write_str("Bool"),
            Cast::Int(b) => f.debug_tuple("Int").field(b).finish(),
            Cast::Float(b) => f.debug_tuple("Float").field(b).finish(),
            Cast::Decimal(b) => f.debug_tuple("Decimal").field(b).finish(),
            Cast::Json => f.write_str("Json"),
            Cast::List(element) => f.debug_tuple("List").field(element).finish(),
            Cast::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
