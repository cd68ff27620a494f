//! Listing the variables a settings record reads.

use crate::schema::{FieldType, Schema, Settings};
use std::io::{self, Write};

/// One `VAR=default` line per environment-backed field, nested records
/// included, in declaration order.
///
/// Fields without a default produce `VAR=`. Floats keep their fractional
/// part (`1.0`). The environment is never read.
pub fn describe(schema: &Schema) -> Vec<String> {
    let mut lines = Vec::new();
    collect(schema, &mut lines);
    lines
}

fn collect(schema: &Schema, lines: &mut Vec<String>) {
    for def in schema.fields() {
        if let FieldType::Record(nested) = &def.ty {
            collect(nested, lines);
            continue;
        }
        let Some(spec) = &def.spec else {
            continue;
        };

        let mut line = format!("{}=", spec.var().unwrap_or_default());
        if let Ok(default) = spec.resolve_default() {
            line.push_str(&default.to_string());
        }
        lines.push(line);
    }
}

/// Write the lines of [`describe`] to `out`.
pub fn show_to<W: Write + ?Sized>(schema: &Schema, out: &mut W) -> io::Result<()> {
    for line in describe(schema) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Print the variables read by `T` to stdout.
pub fn show<T: Settings>() -> io::Result<()> {
    show_to(&T::schema(), &mut io::stdout().lock())
}
