//! Derive macro implementation for envsettings

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::{FieldAttrs, Kind, StructAttrs};

/// `EnvSettings` derive macro
///
/// Implements `envsettings::Settings` (the field schema) and an inherent
/// `from_env()` method. The struct must also implement
/// `serde::Deserialize`.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[env(prefix = "PREFIX_")]`: Add prefix to all env var names
///
/// **Field-level**:
/// - `#[env(<kind>)]`: Field kind (`string`, `integer`, `float`, `number`,
///   `decimal`, `boolean`, `json`, their `_list` variants, or `nested`)
/// - `#[env(var = "CUSTOM_NAME")]`: Custom environment variable name
/// - `#[env(min = expr, max = expr)]`: Clamping range for numeric kinds
/// - `#[env(default = expr)]`: Value used if env var not set
/// - `#[env(element_default = expr)]`: Parse fallback for numeric list elements
/// - `#[env(default_factory = path)]`: Function producing the default
///
/// # Example
///
/// See the `envsettings` crate documentation for usage examples.
#[proc_macro_derive(EnvSettings, attributes(env))]
pub fn derive_envsettings(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let record_name = struct_name.to_string();
    let struct_attrs = StructAttrs::from_input(input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "EnvSettings only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "EnvSettings only supports structs",
            ));
        }
    };

    let mut entries = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let attrs = FieldAttrs::from_field(field)?;
        entries.push(schema_entry(
            &ident.unraw().to_string(),
            &field.ty,
            &attrs,
            &struct_attrs.prefix,
        ));
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envsettings::Settings for #struct_name #ty_generics #where_clause {
            fn schema() -> ::envsettings::Schema {
                ::envsettings::Schema::new(#record_name)
                    #(#entries)*
            }
        }

        impl #impl_generics #struct_name #ty_generics #where_clause {
            /// Load settings from the process environment
            ///
            /// # Errors
            ///
            /// - Required environment variables are not set
            /// - Environment variable values cannot be converted
            /// - A field specification has no cast
            pub fn from_env() -> ::envsettings::anyhow::Result<Self> {
                Ok(::envsettings::from_env::<Self>()?)
            }
        }
    })
}

/// Builder call adding one field to the generated schema.
fn schema_entry(name: &str, ty: &syn::Type, attrs: &FieldAttrs, prefix: &str) -> TokenStream2 {
    if !attrs.present {
        return quote! { .plain(#name) };
    }

    // Uppercase the field name unless a name is given
    let var = format!(
        "{}{}",
        prefix,
        attrs.var.clone().unwrap_or_else(|| name.to_uppercase())
    );

    if attrs.kind == Some(Kind::Nested) {
        let nested = quote! { <#ty as ::envsettings::Settings>::schema() };
        let has_marker =
            attrs.var.is_some() || attrs.default.is_some() || attrs.default_factory.is_some();
        if !has_marker {
            return quote! { .nested(#name, #nested) };
        }
        let marker = with_defaults(quote! { ::envsettings::Field::new().with_var(#var) }, attrs);
        return quote! { .nested_with(#name, #nested, #marker) };
    }

    let spec = match attrs.kind {
        None => with_defaults(quote! { ::envsettings::Field::new().with_var(#var) }, attrs),
        Some(kind) if kind.is_numeric() => {
            let factory = format_ident!("{}", kind.factory());
            // The bounds default doubles as the field default
            let bounds = bounds(attrs, attrs.default.as_ref());
            with_factory(quote! { ::envsettings::Field::#factory(#var, #bounds) }, attrs)
        }
        Some(kind) if kind.is_numeric_list() => {
            let factory = format_ident!("{}", kind.factory());
            let bounds = bounds(attrs, attrs.element_default.as_ref());
            with_defaults(quote! { ::envsettings::Field::#factory(#var, #bounds) }, attrs)
        }
        Some(kind) => {
            let factory = format_ident!("{}", kind.factory());
            with_defaults(quote! { ::envsettings::Field::#factory(#var) }, attrs)
        }
    };

    quote! { .field(#name, #spec) }
}

fn bounds(attrs: &FieldAttrs, fallback: Option<&syn::Expr>) -> TokenStream2 {
    let min = attrs.min.as_ref().map(|min| quote! { .min(#min) });
    let max = attrs.max.as_ref().map(|max| quote! { .max(#max) });
    let fallback = fallback.map(|value| quote! { .with_default(#value) });
    quote! { ::envsettings::Bounds::new() #min #max #fallback }
}

fn with_defaults(spec: TokenStream2, attrs: &FieldAttrs) -> TokenStream2 {
    let default = attrs.default.as_ref().map(|value| quote! { .with_default(#value) });
    with_factory(quote! { #spec #default }, attrs)
}

fn with_factory(spec: TokenStream2, attrs: &FieldAttrs) -> TokenStream2 {
    let factory = attrs
        .default_factory
        .as_ref()
        .map(|path| quote! { .with_default_factory(#path) });
    quote! { #spec #factory }
}
