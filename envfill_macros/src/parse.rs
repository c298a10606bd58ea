//! Parsing of `#[envfill(...)]` field attributes.

use syn::Field;

/// Per-field attribute values recognised by the derive.
pub(crate) struct FieldAttrs {
    /// Declared default text, present when `default = "..."` was given.
    pub(crate) default: Option<String>,
}

/// Reads the `#[envfill(...)]` attributes of `field`.
///
/// Unknown keys are rejected. A repeated `default` keeps the last value,
/// and an explicitly empty default counts as declared.
pub(crate) fn field_attrs(field: &Field) -> syn::Result<FieldAttrs> {
    let mut default = None;
    for attr in &field.attrs {
        if !attr.path().is_ident("envfill") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("default") {
                let text: syn::LitStr = meta.value()?.parse()?;
                default = Some(text.value());
                Ok(())
            } else {
                Err(meta.error("unsupported envfill attribute; expected `default = \"...\"`"))
            }
        })?;
    }
    Ok(FieldAttrs { default })
}
