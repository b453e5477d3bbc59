//! Attribute parsing for `#[env("...")]` annotations.
//!
//! The tag text is passed through to the runtime unchanged; this module only
//! checks that it is written as a single string literal.

use syn::{Field, LitStr};

/// Parsed `#[env(...)]` attribute of a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Raw tag text, `None` when the field has no `#[env]` attribute.
    pub tag: Option<LitStr>,
}

impl FieldAttrs {
    /// Extract the `#[env("...")]` attribute from a struct field.
    ///
    /// Attributes other than `env` are left for other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            if attrs.tag.is_some() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "duplicate env attribute, combine options as #[env(\"NAME,omitempty\")]",
                ));
            }

            let tag: LitStr = attr.parse_args().map_err(|e| {
                syn::Error::new(
                    e.span(),
                    "expected a string literal, e.g. #[env(\"NAME\")], #[env(\"NAME,omitempty\")] or #[env(\"-\")]",
                )
            })?;
            attrs.tag = Some(tag);
        }

        Ok(attrs)
    }

    /// Tag text handed to the runtime, empty when absent.
    pub fn tag_value(&self) -> String {
        self.tag.as_ref().map(LitStr::value).unwrap_or_default()
    }
}
