//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type, Visibility};

mod attrs;

use attrs::FieldAttrs;

/// Map a field type onto the `envbind::Slot` variant that can hold it.
///
/// Matching is by the last path segment, so `String` and
/// `std::string::String` both map to `Str`. Type aliases are not seen
/// through and end up unsupported.
fn slot_variant(ty: &Type) -> Option<proc_macro2::Ident> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let seg = type_path.path.segments.last()?;
    if !seg.arguments.is_empty() {
        return None;
    }
    let variant = match seg.ident.to_string().as_str() {
        "i8" => "I8",
        "i16" => "I16",
        "i32" => "I32",
        "i64" => "I64",
        "isize" => "Isize",
        "u8" => "U8",
        "u16" => "U16",
        "u32" => "U32",
        "u64" => "U64",
        "usize" => "Usize",
        "f32" => "F32",
        "f64" => "F64",
        "String" => "Str",
        _ => return None,
    };
    Some(proc_macro2::Ident::new(variant, seg.ident.span()))
}

/// `Bind` derive macro
///
/// Implements `envbind::Fields` and `envbind::Destination` for a struct with
/// named fields, so it can be passed to `envbind::bind`.
///
/// # Field Attributes
///
/// - `#[env("NAME")]`: read `NAME` instead of the field name
/// - `#[env("NAME,omitempty")]`: read `NAME`, keep the field when unset
/// - `#[env(",omitempty")]`: read the field name, keep the field when unset
/// - `#[env("-")]`: never touch the field
///
/// Only `pub` fields are bound. Fields of types other than the 8 to 64 bit
/// integers, `isize`, `usize`, `f32`, `f64` and `String` fail at bind time
/// once their variable is set.
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
///
/// Tuple structs are rejected:
///
/// ```compile_fail
/// #[derive(envbind::Bind)]
/// struct Port(pub u16);
/// ```
///
/// So are tags that are not a single string literal:
///
/// ```compile_fail
/// #[derive(envbind::Bind)]
/// struct Config {
///     #[env(name = "PORT")]
///     pub port: u16,
/// }
/// ```
#[proc_macro_derive(Bind, attributes(env))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    // Struct name and generics
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Extract fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return syn::Error::new_spanned(
                    &input,
                    "Bind only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Bind only supports structs")
                .to_compile_error()
                .into();
        }
    };

    // Generate one descriptor per field, in declared order
    let descriptors = fields.iter().map(|field| {
        let Some(ident) = field.ident.as_ref() else {
            return syn::Error::new_spanned(field, "Bind requires named fields").to_compile_error();
        };
        let field_type = &field.ty;
        let field_name = ident.unraw().to_string();

        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(e) => return e.to_compile_error(),
        };
        let tag = attrs.tag_value();

        if !matches!(field.vis, Visibility::Public(_)) {
            return quote! {
                ::envbind::Field::unexported(
                    #field_name,
                    #tag,
                    ::std::any::type_name::<#field_type>()
                )
            };
        }

        let slot = match slot_variant(field_type) {
            Some(variant) => quote! { ::envbind::Slot::#variant(&mut self.#ident) },
            None => quote! {
                ::envbind::Slot::Unsupported(::std::any::type_name::<#field_type>())
            },
        };

        quote! {
            ::envbind::Field::new(#field_name, #tag, #slot)
        }
    });

    let expanded = quote! {
        impl #impl_generics ::envbind::Fields for #struct_name #ty_generics #where_clause {
            fn fields(&mut self) -> ::std::vec::Vec<::envbind::Field<'_>> {
                ::std::vec![
                    #(#descriptors),*
                ]
            }
        }

        impl #impl_generics ::envbind::Destination for #struct_name #ty_generics #where_clause {
            fn resolve(
                &mut self,
            ) -> ::std::result::Result<::envbind::Resolved<'_>, ::envbind::Error> {
                ::std::result::Result::Ok(::envbind::Resolved::Struct(self))
            }
        }
    };

    TokenStream::from(expanded)
}
