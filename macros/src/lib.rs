//! Derive macros for the Todux state container
//!
//! This crate provides procedural macros to reduce boilerplate when defining
//! action vocabularies.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates the action-kind tag enum and implements
//!   `todux_core::action::Action`
//!
//! # Example
//!
//! ```ignore
//! use todux_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     #[action(name = "todos/create")]
//!     CreateTodo { desc: String },
//!
//!     #[action(name = "selectedTodo/select")]
//!     SelectTodo { id: String },
//! }
//!
//! // Generated items:
//! let action = TodoAction::CreateTodo { desc: "test".into() };
//! assert_eq!(action.kind(), TodoActionKind::CreateTodo);
//! assert_eq!(action.action_type(), "todos/create");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derive macro for action enums
///
/// For an enum `Foo` this generates:
/// - `FooKind`, a fieldless `Copy` enum with one variant per action variant
/// - `FooKind::ALL` and `FooKind::action_type()`
/// - `impl todux_core::action::Action for Foo`
///
/// The deriving crate must depend on `todux-core`.
///
/// # Attributes
///
/// - `#[action(name = "slice/verb")]` - Set the action type name of a
///   variant. Without it the variant identifier is used.
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type, a generic enum or an empty enum
/// - An `#[action(...)]` attribute contains anything but `name = "..."`
///
/// # Example
///
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// pub enum LampAction {
///     #[action(name = "lamp/switch")]
///     Switch { on: bool },
///
///     Dim(u8),
/// }
///
/// assert_eq!(LampAction::Dim(3).kind(), LampActionKind::Dim);
/// assert_eq!(LampAction::Dim(3).action_type(), "Dim");
/// assert_eq!(LampActionKind::ALL.len(), 2);
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_action(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(error) => error.to_compile_error().into(),
    }
}

fn expand_action(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let vis = &input.vis;

    let Data::Enum(data_enum) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] can only be used on enums",
        ));
    };

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[derive(Action)] does not support generic enums",
        ));
    }

    if data_enum.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            "#[derive(Action)] needs at least one variant",
        ));
    }

    let kind_name = format_ident!("{}Kind", name);

    let mut kind_variants = Vec::new();
    let mut kind_docs = Vec::new();
    let mut kind_arms = Vec::new();
    let mut type_arms = Vec::new();

    for variant in &data_enum.variants {
        let variant_name = &variant.ident;
        let action_type =
            action_name(&variant.attrs)?.unwrap_or_else(|| variant_name.to_string());

        let pattern = match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) },
            Fields::Unit => quote! { Self::#variant_name },
        };

        kind_arms.push(quote! { #pattern => #kind_name::#variant_name, });
        type_arms.push(quote! { Self::#variant_name => #action_type, });
        kind_docs.push(format!("Tag of [`{name}::{variant_name}`] (`{action_type}`)"));
        kind_variants.push(variant_name);
    }

    let count = kind_variants.len();
    let kind_doc = format!("Fieldless tag of [`{name}`], one variant per action");

    Ok(quote! {
        #[doc = #kind_doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #vis enum #kind_name {
            #(
                #[doc = #kind_docs]
                #kind_variants,
            )*
        }

        impl #kind_name {
            /// Every kind, in declaration order
            pub const ALL: [Self; #count] = [#(Self::#kind_variants),*];

            /// Human readable type name of this kind
            #[must_use]
            pub const fn action_type(self) -> &'static str {
                match self {
                    #(#type_arms)*
                }
            }
        }

        impl ::todux_core::action::Action for #name {
            type Kind = #kind_name;

            fn kind(&self) -> #kind_name {
                match self {
                    #(#kind_arms)*
                }
            }

            fn action_type(&self) -> &'static str {
                ::todux_core::action::Action::kind(self).action_type()
            }
        }
    })
}

/// Reads `#[action(name = "...")]` from a variant's attributes
fn action_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut name = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("action")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic
mod tests {
    use super::*;

    fn expand(source: &str) -> syn::Result<String> {
        let input: DeriveInput = syn::parse_str(source)?;
        expand_action(&input).map(|tokens| tokens.to_string())
    }

    #[test]
    fn rejects_structs() {
        let error = expand("struct NotAnEnum { a: u8 }").unwrap_err();
        assert!(error.to_string().contains("only be used on enums"));
    }

    #[test]
    fn rejects_unknown_attribute_keys() {
        let error = expand(r#"enum A { #[action(kind = "x")] One }"#).unwrap_err();
        assert!(error.to_string().contains("expected `name"));
    }

    #[test]
    fn names_default_to_variant_ident() {
        let expanded = expand("pub enum A { One, #[action(name = \"a/two\")] Two(u8) }").unwrap();
        assert!(expanded.contains("pub enum AKind"));
        assert!(expanded.contains("\"One\""));
        assert!(expanded.contains("\"a/two\""));
    }
}
