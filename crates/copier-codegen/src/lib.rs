// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{
    parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam, Ident, LitStr, Token,
};

/// One argument of `#[copier(...)]`.
enum Arg {
    /// Annotation text, e.g. `"must,nopanic"`.
    Tag(LitStr),
    /// `flatten`: promote the fields of an embedded struct.
    Flatten,
}

impl Parse for Arg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            return Ok(Arg::Tag(input.parse()?));
        }
        let ident: Ident = input.parse()?;
        if ident == "flatten" {
            Ok(Arg::Flatten)
        } else {
            Err(syn::Error::new(
                ident.span(),
                "expected an annotation string or `flatten`",
            ))
        }
    }
}

/// Collected `#[copier(...)]` arguments of one field.
#[derive(Default)]
struct FieldAttrs {
    tags: Vec<String>,
    flatten: bool,
}

fn field_attrs(field: &syn::Field) -> syn::Result<FieldAttrs> {
    let mut attrs = FieldAttrs::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("copier") {
            continue;
        }
        let args = attr.parse_args_with(Punctuated::<Arg, Token![,]>::parse_terminated)?;
        for arg in args {
            match arg {
                Arg::Tag(lit) => attrs.tags.push(lit.value()),
                Arg::Flatten => attrs.flatten = true,
            }
        }
    }
    Ok(attrs)
}

/// Fields are accessed by reference at their `offset_of!` offset, which
/// must be aligned: `repr(packed)` and `repr(packed(N))` are rejected.
fn reject_packed(input: &DeriveInput) -> syn::Result<()> {
    for attr in &input.attrs {
        if !attr.path().is_ident("repr") {
            continue;
        }
        let mut packed = false;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("packed") {
                packed = true;
            }
            // Skip arguments such as `packed(2)` or `align(8)`.
            if meta.input.peek(syn::token::Paren) {
                meta.input.parse::<proc_macro2::Group>()?;
            }
            Ok(())
        })?;
        if packed {
            return Err(syn::Error::new_spanned(
                attr,
                "Packed structs are not supported (fields may be unaligned)",
            ));
        }
    }
    Ok(())
}

/// `#[derive(Reflect)]`: runtime type information for a named-field struct.
///
/// Field annotations:
/// - `#[copier("-")]`: never read or written
/// - `#[copier("must")]`, `#[copier("must,nopanic")]`: required field
/// - `#[copier("OtherName")]`: match under another name
/// - `#[copier(flatten)]`: promote the fields of an embedded struct
///
/// Type parameters get a `Reflect` bound; lifetime parameters and
/// `#[repr(packed)]` are rejected.
///
/// Example:
/// ```ignore
/// use copier::Reflect;
///
/// #[derive(Reflect)]
/// struct Order {
///     #[copier("ID")]
///     order_id: u64,
///     #[copier("must")]
///     customer: String,
///     #[copier(flatten)]
///     audit: Audit,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(copier))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(mut input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => f.named.clone(),
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Only named fields are supported",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Only structs are supported",
            ))
        }
    };

    reject_packed(&input)?;

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Reflect types must be 'static; lifetime parameters are not supported",
        ));
    }

    let type_params: Vec<Ident> = input
        .generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Type(t) => Some(t.ident.clone()),
            _ => None,
        })
        .collect();
    {
        let where_clause = input.generics.make_where_clause();
        for param in &type_params {
            where_clause
                .predicates
                .push(parse_quote!(#param: ::copier::Reflect));
        }
    }

    let mut descriptors = Vec::with_capacity(fields.len());
    let mut zeros = Vec::with_capacity(fields.len());
    for field in &fields {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let ty = &field.ty;
        let name = ident.unraw().to_string();
        let attrs = field_attrs(field)?;

        let mut descriptor = quote! {
            ::copier::FieldDescriptor::new::<#ty>(#name, ::core::mem::offset_of!(Self, #ident))
        };
        if !attrs.tags.is_empty() {
            let tag = attrs.tags.join(",");
            descriptor = quote! { #descriptor.tag(#tag) };
        }
        if attrs.flatten {
            descriptor = quote! { #descriptor.embedded() };
        }
        descriptors.push(descriptor);
        zeros.push(quote! { #ident: <#ty as ::copier::Reflect>::zero() });
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        // SAFETY: the descriptor is built for `Self` and lists every field
        // with its declared type and `offset_of!` offset.
        unsafe impl #impl_generics ::copier::Reflect for #name #ty_generics #where_clause {
            fn type_ref() -> ::copier::TypeRef {
                ::copier::types::intern::<Self>(|| {
                    ::copier::TypeDescriptor::structure::<Self>(::std::vec![
                        #(#descriptors),*
                    ])
                })
            }

            fn zero() -> Self {
                Self {
                    #(#zeros),*
                }
            }

            fn reflect_type(&self) -> ::copier::TypeRef {
                <Self as ::copier::Reflect>::type_ref()
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::core::any::Any> {
                self
            }
        }
    })
}
