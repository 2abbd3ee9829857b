//! # jsonwrap Derive Macros
//!
//! This crate provides the procedural macro for `jsonwrap`. It implements `Field`,
//! `Element` and `Record` for a struct by walking its field list once and emitting
//! the encode, decode, copy and recycle bodies from that single ordered list.
//!
//! Compatible with `syn 2.0`.

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Path, parse_macro_input};

/// Derives `Field`, `Element` and `Record`.
#[proc_macro_derive(Record, attributes(jsonwrap))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(&input.generics, "Record does not support generic structs")
            .to_compile_error()
            .into();
    }

    let krate = match parse_attributes(&input.attrs) {
        Ok(krate) => krate,
        Err(e) => return e.to_compile_error().into(),
    };

    let data_struct = match input.data {
        Data::Struct(ds) => ds,
        _ => {
            return syn::Error::new(name.span(), "Record only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let named = match data_struct.fields {
        Fields::Named(named) => named.named,
        Fields::Unit => Default::default(),
        Fields::Unnamed(unnamed) => {
            return syn::Error::new_spanned(unnamed, "Record requires named fields")
                .to_compile_error()
                .into();
        }
    };

    let mut fields = Vec::new();
    for field in named {
        if let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("jsonwrap")) {
            return syn::Error::new_spanned(attr, "jsonwrap attributes are only allowed on the struct")
                .to_compile_error()
                .into();
        }
        let Some(ident) = field.ident else { continue };
        fields.push(RecordField {
            key: ident.unraw().to_string(),
            ident,
            ty: field.ty,
        });
    }

    let impl_field = generate_field(&krate, &name, &fields);
    let impl_element = generate_element(&krate, &name);
    let impl_record = generate_record(&krate, &name, &fields);

    let expanded = quote! {
        #impl_field
        #impl_element
        #impl_record
    };

    TokenStream::from(expanded)
}

// --- Internal Data Structures ---
struct RecordField {
    ident: syn::Ident,
    ty: syn::Type,
    /// Document key: the field name without a raw-identifier prefix.
    key: String,
}

/// Parses struct attributes. Returns the path of the runtime crate.
fn parse_attributes(attrs: &[Attribute]) -> syn::Result<Path> {
    let mut krate: Path = syn::parse_quote!(jsonwrap);

    for attr in attrs {
        if attr.path().is_ident("jsonwrap") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    let value = meta.value()?;
                    let s: LitStr = value.parse()?;
                    krate = s.parse()?;
                    return Ok(());
                }
                Err(meta.error("Unknown jsonwrap attribute key. Supported: crate"))
            })?;
        }
    }
    Ok(krate)
}

// --- Generator: Field ---
fn generate_field(krate: &Path, name: &syn::Ident, fields: &[RecordField]) -> proc_macro2::TokenStream {
    let idents: Vec<_> = fields.iter().map(|f| &f.ident).collect();
    let tys: Vec<_> = fields.iter().map(|f| &f.ty).collect();
    let keys: Vec<_> = fields.iter().map(|f| &f.key).collect();
    let name_str = name.unraw().to_string();

    quote! {
        #[allow(unused_variables, unused_mut)]
        impl #krate::Field for #name {
            const DESCRIPTOR: #krate::schema::FieldDescriptor =
                #krate::schema::FieldDescriptor::object(<Self as #krate::Record>::schema);

            fn zeroed() -> Self {
                Self {
                    #( #idents: <#tys as #krate::Field>::zeroed(), )*
                }
            }

            fn encode(&self, cx: &#krate::JsonWrap) -> #krate::Document {
                let mut map = #krate::rt::Object::new();
                #( #krate::rt::encode_field(&mut map, #keys, &self.#idents, cx); )*
                #krate::Document::Object(map)
            }

            fn decode(&mut self, node: &#krate::Document, cx: &#krate::JsonWrap) -> #krate::Result<()> {
                let Some(map) = #krate::rt::expect_object(node, #name_str, cx)? else {
                    return Ok(());
                };
                #( #krate::rt::decode_field(map, #keys, &mut self.#idents, cx)?; )*
                Ok(())
            }

            fn copy_to(&self, dst: &mut Self, cx: &#krate::JsonWrap) -> #krate::Result<()> {
                #( <#tys as #krate::Field>::copy_to(&self.#idents, &mut dst.#idents, cx)?; )*
                Ok(())
            }

            fn recycle(&mut self, cx: &#krate::JsonWrap) {
                #( <#tys as #krate::Field>::recycle(&mut self.#idents, cx); )*
            }
        }
    }
}

// --- Generator: Element ---
fn generate_element(krate: &Path, name: &syn::Ident) -> proc_macro2::TokenStream {
    quote! {
        impl #krate::Element for #name {
            const ELEMENT: #krate::schema::ElementType =
                #krate::schema::ElementType::Composite(<Self as #krate::Record>::schema);
        }
    }
}

// --- Generator: Record (schema) ---
fn generate_record(krate: &Path, name: &syn::Ident, fields: &[RecordField]) -> proc_macro2::TokenStream {
    let tys = fields.iter().map(|f| &f.ty);
    let keys = fields.iter().map(|f| &f.key);
    let name_str = name.unraw().to_string();

    quote! {
        impl #krate::Record for #name {
            fn schema() -> &'static #krate::schema::Schema {
                static SCHEMA: #krate::schema::Schema = #krate::schema::Schema {
                    name: #name_str,
                    fields: &[
                        #(
                            #krate::schema::FieldInfo {
                                name: #keys,
                                descriptor: <#tys as #krate::Field>::DESCRIPTOR,
                            },
                        )*
                    ],
                };
                &SCHEMA
            }
        }
    }
}
