//! Procedural macros for Horizon ObjList item descriptor tables.
//!
//! This crate provides the `#[derive(ListItem)]` macro, which generates the
//! static [`ItemMeta`] table a list model uses to discover roles, read and
//! write values, and subscribe to change notifications.
//!
//! [`ItemMeta`]: https://docs.rs/horizon-objlist-core/latest/horizon_objlist_core/meta/struct.ItemMeta.html
//!
//! # Attributes
//!
//! ## `#[property]`
//!
//! Marks a field as a property with optional change notification:
//!
//! ```ignore
//! #[derive(ListItem)]
//! struct Person {
//!     base: ObjectBase,
//!
//!     #[property(notify = "name_changed")]
//!     name: Property<String>,
//!
//!     #[property]
//!     age: Property<i32>,
//!
//!     #[property(read_only)]
//!     created: i64,
//!
//!     #[signal]
//!     name_changed: Signal<String>,
//! }
//! ```
//!
//! Property attributes:
//! - `notify = "signal_name"`: Links the property to a `#[signal]` field. A
//!   `Signal<()>` is emitted with `()`, any other signal with the new value.
//! - `read_only`: No setter is generated
//! - `skip`: Excludes the field from the descriptor table
//!
//! Fields without attributes are properties too, unless their name starts with
//! `_` or they are the `base` field. Plain (non-`Property`) fields are always
//! read-only, since items are only reachable through shared references.
//!
//! ## `#[signal]`
//!
//! Marks a field as a signal.
//!
//! ## `base: ObjectBase`
//!
//! When present, an `Object` implementation is generated as well, which makes
//! the type usable with owning list models.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Data, DeriveInput, Expr, ExprLit, Field, Fields, Ident, Lit, LitStr, Type, parse_macro_input,
};

/// Derive the `ListItem` trait and generate the item's descriptor table.
///
/// This macro generates:
/// - Type-erased reader/writer functions for properties
/// - Signal accessor functions
/// - A static `ItemMeta` table and the `ListItem` implementation
/// - An `Object` implementation when a `base` field is present
#[proc_macro_derive(ListItem, attributes(property, signal))]
pub fn derive_list_item(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_derive_list_item(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Parsed property information.
struct PropertyInfo {
    field_name: Ident,
    inner_type: Type,
    notify_signal: Option<LitStr>,
    read_only: bool,
    is_property_wrapper: bool,
}

/// Parsed signal information.
struct SignalInfo {
    field_name: Ident,
    is_unit: bool,
}

fn impl_derive_list_item(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "ListItem derive does not support generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "ListItem derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "ListItem derive only supports structs",
            ));
        }
    };

    let has_base = fields
        .iter()
        .any(|f| f.ident.as_ref().is_some_and(|i| i == "base"));

    let mut properties = Vec::new();
    let mut signals = Vec::new();

    for field in fields.iter() {
        if let Some(signal_info) = parse_signal_field(field) {
            signals.push(signal_info);
        } else if let Some(prop_info) = parse_property_field(field)? {
            properties.push(prop_info);
        }
    }

    for prop in &properties {
        if let Some(notify) = &prop.notify_signal
            && !signals.iter().any(|s| s.field_name == notify.value())
        {
            return Err(syn::Error::new_spanned(
                notify,
                format!("notify signal `{}` is not a #[signal] field", notify.value()),
            ));
        }
    }

    let property_fns = generate_property_fns(struct_name, &properties, &signals);
    let signal_fns = generate_signal_fns(struct_name, &signals);
    let property_meta = generate_property_meta(struct_name, &properties);
    let signal_meta = generate_signal_meta(struct_name, &signals);

    let meta_name = format_ident!("__OBJLIST_{}_META", struct_name.to_string().to_uppercase());
    let type_name_str = struct_name.to_string();

    let object_impl = if has_base {
        quote! {
            impl ::horizon_objlist_core::Object for #struct_name {
                fn object_base(&self) -> &::horizon_objlist_core::ObjectBase {
                    &self.base
                }
            }
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        #property_fns
        #signal_fns

        #[allow(non_upper_case_globals)]
        static #meta_name: ::horizon_objlist_core::ItemMeta<#struct_name> =
            ::horizon_objlist_core::ItemMeta {
                type_name: #type_name_str,
                properties: &#property_meta,
                signals: &#signal_meta,
            };

        impl ::horizon_objlist_core::ListItem for #struct_name {
            fn meta() -> &'static ::horizon_objlist_core::ItemMeta<Self> {
                &#meta_name
            }
        }

        #object_impl
    })
}

/// Parse a field as a property, unless it is skipped.
fn parse_property_field(field: &Field) -> syn::Result<Option<PropertyInfo>> {
    let field_name = match &field.ident {
        Some(name) => name.clone(),
        None => return Ok(None),
    };

    if field_name == "base" {
        return Ok(None);
    }

    let mut notify_signal = None;
    let mut read_only = false;
    let mut has_property_attr = false;
    let mut skip = false;

    for attr in &field.attrs {
        if !attr.path().is_ident("property") {
            continue;
        }
        has_property_attr = true;

        // A bare #[property] carries no arguments.
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("notify") {
                let value: Expr = meta.value()?.parse()?;
                match value {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(lit_str),
                        ..
                    }) => notify_signal = Some(lit_str),
                    other => {
                        return Err(syn::Error::new_spanned(
                            other,
                            "expected a string literal signal name",
                        ));
                    }
                }
            } else if meta.path.is_ident("read_only") {
                read_only = true;
            } else if meta.path.is_ident("skip") {
                skip = true;
            } else {
                return Err(meta.error("unknown property attribute"));
            }
            Ok(())
        })?;
    }

    if skip {
        return Ok(None);
    }

    if !has_property_attr && field_name.to_string().starts_with('_') {
        return Ok(None);
    }

    let (inner_type, is_property_wrapper) = extract_inner_type(&field.ty);

    Ok(Some(PropertyInfo {
        field_name,
        inner_type,
        notify_signal,
        read_only: read_only || !is_property_wrapper,
        is_property_wrapper,
    }))
}

/// Parse a field with a #[signal] attribute.
fn parse_signal_field(field: &Field) -> Option<SignalInfo> {
    let field_name = field.ident.clone()?;

    if !field.attrs.iter().any(|attr| attr.path().is_ident("signal")) {
        return None;
    }

    Some(SignalInfo {
        field_name,
        is_unit: signal_args_are_unit(&field.ty),
    })
}

/// Extract inner type from Property<T> or return the original type.
fn extract_inner_type(ty: &Type) -> (Type, bool) {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Property"
        && let syn::PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(syn::GenericArgument::Type(inner)) = args.args.first()
    {
        return (inner.clone(), true);
    }
    (ty.clone(), false)
}

/// Returns `true` for `Signal<()>` (or an unparseable signal type).
fn signal_args_are_unit(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Signal"
        && let syn::PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(syn::GenericArgument::Type(args_type)) = args.args.first()
    {
        return matches!(args_type, Type::Tuple(tuple) if tuple.elems.is_empty());
    }
    true
}

/// Convert a type to a string representation.
fn type_to_string(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}

fn reader_name(struct_name: &Ident, field: &Ident) -> Ident {
    format_ident!("__objlist_{}_{}_read", struct_name, field)
}

fn writer_name(struct_name: &Ident, field: &Ident) -> Ident {
    format_ident!("__objlist_{}_{}_write", struct_name, field)
}

fn signal_accessor_name(struct_name: &Ident, field: &Ident) -> Ident {
    format_ident!("__objlist_{}_{}_signal", struct_name, field)
}

/// Generate reader and writer functions for properties.
fn generate_property_fns(
    struct_name: &Ident,
    properties: &[PropertyInfo],
    signals: &[SignalInfo],
) -> TokenStream2 {
    let fns = properties.iter().map(|prop| {
        let field_name = &prop.field_name;
        let inner_type = &prop.inner_type;
        let reader = reader_name(struct_name, field_name);
        let writer = writer_name(struct_name, field_name);

        let read_body = if prop.is_property_wrapper {
            quote! {
                ::horizon_objlist_core::PropertyValue::to_item_data(&item.#field_name.get())
            }
        } else {
            quote! {
                ::horizon_objlist_core::PropertyValue::to_item_data(&item.#field_name)
            }
        };

        let write_fn = if prop.read_only {
            quote! {}
        } else {
            let emit = prop
                .notify_signal
                .as_ref()
                .and_then(|name| signals.iter().find(|s| s.field_name == name.value()))
                .map(|signal| {
                    let signal_field = &signal.field_name;
                    if signal.is_unit {
                        quote! { item.#signal_field.emit(()); }
                    } else {
                        quote! { item.#signal_field.emit(new_value); }
                    }
                })
                .unwrap_or_default();

            quote! {
                #[allow(non_snake_case)]
                fn #writer(
                    item: &#struct_name,
                    value: ::horizon_objlist_core::ItemData,
                ) -> ::std::result::Result<bool, ::horizon_objlist_core::PropertyError> {
                    let got = value.kind_name();
                    let new_value = <#inner_type as ::horizon_objlist_core::PropertyValue>::from_item_data(&value)
                        .ok_or(::horizon_objlist_core::PropertyError::TypeMismatch {
                            expected: <#inner_type as ::horizon_objlist_core::PropertyValue>::TYPE_NAME,
                            got,
                        })?;
                    let changed = item.#field_name.set(::std::clone::Clone::clone(&new_value));
                    if changed {
                        #emit
                    }
                    Ok(changed)
                }
            }
        };

        quote! {
            #[allow(non_snake_case)]
            fn #reader(item: &#struct_name) -> ::horizon_objlist_core::ItemData {
                #read_body
            }

            #write_fn
        }
    });

    quote! { #(#fns)* }
}

/// Generate type-erased accessors for signals.
fn generate_signal_fns(struct_name: &Ident, signals: &[SignalInfo]) -> TokenStream2 {
    let fns = signals.iter().map(|signal| {
        let field_name = &signal.field_name;
        let accessor = signal_accessor_name(struct_name, field_name);
        quote! {
            #[allow(non_snake_case)]
            fn #accessor(item: &#struct_name) -> &dyn ::horizon_objlist_core::SignalEmitter {
                &item.#field_name
            }
        }
    });

    quote! { #(#fns)* }
}

/// Generate the property descriptor array.
fn generate_property_meta(struct_name: &Ident, properties: &[PropertyInfo]) -> TokenStream2 {
    let entries = properties.iter().map(|prop| {
        let field_name = &prop.field_name;
        let field_name_str = field_name.to_string();
        let type_name_str = type_to_string(&prop.inner_type);
        let reader = reader_name(struct_name, field_name);

        let mut entry = quote! {
            ::horizon_objlist_core::PropertyDescriptor::new(#field_name_str, #type_name_str, #reader)
        };
        if !prop.read_only {
            let writer = writer_name(struct_name, field_name);
            entry = quote! { #entry.with_write(#writer) };
        }
        if let Some(notify) = &prop.notify_signal {
            entry = quote! { #entry.with_notify(#notify) };
        }
        entry
    });

    quote! { [#(#entries),*] }
}

/// Generate the signal descriptor array.
fn generate_signal_meta(struct_name: &Ident, signals: &[SignalInfo]) -> TokenStream2 {
    let entries = signals.iter().map(|signal| {
        let name_str = signal.field_name.to_string();
        let accessor = signal_accessor_name(struct_name, &signal.field_name);
        quote! {
            ::horizon_objlist_core::SignalDescriptor::new(#name_str, #accessor)
        }
    });

    quote! { [#(#entries),*] }
}
