use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, GenericArgument, PathArguments, Type, parse_macro_input};

/// Shape of a field found by [`derive_get_field`]
enum FieldKind {
    Plain,
    Optional,
    Absent,
}

#[proc_macro_derive(GetField)]
pub fn derive_get_field(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;
    let fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => return quote! {}.into(),
        },
        _ => return quote! {}.into(),
    };

    let field_kind = |field_name: &str, type_name: &str| -> FieldKind {
        fields
            .iter()
            .find(|f| f.ident.as_ref().map(|id| id == field_name).unwrap_or(false))
            .map(|f| {
                if is_type_named(&f.ty, type_name) {
                    FieldKind::Plain
                } else if option_inner(&f.ty).is_some_and(|inner| is_type_named(inner, type_name)) {
                    FieldKind::Optional
                } else {
                    FieldKind::Absent
                }
            })
            .unwrap_or(FieldKind::Absent)
    };

    // chat_id: ChatId | Option<ChatId>
    let chat_id_body = match field_kind("chat_id", "ChatId") {
        FieldKind::Plain => quote! { Some(&self.chat_id) },
        FieldKind::Optional => quote! { self.chat_id.as_ref() },
        FieldKind::Absent => quote! { None },
    };
    // inline_message_id: String | Option<String>
    let inline_body = match field_kind("inline_message_id", "String") {
        FieldKind::Plain => quote! { Some(self.inline_message_id.as_str()) },
        FieldKind::Optional => quote! { self.inline_message_id.as_deref() },
        FieldKind::Absent => quote! { None },
    };

    let expanded = quote! {
        impl #name {
            pub fn _get_chat_id(&self) -> Option<&crate::api::types::ChatId> {
                #chat_id_body
            }

            pub fn _get_inline_message_id(&self) -> Option<&str> {
                #inline_body
            }
        }
    };
    expanded.into()
}

fn is_type_named(ty: &Type, name: &str) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|seg| seg.ident == name && seg.arguments.is_empty())
            .unwrap_or(false),
        Type::Group(group) => is_type_named(&group.elem, name),
        _ => false,
    }
}

fn option_inner(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Path(type_path) => {
            let seg = type_path.path.segments.last()?;
            if seg.ident != "Option" {
                return None;
            }
            match &seg.arguments {
                PathArguments::AngleBracketed(args) => match args.args.first()? {
                    GenericArgument::Type(inner) => Some(inner),
                    _ => None,
                },
                _ => None,
            }
        }
        Type::Group(group) => option_inner(&group.elem),
        _ => None,
    }
}
