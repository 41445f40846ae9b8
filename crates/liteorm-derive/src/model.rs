//! Model derive macro implementation

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

use crate::naming::{table_name, to_snake_case};
use crate::sql_ident::parse_sql_ident;

const ID_COLUMN: &str = "id";
const CREATED_AT_COLUMN: &str = "created_at";
const UPDATED_AT_COLUMN: &str = "updated_at";

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let table = get_table_name(&input)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Model can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Model can only be derived for structs",
            ));
        }
    };

    let mut column_names: Vec<String> = Vec::with_capacity(fields.len());
    let mut from_row_fields: Vec<TokenStream> = Vec::with_capacity(fields.len());
    let mut value_exprs: Vec<TokenStream> = Vec::with_capacity(fields.len());
    let mut id_field: Option<(syn::Ident, syn::Type)> = None;
    let mut created_at_field: Option<syn::Ident> = None;
    let mut updated_at_field: Option<syn::Ident> = None;
    let mut seen = HashSet::<String>::new();

    for (idx, field) in fields.iter().enumerate() {
        let field_ident = field.ident.clone().unwrap();
        let column = get_column_name(field)?;

        if !seen.insert(column.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate column name '{column}'"),
            ));
        }

        from_row_fields.push(quote! {
            #field_ident: row
                .get(#idx)
                .map_err(|e| liteorm::OrmError::scan(#column, e))?
        });
        value_exprs.push(quote! {
            ::std::boxed::Box::new(self.#field_ident.clone()) as liteorm::SqlParam
        });

        match column.as_str() {
            ID_COLUMN => id_field = Some((field_ident.clone(), field.ty.clone())),
            CREATED_AT_COLUMN => created_at_field = Some(field_ident.clone()),
            UPDATED_AT_COLUMN => updated_at_field = Some(field_ident.clone()),
            _ => {}
        }

        column_names.push(column);
    }

    let Some((id_ident, id_ty)) = id_field else {
        return Err(syn::Error::new_spanned(
            &input,
            "Model requires an `id` field",
        ));
    };

    let has_created_at = created_at_field.is_some();
    let has_updated_at = updated_at_field.is_some();

    let set_created_at = created_at_field.map(|f| {
        quote! {
            fn set_created_at(&mut self, at: liteorm::chrono::DateTime<liteorm::chrono::Utc>) {
                self.#f = at;
            }
        }
    });
    let set_updated_at = updated_at_field.map(|f| {
        quote! {
            fn set_updated_at(&mut self, at: liteorm::chrono::DateTime<liteorm::chrono::Utc>) {
                self.#f = at;
            }
        }
    });

    Ok(quote! {
        impl liteorm::Model for #name {
            const TABLE: &'static str = #table;
            const COLUMNS: &'static [&'static str] = &[#(#column_names),*];
            const HAS_CREATED_AT: bool = #has_created_at;
            const HAS_UPDATED_AT: bool = #has_updated_at;

            fn id(&self) -> i64 {
                self.#id_ident as i64
            }

            fn set_id(&mut self, id: i64) {
                self.#id_ident = id as #id_ty;
            }

            #set_created_at
            #set_updated_at

            fn from_row(row: &liteorm::Row<'_>) -> liteorm::OrmResult<Self> {
                ::std::result::Result::Ok(Self {
                    #(#from_row_fields),*
                })
            }

            fn values(&self) -> ::std::vec::Vec<liteorm::SqlParam> {
                ::std::vec![#(#value_exprs),*]
            }
        }
    })
}

fn get_table_name(input: &DeriveInput) -> Result<String> {
    for attr in &input.attrs {
        if attr.path().is_ident("orm") {
            if let Ok(nested) = attr.parse_args::<syn::MetaNameValue>() {
                if nested.path.is_ident("table") {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(lit),
                        ..
                    }) = &nested.value
                    {
                        return parse_sql_ident(lit, "table name");
                    }
                }
            }
        }
    }
    Ok(table_name(&input.ident.to_string()))
}

fn get_column_name(field: &syn::Field) -> Result<String> {
    for attr in &field.attrs {
        if attr.path().is_ident("orm") {
            if let Ok(nested) = attr.parse_args::<syn::MetaNameValue>() {
                if nested.path.is_ident("column") {
                    if let syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(lit),
                        ..
                    }) = &nested.value
                    {
                        return parse_sql_ident(lit, "column name");
                    }
                }
            }
        }
    }
    Ok(to_snake_case(&field.ident.as_ref().unwrap().to_string()))
}
