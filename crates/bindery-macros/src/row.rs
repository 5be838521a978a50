use darling::{FromDeriveInput, ast};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Stmt, parse_quote};

use super::core::{self, member_name};

pub fn expand_derive_from_row(input: &DeriveInput) -> syn::Result<TokenStream> {
    let container = core::RowContainer::from_derive_input(input)?;
    let ast::Data::Struct(fields) = &container.data else {
        return core::span_err!(input, "type not supported");
    };
    for field in fields.iter() {
        core::check_row_field_attrs(field)?;
    }

    let ident = &container.ident;
    let mut generics = container.generics.clone();
    let predicates = &mut generics.make_where_clause().predicates;

    let reads: Vec<Stmt> = fields
        .iter()
        .filter_map(|field| -> Option<Stmt> {
            let id = field.ident.as_ref()?;
            let ty = &field.ty;

            if field.skip {
                return Some(parse_quote!(
                    let #id: #ty = ::std::default::Default::default();
                ));
            }

            let column = field
                .column
                .clone()
                .unwrap_or_else(|| container.rename_all.rename(&member_name(id)));
            predicates.push(parse_quote!(#ty: 'static));

            if field.default {
                Some(parse_quote!(
                    let #id: #ty = row
                        .try_parse::<#ty>(#column)?
                        .unwrap_or_default();
                ))
            } else {
                Some(parse_quote!(
                    let #id: #ty = row.parse::<#ty>(#column)?;
                ))
            }
        })
        .collect();

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let names = fields.iter().map(|field| &field.ident);

    Ok(quote!(
        #[automatically_derived]
        impl #impl_generics ::bindery::FromRow for #ident #ty_generics #where_clause {
            fn from_row(row: &::bindery::Row) -> ::bindery::Result<Self> {
                #(#reads)*

                ::std::result::Result::Ok(#ident {
                    #(#names),*
                })
            }
        }
    ))
}
