use darling::{FromDeriveInput, ast};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_quote};

use super::core::{self, member_name};

pub fn expand_derive_to_values(input: &DeriveInput) -> syn::Result<TokenStream> {
    let container = core::ValuesContainer::from_derive_input(input)?;
    let ast::Data::Struct(fields) = &container.data else {
        return core::span_err!(input, "type not supported");
    };

    let ident = &container.ident;
    let mut generics = container.generics.clone();
    let predicates = &mut generics.make_where_clause().predicates;

    let inserts: Vec<TokenStream> = fields
        .iter()
        .filter(|f| !f.skip)
        .filter_map(|field| {
            let id = field.ident.as_ref()?;
            let ty = &field.ty;
            let name = field
                .rename
                .clone()
                .unwrap_or_else(|| container.rename_all.rename(&member_name(id)));
            predicates.push(parse_quote!(#ty: ::bindery::Encode + ::std::clone::Clone));
            Some(quote!(values.insert(#name, &self.#id);))
        })
        .collect();

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote!(
        #[automatically_derived]
        impl #impl_generics ::bindery::ToValues for #ident #ty_generics #where_clause {
            fn to_values(&self) -> ::bindery::Values {
                let mut values = ::bindery::Values::new();
                #(#inserts)*
                values
            }
        }
    ))
}

#[cfg(test)]
mod tests {
    use super::core::assert_errors_with;
    use super::*;

    #[test]
    fn it_errors_on_tuple_structs() {
        let txt = r#"struct Foo(i32);"#;
        let e = expand_derive_to_values(&syn::parse_str(txt).unwrap());
        assert_errors_with!(e, "Unsupported shape");
    }
}
