use darling::{FromDeriveInput, ast};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_quote};

use super::core::{self, ParamOptions, member_name};

fn binding_tokens(options: &ParamOptions) -> TokenStream {
    let mut tokens = match &options.alias {
        Some(alias) => quote!(::bindery::ParameterBinding::aliased(#alias)),
        None => quote!(::bindery::ParameterBinding::new()),
    };
    if options.ignore_if_null {
        tokens = quote!(#tokens.ignore_if_null());
    }
    if let Some(default) = &options.default {
        let expr = &default.0;
        tokens = quote!(#tokens.default_if_null(#expr));
    }
    tokens
}

pub fn expand_derive_procedure_parameters(input: &DeriveInput) -> syn::Result<TokenStream> {
    let container = core::ProcedureContainer::from_derive_input(input)?;
    core::check_procedure_attrs(&container)?;
    let ast::Data::Struct(fields) = &container.data else {
        return core::span_err!(input, "type not supported");
    };

    let ident = &container.ident;
    let mut generics = container.generics.clone();
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(Self: 'static));

    let mut members = Vec::new();
    let mut reads = Vec::new();

    for field in fields.iter().filter(|f| !f.param.is_empty()) {
        let Some(id) = &field.ident else {
            continue;
        };
        let name = member_name(id);
        let bindings = field.param.iter().map(|p| binding_tokens(&p.0));
        members.push(quote!(.field(#name, [#(#bindings),*])));
        reads.push(quote!(#name => ::std::result::Result::Ok(::bindery::Encode::encode(&self.#id)),));
    }

    // Entries naming the same method bind one member under several parameters.
    let mut methods: Vec<(&syn::Ident, Vec<TokenStream>)> = Vec::new();
    for m in &container.method {
        let binding = binding_tokens(&m.options());
        match methods.iter_mut().find(|(name, _)| *name == &m.name) {
            Some((_, bindings)) => bindings.push(binding),
            None => methods.push((&m.name, vec![binding])),
        }
    }
    for (method, bindings) in &methods {
        let name = member_name(method);
        members.push(quote!(.method(#name, [#(#bindings),*])));
        reads.push(quote!(#name => ::std::result::Result::Ok(::bindery::Encode::encode(self.#method())),));
    }

    let procedure = &container.procedure;
    let defaults = container.defaults.as_ref().map(|path| {
        quote!(
            fn defaults(&self) -> ::std::vec::Vec<::bindery::DefaultParameterValue> {
                #path(self)
            }
        )
    });

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote!(
        #[automatically_derived]
        impl #impl_generics ::bindery::ProcedureParameters for #ident #ty_generics #where_clause {
            fn bindings() -> &'static ::bindery::BindingTable {
                ::bindery::binding::memoize::<Self>(|| {
                    ::bindery::BindingTable::builder()
                        .procedure(#procedure)
                        #(#members)*
                        .build()
                })
            }

            fn member_value(&self, member: &str) -> ::bindery::Result<::bindery::Value> {
                match member {
                    #(#reads)*
                    _ => ::std::result::Result::Err(::bindery::Error::reflection(
                        member,
                        "no bound member with this name",
                    )),
                }
            }

            #defaults
        }
    ))
}
