//! Procedural macros for the bindery crate.

/// Shared helpers used by macro expansion modules.
mod core;
/// Derive support for stored procedure binding tables.
mod procedure;
/// Derive support for row mapping.
mod row;
/// Derive support for flattening structs into named values.
mod values;

#[proc_macro_derive(ProcedureParameters, attributes(bindery))]
/// Derive a `ProcedureParameters` implementation.
pub fn derive_procedure_parameters(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    match procedure::expand_derive_procedure_parameters(&input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

#[proc_macro_derive(ToValues, attributes(bindery))]
/// Derive a `ToValues` implementation.
pub fn derive_to_values(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    match values::expand_derive_to_values(&input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

#[proc_macro_derive(FromRow, attributes(bindery))]
/// Derive a `FromRow` implementation.
pub fn derive_from_row(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    match row::expand_derive_from_row(&input) {
        Ok(ts) => ts.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

#[cfg(test)]
mod tests;
