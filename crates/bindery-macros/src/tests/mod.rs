
/// Expand a derive and return its output with all whitespace removed.
fn compact(tokens: proc_macro2::TokenStream) -> String {
    tokens.to_string().chars().filter(|c| !c.is_whitespace()).collect()
}
