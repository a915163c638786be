mod attributes;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Implement `vtu::Attributes` for a struct with named fields.
///
/// Every field must implement `vtu::Array`. Fields are attached in declaration order and
/// named after the field, unless a `#[vtu(name = "...")]` attribute gives another name.
#[proc_macro_derive(Attributes, attributes(vtu))]
pub fn derive_attributes(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let input = parse_macro_input!(input as DeriveInput);

    attributes::derive(input)
        .unwrap_or_else(|err| err.write_errors())
        .into()
}
