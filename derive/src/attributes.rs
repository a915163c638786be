use darling::ast::Data;
use darling::util::Ignored;
use darling::{FromDeriveInput, FromField};

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;

#[derive(FromDeriveInput)]
#[darling(attributes(vtu), supports(struct_named))]
struct AttributesInput {
    ident: syn::Ident,
    generics: syn::Generics,
    data: Data<Ignored, AttributeField>,
}

#[derive(FromField)]
#[darling(attributes(vtu))]
struct AttributeField {
    ident: Option<syn::Ident>,
    /// name of the `DataArray` in the file, defaults to the field name
    #[darling(default)]
    name: Option<String>,
}

pub fn derive(input: syn::DeriveInput) -> darling::Result<TokenStream> {
    let input = AttributesInput::from_derive_input(&input)?;
    let struct_type = input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match input.data {
        Data::Struct(fields) => fields.fields,
        Data::Enum(_) => return Err(darling::Error::unsupported_shape("enum")),
    };

    let mut body = quote! {};

    for field in fields {
        // `supports(struct_named)` guarantees every field has a name
        let ident = match field.ident {
            Some(ident) => ident,
            None => return Err(darling::Error::unsupported_shape("unnamed field")),
        };

        // convert the field identifier to a string literal
        // so `add_array` can use it as the array name
        let name = field.name.unwrap_or_else(|| ident.unraw().to_string());
        let lit = syn::LitStr::new(&name, ident.span());

        body = quote! {
            #body
            grid.add_array(location, #lit, &self.#ident)?;
        };
    }

    // declare the whole trait
    let expanded = quote! {
        impl #impl_generics vtu::Attributes for #struct_type #ty_generics #where_clause {
            fn attach(
                &self,
                grid: &mut vtu::UnstructuredGrid,
                location: vtu::Location,
            ) -> ::std::result::Result<(), vtu::Error> {
                #body

                Ok(())
            }
        }
    };

    Ok(expanded)
}
