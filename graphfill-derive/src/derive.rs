//! Derive macro implementation for the `Randomizable` trait
//!
//! Structs become composite descriptors listing their public fields; enums
//! whose variants carry no data become enumeration descriptors.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::{
    Attribute, Data, DataEnum, DeriveInput, Error, Expr, ExprLit, Fields, GenericParam, Ident,
    Lit, Member, Meta, MetaNameValue, Path, Result, Type, Visibility, parse_macro_input,
    parse_quote,
};

/// Main entry point for the Randomizable derive macro
pub fn derive_randomizable_impl(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_randomizable_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// How the derived composite obtains its initial instance
#[derive(Debug, Clone, PartialEq)]
enum Construction {
    /// `Default::default()`
    Default,
    /// A user supplied function returning `Self`
    Function(Path),
    /// The type cannot be instantiated by the populator
    Unavailable,
}

/// A field that takes part in population
struct PopulatedField {
    name: String,
    member: Member,
    ty: Type,
}

/// Generate the Randomizable implementation for the given input
fn generate_randomizable_impl(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    let mut bounded_generics = input.generics.clone();
    add_trait_bounds(&mut bounded_generics);

    let descriptor_body = match &input.data {
        Data::Struct(data_struct) => {
            let construction = parse_container_attributes(&input.attrs)?;
            if construction == Construction::Default && has_type_params(&input.generics) {
                // Default may only hold for some parameters
                let (_, ty_generics, _) = input.generics.split_for_impl();
                bounded_generics
                    .make_where_clause()
                    .predicates
                    .push(parse_quote!(#name #ty_generics: ::std::default::Default));
            }
            let fields = collect_fields(&data_struct.fields)?;
            generate_composite_body(&construction, &fields)
        }
        Data::Enum(data_enum) => {
            reject_container_attributes(&input.attrs)?;
            generate_enum_body(name, data_enum)?
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                input,
                "Randomizable derive is not supported for unions",
            ));
        }
    };

    let (impl_generics, ty_generics, where_clause) = bounded_generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics ::graphfill::Randomizable for #name #ty_generics #where_clause {
            fn descriptor() -> ::graphfill::TypeDescriptor {
                #descriptor_body
            }
        }
    })
}

/// Add the Randomizable bound to every type parameter
fn add_trait_bounds(generics: &mut syn::Generics) {
    for param in &mut generics.params {
        if let GenericParam::Type(ref mut type_param) = *param {
            type_param.bounds.push(parse_quote!(::graphfill::Randomizable));
        }
    }
}

fn has_type_params(generics: &syn::Generics) -> bool {
    generics
        .params
        .iter()
        .any(|param| matches!(param, GenericParam::Type(_)))
}

/// Parse the `#[randomizable(...)]` attributes on a struct
fn parse_container_attributes(attrs: &[Attribute]) -> Result<Construction> {
    let mut construction = Construction::Default;

    for meta in randomizable_metas(attrs)? {
        match meta {
            Meta::Path(path) if path.is_ident("no_default") => {
                construction = Construction::Unavailable;
            }
            Meta::NameValue(MetaNameValue { path, value, .. }) if path.is_ident("constructor") => {
                construction = Construction::Function(parse_path_literal(&value)?);
            }
            other => {
                return Err(Error::new_spanned(
                    other,
                    "Unsupported randomizable attribute, expected `constructor = \"path\"` or `no_default`",
                ));
            }
        }
    }

    Ok(construction)
}

fn reject_container_attributes(attrs: &[Attribute]) -> Result<()> {
    match randomizable_metas(attrs)?.into_iter().next() {
        Some(meta) => Err(Error::new_spanned(
            meta,
            "randomizable attributes are not supported on enums",
        )),
        None => Ok(()),
    }
}

/// Whether a field carries `#[randomizable(skip)]`
fn is_skipped(attrs: &[Attribute]) -> Result<bool> {
    let mut skipped = false;
    for meta in randomizable_metas(attrs)? {
        match meta {
            Meta::Path(path) if path.is_ident("skip") => skipped = true,
            other => {
                return Err(Error::new_spanned(
                    other,
                    "Unsupported randomizable field attribute, expected `skip`",
                ));
            }
        }
    }
    Ok(skipped)
}

/// Flatten every `#[randomizable(a, b = "c")]` attribute into its items
fn randomizable_metas(attrs: &[Attribute]) -> Result<Vec<Meta>> {
    let mut metas = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("randomizable") {
            continue;
        }
        let Meta::List(list) = &attr.meta else {
            return Err(Error::new_spanned(
                attr,
                "randomizable attribute must be a list",
            ));
        };
        let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
        metas.extend(parser.parse2(list.tokens.clone())?);
    }
    Ok(metas)
}

/// Parse a string literal holding a function path, e.g. `"Account::sample"`
fn parse_path_literal(value: &Expr) -> Result<Path> {
    if let Expr::Lit(ExprLit {
        lit: Lit::Str(lit_str),
        ..
    }) = value
    {
        return lit_str.parse::<Path>();
    }

    Err(Error::new_spanned(
        value,
        "constructor attribute must be a string literal naming a function",
    ))
}

/// Public fields that are not skipped, in declaration order
fn collect_fields(fields: &Fields) -> Result<Vec<PopulatedField>> {
    let mut populated = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        if !matches!(field.vis, Visibility::Public(_)) || is_skipped(&field.attrs)? {
            continue;
        }
        let (name, member) = match &field.ident {
            Some(ident) => (ident.to_string(), Member::Named(ident.clone())),
            None => (index.to_string(), Member::Unnamed(index.into())),
        };
        populated.push(PopulatedField {
            name,
            member,
            ty: field.ty.clone(),
        });
    }

    Ok(populated)
}

/// Generate a composite descriptor for a struct
fn generate_composite_body(construction: &Construction, fields: &[PopulatedField]) -> TokenStream {
    let construct = match construction {
        Construction::Default => quote! { ::graphfill::descriptor::construct_default::<Self> },
        Construction::Function(path) => quote! {
            || ::std::result::Result::Ok(
                ::std::boxed::Box::new(#path()) as ::graphfill::AnyValue
            )
        },
        Construction::Unavailable => quote! { ::graphfill::descriptor::no_constructor },
    };

    let field_descriptors = fields.iter().map(|field| {
        let PopulatedField { name, member, ty } = field;
        quote! {
            ::graphfill::FieldDescriptor::new::<Self, #ty>(
                #name,
                |owner| &owner.#member,
                |owner, value| owner.#member = value,
            )
        }
    });

    quote! {
        ::graphfill::TypeDescriptor::composite::<Self>(
            #construct,
            || ::std::vec![#(#field_descriptors),*],
        )
    }
}

/// Generate an enumeration descriptor for a fieldless enum
fn generate_enum_body(name: &Ident, data_enum: &DataEnum) -> Result<TokenStream> {
    let mut variant_names = Vec::new();
    let mut variant_arms = Vec::new();

    for (index, variant) in data_enum.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new_spanned(
                variant,
                format!(
                    "Randomizable can only be derived for enums whose variants carry no data, `{}::{}` does",
                    name, variant.ident
                ),
            ));
        }
        let variant_name = &variant.ident;
        variant_names.push(variant_name.to_string());
        variant_arms.push(quote! {
            #index => ::std::option::Option::Some(
                ::std::boxed::Box::new(Self::#variant_name) as ::graphfill::AnyValue
            )
        });
    }

    Ok(quote! {
        ::graphfill::TypeDescriptor::enumeration::<Self>(
            &[#(#variant_names),*],
            |index| match index {
                #(#variant_arms,)*
                _ => ::std::option::Option::None,
            },
        )
    })
}
