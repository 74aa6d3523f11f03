//! Procedural macros for oneway

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::quote;
use std::collections::HashMap;
use syn::{parse_macro_input, DeriveInput};

/// Reserved bootstrap discriminator, kept in sync with `oneway_core::INIT_ACTION_NAME`
const INIT_ACTION_NAME: &str = "@@INIT";

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Name variants in SCREAMING_SNAKE_CASE (`IncreaseCount` -> `INCREASE_COUNT`)
    #[darling(default)]
    screaming_case: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit discriminator override
    #[darling(default)]
    name: Option<String>,

    /// Marks the reserved bootstrap variant
    #[darling(default)]
    init: bool,
}

/// Convert PascalCase to SCREAMING_SNAKE_CASE
///
/// A run of capitals is kept together as an acronym, so `HTTPError`
/// becomes `HTTP_ERROR`.
fn to_screaming_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &ch) in chars.iter().enumerate() {
        if i > 0 && ch.is_uppercase() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower) {
                result.push('_');
            }
        }
        result.extend(ch.to_uppercase());
    }
    result
}

impl ActionVariant {
    fn discriminator(&self, screaming_case: bool) -> String {
        if self.init {
            return INIT_ACTION_NAME.to_string();
        }
        match &self.name {
            Some(name) => name.clone(),
            None if screaming_case => to_screaming_snake_case(&self.ident.to_string()),
            None => self.ident.to_string(),
        }
    }

    /// `match` arm mapping this variant to its discriminator
    fn name_arm(&self, enum_name: &Ident, screaming_case: bool) -> TokenStream2 {
        let variant_name = &self.ident;
        let variant_str = self.discriminator(screaming_case);

        match &self.fields.style {
            darling::ast::Style::Unit => quote! {
                #enum_name::#variant_name => #variant_str
            },
            darling::ast::Style::Tuple => quote! {
                #enum_name::#variant_name(..) => #variant_str
            },
            darling::ast::Style::Struct => quote! {
                #enum_name::#variant_name { .. } => #variant_str
            },
        }
    }
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method returning each variant's discriminator: the
/// variant name by default, SCREAMING_SNAKE_CASE with
/// `#[action(screaming_case)]`, or an explicit `#[action(name = "...")]`.
///
/// Marking a unit variant `#[action(init)]` gives it the reserved `@@INIT`
/// name and implements `InitAction` so `Store::init()` can dispatch it.
///
/// Discriminators must be unique within the enum.
///
/// # Example
/// ```ignore
/// #[derive(Action, Debug)]
/// #[action(screaming_case)]
/// enum CounterAction {
///     #[action(init)]
///     Init,
///     IncreaseCount,
///     #[action(name = "SET")]
///     SetCount(i64),
/// }
///
/// assert_eq!(CounterAction::Init.name(), "@@INIT");
/// assert_eq!(CounterAction::IncreaseCount.name(), "INCREASE_COUNT");
/// assert_eq!(CounterAction::SetCount(3).name(), "SET");
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let mut errors = darling::Error::accumulator();
    let mut seen: HashMap<String, &syn::Ident> = HashMap::new();
    let mut init_variant: Option<&ActionVariant> = None;

    for v in variants.iter() {
        if v.init {
            if v.name.is_some() {
                errors.push(
                    darling::Error::custom("`init` variants are always named `@@INIT`")
                        .with_span(&v.ident),
                );
            }
            if !v.fields.is_unit() {
                errors.push(
                    darling::Error::custom("`init` can only mark a unit variant")
                        .with_span(&v.ident),
                );
            }
            if let Some(first) = init_variant {
                errors.push(
                    darling::Error::custom(format!(
                        "only one variant can be `init`, `{}` already is",
                        first.ident
                    ))
                    .with_span(&v.ident),
                );
            } else {
                init_variant = Some(v);
            }
        }

        let discriminator = v.discriminator(opts.screaming_case);
        if let Some(other) = seen.insert(discriminator.clone(), &v.ident) {
            errors.push(
                darling::Error::custom(format!(
                    "action name `{discriminator}` is already used by `{other}`"
                ))
                .with_span(&v.ident),
            );
        }
    }

    if let Err(e) = errors.finish() {
        return e.write_errors().into();
    }

    let name_arms = variants
        .iter()
        .map(|v| v.name_arm(name, opts.screaming_case));

    let mut expanded: TokenStream2 = quote! {
        impl #impl_generics oneway::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    if let Some(init) = init_variant {
        let init_ident = &init.ident;
        expanded = quote! {
            #expanded

            impl #impl_generics oneway::InitAction for #name #ty_generics #where_clause {
                fn init() -> Self {
                    #name::#init_ident
                }
            }
        };
    }

    TokenStream::from(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("IncreaseCount"), "INCREASE_COUNT");
        assert_eq!(to_screaming_snake_case("Reset"), "RESET");
        assert_eq!(to_screaming_snake_case("Add2Items"), "ADD2_ITEMS");
        assert_eq!(to_screaming_snake_case("HTTPError"), "HTTP_ERROR");
        assert_eq!(to_screaming_snake_case("ParseURL"), "PARSE_URL");
        assert_eq!(to_screaming_snake_case("IO"), "IO");
    }

    #[test]
    fn test_name_arms_follow_field_style() {
        let input: DeriveInput = syn::parse_quote! {
            #[action(screaming_case)]
            enum Msg {
                ResetCount,
                #[action(name = "SET")]
                SetCount(i64),
                Move { dx: i32 },
            }
        };
        let opts = ActionOpts::from_derive_input(&input).unwrap();
        let darling::ast::Data::Enum(variants) = &opts.data else {
            panic!("expected enum data");
        };

        let arms: Vec<String> = variants
            .iter()
            .map(|v| v.name_arm(&opts.ident, opts.screaming_case).to_string())
            .collect();
        assert_eq!(
            arms,
            vec![
                quote! { Msg::ResetCount => "RESET_COUNT" }.to_string(),
                quote! { Msg::SetCount(..) => "SET" }.to_string(),
                quote! { Msg::Move { .. } => "MOVE" }.to_string(),
            ]
        );
    }
}
