// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Journey with Frodo project*
//!
//! Shire calendar literals checked at compile time.  Each macro expands to a
//! const block calling the type's `checked` constructor in the core crate, so
//! the valid ranges live in one place and a literal outside them is a compile
//! error.  The types must be in scope where the macro is used.
//!

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{LitInt, parse_macro_input};

/// Expand `lit` to `const { <type_name>::checked(lit) }`
fn const_checked_literal(input: TokenStream, type_name: &str) -> TokenStream {
    let lit = parse_macro_input!(input as LitInt);

    let value = match lit.base10_parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            return syn::Error::new_spanned(lit, format!("{type_name} expects an integer literal"))
                .to_compile_error()
                .into();
        }
    };

    let ident = syn::Ident::new(type_name, lit.span());
    quote! {
        const { #ident::checked(#value) }
    }
    .into()
}

/// A Shire `Day` of the month, e.g. `day!(23)`
#[proc_macro]
pub fn day(input: TokenStream) -> TokenStream {
    const_checked_literal(input, "Day")
}

/// A Shire `Month`, e.g. `month!(9)` for Halimath
#[proc_macro]
pub fn month(input: TokenStream) -> TokenStream {
    const_checked_literal(input, "Month")
}

/// A Shire `Year`, e.g. `year!(3018)`
#[proc_macro]
pub fn year(input: TokenStream) -> TokenStream {
    const_checked_literal(input, "Year")
}
