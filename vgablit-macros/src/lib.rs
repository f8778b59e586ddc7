extern crate proc_macro;
extern crate proc_macro2;

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream, Result};
use syn::parse_macro_input;
use syn::punctuated::Punctuated;
use syn::LitStr;

mod parsers;

/// Declares a single palette entry from a hex color literal.
///
/// Accepts `"#rrggbb"` or the shorthand `"#rgb"`, and produces a
/// `vgablit::color::Rgb6` with each channel reduced to the 6-bit range of
/// the VGA DAC.
///
/// ```ignore
/// let magenta = vga_rgb!("#ff00ff"); // Rgb6 { r: 63, g: 0, b: 63 }
/// ```
#[proc_macro]
pub fn vga_rgb(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);
    match rgb6_expr(&lit) {
        Ok(expr) => expr.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Declares an array of palette entries from a comma-separated list of hex
/// color literals, in the same forms accepted by `vga_rgb!`.
///
/// The result is an array expression `[Rgb6; N]`, so it can initialize a
/// `const` or `static` as well as a local.
#[proc_macro]
pub fn vga_palette(input: TokenStream) -> TokenStream {
    let call = parse_macro_input!(input as PaletteLiteral);

    let mut entries: Vec<proc_macro2::TokenStream> = Vec::with_capacity(call.entries.len());
    for lit in call.entries.iter() {
        match rgb6_expr(lit) {
            Ok(expr) => entries.push(expr),
            Err(err) => return err.to_compile_error().into(),
        }
    }

    quote!([#(#entries),*]).into()
}

fn rgb6_expr(lit: &LitStr) -> Result<proc_macro2::TokenStream> {
    let src = lit.value();
    let color = match parsers::parse_color(&src) {
        Some(color) => color,
        None => {
            return Err(syn::Error::new(
                lit.span(),
                format!(
                    "invalid color literal {:?}; expected \"#rrggbb\" or \"#rgb\"",
                    src
                ),
            ))
        }
    };

    // The DAC only has six bits per channel, so we keep the most
    // significant six bits of each.
    let r = color.r >> 2;
    let g = color.g >> 2;
    let b = color.b >> 2;
    Ok(quote!(
        ::vgablit::color::Rgb6 { r: #r, g: #g, b: #b }
    ))
}

struct PaletteLiteral {
    entries: Punctuated<LitStr, syn::Token![,]>,
}

impl Parse for PaletteLiteral {
    fn parse(input: ParseStream) -> Result<Self> {
        let entries: Punctuated<LitStr, syn::Token![,]> = Punctuated::parse_terminated(input)?;
        Ok(PaletteLiteral { entries: entries })
    }
}
