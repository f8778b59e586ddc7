//! Conversion of single pixel values between color depths.
//!
//! Every ordered pair of depths has its own conversion function, looked up
//! once per blit from a table indexed by the two depths.

use crate::bestfit::bestfit_opaque;
use crate::context::ColorContext;
use crate::depth::ColorDepth;
use crate::pixel::*;

pub type ConvertFn = fn(u32, &ColorContext) -> u32;

type Channels = (u8, u8, u8);

fn decode8(c: u32, ctx: &ColorContext) -> Channels {
    let pal = ctx.palette();
    (getr8(c, pal), getg8(c, pal), getb8(c, pal))
}

fn decode15(c: u32, _: &ColorContext) -> Channels {
    (getr15(c), getg15(c), getb15(c))
}

fn decode16(c: u32, _: &ColorContext) -> Channels {
    (getr16(c), getg16(c), getb16(c))
}

fn decode32(c: u32, _: &ColorContext) -> Channels {
    (getr32(c), getg32(c), getb32(c))
}

fn encode8(r: u8, g: u8, b: u8, ctx: &ColorContext) -> u32 {
    makecol8(r, g, b, ctx)
}

fn encode15(r: u8, g: u8, b: u8, _: &ColorContext) -> u32 {
    makecol15(r, g, b)
}

fn encode16(r: u8, g: u8, b: u8, _: &ColorContext) -> u32 {
    makecol16(r, g, b)
}

fn encode24(r: u8, g: u8, b: u8, _: &ColorContext) -> u32 {
    makecol24(r, g, b)
}

fn encode32(r: u8, g: u8, b: u8, _: &ColorContext) -> u32 {
    makecol32(r, g, b)
}

fn same(c: u32, _: &ColorContext) -> u32 {
    c
}

macro_rules! converters {
    ($($name:ident: $decode:ident -> $encode:ident;)*) => {
        $(
            fn $name(c: u32, ctx: &ColorContext) -> u32 {
                let (r, g, b) = $decode(c, ctx);
                $encode(r, g, b, ctx)
            }
        )*
    };
}

converters! {
    c8_15: decode8 -> encode15;
    c8_16: decode8 -> encode16;
    c8_24: decode8 -> encode24;
    c8_32: decode8 -> encode32;
    c15_8: decode15 -> encode8;
    c15_16: decode15 -> encode16;
    c15_24: decode15 -> encode24;
    c15_32: decode15 -> encode32;
    c16_8: decode16 -> encode8;
    c16_15: decode16 -> encode15;
    c16_24: decode16 -> encode24;
    c16_32: decode16 -> encode32;
    c24_8: decode32 -> encode8;
    c24_15: decode32 -> encode15;
    c24_16: decode32 -> encode16;
    c32_8: decode32 -> encode8;
    c32_15: decode32 -> encode15;
    c32_16: decode32 -> encode16;
}

fn c24_32(c: u32, _: &ColorContext) -> u32 {
    c & 0xffffff
}

use self::c24_32 as c32_24;

// Rows are source depths, columns destination depths, both in
// `ColorDepth::index` order.
static CONVERTERS: [[ConvertFn; 5]; 5] = [
    [same, c8_15, c8_16, c8_24, c8_32],
    [c15_8, same, c15_16, c15_24, c15_32],
    [c16_8, c16_15, same, c16_24, c16_32],
    [c24_8, c24_15, c24_16, same, c24_32],
    [c32_8, c32_15, c32_16, c32_24, same],
];

/// Returns the function converting pixels of depth `from` to depth `to`.
pub fn converter(from: ColorDepth, to: ColorDepth) -> ConvertFn {
    CONVERTERS[from.index()][to.index()]
}

/// A conversion between two depths, bound to the transparency rule of a
/// particular context.
#[derive(Clone, Copy)]
pub struct Converter {
    from: ColorDepth,
    to: ColorDepth,
    f: ConvertFn,
    keep_transparency: bool,
}

impl Converter {
    pub fn new(from: ColorDepth, to: ColorDepth, ctx: &ColorContext) -> Self {
        Self {
            from: from,
            to: to,
            f: converter(from, to),
            keep_transparency: ctx.keep_transparency() && from != to,
        }
    }

    #[inline]
    pub fn convert(&self, c: u32, ctx: &ColorContext) -> u32 {
        let out = (self.f)(c, ctx);
        if !self.keep_transparency {
            return out;
        }
        if self.from.is_mask(c) {
            return self.to.mask_color();
        }
        if self.to.is_mask(out) {
            return self.opaque_near_mask(c, ctx);
        }
        out
    }

    // An opaque source pixel that converted to the transparent value is
    // moved to the nearest value that isn't transparent.
    fn opaque_near_mask(&self, c: u32, ctx: &ColorContext) -> u32 {
        match self.to {
            ColorDepth::Indexed8 => {
                let rgb = get_rgb(self.from, c, ctx);
                bestfit_opaque(ctx.palette(), rgb.r >> 2, rgb.g >> 2, rgb.b >> 2) as u32
            }
            // The lowest green bit of each format.
            ColorDepth::Rgb15 | ColorDepth::Rgb16 => self.to.mask_color() ^ 0x20,
            ColorDepth::Rgb24 | ColorDepth::Rgb32 => self.to.mask_color() ^ 0x100,
        }
    }
}

impl core::fmt::Debug for Converter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Converter")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("keep_transparency", &self.keep_transparency)
            .finish()
    }
}
