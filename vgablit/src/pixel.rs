//! Packing and unpacking of pixel values for each color depth.
//!
//! Channels are always handled as 8-bit values at this level. Narrow
//! channels are widened through [`SCALE_5`] and [`SCALE_6`] rather than by
//! shifting, so full intensity in any depth unpacks to 255.

use crate::color::{Palette, Rgb, SCALE_5, SCALE_6};
use crate::context::ColorContext;
use crate::depth::ColorDepth;

#[inline]
pub const fn makecol15(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32 >> 3) << 10) | ((g as u32 >> 3) << 5) | (b as u32 >> 3)
}

#[inline]
pub const fn makecol16(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32 >> 3) << 11) | ((g as u32 >> 2) << 5) | (b as u32 >> 3)
}

#[inline]
pub const fn makecol24(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

#[inline]
pub const fn makecol32(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Finds the palette index for a color, through the context's RGB map if it
/// has one and by a best-fit search otherwise.
#[inline]
pub fn makecol8(r: u8, g: u8, b: u8, ctx: &ColorContext) -> u32 {
    match ctx.rgb_map() {
        Some(map) => map.lookup(r, g, b) as u32,
        None => crate::bestfit::bestfit_color(ctx.palette(), r >> 2, g >> 2, b >> 2) as u32,
    }
}

#[inline]
pub const fn getr15(c: u32) -> u8 {
    SCALE_5[((c >> 10) & 0x1f) as usize]
}

#[inline]
pub const fn getg15(c: u32) -> u8 {
    SCALE_5[((c >> 5) & 0x1f) as usize]
}

#[inline]
pub const fn getb15(c: u32) -> u8 {
    SCALE_5[(c & 0x1f) as usize]
}

#[inline]
pub const fn getr16(c: u32) -> u8 {
    SCALE_5[((c >> 11) & 0x1f) as usize]
}

#[inline]
pub const fn getg16(c: u32) -> u8 {
    SCALE_6[((c >> 5) & 0x3f) as usize]
}

#[inline]
pub const fn getb16(c: u32) -> u8 {
    SCALE_5[(c & 0x1f) as usize]
}

#[inline]
pub const fn getr32(c: u32) -> u8 {
    (c >> 16) as u8
}

#[inline]
pub const fn getg32(c: u32) -> u8 {
    (c >> 8) as u8
}

#[inline]
pub const fn getb32(c: u32) -> u8 {
    c as u8
}

// 24-bit pixels share the 32-bit channel positions.
pub use self::getb32 as getb24;
pub use self::getg32 as getg24;
pub use self::getr32 as getr24;

#[inline]
pub fn getr8(c: u32, pal: &Palette) -> u8 {
    SCALE_6[pal.get(c as u8).r as usize]
}

#[inline]
pub fn getg8(c: u32, pal: &Palette) -> u8 {
    SCALE_6[pal.get(c as u8).g as usize]
}

#[inline]
pub fn getb8(c: u32, pal: &Palette) -> u8 {
    SCALE_6[pal.get(c as u8).b as usize]
}

/// Packs an 8-bit-per-channel color into a pixel of the given depth.
pub fn makecol_depth(depth: ColorDepth, r: u8, g: u8, b: u8, ctx: &ColorContext) -> u32 {
    match depth {
        ColorDepth::Indexed8 => makecol8(r, g, b, ctx),
        ColorDepth::Rgb15 => makecol15(r, g, b),
        ColorDepth::Rgb16 => makecol16(r, g, b),
        ColorDepth::Rgb24 => makecol24(r, g, b),
        ColorDepth::Rgb32 => makecol32(r, g, b),
    }
}

/// Unpacks a pixel of the given depth into 8-bit channels.
pub fn get_rgb(depth: ColorDepth, c: u32, ctx: &ColorContext) -> Rgb {
    match depth {
        ColorDepth::Indexed8 => ctx.palette().get(c as u8).as_rgb(),
        ColorDepth::Rgb15 => Rgb::new(getr15(c), getg15(c), getb15(c)),
        ColorDepth::Rgb16 => Rgb::new(getr16(c), getg16(c), getb16(c)),
        ColorDepth::Rgb24 => Rgb::new(getr24(c), getg24(c), getb24(c)),
        ColorDepth::Rgb32 => Rgb::new(getr32(c), getg32(c), getb32(c)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb6;

    #[test]
    fn test_pack_positions() {
        assert_eq!(makecol15(255, 0, 0), 0x7c00);
        assert_eq!(makecol15(0, 255, 0), 0x03e0);
        assert_eq!(makecol15(0, 0, 255), 0x001f);
        assert_eq!(makecol16(255, 0, 0), 0xf800);
        assert_eq!(makecol16(0, 255, 0), 0x07e0);
        assert_eq!(makecol16(0, 0, 255), 0x001f);
        assert_eq!(makecol24(0x12, 0x34, 0x56), 0x123456);
        assert_eq!(makecol32(0x12, 0x34, 0x56), 0x00123456);
    }

    #[test]
    fn test_mask_colors_are_magenta() {
        assert_eq!(makecol15(255, 0, 255), ColorDepth::Rgb15.mask_color());
        assert_eq!(makecol16(255, 0, 255), ColorDepth::Rgb16.mask_color());
        assert_eq!(makecol24(255, 0, 255), ColorDepth::Rgb24.mask_color());
        assert_eq!(makecol32(255, 0, 255), ColorDepth::Rgb32.mask_color());
    }

    #[test]
    fn test_unpack_widens_to_full_range() {
        assert_eq!(getr15(0x7fff), 255);
        assert_eq!(getg15(0x7fff), 255);
        assert_eq!(getb15(0x7fff), 255);
        assert_eq!(getr16(0xffff), 255);
        assert_eq!(getg16(0xffff), 255);
        assert_eq!(getb16(0xffff), 255);
        // A plain shift would have given 0x78 here.
        assert_eq!(getr15(0x3c00), SCALE_5[15]);
    }

    #[test]
    fn test_indexed_unpack_uses_palette() {
        let mut ctx = ColorContext::new();
        let mut pal = Palette::black();
        pal.set(7, Rgb6::new(63, 32, 1));
        ctx.set_palette(&pal);

        assert_eq!(getr8(7, ctx.palette()), 255);
        assert_eq!(getg8(7, ctx.palette()), SCALE_6[32]);
        assert_eq!(getb8(7, ctx.palette()), 4);
        assert_eq!(
            get_rgb(ColorDepth::Indexed8, 7, &ctx),
            Rgb::new(255, SCALE_6[32], 4)
        );
    }

    #[test]
    fn test_makecol_depth_matches_direct() {
        let ctx = ColorContext::new();
        assert_eq!(
            makecol_depth(ColorDepth::Rgb16, 10, 200, 30, &ctx),
            makecol16(10, 200, 30)
        );
        // The default palette has pure white at index 15.
        assert_eq!(makecol_depth(ColorDepth::Indexed8, 255, 255, 255, &ctx), 15);
    }
}
