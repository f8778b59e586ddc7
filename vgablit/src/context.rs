//! The explicit conversion context threaded through depth-converting
//! operations.

use crate::bestfit::RgbMap;
use crate::color::Palette;
use alloc::boxed::Box;

/// Everything a depth conversion needs to know beyond the pixels
/// themselves.
///
/// This behaves as a "builder" type, with setters that return the context
/// so they can be chained. A fresh context has the default VGA palette, no
/// RGB map, and doesn't preserve transparency across depths.
#[derive(Debug, Clone, Default)]
pub struct ColorContext {
    palette: Palette,
    rgb_map: Option<Box<RgbMap>>,
    keep_transparency: bool,
}

impl ColorContext {
    pub fn new() -> Self {
        core::default::Default::default()
    }

    /// Selects the palette used to expand 8-bit pixels and to find the
    /// nearest index when reducing to 8 bits.
    ///
    /// Any RGB map is discarded, since it was computed for the previous
    /// palette.
    pub fn set_palette<'a>(&'a mut self, pal: &Palette) -> &'a mut Self {
        self.palette = pal.clone();
        self.rgb_map = None;
        self
    }

    /// Installs a precomputed map for truecolor to 8-bit reduction. The
    /// map must have been created from the current palette.
    pub fn set_rgb_map<'a>(&'a mut self, map: RgbMap) -> &'a mut Self {
        self.rgb_map = Some(Box::new(map));
        self
    }

    /// Builds and installs an RGB map for the current palette.
    pub fn build_rgb_map<'a>(&'a mut self) -> &'a mut Self {
        let map = RgbMap::create(&self.palette);
        self.set_rgb_map(map)
    }

    pub fn clear_rgb_map<'a>(&'a mut self) -> &'a mut Self {
        self.rgb_map = None;
        self
    }

    /// When enabled, pixels equal to the source depth's mask color convert
    /// to the destination depth's mask color, and no other pixel is allowed
    /// to land on the destination mask color.
    pub fn set_keep_transparency<'a>(&'a mut self, v: bool) -> &'a mut Self {
        self.keep_transparency = v;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn rgb_map(&self) -> Option<&RgbMap> {
        self.rgb_map.as_deref()
    }

    pub fn keep_transparency(&self) -> bool {
        self.keep_transparency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb6;

    #[test]
    fn test_defaults() {
        let ctx = ColorContext::new();
        assert_eq!(ctx.palette(), &Palette::default_vga());
        assert!(ctx.rgb_map().is_none());
        assert!(!ctx.keep_transparency());
    }

    #[test]
    fn test_new_palette_drops_map() {
        let mut ctx = ColorContext::new();
        ctx.build_rgb_map().set_keep_transparency(true);
        assert!(ctx.rgb_map().is_some());

        let mut pal = Palette::black();
        pal.set(1, Rgb6::new(1, 2, 3));
        ctx.set_palette(&pal);
        assert!(ctx.rgb_map().is_none());
        assert_eq!(ctx.palette().get(1), Rgb6::new(1, 2, 3));
        assert!(ctx.keep_transparency());
    }
}
