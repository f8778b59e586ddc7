//! Palette entries, palettes, and the channel scale tables used whenever a
//! narrow channel is widened to eight bits.

use vgablit_macros::vga_palette;

/// One palette entry as the VGA DAC stores it: six bits per channel,
/// `0..=63`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Rgb6 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color with eight bits per channel.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb6 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r & 0x3f,
            g: g & 0x3f,
            b: b & 0x3f,
        }
    }

    /// Widens each channel through [`SCALE_6`], so that 63 becomes 255
    /// rather than the 252 a plain shift would give.
    pub const fn as_rgb(self) -> Rgb {
        Rgb {
            r: SCALE_6[self.r as usize & 0x3f],
            g: SCALE_6[self.g as usize & 0x3f],
            b: SCALE_6[self.b as usize & 0x3f],
        }
    }
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r: r, g: g, b: b }
    }

    pub const fn as_rgb6(self) -> Rgb6 {
        Rgb6 {
            r: self.r >> 2,
            g: self.g >> 2,
            b: self.b >> 2,
        }
    }
}

impl From<Rgb6> for Rgb {
    fn from(src: Rgb6) -> Self {
        src.as_rgb()
    }
}

impl From<Rgb> for Rgb6 {
    fn from(src: Rgb) -> Self {
        src.as_rgb6()
    }
}

const fn scale_table<const N: usize>() -> [u8; N] {
    let max = (N - 1) as u32;
    let mut table = [0u8; N];
    let mut i = 0;
    while i < N {
        table[i] = ((i as u32 * 255) / max) as u8;
        i += 1;
    }
    table
}

/// Widens a 5-bit channel to 8 bits: `i * 255 / 31`, rounded down.
pub const SCALE_5: [u8; 32] = scale_table::<32>();

/// Widens a 6-bit channel to 8 bits: `i * 255 / 63`, rounded down.
pub const SCALE_6: [u8; 64] = scale_table::<64>();

pub const PALETTE_SIZE: usize = 256;

/// The 256 DAC entries used to interpret and produce 8-bit pixels.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Palette([Rgb6; PALETTE_SIZE]);

/// The sixteen standard VGA text-mode colors.
pub const VGA_16: [Rgb6; 16] = vga_palette![
    "#000000", "#0000aa", "#00aa00", "#00aaaa", "#aa0000", "#aa00aa", "#aa5500", "#aaaaaa",
    "#555555", "#5555ff", "#55ff55", "#55ffff", "#ff5555", "#ff55ff", "#ffff55", "#ffffff",
];

impl Palette {
    /// Channels above 63 are masked to six bits, as [`Palette::set`] does.
    pub const fn from_entries(mut entries: [Rgb6; PALETTE_SIZE]) -> Self {
        let mut i = 0;
        while i < PALETTE_SIZE {
            let e = entries[i];
            entries[i] = Rgb6::new(e.r, e.g, e.b);
            i += 1;
        }
        Self(entries)
    }

    /// A palette with every entry black.
    pub const fn black() -> Self {
        Self([Rgb6 { r: 0, g: 0, b: 0 }; PALETTE_SIZE])
    }

    /// The palette a fresh [`ColorContext`](crate::context::ColorContext)
    /// uses: the sixteen VGA colors, then a 6×6×6 color cube, then a
    /// 24-step grey ramp.
    pub const fn default_vga() -> Self {
        const CUBE_LEVELS: [u8; 6] = [0, 12, 25, 38, 51, 63];
        let mut entries = [Rgb6 { r: 0, g: 0, b: 0 }; PALETTE_SIZE];
        let mut i = 0;
        while i < 16 {
            entries[i] = VGA_16[i];
            i += 1;
        }
        let mut cube = 0;
        while cube < 216 {
            entries[16 + cube] = Rgb6 {
                r: CUBE_LEVELS[cube / 36],
                g: CUBE_LEVELS[(cube / 6) % 6],
                b: CUBE_LEVELS[cube % 6],
            };
            cube += 1;
        }
        let mut grey = 0;
        while grey < 24 {
            let v = ((grey * 63) / 23) as u8;
            entries[232 + grey] = Rgb6 { r: v, g: v, b: v };
            grey += 1;
        }
        Self(entries)
    }

    #[inline]
    pub fn get(&self, index: u8) -> Rgb6 {
        self.0[index as usize]
    }

    #[inline]
    pub fn set(&mut self, index: u8, color: Rgb6) {
        self.0[index as usize] = Rgb6::new(color.r, color.g, color.b);
    }

    pub fn entries(&self) -> &[Rgb6; PALETTE_SIZE] {
        &self.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_vga()
    }
}

impl core::ops::Index<u8> for Palette {
    type Output = Rgb6;

    fn index(&self, index: u8) -> &Rgb6 {
        &self.0[index as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_tables() {
        assert_eq!(SCALE_6[0], 0);
        assert_eq!(SCALE_6[1], 4);
        assert_eq!(SCALE_6[20], 80);
        assert_eq!(SCALE_6[21], 85);
        assert_eq!(SCALE_6[63], 255);
        assert_eq!(SCALE_5[0], 0);
        assert_eq!(SCALE_5[1], 8);
        assert_eq!(SCALE_5[16], 131);
        assert_eq!(SCALE_5[31], 255);
    }

    #[test]
    fn test_scale_6_narrows_back_exactly() {
        for c in 0..64u8 {
            assert_eq!(SCALE_6[c as usize] >> 2, c);
        }
    }

    #[test]
    fn test_rgb6_widening_uses_table() {
        let white = Rgb6::new(63, 63, 63).as_rgb();
        assert_eq!(white, Rgb::new(255, 255, 255));
        assert_eq!(Rgb6::new(63, 63, 63), Rgb::new(255, 255, 255).as_rgb6());
    }

    #[test]
    fn test_vga_16_from_macro() {
        assert_eq!(VGA_16[0], Rgb6::new(0, 0, 0));
        assert_eq!(VGA_16[1], Rgb6::new(0, 0, 42));
        assert_eq!(VGA_16[6], Rgb6::new(42, 21, 0));
        assert_eq!(VGA_16[15], Rgb6::new(63, 63, 63));
    }

    #[test]
    fn test_default_vga_layout() {
        let pal = Palette::default_vga();
        assert_eq!(pal.get(4), VGA_16[4]);
        assert_eq!(pal.get(16), Rgb6::new(0, 0, 0));
        assert_eq!(pal.get(16 + 215), Rgb6::new(63, 63, 63));
        assert_eq!(pal.get(232), Rgb6::new(0, 0, 0));
        assert_eq!(pal.get(255), Rgb6::new(63, 63, 63));
    }

    #[test]
    fn test_set_masks_channels() {
        let mut pal = Palette::black();
        pal.set(3, Rgb6 { r: 0xff, g: 64, b: 1 });
        assert_eq!(pal[3], Rgb6::new(63, 0, 1));
    }

    #[test]
    fn test_from_entries_masks_channels() {
        let mut entries = [Rgb6::default(); PALETTE_SIZE];
        entries[1] = Rgb6 { r: 64, g: 0x7f, b: 200 };
        let pal = Palette::from_entries(entries);
        assert_eq!(pal[1], Rgb6::new(0, 63, 8));
        assert_eq!(pal[1].as_rgb(), Rgb::new(0, 255, 32));
    }
}
