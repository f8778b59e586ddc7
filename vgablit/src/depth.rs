//! Color depths and memory layouts that a bitmap can have.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The pixel encoding of a bitmap, identified by its bit count.
///
/// The raw pixel values handled throughout this crate are the
/// little-endian integers stored in memory:
///
/// | Depth | Bytes | Encoding |
/// |--|--|--|
/// | `Indexed8` | 1 | palette index |
/// | `Rgb15` | 2 | `0RRRRRGG GGGBBBBB` |
/// | `Rgb16` | 2 | `RRRRRGGG GGGBBBBB` |
/// | `Rgb24` | 3 | `0xRRGGBB` |
/// | `Rgb32` | 4 | `0x00RRGGBB`, top byte unused |
#[derive(TryFromPrimitive, IntoPrimitive, Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum ColorDepth {
    Indexed8 = 8,
    Rgb15 = 15,
    Rgb16 = 16,
    Rgb24 = 24,
    Rgb32 = 32,
}

impl ColorDepth {
    pub const ALL: [ColorDepth; 5] = [
        ColorDepth::Indexed8,
        ColorDepth::Rgb15,
        ColorDepth::Rgb16,
        ColorDepth::Rgb24,
        ColorDepth::Rgb32,
    ];

    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ColorDepth::Indexed8 => 1,
            ColorDepth::Rgb15 | ColorDepth::Rgb16 => 2,
            ColorDepth::Rgb24 => 3,
            ColorDepth::Rgb32 => 4,
        }
    }

    /// The pixel value that masked operations treat as transparent.
    ///
    /// Index zero for paletted surfaces, bright magenta for the others.
    pub const fn mask_color(self) -> u32 {
        match self {
            ColorDepth::Indexed8 => 0,
            ColorDepth::Rgb15 => 0x7c1f,
            ColorDepth::Rgb16 => 0xf81f,
            ColorDepth::Rgb24 | ColorDepth::Rgb32 => 0xff00ff,
        }
    }

    /// Whether `c` is this depth's transparent value. The unused top byte
    /// of a 32-bit pixel doesn't take part in the comparison.
    pub const fn is_mask(self, c: u32) -> bool {
        match self {
            ColorDepth::Rgb32 => c & 0xffffff == self.mask_color(),
            _ => c == self.mask_color(),
        }
    }

    /// A dense index for use in per-depth lookup tables.
    pub(crate) const fn index(self) -> usize {
        match self {
            ColorDepth::Indexed8 => 0,
            ColorDepth::Rgb15 => 1,
            ColorDepth::Rgb16 => 2,
            ColorDepth::Rgb24 => 3,
            ColorDepth::Rgb32 => 4,
        }
    }
}

/// How a bitmap's pixels are arranged in memory.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Layout {
    /// Contiguous, directly-addressable rows.
    Linear,

    /// Rows reachable only through a bank window that must be selected
    /// before each access. See [`BankedMemory`](crate::bank::BankedMemory).
    Banked,

    /// Mode-X: pixel `x` lives in plane `x & 3` at byte `x >> 2`.
    /// Only 8-bit surfaces can be planar.
    Planar,
}
