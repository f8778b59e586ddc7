//! Nearest-color search in a palette, and the precomputed table that
//! replaces the search when reducing many truecolor pixels.

use crate::color::{Palette, PALETTE_SIZE};
use alloc::boxed::Box;
use alloc::vec;

// Perceptual weights for each channel, squared into the distance metric.
const WEIGHT_R: u32 = 30 * 30;
const WEIGHT_G: u32 = 59 * 59;
const WEIGHT_B: u32 = 11 * 11;

#[inline]
fn channel_diff(a: u8, b: u8, weight: u32) -> u32 {
    let d = (a as i32 - b as i32).unsigned_abs();
    d * d * weight
}

/// Returns the palette index closest to the given 6-bit color.
///
/// Index zero is the transparent index of 8-bit surfaces, so it is only
/// ever returned for the transparent magenta `(63, 0, 63)` itself, which
/// lets truecolor mask pixels survive reduction to 8 bits. An exact match
/// ends the search immediately; among equally close entries the lowest
/// index wins.
pub fn bestfit_color(pal: &Palette, r: u8, g: u8, b: u8) -> u8 {
    let (r, g, b) = (r & 0x3f, g & 0x3f, b & 0x3f);
    let first = if r == 63 && g == 0 && b == 63 { 0 } else { 1 };
    search(pal, r, g, b, first)
}

/// Like [`bestfit_color`], but never answers index zero, even for magenta.
pub(crate) fn bestfit_opaque(pal: &Palette, r: u8, g: u8, b: u8) -> u8 {
    search(pal, r & 0x3f, g & 0x3f, b & 0x3f, 1)
}

fn search(pal: &Palette, r: u8, g: u8, b: u8, first: usize) -> u8 {
    let mut best = 0usize;
    let mut lowest = u32::MAX;
    for i in first..PALETTE_SIZE {
        let entry = pal.get(i as u8);

        // Green carries the heaviest weight, so it rules out most entries
        // before the other channels are even considered.
        let mut diff = channel_diff(entry.g, g, WEIGHT_G);
        if diff >= lowest {
            continue;
        }
        diff += channel_diff(entry.r, r, WEIGHT_R);
        if diff >= lowest {
            continue;
        }
        diff += channel_diff(entry.b, b, WEIGHT_B);
        if diff >= lowest {
            continue;
        }

        best = i;
        if diff == 0 {
            break;
        }
        lowest = diff;
    }
    best as u8
}

const MAP_SIDE: usize = 32;

/// A 32×32×32 table mapping 5-bit-per-channel colors to palette indices.
///
/// Reducing a truecolor pixel through the map is a single lookup, at the
/// cost of quantizing each channel to five bits first. A map is only
/// meaningful for the palette it was created from.
#[derive(Clone, PartialEq, Eq)]
pub struct RgbMap {
    data: Box<[u8]>,
}

impl RgbMap {
    pub fn create(pal: &Palette) -> Self {
        let mut data = vec![0u8; MAP_SIDE * MAP_SIDE * MAP_SIDE].into_boxed_slice();
        for r in 0..MAP_SIDE {
            for g in 0..MAP_SIDE {
                for b in 0..MAP_SIDE {
                    data[Self::index_5(r, g, b)] =
                        bestfit_color(pal, widen_5_to_6(r), widen_5_to_6(g), widen_5_to_6(b));
                }
            }
        }
        Self { data: data }
    }

    /// Looks up the entry for an 8-bit-per-channel color.
    #[inline]
    pub fn lookup(&self, r: u8, g: u8, b: u8) -> u8 {
        self.data[Self::index_5((r >> 3) as usize, (g >> 3) as usize, (b >> 3) as usize)]
    }

    #[inline]
    fn index_5(r: usize, g: usize, b: usize) -> usize {
        (r << 10) | (g << 5) | b
    }
}

impl core::fmt::Debug for RgbMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RgbMap")
            .field("entries", &self.data.len())
            .finish()
    }
}

#[inline]
fn widen_5_to_6(c: usize) -> u8 {
    ((c << 1) | (c >> 4)) as u8
}
