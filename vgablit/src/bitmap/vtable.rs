//! Per-format pixel accessors.
//!
//! Every combination of depth and layout has one static table, selected
//! when a bitmap is created. A bitmap's storage variant always matches its
//! table's layout.

use crate::bank;
use crate::depth::{ColorDepth, Layout};
use crate::surface::{Pos, Storage};

pub(crate) struct Vtable {
    pub depth: ColorDepth,
    pub layout: Layout,
    pub mask_color: u32,
    pub get: fn(&mut Storage, Pos) -> u32,
    pub put: fn(&mut Storage, Pos, u32),
}

impl core::fmt::Debug for Vtable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Vtable")
            .field("depth", &self.depth)
            .field("layout", &self.layout)
            .finish()
    }
}

impl Vtable {
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.depth.bytes_per_pixel()
    }

    /// The table for the given format, if such bitmaps can exist.
    pub fn for_format(depth: ColorDepth, layout: Layout) -> Option<&'static Vtable> {
        use ColorDepth::*;
        Some(match (layout, depth) {
            (Layout::Linear, Indexed8) => &LINEAR_8,
            (Layout::Linear, Rgb15) => &LINEAR_15,
            (Layout::Linear, Rgb16) => &LINEAR_16,
            (Layout::Linear, Rgb24) => &LINEAR_24,
            (Layout::Linear, Rgb32) => &LINEAR_32,
            (Layout::Banked, Indexed8) => &BANKED_8,
            (Layout::Banked, Rgb15) => &BANKED_15,
            (Layout::Banked, Rgb16) => &BANKED_16,
            (Layout::Banked, Rgb24) => &BANKED_24,
            (Layout::Banked, Rgb32) => &BANKED_32,
            (Layout::Planar, Indexed8) => &PLANAR_8,
            (Layout::Planar, _) => return None,
        })
    }
}

macro_rules! vtable {
    ($name:ident, $depth:ident, $layout:ident, $get:expr, $put:expr) => {
        static $name: Vtable = Vtable {
            depth: ColorDepth::$depth,
            layout: Layout::$layout,
            mask_color: ColorDepth::$depth.mask_color(),
            get: $get,
            put: $put,
        };
    };
}

vtable!(LINEAR_8, Indexed8, Linear, linear_get::<1>, linear_put::<1>);
vtable!(LINEAR_15, Rgb15, Linear, linear_get::<2>, linear_put::<2>);
vtable!(LINEAR_16, Rgb16, Linear, linear_get::<2>, linear_put::<2>);
vtable!(LINEAR_24, Rgb24, Linear, linear_get::<3>, linear_put::<3>);
vtable!(LINEAR_32, Rgb32, Linear, linear_get::<4>, linear_put::<4>);
vtable!(BANKED_8, Indexed8, Banked, banked_get::<1>, banked_put::<1>);
vtable!(BANKED_15, Rgb15, Banked, banked_get::<2>, banked_put::<2>);
vtable!(BANKED_16, Rgb16, Banked, banked_get::<2>, banked_put::<2>);
vtable!(BANKED_24, Rgb24, Banked, banked_get::<3>, banked_put::<3>);
vtable!(BANKED_32, Rgb32, Banked, banked_get::<4>, banked_put::<4>);
vtable!(PLANAR_8, Indexed8, Planar, planar_get, planar_put);

#[cold]
fn mismatch() -> ! {
    unreachable!("bitmap storage doesn't match its vtable")
}

/// Decodes a little-endian pixel of up to four bytes.
#[inline]
pub(crate) fn read_le(bytes: &[u8]) -> u32 {
    bytes.iter().rev().fold(0, |v, &b| (v << 8) | b as u32)
}

#[inline]
pub(crate) fn write_le(bytes: &mut [u8], v: u32) {
    for (i, b) in bytes.iter_mut().enumerate() {
        *b = (v >> (i * 8)) as u8;
    }
}

fn linear_get<const N: usize>(s: &mut Storage, p: Pos) -> u32 {
    match s {
        Storage::Linear(mem) => {
            let start = p.byte_addr(N);
            read_le(&mem[start..start + N])
        }
        _ => mismatch(),
    }
}

fn linear_put<const N: usize>(s: &mut Storage, p: Pos, c: u32) {
    match s {
        Storage::Linear(mem) => {
            let start = p.byte_addr(N);
            write_le(&mut mem[start..start + N], c)
        }
        _ => mismatch(),
    }
}

fn banked_get<const N: usize>(s: &mut Storage, p: Pos) -> u32 {
    match s {
        Storage::Banked(mem) => bank::read_value(mem.as_mut(), p.byte_addr(N), N),
        _ => mismatch(),
    }
}

fn banked_put<const N: usize>(s: &mut Storage, p: Pos, c: u32) {
    match s {
        Storage::Banked(mem) => bank::write_value(mem.as_mut(), p.byte_addr(N), N, c),
        _ => mismatch(),
    }
}

fn planar_get(s: &mut Storage, p: Pos) -> u32 {
    match s {
        Storage::Planar(planes) => {
            let (plane, offset) = p.plane_addr();
            planes[plane][offset] as u32
        }
        _ => mismatch(),
    }
}

fn planar_put(s: &mut Storage, p: Pos, c: u32) {
    match s {
        Storage::Planar(planes) => {
            let (plane, offset) = p.plane_addr();
            planes[plane][offset] = c as u8;
        }
        _ => mismatch(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_format_has_table() {
        for depth in ColorDepth::ALL.iter() {
            for layout in [Layout::Linear, Layout::Banked].iter() {
                let vt = Vtable::for_format(*depth, *layout).unwrap();
                assert_eq!(vt.depth, *depth);
                assert_eq!(vt.layout, *layout);
                assert_eq!(vt.mask_color, depth.mask_color());
            }
        }
        assert!(Vtable::for_format(ColorDepth::Indexed8, Layout::Planar).is_some());
        assert!(Vtable::for_format(ColorDepth::Rgb16, Layout::Planar).is_none());
    }

    #[test]
    fn test_le_helpers() {
        let mut buf = [0u8; 3];
        write_le(&mut buf, 0x00abcdef);
        assert_eq!(buf, [0xef, 0xcd, 0xab]);
        assert_eq!(read_le(&buf), 0xabcdef);
        assert_eq!(read_le(&buf[..2]), 0xcdef);
    }
}
