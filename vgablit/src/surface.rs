//! Pixel storage shared between a bitmap and its sub-bitmaps.

use crate::bank::{self, BankedMemory};
use alloc::boxed::Box;
use alloc::vec::Vec;

/// The memory behind one or more bitmaps.
pub(crate) enum Storage {
    Linear(Vec<u8>),
    /// Mode-X planes, each holding every fourth pixel of each row.
    Planar([Vec<u8>; 4]),
    Banked(Box<dyn BankedMemory>),
}

/// A pixel location: the byte offset of its row plus its absolute x
/// coordinate in that row.
///
/// For planar storage the row offset is within each plane.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Pos {
    pub row: usize,
    pub x: usize,
}

impl Pos {
    #[inline]
    pub fn new(row: usize, x: usize) -> Self {
        Self { row: row, x: x }
    }

    /// Byte address for linear and banked storage.
    #[inline]
    pub fn byte_addr(self, bpp: usize) -> usize {
        self.row + self.x * bpp
    }

    /// Plane number and byte offset within that plane.
    #[inline]
    pub fn plane_addr(self) -> (usize, usize) {
        (self.x & 3, self.row + (self.x >> 2))
    }

    #[inline]
    fn offset(self, n: usize) -> Self {
        Self::new(self.row, self.x + n)
    }
}

/// The order in which a within-storage copy visits its pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Direction {
    Ascending,
    Descending,
}

impl Storage {
    /// Whether a copy between two places in this storage can keep both
    /// addressed at once.
    pub fn independent_windows(&self) -> bool {
        match self {
            Storage::Linear(_) | Storage::Planar(_) => true,
            Storage::Banked(mem) => mem.separate_windows(),
        }
    }

    pub fn linear(&self) -> Option<&[u8]> {
        match self {
            Storage::Linear(mem) => Some(&mem[..]),
            _ => None,
        }
    }

    pub fn linear_mut(&mut self) -> Option<&mut [u8]> {
        match self {
            Storage::Linear(mem) => Some(&mut mem[..]),
            _ => None,
        }
    }

    /// Reads `into.len() / bpp` consecutive pixels starting at `pos`.
    pub fn read_span(&mut self, pos: Pos, bpp: usize, into: &mut [u8]) {
        match self {
            Storage::Linear(mem) => {
                let start = pos.byte_addr(bpp);
                into.copy_from_slice(&mem[start..start + into.len()]);
            }
            Storage::Banked(mem) => bank::read_bytes(mem.as_mut(), pos.byte_addr(bpp), into),
            Storage::Planar(planes) => {
                for (i, v) in into.iter_mut().enumerate() {
                    let (plane, offset) = pos.offset(i).plane_addr();
                    *v = planes[plane][offset];
                }
            }
        }
    }

    /// Writes `data.len() / bpp` consecutive pixels starting at `pos`.
    pub fn write_span(&mut self, pos: Pos, bpp: usize, data: &[u8]) {
        match self {
            Storage::Linear(mem) => {
                let start = pos.byte_addr(bpp);
                mem[start..start + data.len()].copy_from_slice(data);
            }
            Storage::Banked(mem) => bank::write_bytes(mem.as_mut(), pos.byte_addr(bpp), data),
            Storage::Planar(planes) => {
                for (i, v) in data.iter().enumerate() {
                    let (plane, offset) = pos.offset(i).plane_addr();
                    planes[plane][offset] = *v;
                }
            }
        }
    }

    /// Copies `n` pixels from `from` to `to` within this storage, visiting
    /// bytes in the given address order.
    ///
    /// Linear storage is moved in one piece and is correct for any overlap.
    /// The other layouts are correct for overlapping spans only when the
    /// direction matches the way the regions overlap.
    pub fn move_span(&mut self, from: Pos, to: Pos, bpp: usize, n: usize, dir: Direction) {
        match self {
            Storage::Linear(mem) => {
                let start = from.byte_addr(bpp);
                mem.copy_within(start..start + n * bpp, to.byte_addr(bpp));
            }
            Storage::Banked(mem) => {
                let (src, dst) = (from.byte_addr(bpp), to.byte_addr(bpp));
                let mem = mem.as_mut();
                let mut step = |i: usize| {
                    let v = bank::read_byte(&mut *mem, src + i);
                    bank::write_byte(&mut *mem, dst + i, v);
                };
                match dir {
                    Direction::Ascending => (0..n * bpp).for_each(&mut step),
                    Direction::Descending => (0..n * bpp).rev().for_each(&mut step),
                }
            }
            Storage::Planar(planes) => {
                let mut step = |i: usize| {
                    let (sp, so) = from.offset(i).plane_addr();
                    let (dp, doff) = to.offset(i).plane_addr();
                    planes[dp][doff] = planes[sp][so];
                };
                match dir {
                    Direction::Ascending => (0..n).for_each(&mut step),
                    Direction::Descending => (0..n).rev().for_each(&mut step),
                }
            }
        }
    }
}

/// Two views of pixel storage for an operation that reads one and writes
/// the other, which may turn out to be the same storage.
pub(crate) trait StoragePair {
    fn source(&mut self) -> &mut Storage;
    fn destination(&mut self) -> &mut Storage;
}

/// Distinct source and destination storage.
pub(crate) struct Separate<'a>(pub &'a mut Storage, pub &'a mut Storage);

/// A single storage that is both source and destination.
pub(crate) struct Shared<'a>(pub &'a mut Storage);

impl<'a> StoragePair for Separate<'a> {
    fn source(&mut self) -> &mut Storage {
        self.0
    }

    fn destination(&mut self) -> &mut Storage {
        self.1
    }
}

impl<'a> StoragePair for Shared<'a> {
    fn source(&mut self) -> &mut Storage {
        self.0
    }

    fn destination(&mut self) -> &mut Storage {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::fake::FakeBankedMemory;
    use alloc::vec;

    fn banked(separate: bool) -> Storage {
        Storage::Banked(Box::new(FakeBankedMemory::new(64, 8, separate)))
    }

    #[test]
    fn test_linear_span_roundtrip() {
        let mut s = Storage::Linear(vec![0; 32]);
        s.write_span(Pos::new(8, 1), 2, &[1, 2, 3, 4]);
        assert_eq!(s.linear().unwrap()[10..14], [1, 2, 3, 4]);
        let mut back = [0u8; 4];
        s.read_span(Pos::new(8, 1), 2, &mut back);
        assert_eq!(back, [1, 2, 3, 4]);
    }

    #[test]
    fn test_planar_span_interleaves() {
        let mut s = Storage::Planar([vec![0; 4], vec![0; 4], vec![0; 4], vec![0; 4]]);
        s.write_span(Pos::new(1, 2), 1, &[10, 11, 12, 13, 14]);
        match &s {
            Storage::Planar(planes) => {
                assert_eq!(planes[2][1], 10);
                assert_eq!(planes[3][1], 11);
                assert_eq!(planes[0][2], 12);
                assert_eq!(planes[1][2], 13);
                assert_eq!(planes[2][2], 14);
            }
            _ => unreachable!(),
        }
        let mut back = [0u8; 5];
        s.read_span(Pos::new(1, 2), 1, &mut back);
        assert_eq!(back, [10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_banked_move_overlapping() {
        for separate in [false, true].iter() {
            let mut s = banked(*separate);
            let data: [u8; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
            s.write_span(Pos::new(0, 4), 1, &data);

            // Moving toward higher addresses must visit bytes backwards.
            s.move_span(Pos::new(0, 4), Pos::new(0, 7), 1, 12, Direction::Descending);
            let mut back = [0u8; 12];
            s.read_span(Pos::new(0, 7), 1, &mut back);
            assert_eq!(back, data);

            s.move_span(Pos::new(0, 7), Pos::new(0, 2), 1, 12, Direction::Ascending);
            s.read_span(Pos::new(0, 2), 1, &mut back);
            assert_eq!(back, data);
        }
    }

    #[test]
    fn test_independent_windows() {
        assert!(Storage::Linear(vec![]).independent_windows());
        assert!(banked(true).independent_windows());
        assert!(!banked(false).independent_windows());
    }
}
