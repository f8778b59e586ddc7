//! Flood fill of 4-connected regions.
//!
//! The fill works on horizontal runs ("segments") of the color being
//! replaced. Each filled run is recorded together with flags saying whether
//! the rows directly above and below it still have to be searched for
//! further runs. Segments are kept in a per-call arena with one head slot
//! per row, chained through `next` when a row has more than one run.

use crate::bitmap::Bitmap;
use crate::error::{try_reserve, Error};
use alloc::vec::Vec;

const TODO_ABOVE: u8 = 1 << 0;
const TODO_BELOW: u8 = 1 << 1;
const IN_USE: u8 = 1 << 2;

#[derive(Clone, Copy, Debug)]
struct Segment {
    flags: u8,
    left: i32,
    right: i32,
    y: i32,
    next: Option<usize>,
}

impl Segment {
    // Never contains any x, so an unused head slot matches nothing.
    const EMPTY: Segment = Segment {
        flags: 0,
        left: i32::MAX,
        right: i32::MIN,
        y: 0,
        next: None,
    };
}

struct Flood<'a> {
    bmp: &'a mut Bitmap,
    segments: Vec<Segment>,
    from: u32,
    to: u32,
}

impl<'a> Flood<'a> {
    fn is_target(&self, x: i32, y: i32) -> bool {
        self.bmp.getpixel(x, y) == Some(self.from)
    }

    /// Fills the run through `(x, y)` and records it. Returns the first x
    /// worth examining to the right of the run.
    fn fill_run(&mut self, x: i32, y: i32) -> Result<i32, Error> {
        if !self.is_target(x, y) {
            return Ok(x + 1);
        }
        let clip = self.bmp.clip();
        let mut left = x;
        while left > clip.left && self.is_target(left - 1, y) {
            left -= 1;
        }
        let mut right = x;
        while right + 1 < clip.right && self.is_target(right + 1, y) {
            right += 1;
        }

        let mut slot = y as usize;
        if self.segments[slot].flags != 0 {
            while let Some(next) = self.segments[slot].next {
                slot = next;
            }
            try_reserve(&mut self.segments, 1)?;
            let added = self.segments.len();
            self.segments.push(Segment::EMPTY);
            self.segments[slot].next = Some(added);
            slot = added;
        }

        self.bmp.hline(left, right, y, self.to);

        let mut flags = IN_USE;
        if y > clip.top {
            flags |= TODO_ABOVE;
        }
        if y + 1 < clip.bottom {
            flags |= TODO_BELOW;
        }
        self.segments[slot] = Segment {
            flags: flags,
            left: left,
            right: right,
            y: y,
            next: None,
        };
        Ok(right + 2)
    }

    /// Fills every run on row `y` that touches `left..=right` and isn't
    /// already recorded. Returns whether anything was filled.
    fn check_row(&mut self, y: i32, mut left: i32, right: i32) -> Result<bool, Error> {
        let mut filled = false;
        'scan: while left <= right {
            let mut slot = y as usize;
            loop {
                let seg = self.segments[slot];
                if left >= seg.left && left <= seg.right {
                    left = seg.right + 2;
                    continue 'scan;
                }
                match seg.next {
                    Some(next) => slot = next,
                    None => break,
                }
            }
            left = self.fill_run(left, y)?;
            filled = true;
        }
        Ok(filled)
    }

    fn run(&mut self, x: i32, y: i32) -> Result<(), Error> {
        let rows = self.bmp.clip().bottom as usize;
        self.fill_run(x, y)?;

        let mut done = false;
        while !done {
            done = true;
            let mut c = 0;
            while c < self.segments.len() {
                let mut next = c + 1;

                let seg = self.segments[c];
                if seg.flags & TODO_BELOW != 0 {
                    self.segments[c].flags &= !TODO_BELOW;
                    if self.check_row(seg.y + 1, seg.left, seg.right)? {
                        done = false;
                    }
                }

                let seg = self.segments[c];
                if seg.flags & TODO_ABOVE != 0 {
                    self.segments[c].flags &= !TODO_ABOVE;
                    if self.check_row(seg.y - 1, seg.left, seg.right)? {
                        done = false;
                        // Runs found above usually need their own row
                        // above checked next, so step back a row.
                        if c > 0 && c < rows {
                            next = c - 1;
                        }
                    }
                }

                c = next;
            }
        }
        Ok(())
    }
}

/// Replaces the 4-connected region of same-colored pixels containing
/// `(x, y)` with `color`, within the clip rectangle.
///
/// Nothing happens if the start point is outside the clip rectangle or
/// already has the fill color. The segment arena is allocated per call;
/// [`Error::OutOfMemory`] is returned if it can't grow, possibly after
/// part of the region has been filled.
pub fn floodfill(bmp: &mut Bitmap, x: i32, y: i32, color: u32) -> Result<(), Error> {
    let from = match bmp.getpixel(x, y) {
        Some(c) => c,
        None => return Ok(()),
    };
    if from == color {
        return Ok(());
    }

    let rows = bmp.clip().bottom as usize;
    let mut segments = Vec::new();
    try_reserve(&mut segments, rows)?;
    segments.resize(rows, Segment::EMPTY);

    let mut flood = Flood {
        bmp: bmp,
        segments: segments,
        from: from,
        to: color,
    };
    flood.run(x, y)?;
    log::debug!(
        "flood fill from ({}, {}) recorded {} segments",
        x,
        y,
        flood.segments.iter().filter(|s| s.flags & IN_USE != 0).count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::fake::FakeBankedMemory;
    use crate::clip::ClipRect;
    use crate::depth::ColorDepth;
    use alloc::boxed::Box;
    use alloc::vec;

    fn snapshot(bmp: &Bitmap) -> Vec<u32> {
        let mut all = Vec::new();
        for y in 0..bmp.height() {
            for x in 0..bmp.width() {
                all.push(bmp.getpixel(x, y).unwrap());
            }
        }
        all
    }

    /// The region a fill should cover, found by a plain search.
    fn reachable(bmp: &Bitmap, x: i32, y: i32) -> Vec<bool> {
        let (w, h) = (bmp.width(), bmp.height());
        let clip = bmp.clip();
        let from = bmp.getpixel(x, y).unwrap();
        let mut seen = vec![false; (w * h) as usize];
        let mut stack = vec![(x, y)];
        while let Some((x, y)) = stack.pop() {
            if !clip.contains(x, y) || seen[(y * w + x) as usize] || bmp.getpixel(x, y) != Some(from) {
                continue;
            }
            seen[(y * w + x) as usize] = true;
            stack.extend_from_slice(&[(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]);
        }
        seen
    }

    /// Scatters walls of color 1 using a small linear congruential
    /// sequence.
    fn maze(bmp: &mut Bitmap, seed: u32) {
        let mut state = seed;
        for y in 0..bmp.height() {
            for x in 0..bmp.width() {
                state = state.wrapping_mul(1103515245).wrapping_add(12345);
                if (state >> 16) % 100 < 38 {
                    bmp.putpixel(x, y, 1);
                }
            }
        }
    }

    fn check_against_search(mut bmp: Bitmap, x: i32, y: i32) {
        let clip = bmp.clip();
        let region = reachable(&bmp, x, y);
        bmp.reset_clip();
        let before = snapshot(&bmp);
        bmp.set_clip(clip);

        floodfill(&mut bmp, x, y, 7).unwrap();

        bmp.reset_clip();
        let after = snapshot(&bmp);
        let w = bmp.width();
        for (i, (&old, &new)) in before.iter().zip(after.iter()).enumerate() {
            let want = if region[i] { 7 } else { old };
            assert_eq!(new, want, "pixel ({}, {})", i as i32 % w, i as i32 / w);
        }
    }

    #[test]
    fn test_fills_enclosed_box() {
        let mut bmp = Bitmap::new(12, 10, ColorDepth::Indexed8).unwrap();
        for x in 2..9 {
            bmp.putpixel(x, 2, 2);
            bmp.putpixel(x, 7, 2);
        }
        for y in 2..8 {
            bmp.putpixel(2, y, 2);
            bmp.putpixel(8, y, 2);
        }
        floodfill(&mut bmp, 4, 4, 9).unwrap();
        for y in 0..10 {
            for x in 0..12 {
                let border = (x == 2 || x == 8) && (2..8).contains(&y) || (y == 2 || y == 7) && (2..9).contains(&x);
                let inside = x > 2 && x < 8 && y > 2 && y < 7;
                let want = if border { 2 } else if inside { 9 } else { 0 };
                assert_eq!(bmp.getpixel(x, y), Some(want), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_matches_plain_search() {
        for seed in 1..12u32 {
            let mut bmp = Bitmap::new(24, 20, ColorDepth::Rgb16).unwrap();
            maze(&mut bmp, seed);
            // Start on an open pixel.
            let start = (0..24 * 20)
                .map(|i| (i % 24, i / 24))
                .find(|&(x, y)| bmp.getpixel(x, y) == Some(0))
                .unwrap();
            check_against_search(bmp, start.0, start.1);
        }
    }

    #[test]
    fn test_winding_region() {
        // A serpentine corridor forces the fill to turn back up and down
        // the bitmap several times.
        let mut bmp = Bitmap::new(9, 9, ColorDepth::Indexed8).unwrap();
        for &(y, gap) in [(1, 8), (3, 0), (5, 8), (7, 0)].iter() {
            bmp.hline(0, 8, y, 1);
            bmp.putpixel(gap, y, 0);
        }
        check_against_search(bmp, 4, 8);
    }

    #[test]
    fn test_clip_contains_fill() {
        let mut bmp = Bitmap::new(10, 10, ColorDepth::Rgb32).unwrap();
        bmp.set_clip(ClipRect::new(2, 3, 7, 8));
        check_against_search(bmp, 4, 4);

        let mut bmp = Bitmap::new(10, 10, ColorDepth::Rgb32).unwrap();
        bmp.set_clip(ClipRect::new(2, 3, 7, 8));
        floodfill(&mut bmp, 0, 0, 5).unwrap();
        bmp.reset_clip();
        assert!(snapshot(&bmp).iter().all(|&c| c == 0));
    }

    #[test]
    fn test_same_color_is_noop() {
        let mut bmp = Bitmap::new(8, 8, ColorDepth::Rgb15).unwrap();
        maze(&mut bmp, 3);
        let before = snapshot(&bmp);
        let color = bmp.getpixel(0, 0).unwrap();
        floodfill(&mut bmp, 0, 0, color).unwrap();
        assert_eq!(snapshot(&bmp), before);
    }

    #[test]
    fn test_other_layouts() {
        let mut planar = Bitmap::new_planar(15, 11).unwrap();
        maze(&mut planar, 5);
        planar.putpixel(6, 5, 0);
        check_against_search(planar, 6, 5);

        let mem = FakeBankedMemory::new(24 * 3 * 11, 50, false);
        let mut banked = Bitmap::new_banked(23, 11, ColorDepth::Rgb24, 72, Box::new(mem)).unwrap();
        maze(&mut banked, 9);
        banked.putpixel(6, 5, 0);
        check_against_search(banked, 6, 5);
    }
}
