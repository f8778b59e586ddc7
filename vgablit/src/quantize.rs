//! Choosing palette entries to represent a truecolor image.

use crate::bitmap::Bitmap;
use crate::color::{Palette, Rgb6, PALETTE_SIZE};
use crate::context::ColorContext;
use crate::depth::ColorDepth;
use crate::error::{try_reserve, Error};
use crate::pixel::get_rgb;
use alloc::vec::Vec;

// Colors are counted at four bits per channel.
const BUCKETS: usize = 1 << 12;

#[derive(Clone, Copy)]
struct Candidate {
    key: u16,
    count: u32,
    // Squared distance to the nearest color already in the palette.
    nearest: u32,
}

#[inline]
fn bucket(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 >> 4) << 8) | ((g as u16 >> 4) << 4) | (b as u16 >> 4)
}

#[inline]
fn widen_4_to_6(c: u16) -> u8 {
    ((c << 2) | (c >> 2)) as u8
}

fn bucket_color(key: u16) -> Rgb6 {
    Rgb6::new(
        widen_4_to_6((key >> 8) & 0xf),
        widen_4_to_6((key >> 4) & 0xf),
        widen_4_to_6(key & 0xf),
    )
}

fn distance(a: Rgb6, b: Rgb6) -> u32 {
    let d = |x: u8, y: u8| {
        let d = x as i32 - y as i32;
        (d * d) as u32
    };
    d(a.r, b.r) + d(a.g, b.g) + d(a.b, b.b)
}

/// Fills the unreserved entries of `pal` with colors chosen to represent
/// the truecolor image `image`, and returns how many entries it wrote.
///
/// Entries whose `reserved` flag is set are left alone, but still count as
/// colors the image can use. Pixels equal to the image's mask color are
/// ignored, since they'll map to the transparent index. When the image has
/// more distinct colors than there are free entries, the most common color
/// is taken first and then, repeatedly, the color whose frequency times
/// distance from everything chosen so far is greatest.
///
/// Returns [`Error::Unsupported`] for an 8-bit image.
pub fn generate_optimized_palette(
    image: &Bitmap,
    pal: &mut Palette,
    reserved: &[bool; PALETTE_SIZE],
) -> Result<usize, Error> {
    if image.depth() == ColorDepth::Indexed8 {
        return Err(Error::Unsupported);
    }

    let mut counts = Vec::new();
    try_reserve(&mut counts, BUCKETS)?;
    counts.resize(BUCKETS, 0u32);
    // Truecolor pixels don't consult the palette.
    let ctx = ColorContext::new();
    let depth = image.depth();
    {
        let get = image.vtable().get;
        let mut storage = image.storage().borrow_mut();
        for y in 0..image.height() {
            for x in 0..image.width() {
                let c = get(&mut *storage, image.pos(x, y));
                if !depth.is_mask(c) {
                    let rgb = get_rgb(depth, c, &ctx);
                    let i = bucket(rgb.r, rgb.g, rgb.b) as usize;
                    counts[i] = counts[i].saturating_add(1);
                }
            }
        }
    }

    let mut candidates = Vec::new();
    try_reserve(&mut candidates, counts.iter().filter(|&&n| n > 0).count())?;
    for (key, &count) in counts.iter().enumerate() {
        if count > 0 {
            candidates.push(Candidate {
                key: key as u16,
                count: count,
                nearest: u32::MAX,
            });
        }
    }
    // Most frequent first; ties keep bucket order so results are stable.
    candidates.sort_by(|a, b| b.count.cmp(&a.count));

    let free = reserved.iter().filter(|&&r| !r).count();
    for (i, _) in reserved.iter().enumerate().filter(|(_, &r)| r) {
        let kept = pal.get(i as u8);
        for cand in candidates.iter_mut() {
            cand.nearest = cand.nearest.min(distance(kept, bucket_color(cand.key)));
        }
    }

    let mut written = 0;
    for slot in (0..PALETTE_SIZE).filter(|&i| !reserved[i]) {
        let pick = if written == 0 {
            // The most common color, unless it's already in the palette.
            candidates.iter().position(|c| c.nearest > 0)
        } else {
            candidates
                .iter()
                .enumerate()
                .filter(|(_, c)| c.nearest > 0)
                .max_by(|(ia, a), (ib, b)| {
                    let sa = a.nearest as u64 * a.count as u64;
                    let sb = b.nearest as u64 * b.count as u64;
                    // Prefer the earlier, more frequent candidate on ties.
                    sa.cmp(&sb).then(ib.cmp(ia))
                })
                .map(|(i, _)| i)
        };
        let pick = match pick {
            Some(i) => i,
            None => break,
        };

        let color = bucket_color(candidates[pick].key);
        pal.set(slot as u8, color);
        written += 1;
        for cand in candidates.iter_mut() {
            cand.nearest = cand.nearest.min(distance(color, bucket_color(cand.key)));
        }
    }

    log::debug!(
        "optimized palette: {} distinct colors, {} free entries, {} written",
        candidates.len(),
        free,
        written
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_with(colors: &[(u32, i32)]) -> Bitmap {
        let total: i32 = colors.iter().map(|&(_, n)| n).sum();
        let mut bmp = Bitmap::new(total as u32, 1, ColorDepth::Rgb32).unwrap();
        let mut x = 0;
        for &(c, n) in colors.iter() {
            bmp.hline(x, x + n - 1, 0, c);
            x += n;
        }
        bmp
    }

    #[test]
    fn test_all_colors_fit() {
        let image = image_with(&[
            (0xff0000, 3),
            (0x00ff00, 5),
            (0x0000ff, 1),
            (0xff00ff, 9),
            (0xffff00ff, 2),
        ]);
        let mut pal = Palette::black();
        let mut reserved = [false; PALETTE_SIZE];
        reserved[0] = true;
        let written = generate_optimized_palette(&image, &mut pal, &reserved).unwrap();

        // The magenta mask pixels are ignored.
        assert_eq!(written, 3);
        assert_eq!(pal.get(1), Rgb6::new(0, 63, 0));
        assert_eq!(pal.get(2), Rgb6::new(63, 0, 0));
        assert_eq!(pal.get(3), Rgb6::new(0, 0, 63));
        assert_eq!(pal.get(0), Rgb6::new(0, 0, 0));
    }

    #[test]
    fn test_prefers_distinct_colors() {
        // Two near-identical reds outnumber the blue, but once one red is
        // chosen the other adds almost nothing.
        let image = image_with(&[(0xf00000, 10), (0xe00000, 9), (0x0000f0, 4)]);
        let mut pal = Palette::black();
        let mut reserved = [true; PALETTE_SIZE];
        reserved[10] = false;
        reserved[11] = false;
        let written = generate_optimized_palette(&image, &mut pal, &reserved).unwrap();
        assert_eq!(written, 2);
        assert_eq!(pal.get(10), bucket_color(bucket(0xf0, 0, 0)));
        assert_eq!(pal.get(11), bucket_color(bucket(0, 0, 0xf0)));
    }

    #[test]
    fn test_reserved_colors_count() {
        let image = image_with(&[(0x000000, 10), (0xffffff, 2)]);
        let mut pal = Palette::black();
        let mut reserved = [false; PALETTE_SIZE];
        reserved[0] = true;
        // Black is already available at index 0.
        let written = generate_optimized_palette(&image, &mut pal, &reserved).unwrap();
        assert_eq!(written, 1);
        assert_eq!(pal.get(1), Rgb6::new(63, 63, 63));
    }

    #[test]
    fn test_fully_reserved_writes_nothing() {
        let image = image_with(&[(0x123456, 4), (0xabcdef, 4)]);
        let mut pal = Palette::default_vga();
        let written = generate_optimized_palette(&image, &mut pal, &[true; PALETTE_SIZE]).unwrap();
        assert_eq!(written, 0);
        assert_eq!(pal, Palette::default_vga());
    }

    #[test]
    fn test_indexed_rejected() {
        let image = Bitmap::new(2, 2, ColorDepth::Indexed8).unwrap();
        let mut pal = Palette::black();
        assert_eq!(
            generate_optimized_palette(&image, &mut pal, &[false; PALETTE_SIZE]),
            Err(Error::Unsupported)
        );
    }
}
