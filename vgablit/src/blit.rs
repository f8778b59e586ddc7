//! Rectangle copies between bitmaps.
//!
//! Every entry point first clips the request with
//! [`clip_blit`](crate::clip::clip_blit), so a request that clips away to
//! nothing succeeds without touching any pixel. The copy itself is then
//! chosen by comparing the two bitmaps: same-depth copies move raw pixel
//! bytes, cross-depth copies convert every pixel, and masked copies skip
//! transparent source pixels.

mod between;
mod masked;
mod same_format;

use crate::bitmap::Bitmap;
use crate::clip::{clip_blit, BlitRect};
use crate::context::ColorContext;
use crate::depth::Layout;
use crate::error::Error;

fn clipped(src: &Bitmap, dst: &Bitmap, req: BlitRect) -> Option<BlitRect> {
    let got = clip_blit(src.width(), src.height(), &dst.clip(), req);
    if got.is_none() {
        log::debug!("blit of {:?} clipped away", req);
    }
    got
}

/// Copies a `w` by `h` rectangle from `src` at `(src_x, src_y)` to `dst`
/// at `(dst_x, dst_y)`, converting between color depths as needed.
///
/// `src` and `dst` may be views of the same pixels, such as a bitmap and
/// one of its sub-bitmaps; overlapping areas are copied as if through an
/// intermediate copy of the source. `ctx` supplies the palette for
/// conversions to and from 8-bit pixels and is unused otherwise.
///
/// The only error is [`Error::OutOfMemory`], when a temporary copy or line
/// buffer can't be allocated. No destination pixel has been written in
/// that case.
#[allow(clippy::too_many_arguments)]
pub fn blit(
    ctx: &ColorContext,
    src: &Bitmap,
    dst: &mut Bitmap,
    src_x: i32,
    src_y: i32,
    dst_x: i32,
    dst_y: i32,
    w: i32,
    h: i32,
) -> Result<(), Error> {
    let r = match clipped(src, dst, BlitRect::new(src_x, src_y, dst_x, dst_y, w, h)) {
        Some(r) => r,
        None => return Ok(()),
    };
    if src.depth() == dst.depth() {
        same_format::blit(src, dst, &r)
    } else {
        between::blit(ctx, src, dst, &r)
    }
}

/// Copies a rectangle from one place in `bmp` to another. Overlapping
/// areas are handled the same way as by [`blit`].
#[allow(clippy::too_many_arguments)]
pub fn blit_within(
    bmp: &mut Bitmap,
    src_x: i32,
    src_y: i32,
    dst_x: i32,
    dst_y: i32,
    w: i32,
    h: i32,
) -> Result<(), Error> {
    let r = match clipped(bmp, bmp, BlitRect::new(src_x, src_y, dst_x, dst_y, w, h)) {
        Some(r) => r,
        None => return Ok(()),
    };
    same_format::blit(bmp, bmp, &r)
}

/// Like [`blit`], but leaves the destination unchanged wherever the source
/// pixel is the depth's mask color.
///
/// Both bitmaps must have the same depth, the source must be in linear
/// memory, and the source and destination areas must not share any pixel.
/// These are reported as [`Error::DepthMismatch`], [`Error::Unsupported`]
/// and [`Error::Aliased`] respectively, before anything is written.
#[allow(clippy::too_many_arguments)]
pub fn masked_blit(
    src: &Bitmap,
    dst: &mut Bitmap,
    src_x: i32,
    src_y: i32,
    dst_x: i32,
    dst_y: i32,
    w: i32,
    h: i32,
) -> Result<(), Error> {
    if src.depth() != dst.depth() {
        return Err(Error::DepthMismatch {
            source: src.depth(),
            destination: dst.depth(),
        });
    }
    if src.layout() != Layout::Linear {
        return Err(Error::Unsupported);
    }
    let r = match clipped(src, dst, BlitRect::new(src_x, src_y, dst_x, dst_y, w, h)) {
        Some(r) => r,
        None => return Ok(()),
    };
    masked::blit(src, dst, &r)
}

/// The lowest address and one past the highest address touched by a
/// `w` by `h` area at `(x, y)`, in the units of
/// [`Bitmap::linear_addr`].
pub(crate) fn address_range(bmp: &Bitmap, x: i32, y: i32, w: i32, h: i32) -> (usize, usize) {
    let (right, bottom) = (x + w - 1, y + h - 1);
    let corners = [
        bmp.linear_addr(x, y),
        bmp.linear_addr(right, y),
        bmp.linear_addr(x, bottom),
        bmp.linear_addr(right, bottom),
    ];
    let lo = corners.iter().copied().min().unwrap_or(0);
    let hi = corners.iter().copied().max().unwrap_or(0);
    (lo, hi + bmp.addr_unit())
}
