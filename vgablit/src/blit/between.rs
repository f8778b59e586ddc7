//! Copies that convert between color depths.

use crate::bitmap::vtable::{read_le, write_le};
use crate::bitmap::Bitmap;
use crate::clip::BlitRect;
use crate::context::ColorContext;
use crate::convert::Converter;
use crate::depth::Layout;
use crate::error::{try_reserve, Error};
use alloc::vec::Vec;

type SourceBlitter = fn(&ColorContext, &Bitmap, &Bitmap, &BlitRect) -> Result<(), Error>;

// Indexed by source depth. The source's pixel size fixes how each row is
// decoded; the destination's encoding comes from the conversion table.
static BY_SOURCE_DEPTH: [SourceBlitter; 5] = [
    from_depth::<1>,
    from_depth::<2>,
    from_depth::<2>,
    from_depth::<3>,
    from_depth::<4>,
];

pub(crate) fn blit(ctx: &ColorContext, src: &Bitmap, dst: &Bitmap, r: &BlitRect) -> Result<(), Error> {
    if src.layout() == Layout::Planar || dst.layout() == Layout::Planar {
        log::trace!(
            "{}-bit to {}-bit {}x{} blit pixel by pixel",
            src.depth().bits(),
            dst.depth().bits(),
            r.w,
            r.h
        );
        generic(ctx, src, dst, r);
        return Ok(());
    }
    log::trace!(
        "{}-bit to {}-bit {}x{} blit from {:?} to {:?}",
        src.depth().bits(),
        dst.depth().bits(),
        r.w,
        r.h,
        src.layout(),
        dst.layout()
    );
    BY_SOURCE_DEPTH[src.depth().index()](ctx, src, dst, r)
}

fn line_buffer(len: usize) -> Result<Vec<u8>, Error> {
    let mut line = Vec::new();
    try_reserve(&mut line, len)?;
    line.resize(len, 0);
    Ok(line)
}

/// Converts one row at a time: the source row is read in one span, each
/// pixel converted into a destination row buffer, which is then written
/// in one span.
fn from_depth<const N: usize>(
    ctx: &ColorContext,
    src: &Bitmap,
    dst: &Bitmap,
    r: &BlitRect,
) -> Result<(), Error> {
    let conv = Converter::new(src.depth(), dst.depth(), ctx);
    let dst_bpp = dst.vtable().bytes_per_pixel();
    let w = r.w as usize;
    let mut src_line = line_buffer(w * N)?;
    let mut dst_line = line_buffer(w * dst_bpp)?;

    let mut s = src.storage().borrow_mut();
    let mut d = dst.storage().borrow_mut();
    for y in 0..r.h {
        s.read_span(src.pos(r.src_x, r.src_y + y), N, &mut src_line);
        let pixels = src_line.chunks_exact(N).zip(dst_line.chunks_exact_mut(dst_bpp));
        for (pixel, out) in pixels {
            write_le(out, conv.convert(read_le(pixel), ctx));
        }
        d.write_span(dst.pos(r.dst_x, r.dst_y + y), dst_bpp, &dst_line);
    }
    Ok(())
}

fn generic(ctx: &ColorContext, src: &Bitmap, dst: &Bitmap, r: &BlitRect) {
    let conv = Converter::new(src.depth(), dst.depth(), ctx);
    let (get, put) = (src.vtable().get, dst.vtable().put);
    let mut s = src.storage().borrow_mut();
    let mut d = dst.storage().borrow_mut();
    for y in 0..r.h {
        for x in 0..r.w {
            let c = get(&mut *s, src.pos(r.src_x + x, r.src_y + y));
            put(&mut *d, dst.pos(r.dst_x + x, r.dst_y + y), conv.convert(c, ctx));
        }
    }
}
