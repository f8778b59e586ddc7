//! Copies between bitmaps of the same color depth.

use super::address_range;
use crate::bitmap::Bitmap;
use crate::clip::BlitRect;
use crate::depth::Layout;
use crate::error::{try_reserve, Error};
use crate::surface::Direction;
use alloc::vec::Vec;

/// How a same-depth copy moves its pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Strategy {
    /// Different storage, linear destination: each source row is read
    /// straight into the destination's memory.
    DestinationDriven,
    /// Different storage, destination not linear: rows are written through
    /// the destination's accessors, from the source memory or a line
    /// buffer.
    SourceDriven,
    /// Same storage, but the two areas can't share any address.
    Disjoint,
    /// Same storage, overlapping, destination below the source in memory:
    /// copy in ascending address order.
    Forward,
    /// Same storage, overlapping, destination above the source in memory:
    /// copy in descending address order.
    Backward,
    /// Source and destination are the very same pixels.
    Nothing,
    /// Copy through a temporary bitmap, for shared-window banked memory and
    /// for overlapping views whose rows run in opposite directions.
    ViaTemporary,
}

pub(crate) fn choose(src: &Bitmap, dst: &Bitmap, r: &BlitRect) -> Strategy {
    if !src.is_same_surface(dst) {
        return if dst.layout() == Layout::Linear {
            Strategy::DestinationDriven
        } else {
            Strategy::SourceDriven
        };
    }
    if !src.storage().borrow().independent_windows() {
        return Strategy::ViaTemporary;
    }

    let (src_lo, src_hi) = address_range(src, r.src_x, r.src_y, r.w, r.h);
    let (dst_lo, dst_hi) = address_range(dst, r.dst_x, r.dst_y, r.w, r.h);
    if src_hi <= dst_lo || dst_hi <= src_lo {
        return Strategy::Disjoint;
    }
    // Address order only settles the overlap when every destination pixel
    // sits at the same distance from its source pixel.
    if src.rows_ascend(r.src_y, r.h) != dst.rows_ascend(r.dst_y, r.h) {
        return Strategy::ViaTemporary;
    }
    if src_lo == dst_lo {
        Strategy::Nothing
    } else if src_lo > dst_lo {
        Strategy::Forward
    } else {
        Strategy::Backward
    }
}

pub(crate) fn blit(src: &Bitmap, dst: &Bitmap, r: &BlitRect) -> Result<(), Error> {
    let strategy = choose(src, dst, r);
    log::trace!(
        "{}-bit {}x{} blit from {:?} to {:?}: {:?}",
        src.depth().bits(),
        r.w,
        r.h,
        src.layout(),
        dst.layout(),
        strategy
    );
    match strategy {
        Strategy::DestinationDriven => destination_driven(src, dst, r),
        Strategy::SourceDriven => source_driven(src, dst, r),
        Strategy::Disjoint | Strategy::Forward => {
            within(src, dst, r, Direction::Ascending);
            Ok(())
        }
        Strategy::Backward => {
            within(src, dst, r, Direction::Descending);
            Ok(())
        }
        Strategy::Nothing => Ok(()),
        Strategy::ViaTemporary => via_temporary(src, dst, r),
    }
}

fn destination_driven(src: &Bitmap, dst: &Bitmap, r: &BlitRect) -> Result<(), Error> {
    let bpp = src.vtable().bytes_per_pixel();
    let n = r.w as usize * bpp;
    let mut s = src.storage().borrow_mut();
    let mut d = dst.storage().borrow_mut();
    let mem = d.linear_mut().ok_or(Error::Unsupported)?;
    for y in 0..r.h {
        let start = dst.pos(r.dst_x, r.dst_y + y).byte_addr(bpp);
        s.read_span(src.pos(r.src_x, r.src_y + y), bpp, &mut mem[start..start + n]);
    }
    Ok(())
}

fn source_driven(src: &Bitmap, dst: &Bitmap, r: &BlitRect) -> Result<(), Error> {
    let bpp = src.vtable().bytes_per_pixel();
    let n = r.w as usize * bpp;
    let mut s = src.storage().borrow_mut();
    let mut d = dst.storage().borrow_mut();
    if let Some(mem) = s.linear() {
        for y in 0..r.h {
            let start = src.pos(r.src_x, r.src_y + y).byte_addr(bpp);
            d.write_span(dst.pos(r.dst_x, r.dst_y + y), bpp, &mem[start..start + n]);
        }
        return Ok(());
    }

    let mut line = Vec::new();
    try_reserve(&mut line, n)?;
    line.resize(n, 0);
    for y in 0..r.h {
        s.read_span(src.pos(r.src_x, r.src_y + y), bpp, &mut line);
        d.write_span(dst.pos(r.dst_x, r.dst_y + y), bpp, &line);
    }
    Ok(())
}

/// Copies between two areas of the same storage one row at a time,
/// visiting rows and pixels in the given address order.
fn within(src: &Bitmap, dst: &Bitmap, r: &BlitRect, dir: Direction) {
    let bpp = src.vtable().bytes_per_pixel();
    let top_first = (dir == Direction::Ascending) == src.rows_ascend(r.src_y, r.h);
    let mut storage = src.storage().borrow_mut();
    for i in 0..r.h {
        let y = if top_first { i } else { r.h - 1 - i };
        storage.move_span(
            src.pos(r.src_x, r.src_y + y),
            dst.pos(r.dst_x, r.dst_y + y),
            bpp,
            r.w as usize,
            dir,
        );
    }
}

fn via_temporary(src: &Bitmap, dst: &Bitmap, r: &BlitRect) -> Result<(), Error> {
    let temp = Bitmap::new(r.w as u32, r.h as u32, src.depth())?;
    destination_driven(src, &temp, &BlitRect::new(r.src_x, r.src_y, 0, 0, r.w, r.h))?;
    let out = BlitRect::new(0, 0, r.dst_x, r.dst_y, r.w, r.h);
    match choose(&temp, dst, &out) {
        Strategy::DestinationDriven => destination_driven(&temp, dst, &out),
        _ => source_driven(&temp, dst, &out),
    }
}
