//! Copies that skip transparent source pixels.

use crate::bitmap::Bitmap;
use crate::clip::BlitRect;
use crate::error::Error;
use crate::surface::{Separate, Shared, StoragePair};

pub(crate) fn blit(src: &Bitmap, dst: &Bitmap, r: &BlitRect) -> Result<(), Error> {
    if src.is_same_surface(dst) {
        if src.overlaps(r.src_x, r.src_y, dst, r.dst_x, r.dst_y, r.w, r.h) {
            log::debug!("masked blit of {:?} reads pixels it writes", r);
            return Err(Error::Aliased);
        }
        let mut storage = src.storage().borrow_mut();
        copy_opaque(src, dst, r, &mut Shared(&mut *storage));
    } else {
        let mut s = src.storage().borrow_mut();
        let mut d = dst.storage().borrow_mut();
        copy_opaque(src, dst, r, &mut Separate(&mut *s, &mut *d));
    }
    Ok(())
}

fn copy_opaque<P: StoragePair>(src: &Bitmap, dst: &Bitmap, r: &BlitRect, pair: &mut P) {
    let depth = src.depth();
    let (get, put) = (src.vtable().get, dst.vtable().put);
    for y in 0..r.h {
        for x in 0..r.w {
            let c = get(pair.source(), src.pos(r.src_x + x, r.src_y + y));
            if !depth.is_mask(c) {
                put(pair.destination(), dst.pos(r.dst_x + x, r.dst_y + y), c);
            }
        }
    }
}
