//! Bitmaps: rectangular views onto pixel storage.

pub(crate) mod vtable;

use crate::bank::BankedMemory;
use crate::clip::ClipRect;
use crate::depth::{ColorDepth, Layout};
use crate::error::{try_reserve, Error};
use crate::surface::{Pos, Storage};
use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use self::vtable::Vtable;

/// A rectangular image with a color depth, a memory layout, and a clip
/// rectangle.
///
/// A bitmap is a descriptor for pixel storage rather than the storage
/// itself: [`sub_bitmap`](Bitmap::sub_bitmap) and
/// [`flipped`](Bitmap::flipped) create further bitmaps that view the same
/// pixels, so drawing through one is visible through the others. Each
/// bitmap has its own clip rectangle, which limits every drawing
/// operation that targets it. Source reads are limited only by the
/// bitmap's bounds.
///
/// The storage is reference-counted without atomics, so bitmaps stay on
/// the thread that created them.
pub struct Bitmap {
    w: i32,
    h: i32,
    clip: ClipRect,

    // Pixel x offset of column zero within each row.
    x_ofs: usize,
    // Byte offset of each row's first pixel, or of its first byte within
    // each plane for planar storage.
    rows: Vec<usize>,

    storage: Rc<RefCell<Storage>>,
    vtable: &'static Vtable,
}

fn dimensions(width: u32, height: u32) -> Result<(i32, i32), Error> {
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(Error::Unsupported);
    }
    Ok((width as i32, height as i32))
}

fn zeroed(len: usize) -> Result<Vec<u8>, Error> {
    let mut v = Vec::new();
    try_reserve(&mut v, len)?;
    v.resize(len, 0);
    Ok(v)
}

fn row_table(h: i32, pitch: usize) -> Result<Vec<usize>, Error> {
    let mut rows = Vec::new();
    try_reserve(&mut rows, h as usize)?;
    rows.extend((0..h as usize).map(|y| y * pitch));
    Ok(rows)
}

impl Bitmap {
    fn from_parts(w: i32, h: i32, rows: Vec<usize>, storage: Storage, vtable: &'static Vtable) -> Self {
        Self {
            w: w,
            h: h,
            clip: ClipRect::full(w, h),
            x_ofs: 0,
            rows: rows,
            storage: Rc::new(RefCell::new(storage)),
            vtable: vtable,
        }
    }

    /// Allocates a zero-filled bitmap in ordinary linear memory.
    pub fn new(width: u32, height: u32, depth: ColorDepth) -> Result<Self, Error> {
        let (w, h) = dimensions(width, height)?;
        let pitch = (w as usize)
            .checked_mul(depth.bytes_per_pixel())
            .ok_or(Error::Unsupported)?;
        let size = pitch.checked_mul(h as usize).ok_or(Error::Unsupported)?;
        let mem = zeroed(size)?;
        let rows = row_table(h, pitch)?;
        let vtable = Vtable::for_format(depth, Layout::Linear).ok_or(Error::Unsupported)?;
        log::debug!("created {}x{} {}-bit linear bitmap", w, h, depth.bits());
        Ok(Self::from_parts(w, h, rows, Storage::Linear(mem), vtable))
    }

    /// Allocates a zero-filled 8-bit bitmap in mode-X planar memory.
    pub fn new_planar(width: u32, height: u32) -> Result<Self, Error> {
        let (w, h) = dimensions(width, height)?;
        let pitch = (w as usize + 3) / 4;
        let size = pitch.checked_mul(h as usize).ok_or(Error::Unsupported)?;
        let planes = [zeroed(size)?, zeroed(size)?, zeroed(size)?, zeroed(size)?];
        let rows = row_table(h, pitch)?;
        let vtable = Vtable::for_format(ColorDepth::Indexed8, Layout::Planar).ok_or(Error::Unsupported)?;
        log::debug!("created {}x{} planar bitmap", w, h);
        Ok(Self::from_parts(w, h, rows, Storage::Planar(planes), vtable))
    }

    /// Wraps banked video memory as a bitmap whose rows start every
    /// `pitch` bytes.
    ///
    /// Returns [`Error::Unsupported`] if a row doesn't fit in `pitch` bytes
    /// or the memory is too small to hold every row.
    pub fn new_banked(
        width: u32,
        height: u32,
        depth: ColorDepth,
        pitch: usize,
        mem: Box<dyn BankedMemory>,
    ) -> Result<Self, Error> {
        let (w, h) = dimensions(width, height)?;
        let row_bytes = (w as usize)
            .checked_mul(depth.bytes_per_pixel())
            .ok_or(Error::Unsupported)?;
        if row_bytes > pitch || mem.bank_size() == 0 {
            return Err(Error::Unsupported);
        }
        let needed = pitch.checked_mul(h as usize).ok_or(Error::Unsupported)?;
        if needed > mem.total_size() {
            log::warn!(
                "banked memory holds {} bytes but a {}x{} bitmap with pitch {} needs {}",
                mem.total_size(),
                w,
                h,
                pitch,
                needed
            );
            return Err(Error::Unsupported);
        }
        let rows = row_table(h, pitch)?;
        let vtable = Vtable::for_format(depth, Layout::Banked).ok_or(Error::Unsupported)?;
        log::debug!(
            "created {}x{} {}-bit banked bitmap, {}-byte banks, {} windows",
            w,
            h,
            depth.bits(),
            mem.bank_size(),
            if mem.separate_windows() { "separate" } else { "shared" }
        );
        Ok(Self::from_parts(w, h, rows, Storage::Banked(mem), vtable))
    }

    /// Creates a bitmap viewing the given area of this one.
    ///
    /// The area is clamped to lie within this bitmap. The new bitmap's
    /// clip rectangle covers all of it.
    pub fn sub_bitmap(&self, x: i32, y: i32, w: i32, h: i32) -> Result<Bitmap, Error> {
        let x = x.max(0).min(self.w);
        let y = y.max(0).min(self.h);
        let w = w.max(0).min(self.w - x);
        let h = h.max(0).min(self.h - y);

        let mut rows = Vec::new();
        try_reserve(&mut rows, h as usize)?;
        rows.extend_from_slice(&self.rows[y as usize..(y + h) as usize]);
        Ok(Bitmap {
            w: w,
            h: h,
            clip: ClipRect::full(w, h),
            x_ofs: self.x_ofs + x as usize,
            rows: rows,
            storage: Rc::clone(&self.storage),
            vtable: self.vtable,
        })
    }

    /// Creates a vertically flipped view of this bitmap: row `y` of the
    /// result is row `height - 1 - y` of this one.
    pub fn flipped(&self) -> Result<Bitmap, Error> {
        let mut rows = Vec::new();
        try_reserve(&mut rows, self.rows.len())?;
        rows.extend(self.rows.iter().rev());
        let clip = ClipRect::new(
            self.clip.left,
            self.h - self.clip.bottom,
            self.clip.right,
            self.h - self.clip.top,
        );
        Ok(Bitmap {
            w: self.w,
            h: self.h,
            clip: clip,
            x_ofs: self.x_ofs,
            rows: rows,
            storage: Rc::clone(&self.storage),
            vtable: self.vtable,
        })
    }

    pub fn width(&self) -> i32 {
        self.w
    }

    pub fn height(&self) -> i32 {
        self.h
    }

    pub fn depth(&self) -> ColorDepth {
        self.vtable.depth
    }

    pub fn layout(&self) -> Layout {
        self.vtable.layout
    }

    /// The pixel value masked operations skip on this bitmap.
    pub fn mask_color(&self) -> u32 {
        self.vtable.mask_color
    }

    /// Whether this bitmap and `other` view the same pixel storage, as
    /// with a bitmap and its sub-bitmaps.
    pub fn is_same_surface(&self, other: &Bitmap) -> bool {
        Rc::ptr_eq(&self.storage, &other.storage)
    }

    pub fn clip(&self) -> ClipRect {
        self.clip
    }

    /// Sets the clip rectangle, clamped to the bitmap's bounds.
    pub fn set_clip<'a>(&'a mut self, clip: ClipRect) -> &'a mut Self {
        self.clip = clip.clamped(self.w, self.h);
        self
    }

    /// Restores the clip rectangle to cover the whole bitmap.
    pub fn reset_clip<'a>(&'a mut self) -> &'a mut Self {
        self.clip = ClipRect::full(self.w, self.h);
        self
    }

    /// Reads one pixel, or returns `None` if it lies outside the clip
    /// rectangle.
    pub fn getpixel(&self, x: i32, y: i32) -> Option<u32> {
        if !self.clip.contains(x, y) {
            return None;
        }
        let mut storage = self.storage.borrow_mut();
        Some((self.vtable.get)(&mut *storage, self.pos(x, y)))
    }

    /// Writes one pixel if it lies inside the clip rectangle.
    pub fn putpixel(&mut self, x: i32, y: i32, color: u32) {
        if !self.clip.contains(x, y) {
            return;
        }
        let mut storage = self.storage.borrow_mut();
        (self.vtable.put)(&mut *storage, self.pos(x, y), color);
    }

    /// Draws a horizontal line between `x1` and `x2` inclusive, in either
    /// order, limited by the clip rectangle.
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, color: u32) {
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        if y < self.clip.top || y >= self.clip.bottom {
            return;
        }
        let x1 = x1.max(self.clip.left);
        let x2 = x2.min(self.clip.right - 1);
        if x1 > x2 {
            return;
        }
        let mut storage = self.storage.borrow_mut();
        let start = self.pos(x1, y);
        for i in 0..=(x2 - x1) as usize {
            (self.vtable.put)(&mut *storage, Pos::new(start.row, start.x + i), color);
        }
    }

    /// Fills the clip rectangle with one color.
    pub fn clear_to_color(&mut self, color: u32) {
        let ClipRect {
            left,
            top,
            right,
            bottom,
        } = self.clip;
        for y in top..bottom {
            self.hline(left, right - 1, y, color);
        }
    }

    /// The location of an in-bounds pixel.
    #[inline]
    pub(crate) fn pos(&self, x: i32, y: i32) -> Pos {
        Pos::new(self.rows[y as usize], self.x_ofs + x as usize)
    }

    /// A single address space covering every layout, in which the pixels
    /// of one storage are ordered the way the hardware stores them.
    /// Each pixel occupies [`addr_unit`](Bitmap::addr_unit) addresses.
    pub(crate) fn linear_addr(&self, x: i32, y: i32) -> usize {
        let p = self.pos(x, y);
        match self.vtable.layout {
            Layout::Planar => p.row * 4 + p.x,
            Layout::Linear | Layout::Banked => p.byte_addr(self.vtable.bytes_per_pixel()),
        }
    }

    pub(crate) fn addr_unit(&self) -> usize {
        match self.vtable.layout {
            Layout::Planar => 1,
            Layout::Linear | Layout::Banked => self.vtable.bytes_per_pixel(),
        }
    }

    /// Whether row addresses increase with `y` over the given rows.
    pub(crate) fn rows_ascend(&self, y: i32, h: i32) -> bool {
        h < 2 || self.rows[y as usize] < self.rows[(y + h - 1) as usize]
    }

    /// Whether a `w` by `h` area at `(x, y)` in this bitmap shares any
    /// pixel with the same-sized area at `(ox, oy)` in `other`.
    ///
    /// Every view's rows are a contiguous run of its storage's rows, so two
    /// areas meet exactly when both their row runs and their column spans
    /// intersect.
    pub(crate) fn overlaps(&self, x: i32, y: i32, other: &Bitmap, ox: i32, oy: i32, w: i32, h: i32) -> bool {
        if !self.is_same_surface(other) || w <= 0 || h <= 0 {
            return false;
        }
        let span = |bmp: &Bitmap, y: i32| {
            let (a, b) = (bmp.rows[y as usize], bmp.rows[(y + h - 1) as usize]);
            (a.min(b), a.max(b))
        };
        let (a_top, a_bottom) = span(self, y);
        let (b_top, b_bottom) = span(other, oy);
        let a_left = self.x_ofs + x as usize;
        let b_left = other.x_ofs + ox as usize;
        let w = w as usize;
        a_top <= b_bottom && b_top <= a_bottom && a_left < b_left + w && b_left < a_left + w
    }

    pub(crate) fn storage(&self) -> &RefCell<Storage> {
        &self.storage
    }

    pub(crate) fn vtable(&self) -> &'static Vtable {
        self.vtable
    }
}

impl core::fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.w)
            .field("height", &self.h)
            .field("depth", &self.vtable.depth)
            .field("layout", &self.vtable.layout)
            .field("clip", &self.clip)
            .finish()
    }
}
