//! Clip rectangles and the clipping of blit requests against them.

/// A rectangle of permitted drawing positions. `left` and `top` are
/// inclusive, `right` and `bottom` exclusive.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ClipRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ClipRect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left: left,
            top: top,
            right: right,
            bottom: bottom,
        }
    }

    /// The clip rectangle covering a whole `w` by `h` bitmap.
    pub const fn full(w: i32, h: i32) -> Self {
        Self::new(0, 0, w, h)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Restricts the rectangle to lie within a `w` by `h` bitmap.
    pub fn clamped(self, w: i32, h: i32) -> Self {
        let left = self.left.max(0).min(w);
        let top = self.top.max(0).min(h);
        Self {
            left: left,
            top: top,
            right: self.right.max(left).min(w),
            bottom: self.bottom.max(top).min(h),
        }
    }
}

/// The source position, destination position and size of a blit.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct BlitRect {
    pub src_x: i32,
    pub src_y: i32,
    pub dst_x: i32,
    pub dst_y: i32,
    pub w: i32,
    pub h: i32,
}

impl BlitRect {
    pub const fn new(src_x: i32, src_y: i32, dst_x: i32, dst_y: i32, w: i32, h: i32) -> Self {
        Self {
            src_x: src_x,
            src_y: src_y,
            dst_x: dst_x,
            dst_y: dst_y,
            w: w,
            h: h,
        }
    }
}

/// Clips a blit request against the bounds of a `src_w` by `src_h` source
/// and the destination's clip rectangle.
///
/// Trimming one side shifts the other side by the same amount, so every
/// pixel that survives still pairs up with the source pixel it was
/// requested from. Returns `None` when nothing is left to copy.
pub fn clip_blit(src_w: i32, src_h: i32, dst_clip: &ClipRect, req: BlitRect) -> Option<BlitRect> {
    let BlitRect {
        mut src_x,
        mut src_y,
        mut dst_x,
        mut dst_y,
        mut w,
        mut h,
    } = req;

    if src_x >= src_w || src_y >= src_h || dst_x >= dst_clip.right || dst_y >= dst_clip.bottom {
        return None;
    }

    // Source bounds.
    if src_x < 0 {
        w = w.saturating_add(src_x);
        dst_x = dst_x.saturating_sub(src_x);
        src_x = 0;
    }
    if src_y < 0 {
        h = h.saturating_add(src_y);
        dst_y = dst_y.saturating_sub(src_y);
        src_y = 0;
    }
    w = w.min(src_w - src_x);
    h = h.min(src_h - src_y);

    // Destination clip.
    if dst_x < dst_clip.left {
        let d = dst_clip.left.saturating_sub(dst_x);
        w = w.saturating_sub(d);
        src_x = src_x.saturating_add(d);
        dst_x = dst_clip.left;
    }
    if dst_y < dst_clip.top {
        let d = dst_clip.top.saturating_sub(dst_y);
        h = h.saturating_sub(d);
        src_y = src_y.saturating_add(d);
        dst_y = dst_clip.top;
    }
    w = w.min(dst_clip.right.saturating_sub(dst_x));
    h = h.min(dst_clip.bottom.saturating_sub(dst_y));

    if w <= 0 || h <= 0 {
        return None;
    }
    Some(BlitRect::new(src_x, src_y, dst_x, dst_y, w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inside_unchanged() {
        let req = BlitRect::new(1, 2, 3, 4, 5, 6);
        assert_eq!(clip_blit(16, 16, &ClipRect::full(16, 16), req), Some(req));
    }

    #[test]
    fn test_destination_clip_shifts_source() {
        let got = clip_blit(8, 8, &ClipRect::new(4, 4, 12, 12), BlitRect::new(0, 0, 0, 0, 8, 8));
        assert_eq!(got, Some(BlitRect::new(4, 4, 4, 4, 4, 4)));
    }

    #[test]
    fn test_negative_source_shifts_destination() {
        let got = clip_blit(8, 8, &ClipRect::full(16, 16), BlitRect::new(-2, -3, 5, 5, 6, 6));
        assert_eq!(got, Some(BlitRect::new(0, 0, 7, 8, 4, 3)));
    }

    #[test]
    fn test_right_and_bottom_trimmed() {
        let got = clip_blit(10, 10, &ClipRect::full(12, 12), BlitRect::new(6, 0, 9, 10, 8, 8));
        // Source limits the width to 4, the destination then limits it to 3.
        assert_eq!(got, Some(BlitRect::new(6, 0, 9, 10, 3, 2)));
    }

    #[test]
    fn test_rejected() {
        let clip = ClipRect::full(16, 16);
        assert_eq!(clip_blit(8, 8, &clip, BlitRect::new(8, 0, 0, 0, 4, 4)), None);
        assert_eq!(clip_blit(8, 8, &clip, BlitRect::new(0, 0, 16, 0, 4, 4)), None);
        assert_eq!(clip_blit(8, 8, &clip, BlitRect::new(0, 0, -4, 0, 4, 4)), None);
        assert_eq!(clip_blit(8, 8, &clip, BlitRect::new(0, 0, 0, 0, 0, 4)), None);
        assert_eq!(clip_blit(8, 8, &clip, BlitRect::new(0, 0, 0, 0, -3, 4)), None);
        assert_eq!(clip_blit(8, 8, &ClipRect::new(4, 4, 4, 12), BlitRect::new(0, 0, 0, 0, 8, 8)), None);
    }

    #[test]
    fn test_clamped() {
        let c = ClipRect::new(-5, 3, 100, 2).clamped(10, 10);
        assert_eq!(c, ClipRect::new(0, 3, 10, 3));
        assert!(c.is_empty());
        assert!(!c.contains(0, 3));
        assert!(ClipRect::full(10, 10).contains(9, 9));
        assert!(!ClipRect::full(10, 10).contains(10, 9));
    }
}
