//! Pixel units and rectangle algebra.
//!
//! All display server geometry is in exact device pixels, `i32` backed.
//! Rectangles are [`euclid`] boxes, `min`/`max` being the inclusive top-left
//! and exclusive bottom-right corners.

#[doc(no_inline)]
pub use euclid;

/// Point in device pixels.
pub type PxPoint = euclid::default::Point2D<i32>;

/// Vector (relative move) in device pixels.
pub type PxVector = euclid::default::Vector2D<i32>;

/// Size in device pixels.
pub type PxSize = euclid::default::Size2D<i32>;

/// Rectangle in device pixels, `min` inclusive, `max` exclusive.
pub type PxBox = euclid::default::Box2D<i32>;

/// New rectangle from corner coordinates.
pub fn px_box(x0: i32, y0: i32, x1: i32, y1: i32) -> PxBox {
    PxBox::new(PxPoint::new(x0, y0), PxPoint::new(x1, y1))
}

/// Envelope (union) of two rectangles, ignoring empty operands.
///
/// Unlike a plain min/max union an empty rectangle does not drag the
/// result towards its (meaningless) coordinates.
pub fn envelope(a: PxBox, b: PxBox) -> PxBox {
    if a.is_empty() {
        b
    } else if b.is_empty() {
        a
    } else {
        a.union(&b)
    }
}

/// Clip `a` against `b` (intersection), empty if they do not overlap.
pub fn clip(a: PxBox, b: PxBox) -> PxBox {
    a.intersection(&b).unwrap_or_else(PxBox::zero)
}

/// If the rectangles share at least one pixel.
pub fn overlaps(a: PxBox, b: PxBox) -> bool {
    !clip(a, b).is_empty()
}

/// Clamp a point into the rectangle, the result is inside `rect` if it
/// is not empty.
pub fn clip_point(p: PxPoint, rect: PxBox) -> PxPoint {
    if rect.is_empty() {
        return rect.min;
    }
    PxPoint::new(
        p.x.clamp(rect.min.x, rect.max.x - 1),
        p.y.clamp(rect.min.y, rect.max.y - 1),
    )
}

/// Project a point from the source bounds onto the destination rectangle.
///
/// Used to map absolute pointing device coordinates (tablet, touch) onto
/// the display rectangle. Degenerate source bounds project onto the
/// destination origin.
pub fn project(p: PxPoint, src: PxBox, dst: PxBox) -> PxPoint {
    if dst.is_empty() {
        return dst.min;
    }
    let sw = (src.width() - 1).max(0);
    let sh = (src.height() - 1).max(0);

    let x = if sw == 0 {
        dst.min.x
    } else {
        dst.min.x + (p.x - src.min.x) * (dst.width() - 1) / sw
    };
    let y = if sh == 0 {
        dst.min.y
    } else {
        dst.min.y + (p.y - src.min.y) * (dst.height() - 1) / sh
    };
    PxPoint::new(x, y)
}
