//! Memory graphics context.
//!
//! A software [`Gc`] over a shared pixel buffer. The display back buffer
//! and every window surface are memory contexts; window surfaces are
//! handed to clients through the GC tunnel, so the context synchronizes
//! internally and can be driven without the display lock.
//!
//! Every mutation reports the modified rectangle to the invalidate
//! callback *after* releasing the internal state, the callback is free to
//! take the display lock and repaint.

use std::sync::{Arc, Weak};

use nimbus_api::{
    Error,
    gfx::{BitmapFlags, BitmapParams, Color, Gc, GcBitmap, PixmapRef, pixmap_alloc},
    unit::{PxBox, PxVector, clip},
};
use parking_lot::Mutex;

/// Invalidate callback, receives the modified rectangle in context
/// coordinates.
pub type InvalidateFn = Box<dyn Fn(PxBox) + Send + Sync>;

struct MemGcState {
    rect: PxBox,
    alloc: PixmapRef,
    clip: Option<PxBox>,
    color: Color,
}

/// Memory graphics context over a shared pixel buffer.
pub struct MemGc {
    state: Mutex<MemGcState>,
    invalidate: InvalidateFn,
    self_ref: Mutex<Weak<MemGc>>,
}

impl MemGc {
    /// New memory context drawing into `alloc`, which covers `rect`.
    pub fn new(rect: PxBox, alloc: PixmapRef, invalidate: InvalidateFn) -> Arc<MemGc> {
        let gc = Arc::new(MemGc {
            state: Mutex::new(MemGcState {
                rect,
                alloc,
                clip: None,
                color: Color::BLACK,
            }),
            invalidate,
            self_ref: Mutex::new(Weak::new()),
        });
        *gc.self_ref.lock() = Arc::downgrade(&gc);
        gc
    }

    /// Point the context at a new buffer covering a new rectangle.
    ///
    /// Used when a window is resized; previously created bitmaps keep
    /// rendering into the context, now targeting the new buffer.
    pub fn retarget(&self, rect: PxBox, alloc: PixmapRef) {
        let mut state = self.state.lock();
        state.rect = rect;
        state.alloc = alloc;
        state.clip = None;
    }

    /// The context bounding rectangle.
    pub fn rect(&self) -> PxBox {
        self.state.lock().rect
    }

    /// The current target buffer.
    pub fn target(&self) -> PixmapRef {
        self.state.lock().alloc.clone()
    }

    fn effective_clip(state: &MemGcState) -> PxBox {
        match state.clip {
            Some(c) => clip(c, state.rect),
            None => state.rect,
        }
    }
}

impl Gc for MemGc {
    fn set_clip_rect(&self, rect: Option<PxBox>) -> Result<(), Error> {
        self.state.lock().clip = rect;
        Ok(())
    }

    fn set_color(&self, color: Color) -> Result<(), Error> {
        self.state.lock().color = color;
        Ok(())
    }

    fn fill_rect(&self, rect: PxBox) -> Result<(), Error> {
        let crect;
        {
            let state = self.state.lock();
            crect = clip(rect, Self::effective_clip(&state));
            if crect.is_empty() {
                return Ok(());
            }

            let px = state.color.to_pixel();
            let origin = state.rect.min;
            let mut pm = state.alloc.lock();
            for y in crect.min.y..crect.max.y {
                for x in crect.min.x..crect.max.x {
                    pm.set_pixel(x - origin.x, y - origin.y, px);
                }
            }
        }
        (self.invalidate)(crect);
        Ok(())
    }

    fn bitmap_create(&self, params: BitmapParams, alloc: Option<PixmapRef>) -> Result<Box<dyn GcBitmap>, Error> {
        let src = alloc.unwrap_or_else(|| pixmap_alloc(params.rect.size()));
        Ok(Box::new(MemGcBitmap {
            gc: self.self_ref.lock().clone(),
            params,
            src,
        }))
    }
}

/// Bitmap created on a [`MemGc`].
struct MemGcBitmap {
    gc: Weak<MemGc>,
    params: BitmapParams,
    src: PixmapRef,
}

impl GcBitmap for MemGcBitmap {
    fn render(&self, srect: Option<PxBox>, offs: Option<PxVector>) -> Result<(), Error> {
        let Some(gc) = self.gc.upgrade() else {
            return Ok(());
        };

        let srect = match srect {
            Some(r) => clip(r, self.params.rect),
            None => self.params.rect,
        };
        let offs = offs.unwrap_or_else(PxVector::zero);
        let key = self.params.flags.contains(BitmapFlags::COLOR_KEY).then(|| self.params.key_color.to_pixel());

        let drect;
        {
            let state = gc.state.lock();

            // Destination rectangle clipped to the context.
            drect = clip(srect.translate(offs), MemGc::effective_clip(&state));
            if drect.is_empty() {
                return Ok(());
            }

            // The source can alias the target when a client renders a
            // bitmap wrapping the window's own surface.
            let src_snapshot;
            let src_guard;
            let src = if Arc::ptr_eq(&self.src, &state.alloc) {
                src_snapshot = self.src.lock().clone();
                &src_snapshot
            } else {
                src_guard = self.src.lock();
                &*src_guard
            };

            let sorigin = self.params.rect.min;
            let dorigin = state.rect.min;
            let mut dst = state.alloc.lock();
            for y in drect.min.y..drect.max.y {
                for x in drect.min.x..drect.max.x {
                    let sx = x - offs.x - sorigin.x;
                    let sy = y - offs.y - sorigin.y;
                    let px = src.pixel(sx, sy);
                    if key == Some(px) {
                        continue;
                    }
                    dst.set_pixel(x - dorigin.x, y - dorigin.y, px);
                }
            }
        }
        (gc.invalidate)(drect);
        Ok(())
    }

    fn alloc(&self) -> PixmapRef {
        self.src.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_api::unit::{PxPoint, px_box};
    use std::sync::atomic::{AtomicI32, Ordering};

    fn test_gc(rect: PxBox) -> (Arc<MemGc>, PixmapRef, Arc<AtomicI32>) {
        let alloc = pixmap_alloc(rect.size());
        let calls = Arc::new(AtomicI32::new(0));
        let c = calls.clone();
        let gc = MemGc::new(
            rect,
            alloc.clone(),
            Box::new(move |_| {
                c.fetch_add(1, Ordering::Relaxed);
            }),
        );
        (gc, alloc, calls)
    }

    #[test]
    fn fill_respects_clip() {
        let (gc, alloc, calls) = test_gc(px_box(0, 0, 10, 10));
        gc.set_color(Color::WHITE).unwrap();
        gc.set_clip_rect(Some(px_box(2, 2, 4, 4))).unwrap();
        gc.fill_rect(px_box(0, 0, 10, 10)).unwrap();

        let pm = alloc.lock();
        assert_eq!(pm.pixel(2, 2), Color::WHITE.to_pixel());
        assert_eq!(pm.pixel(3, 3), Color::WHITE.to_pixel());
        assert_eq!(pm.pixel(4, 4), 0);
        assert_eq!(pm.pixel(1, 1), 0);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn bitmap_render_color_key() {
        let (gc, alloc, _) = test_gc(px_box(0, 0, 4, 1));

        let mut params = BitmapParams::new(px_box(0, 0, 2, 1));
        params.flags = BitmapFlags::COLOR_KEY;
        params.key_color = Color::rgb(0, 255, 255);

        let bmp = gc.bitmap_create(params, None).unwrap();
        {
            let alloc = bmp.alloc();
            let mut src = alloc.lock();
            src.set_pixel(0, 0, params.key_color.to_pixel());
            src.set_pixel(1, 0, Color::WHITE.to_pixel());
        }
        gc.set_color(Color::rgb(9, 9, 9)).unwrap();
        gc.fill_rect(px_box(0, 0, 4, 1)).unwrap();
        bmp.render(None, Some(PxPoint::new(1, 0).to_vector())).unwrap();

        let pm = alloc.lock();
        // keyed pixel is skipped, white pixel lands at offset
        assert_eq!(pm.pixel(1, 0), Color::rgb(9, 9, 9).to_pixel());
        assert_eq!(pm.pixel(2, 0), Color::WHITE.to_pixel());
    }

    #[test]
    fn retarget_switches_buffer() {
        let (gc, old, _) = test_gc(px_box(0, 0, 2, 2));
        let new = pixmap_alloc(px_box(0, 0, 2, 2).size());
        gc.retarget(px_box(0, 0, 2, 2), new.clone());

        gc.set_color(Color::WHITE).unwrap();
        gc.fill_rect(px_box(0, 0, 1, 1)).unwrap();

        assert_eq!(old.lock().pixel(0, 0), 0);
        assert_eq!(new.lock().pixel(0, 0), Color::WHITE.to_pixel());
    }
}
