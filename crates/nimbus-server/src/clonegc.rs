//! Cloning graphics context.
//!
//! Duplicates rendering onto any number of output contexts. Draw calls
//! replay on every output in attachment order and stop at the first
//! error. Bitmaps are mirrored as a matrix of per-output bitmaps; an
//! output attached late retroactively receives a mirror of every bitmap
//! still alive.

use std::sync::{Arc, Weak};

use nimbus_api::{
    Error,
    gfx::{BitmapParams, Color, Gc, GcBitmap, PixmapRef, pixmap_alloc},
    unit::{PxBox, PxVector},
};
use parking_lot::Mutex;

/// Per logical bitmap state: the recorded creation parameters and one
/// output bitmap per attached output.
struct CloneBitmapState {
    params: BitmapParams,
    /// Allocation supplied by the creator, aliased by every output.
    caller_alloc: Option<PixmapRef>,
    /// The allocation reported by `alloc()`: the caller's, or the first
    /// output's own.
    canonical_alloc: PixmapRef,
    obitmaps: Vec<Box<dyn GcBitmap>>,
}

struct CloneGcState {
    outputs: Vec<Box<dyn Gc>>,
    bitmaps: Vec<Weak<Mutex<CloneBitmapState>>>,
}

/// Cloning graphics context, see the module docs.
pub struct CloneGc {
    state: Mutex<CloneGcState>,
}

impl CloneGc {
    /// New cloning context with its first output.
    pub fn new(output: Box<dyn Gc>) -> CloneGc {
        CloneGc {
            state: Mutex::new(CloneGcState {
                outputs: vec![output],
                bitmaps: vec![],
            }),
        }
    }

    /// Number of attached outputs.
    pub fn output_count(&self) -> usize {
        self.state.lock().outputs.len()
    }

    /// Attach a new output.
    ///
    /// Every bitmap still alive is mirrored onto the new output using its
    /// recorded parameters, so the output can render any frame the others
    /// can. Fails atomically.
    pub fn add_output(&self, output: Box<dyn Gc>) -> Result<(), Error> {
        let mut state = self.state.lock();

        // Drop tracking entries for bitmaps that are gone.
        state.bitmaps.retain(|b| b.strong_count() > 0);

        let mut mirrored = vec![];
        for bitmap in &state.bitmaps {
            let Some(bitmap) = bitmap.upgrade() else {
                continue;
            };
            let b = bitmap.lock();
            match output.bitmap_create(b.params, b.caller_alloc.clone()) {
                Ok(obm) => {
                    drop(b);
                    mirrored.push((bitmap, obm));
                }
                Err(e) => return Err(e),
            }
        }

        for (bitmap, obm) in mirrored {
            bitmap.lock().obitmaps.push(obm);
        }
        state.outputs.push(output);
        Ok(())
    }
}

impl Gc for CloneGc {
    fn set_clip_rect(&self, rect: Option<PxBox>) -> Result<(), Error> {
        let state = self.state.lock();
        for output in &state.outputs {
            output.set_clip_rect(rect)?;
        }
        Ok(())
    }

    fn set_color(&self, color: Color) -> Result<(), Error> {
        let state = self.state.lock();
        for output in &state.outputs {
            output.set_color(color)?;
        }
        Ok(())
    }

    fn fill_rect(&self, rect: PxBox) -> Result<(), Error> {
        let state = self.state.lock();
        for output in &state.outputs {
            output.fill_rect(rect)?;
        }
        Ok(())
    }

    fn bitmap_create(&self, params: BitmapParams, alloc: Option<PixmapRef>) -> Result<Box<dyn GcBitmap>, Error> {
        let mut state = self.state.lock();

        let mut obitmaps = Vec::with_capacity(state.outputs.len());
        for output in &state.outputs {
            obitmaps.push(output.bitmap_create(params, alloc.clone())?);
        }

        let canonical_alloc = match (&alloc, obitmaps.first()) {
            (Some(a), _) => a.clone(),
            (None, Some(first)) => first.alloc(),
            // No output; keep the bitmap usable for when one attaches.
            (None, None) => pixmap_alloc(params.rect.size()),
        };

        let bitmap = Arc::new(Mutex::new(CloneBitmapState {
            params,
            caller_alloc: alloc,
            canonical_alloc,
            obitmaps,
        }));
        state.bitmaps.push(Arc::downgrade(&bitmap));

        Ok(Box::new(CloneGcBitmap { state: bitmap }))
    }
}

/// Bitmap created on a [`CloneGc`].
struct CloneGcBitmap {
    state: Arc<Mutex<CloneBitmapState>>,
}

impl GcBitmap for CloneGcBitmap {
    fn render(&self, srect: Option<PxBox>, offs: Option<PxVector>) -> Result<(), Error> {
        let state = self.state.lock();
        for obm in &state.obitmaps {
            obm.render(srect, offs)?;
        }
        Ok(())
    }

    fn alloc(&self) -> PixmapRef {
        self.state.lock().canonical_alloc.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testgc::{TestGc, TestGcOp};
    use nimbus_api::unit::px_box;

    #[test]
    fn draws_replay_on_every_output_in_order() {
        let out0 = TestGc::new();
        let out1 = TestGc::new();
        let cgc = CloneGc::new(out0.handle());
        cgc.add_output(out1.handle()).unwrap();

        cgc.set_color(Color::WHITE).unwrap();
        cgc.fill_rect(px_box(0, 0, 10, 10)).unwrap();
        cgc.set_clip_rect(Some(px_box(1, 1, 2, 2))).unwrap();

        let expected = [
            TestGcOp::SetColor(Color::WHITE),
            TestGcOp::FillRect(px_box(0, 0, 10, 10)),
            TestGcOp::SetClipRect(Some(px_box(1, 1, 2, 2))),
        ];
        assert_eq!(out0.ops(), expected);
        assert_eq!(out1.ops(), expected);
    }

    #[test]
    fn draw_stops_at_first_failing_output() {
        let out0 = TestGc::new();
        let out1 = TestGc::new();
        let out2 = TestGc::new();
        out1.fail_next(Error::Io("sink gone".into()));

        let cgc = CloneGc::new(out0.handle());
        cgc.add_output(out1.handle()).unwrap();
        cgc.add_output(out2.handle()).unwrap();

        let rc = cgc.fill_rect(px_box(0, 0, 1, 1));
        assert_eq!(rc, Err(Error::Io("sink gone".into())));

        // First output saw the draw, the third must not have been called.
        assert_eq!(out0.ops(), [TestGcOp::FillRect(px_box(0, 0, 1, 1))]);
        assert_eq!(out2.ops(), []);
    }

    #[test]
    fn caller_alloc_is_aliased_on_every_output() {
        let out0 = TestGc::new();
        let out1 = TestGc::new();
        let cgc = CloneGc::new(out0.handle());
        cgc.add_output(out1.handle()).unwrap();

        let alloc = pixmap_alloc(px_box(0, 0, 4, 4).size());
        let params = BitmapParams::new(px_box(0, 0, 4, 4));
        let bmp = cgc.bitmap_create(params, Some(alloc.clone())).unwrap();

        assert!(Arc::ptr_eq(&bmp.alloc(), &alloc));
        for out in [&out0, &out1] {
            let allocs = out.bitmap_allocs();
            assert_eq!(allocs.len(), 1);
            assert!(Arc::ptr_eq(&allocs[0], &alloc));
        }
    }

    #[test]
    fn own_alloc_canonicalizes_first_output() {
        let out0 = TestGc::new();
        let out1 = TestGc::new();
        let cgc = CloneGc::new(out0.handle());
        cgc.add_output(out1.handle()).unwrap();

        let params = BitmapParams::new(px_box(0, 0, 4, 4));
        let bmp = cgc.bitmap_create(params, None).unwrap();

        let a0 = &out0.bitmap_allocs()[0];
        let a1 = &out1.bitmap_allocs()[0];
        assert!(Arc::ptr_eq(&bmp.alloc(), a0));
        assert!(!Arc::ptr_eq(a0, a1));
    }

    #[test]
    fn late_output_mirrors_existing_bitmaps() {
        let out0 = TestGc::new();
        let cgc = CloneGc::new(out0.handle());

        let alloc = pixmap_alloc(px_box(0, 0, 2, 2).size());
        let params = BitmapParams::new(px_box(0, 0, 2, 2));
        let bmp = cgc.bitmap_create(params, Some(alloc.clone())).unwrap();

        let dead = cgc.bitmap_create(params, None).unwrap();
        drop(dead);

        let out1 = TestGc::new();
        cgc.add_output(out1.handle()).unwrap();

        // Only the live bitmap is mirrored, sharing the caller allocation.
        let allocs = out1.bitmap_allocs();
        assert_eq!(allocs.len(), 1);
        assert!(Arc::ptr_eq(&allocs[0], &alloc));

        bmp.render(None, None).unwrap();
        assert_eq!(out1.render_count(), 1);
    }
}
