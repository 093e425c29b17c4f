//! Recording graphics context for tests.
//!
//! Implements the full [`Gc`] contract, records every call in order and
//! can be armed to fail the next call, which is how the fan-out
//! stop-at-first-error behavior is asserted.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nimbus_api::{
    Error,
    gfx::{BitmapParams, Color, Gc, GcBitmap, PixmapRef, pixmap_alloc},
    unit::{PxBox, PxVector},
};
use parking_lot::Mutex;

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum TestGcOp {
    /// `set_clip_rect` call.
    SetClipRect(Option<PxBox>),
    /// `set_color` call.
    SetColor(Color),
    /// `fill_rect` call.
    FillRect(PxBox),
    /// `bitmap_create` call with the bitmap rectangle.
    BitmapCreate(PxBox),
    /// Render of a bitmap created on this context.
    BitmapRender {
        /// Source sub-rectangle.
        srect: Option<PxBox>,
        /// Render offset.
        offs: Option<PxVector>,
    },
}

#[derive(Default)]
struct TestGcInner {
    ops: Mutex<Vec<TestGcOp>>,
    fail_next: Mutex<Option<Error>>,
    allocs: Mutex<Vec<PixmapRef>>,
    renders: AtomicUsize,
}

impl TestGcInner {
    fn check_fail(&self) -> Result<(), Error> {
        match self.fail_next.lock().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Recording graphics context.
#[derive(Default)]
pub struct TestGc {
    inner: Arc<TestGcInner>,
}

impl TestGc {
    /// New recording context.
    pub fn new() -> TestGc {
        TestGc::default()
    }

    /// A [`Gc`] handle sharing this recorder.
    pub fn handle(&self) -> Box<dyn Gc> {
        Box::new(TestGcHandle {
            inner: self.inner.clone(),
        })
    }

    /// Arm the context to fail its next call with `err`.
    pub fn fail_next(&self, err: Error) {
        *self.inner.fail_next.lock() = Some(err);
    }

    /// All recorded calls in order.
    pub fn ops(&self) -> Vec<TestGcOp> {
        self.inner.ops.lock().clone()
    }

    /// Forget the recorded calls and reset the render counter.
    pub fn clear_ops(&self) {
        self.inner.ops.lock().clear();
        self.inner.renders.store(0, Ordering::Relaxed);
    }

    /// Allocations of the bitmaps created on this context, in creation
    /// order.
    pub fn bitmap_allocs(&self) -> Vec<PixmapRef> {
        self.inner.allocs.lock().clone()
    }

    /// Number of bitmap renders.
    pub fn render_count(&self) -> usize {
        self.inner.renders.load(Ordering::Relaxed)
    }

    /// Envelope of every rectangle a recorded call could have written to.
    ///
    /// Bitmap renders count with their full destination rectangle
    /// (bitmap rect translated by the offset, or the sub-rectangle).
    pub fn written_rects(&self) -> Vec<PxBox> {
        self.inner
            .ops
            .lock()
            .iter()
            .filter_map(|op| match op {
                TestGcOp::FillRect(r) => Some(*r),
                TestGcOp::BitmapRender { srect, offs } => {
                    srect.map(|r| r.translate(offs.unwrap_or_else(PxVector::zero)))
                }
                _ => None,
            })
            .collect()
    }
}

struct TestGcHandle {
    inner: Arc<TestGcInner>,
}

impl Gc for TestGcHandle {
    fn set_clip_rect(&self, rect: Option<PxBox>) -> Result<(), Error> {
        self.inner.check_fail()?;
        self.inner.ops.lock().push(TestGcOp::SetClipRect(rect));
        Ok(())
    }

    fn set_color(&self, color: Color) -> Result<(), Error> {
        self.inner.check_fail()?;
        self.inner.ops.lock().push(TestGcOp::SetColor(color));
        Ok(())
    }

    fn fill_rect(&self, rect: PxBox) -> Result<(), Error> {
        self.inner.check_fail()?;
        self.inner.ops.lock().push(TestGcOp::FillRect(rect));
        Ok(())
    }

    fn bitmap_create(&self, params: BitmapParams, alloc: Option<PixmapRef>) -> Result<Box<dyn GcBitmap>, Error> {
        self.inner.check_fail()?;
        let alloc = alloc.unwrap_or_else(|| pixmap_alloc(params.rect.size()));
        self.inner.ops.lock().push(TestGcOp::BitmapCreate(params.rect));
        self.inner.allocs.lock().push(alloc.clone());
        Ok(Box::new(TestGcBitmap {
            inner: self.inner.clone(),
            params,
            alloc,
        }))
    }
}

struct TestGcBitmap {
    inner: Arc<TestGcInner>,
    params: BitmapParams,
    alloc: PixmapRef,
}

impl GcBitmap for TestGcBitmap {
    fn render(&self, srect: Option<PxBox>, offs: Option<PxVector>) -> Result<(), Error> {
        self.inner.check_fail()?;
        let srect = srect.or(Some(self.params.rect));
        self.inner.ops.lock().push(TestGcOp::BitmapRender { srect, offs });
        self.inner.renders.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn alloc(&self) -> PixmapRef {
        self.alloc.clone()
    }
}
