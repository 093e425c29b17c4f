//! Display server cursor.
//!
//! A cursor is a rectangle of pixel codes (transparent, black, white)
//! with the hot spot at the origin. The color-keyed bitmap is
//! materialized on the compositing context at first paint and cached
//! until the cursor is dropped.

use nimbus_api::{
    Error,
    gfx::{BitmapFlags, BitmapParams, Color, Gc, GcBitmap, Pixmap, pixmap_alloc},
    unit::{PxBox, PxPoint, clip, px_box},
    window::StockCursor,
};
use parking_lot::Mutex;

use crate::cursimg;

/// Color that marks transparent cursor pixels.
const KEY_COLOR: Color = Color::rgb(0, 255, 255);

/// A cursor image and its cached bitmap.
pub(crate) struct Cursor {
    /// Bounding rectangle, hot spot at the origin.
    rect: PxBox,
    /// One code byte per pixel: 0 transparent, 1 black, 2 white.
    image: &'static [u8],
    bitmap: Mutex<Option<Box<dyn GcBitmap>>>,
}

impl Cursor {
    /// The built-in cursor for a stock code.
    pub fn stock(which: StockCursor) -> Cursor {
        let img = cursimg::stock_image(which);
        let [x0, y0, x1, y1] = img.rect;
        Cursor {
            rect: px_box(x0, y0, x1, y1),
            image: img.pixels,
            bitmap: Mutex::new(None),
        }
    }

    /// Rectangle covered by the cursor drawn at `pos`.
    pub fn rect_at(&self, pos: PxPoint) -> PxBox {
        self.rect.translate(pos.to_vector())
    }

    /// Decode the code plane into key-colored pixels.
    fn decode(&self) -> Pixmap {
        let mut pm = Pixmap::new(self.rect.size());
        let w = self.rect.width();
        for (i, code) in self.image.iter().enumerate() {
            let px = match code {
                1 => Color::BLACK.to_pixel(),
                2 => Color::WHITE.to_pixel(),
                _ => KEY_COLOR.to_pixel(),
            };
            pm.set_pixel(i as i32 % w, i as i32 / w, px);
        }
        pm
    }

    /// Paint the cursor at `pos`, clipped to `clip_rect`.
    pub fn paint(&self, gc: &dyn Gc, pos: PxPoint, clip_rect: Option<PxBox>) -> Result<(), Error> {
        let mut bitmap = self.bitmap.lock();
        if bitmap.is_none() {
            let alloc = pixmap_alloc(self.rect.size());
            *alloc.lock() = self.decode();

            let mut params = BitmapParams::new(self.rect);
            params.flags = BitmapFlags::COLOR_KEY;
            params.key_color = KEY_COLOR;
            *bitmap = Some(gc.bitmap_create(params, Some(alloc))?);
        }

        let srect = match clip_rect {
            Some(c) => clip(c.translate(-pos.to_vector()), self.rect),
            None => self.rect,
        };
        if srect.is_empty() {
            return Ok(());
        }
        bitmap.as_ref().unwrap().render(Some(srect), Some(pos.to_vector()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testgc::{TestGc, TestGcOp};

    #[test]
    fn bitmap_materialized_once() {
        let out = TestGc::new();
        let gc = out.handle();
        let cursor = Cursor::stock(StockCursor::Arrow);

        cursor.paint(&*gc, PxPoint::new(10, 10), None).unwrap();
        cursor.paint(&*gc, PxPoint::new(20, 20), None).unwrap();

        let creates = out
            .ops()
            .iter()
            .filter(|op| matches!(op, TestGcOp::BitmapCreate(_)))
            .count();
        assert_eq!(creates, 1);
        assert_eq!(out.render_count(), 2);
    }

    #[test]
    fn decode_uses_key_for_transparent() {
        let cursor = Cursor::stock(StockCursor::Arrow);
        let pm = cursor.decode();
        // Top-left pixel of the arrow is a black border pixel, its right
        // neighbor is transparent.
        assert_eq!(pm.pixel(0, 0), Color::BLACK.to_pixel());
        assert_eq!(pm.pixel(1, 0), KEY_COLOR.to_pixel());
    }

    #[test]
    fn paint_clips_source() {
        let out = TestGc::new();
        let gc = out.handle();
        let cursor = Cursor::stock(StockCursor::Arrow);

        // Clip rectangle covering one pixel at the hot spot.
        cursor
            .paint(&*gc, PxPoint::new(100, 100), Some(px_box(100, 100, 101, 101)))
            .unwrap();
        let rendered = out.ops().into_iter().find_map(|op| match op {
            TestGcOp::BitmapRender { srect, .. } => srect,
            _ => None,
        });
        assert_eq!(rendered, Some(px_box(0, 0, 1, 1)));

        out.clear_ops();
        // Disjoint clip paints nothing.
        cursor
            .paint(&*gc, PxPoint::new(100, 100), Some(px_box(0, 0, 10, 10)))
            .unwrap();
        assert_eq!(out.render_count(), 0);
    }
}
