//! Built-in cursor images.
//!
//! One byte per pixel: 0 is transparent (becomes the key color), 1 is
//! black, 2 is white. The rectangles place the hot spot at the origin.

use nimbus_api::window::StockCursor;

/// A built-in cursor image.
pub struct CursorImage {
    /// Bounding rectangle corners `[x0, y0, x1, y1]`, hot spot at `(0, 0)`.
    pub rect: [i32; 4],
    /// Pixel codes, row-major over the rectangle.
    pub pixels: &'static [u8],
}

/// The built-in image for a stock cursor.
pub fn stock_image(cursor: StockCursor) -> &'static CursorImage {
    match cursor {
        StockCursor::Arrow => &ARROW,
        StockCursor::SizeUd => &SIZE_UD,
        StockCursor::SizeLr => &SIZE_LR,
        StockCursor::SizeUldr => &SIZE_ULDR,
        StockCursor::SizeUrdl => &SIZE_URDL,
        StockCursor::IBeam => &IBEAM,
    }
}

static ARROW: CursorImage = CursorImage {
    rect: [0, 0, 13, 21],
    pixels: &[
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        1, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 0, 0,
        1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 0,
        1, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1,
        1, 2, 2, 2, 1, 2, 2, 1, 0, 0, 0, 0, 0,
        1, 2, 2, 1, 0, 1, 2, 2, 1, 0, 0, 0, 0,
        1, 2, 1, 0, 0, 1, 2, 2, 1, 0, 0, 0, 0,
        1, 1, 0, 0, 0, 0, 1, 2, 2, 1, 0, 0, 0,
        1, 0, 0, 0, 0, 0, 1, 2, 2, 1, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 1, 2, 2, 1, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 1, 2, 2, 1, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0,
    ],
};

static SIZE_UD: CursorImage = CursorImage {
    rect: [-6, -10, 7, 11],
    pixels: &[
        0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 2, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 1, 2, 2, 2, 2, 2, 1, 0, 0, 0,
        0, 0, 1, 2, 2, 2, 2, 2, 2, 2, 1, 0, 0,
        0, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 0,
        1, 1, 1, 1, 2, 2, 2, 2, 2, 1, 1, 1, 1,
        0, 0, 0, 1, 2, 2, 2, 2, 2, 1, 0, 0, 0,
        0, 0, 0, 1, 2, 2, 2, 2, 2, 1, 0, 0, 0,
        0, 0, 0, 1, 2, 2, 2, 2, 2, 1, 0, 0, 0,
        0, 0, 0, 1, 2, 2, 2, 2, 2, 1, 0, 0, 0,
        0, 0, 0, 1, 2, 2, 2, 2, 2, 1, 0, 0, 0,
        0, 0, 0, 1, 2, 2, 2, 2, 2, 1, 0, 0, 0,
        0, 0, 0, 1, 2, 2, 2, 2, 2, 1, 0, 0, 0,
        1, 1, 1, 1, 2, 2, 2, 2, 2, 1, 1, 1, 1,
        0, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 0,
        0, 0, 1, 2, 2, 2, 2, 2, 2, 2, 1, 0, 0,
        0, 0, 0, 1, 2, 2, 2, 2, 2, 1, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 2, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0,
    ],
};

static SIZE_LR: CursorImage = CursorImage {
    rect: [-10, -6, 11, 7],
    pixels: &[
        0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 1, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 1, 0, 0, 0,
        0, 0, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 0, 0,
        0, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 0,
        1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1,
        0, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 0,
        0, 0, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 0, 0,
        0, 0, 0, 1, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 1, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0,
    ],
};

static SIZE_ULDR: CursorImage = CursorImage {
    rect: [-7, -7, 8, 8],
    pixels: &[
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 1,
        1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 0, 0, 0, 1, 1,
        1, 2, 1, 0, 1, 2, 2, 2, 2, 2, 1, 0, 1, 2, 1,
        1, 1, 0, 0, 0, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1,
        1, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 2, 2, 1,
        0, 0, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 2, 1,
        0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 1,
        0, 0, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 2, 1,
        0, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 2, 2, 1,
        0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    ],
};

static SIZE_URDL: CursorImage = CursorImage {
    rect: [-7, -7, 8, 8],
    pixels: &[
        0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
        0, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 2, 2, 1,
        0, 0, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 2, 1,
        0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 1,
        0, 0, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 2, 1,
        1, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 2, 2, 2, 1,
        1, 1, 0, 0, 0, 1, 2, 2, 2, 2, 2, 1, 2, 2, 1,
        1, 2, 1, 0, 1, 2, 2, 2, 2, 2, 1, 0, 1, 2, 1,
        1, 2, 2, 1, 2, 2, 2, 2, 2, 1, 0, 0, 0, 1, 1,
        1, 2, 2, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 1,
        1, 2, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0,
        1, 2, 2, 2, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0,
        1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0,
    ],
};

static IBEAM: CursorImage = CursorImage {
    rect: [-5, -9, 6, 10],
    pixels: &[
        0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0,
        1, 2, 2, 2, 2, 1, 2, 2, 2, 2, 1,
        0, 1, 1, 1, 1, 2, 1, 1, 1, 1, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 0, 0, 0, 1, 2, 1, 0, 0, 0, 0,
        0, 1, 1, 1, 1, 2, 1, 1, 1, 1, 0,
        1, 2, 2, 2, 2, 1, 2, 2, 2, 2, 1,
        0, 1, 1, 1, 1, 0, 1, 1, 1, 1, 0,
    ],
};
