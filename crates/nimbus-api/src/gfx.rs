//! Graphics context contract.
//!
//! Pixel sinks (output device drivers, the server's own memory and clone
//! contexts) implement [`Gc`]; everything the compositor paints goes
//! through this interface. The contract is the standard set: clip
//! rectangle, drawing color, rectangle fill and bitmaps (create, render,
//! get-alloc; destroy is `Drop`).

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    unit::{PxBox, PxSize, PxVector},
};

/// An opaque 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}
impl Color {
    /// New color from channel values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// The packed `0x00RRGGBB` pixel value.
    pub const fn to_pixel(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Color from a packed `0x00RRGGBB` pixel value.
    pub const fn from_pixel(px: u32) -> Self {
        Color::rgb((px >> 16) as u8, (px >> 8) as u8, px as u8)
    }
}

/// A plain 32-bit pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: i32,
    height: i32,
    data: Vec<u32>,
}
impl Pixmap {
    /// New zero-filled pixmap.
    pub fn new(size: PxSize) -> Self {
        let width = size.width.max(0);
        let height = size.height.max(0);
        Pixmap {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Pixel value at the coordinates, zero if out of bounds.
    pub fn pixel(&self, x: i32, y: i32) -> u32 {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return 0;
        }
        self.data[(y * self.width + x) as usize]
    }

    /// Set the pixel value at the coordinates, ignores out of bounds.
    pub fn set_pixel(&mut self, x: i32, y: i32, px: u32) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.data[(y * self.width + x) as usize] = px;
    }
}

/// Shared reference to a pixel buffer allocation.
///
/// Buffers are shared between the graphics context that allocated them,
/// the memory context drawing into them and any aliased output bitmaps.
pub type PixmapRef = Arc<Mutex<Pixmap>>;

/// New shared pixel buffer allocation.
pub fn pixmap_alloc(size: PxSize) -> PixmapRef {
    Arc::new(Mutex::new(Pixmap::new(size)))
}

bitflags::bitflags! {
    /// Bitmap creation flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct BitmapFlags: u32 {
        /// Pixels equal to the key color are not rendered.
        const COLOR_KEY = 0x1;
    }
}

/// Bitmap creation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BitmapParams {
    /// Bitmap rectangle; rendering positions the bitmap at these
    /// coordinates (plus the render offset).
    pub rect: PxBox,
    /// Flags.
    pub flags: BitmapFlags,
    /// Key color for [`BitmapFlags::COLOR_KEY`].
    pub key_color: Color,
}
impl BitmapParams {
    /// New parameters with the rectangle set and no flags.
    pub fn new(rect: PxBox) -> Self {
        BitmapParams {
            rect,
            flags: BitmapFlags::empty(),
            key_color: Color::default(),
        }
    }
}

/// A graphics context.
///
/// Implementations synchronize internally; the display lock already
/// serializes compositor access, sinks shared with driver tasks must
/// tolerate calls from any thread.
pub trait Gc: Send + Sync {
    /// Set the clipping rectangle, `None` to clear it.
    fn set_clip_rect(&self, rect: Option<PxBox>) -> Result<(), Error>;

    /// Set the current drawing color.
    fn set_color(&self, color: Color) -> Result<(), Error>;

    /// Fill a rectangle with the current drawing color.
    fn fill_rect(&self, rect: PxBox) -> Result<(), Error>;

    /// Create a bitmap.
    ///
    /// If `alloc` is given the bitmap uses the caller's pixel buffer,
    /// otherwise the context allocates one. Destroying the bitmap is
    /// dropping the returned handle.
    fn bitmap_create(&self, params: BitmapParams, alloc: Option<PixmapRef>) -> Result<Box<dyn GcBitmap>, Error>;
}

/// A bitmap created on a [`Gc`].
pub trait GcBitmap: Send + Sync {
    /// Render the bitmap to its context.
    ///
    /// `srect` selects a sub-rectangle in bitmap coordinates, `None`
    /// renders the full bitmap rectangle. `offs` translates the bitmap
    /// coordinates to the destination.
    fn render(&self, srect: Option<PxBox>, offs: Option<PxVector>) -> Result<(), Error>;

    /// The bitmap pixel allocation.
    fn alloc(&self) -> PixmapRef;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_pixel_round_trip() {
        let c = Color::rgb(0x80, 0xc8, 0xff);
        assert_eq!(c.to_pixel(), 0x0080c8ff);
        assert_eq!(Color::from_pixel(c.to_pixel()), c);
    }

    #[test]
    fn pixmap_bounds() {
        let mut pm = Pixmap::new(PxSize::new(2, 2));
        pm.set_pixel(1, 1, 7);
        pm.set_pixel(5, 5, 9);
        assert_eq!(pm.pixel(1, 1), 7);
        assert_eq!(pm.pixel(5, 5), 0);
    }
}
