//! Window request and info types.

use serde::{Deserialize, Serialize};

use crate::{
    DeviceId, Error,
    unit::{PxBox, PxPoint, PxSize},
};

bitflags::bitflags! {
    /// Window behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct WindowFlags: u32 {
        /// Stay above all non-topmost windows.
        const TOPMOST = 0x01;
        /// Transient window that captures the seat pointer target and is
        /// dismissed on any focus change or click outside of it.
        const POPUP = 0x02;
        /// Never receives focus.
        const NOFOCUS = 0x04;
        /// Window is minimized (not painted, never focused).
        const MINIMIZED = 0x08;
        /// Window is maximized to the display maximize rectangle.
        const MAXIMIZED = 0x10;
        /// System window, skipped by focus switching.
        const SYSTEM = 0x20;
        /// Maximized windows avoid this window's rectangle (panels).
        const AVOID = 0x40;
        /// `pos` in the creation parameters is an explicit display
        /// position, otherwise the server places the window.
        const SETPOS = 0x80;
    }
}

/// Parameters for window creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowParams {
    /// Window rectangle, window-local coordinates.
    pub rect: PxBox,
    /// Caption.
    pub caption: String,
    /// Behavior flags.
    pub flags: WindowFlags,
    /// Minimum size enforced by interactive resize.
    pub min_size: PxSize,
    /// Initial display position, used when [`WindowFlags::SETPOS`] is set.
    pub pos: PxPoint,
    /// Input device that caused the window to be created, selects the
    /// owning seat for popup/focus placement. Zero when unknown.
    pub idev_id: DeviceId,
}
impl WindowParams {
    /// New parameters with the given rectangle and all other fields default.
    pub fn new(rect: PxBox) -> Self {
        WindowParams {
            rect,
            caption: String::new(),
            flags: WindowFlags::empty(),
            min_size: PxSize::new(1, 1),
            pos: PxPoint::zero(),
            idev_id: DeviceId::INVALID,
        }
    }
}

/// Window edge or corner dragged by an interactive resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeDirection {
    /// The top border is moved.
    North,
    /// The top-right corner is moved.
    NorthEast,
    /// The right border is moved.
    East,
    /// The bottom-right corner is moved.
    SouthEast,
    /// The bottom border is moved.
    South,
    /// The bottom-left corner is moved.
    SouthWest,
    /// The left border is moved.
    West,
    /// The top-left corner is moved.
    NorthWest,
}
impl ResizeDirection {
    /// If the top edge is being dragged.
    pub fn is_top(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    /// If the bottom edge is being dragged.
    pub fn is_bottom(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    /// If the left edge is being dragged.
    pub fn is_left(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    /// If the right edge is being dragged.
    pub fn is_right(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    /// The stock cursor that indicates this resize direction.
    pub fn cursor(self) -> StockCursor {
        match self {
            Self::North | Self::South => StockCursor::SizeUd,
            Self::East | Self::West => StockCursor::SizeLr,
            Self::NorthWest | Self::SouthEast => StockCursor::SizeUldr,
            Self::NorthEast | Self::SouthWest => StockCursor::SizeUrdl,
        }
    }
}

/// Stock cursor shapes provided by the display server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u32)]
pub enum StockCursor {
    /// Standard arrow.
    #[default]
    Arrow = 0,
    /// Vertical (up-down) resize.
    SizeUd = 1,
    /// Horizontal (left-right) resize.
    SizeLr = 2,
    /// Diagonal resize, up-left/down-right.
    SizeUldr = 3,
    /// Diagonal resize, up-right/down-left.
    SizeUrdl = 4,
    /// Text caret.
    IBeam = 5,
}
impl StockCursor {
    /// Number of stock cursors.
    pub const COUNT: u32 = 6;

    /// The raw protocol code.
    pub const fn code(self) -> u32 {
        self as u32
    }
}
impl TryFrom<u32> for StockCursor {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self, Error> {
        match code {
            0 => Ok(Self::Arrow),
            1 => Ok(Self::SizeUd),
            2 => Ok(Self::SizeLr),
            3 => Ok(Self::SizeUldr),
            4 => Ok(Self::SizeUrdl),
            5 => Ok(Self::IBeam),
            _ => Err(Error::Invalid),
        }
    }
}

/// Window information for window management clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowInfo {
    /// Caption.
    pub caption: String,
    /// Behavior flags.
    pub flags: WindowFlags,
    /// Number of seats focusing the window.
    pub nfocus: u32,
}

/// Display information.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayInfo {
    /// Display bounding rectangle.
    pub rect: PxBox,
}

/// Seat information for configuration clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatInfo {
    /// Seat name, unique in the display.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_cursor_codes_round_trip() {
        for code in 0..StockCursor::COUNT {
            let c = StockCursor::try_from(code).unwrap();
            assert_eq!(c.code(), code);
        }
        assert_eq!(StockCursor::try_from(6), Err(Error::Invalid));
    }

    #[test]
    fn resize_direction_cursors() {
        assert_eq!(ResizeDirection::North.cursor(), StockCursor::SizeUd);
        assert_eq!(ResizeDirection::West.cursor(), StockCursor::SizeLr);
        assert_eq!(ResizeDirection::SouthEast.cursor(), StockCursor::SizeUldr);
        assert_eq!(ResizeDirection::SouthWest.cursor(), StockCursor::SizeUrdl);
    }
}
