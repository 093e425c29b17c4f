//! Input and outbound event types.
//!
//! Normalized keyboard and pointing device events enter the server from
//! the input service; the server routes them and queues outbound events
//! on the drawing, window-management and configuration endpoints.

use serde::{Deserialize, Serialize};

use crate::{
    DeviceId, SeatId, WindowId,
    unit::{PxBox, PxPoint, PxVector},
};

bitflags::bitflags! {
    /// Keyboard modifiers state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct KeyMods: u8 {
        /// Any shift key.
        const SHIFT = 0b0001;
        /// Any control key.
        const CTRL = 0b0010;
        /// Any alt key.
        const ALT = 0b0100;
        /// Any meta/super key.
        const META = 0b1000;
    }
}
impl KeyMods {
    /// If the alt or shift modifier is pressed.
    ///
    /// Window management chords (Tab switch, F4 close) accept either.
    pub fn alt_or_shift(self) -> bool {
        self.intersects(KeyMods::ALT | KeyMods::SHIFT)
    }
}

/// Key press state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyState {
    /// The key was pressed.
    Pressed,
    /// The key was released.
    Released,
}

/// Keyboard key identifier.
///
/// Only keys the server itself inspects are identified, everything else
/// is forwarded verbatim as a character or scan code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyCode {
    /// Tab key.
    Tab,
    /// Enter key.
    Enter,
    /// Escape key.
    Escape,
    /// Backspace key.
    Backspace,
    /// Function key, 1-based.
    F(u8),
    /// A key producing a character.
    Char(char),
    /// Key not identified by the input service.
    Unidentified(u32),
}

/// Keyboard event as delivered by the input service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KbdEvent {
    /// Source keyboard device.
    pub device: DeviceId,
    /// Press or release.
    pub state: KeyState,
    /// The key.
    pub key: KeyCode,
    /// Modifiers state.
    pub mods: KeyMods,
}

/// Pointing device action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PtdAction {
    /// Relative move by the delta.
    Move(PxVector),
    /// Absolute move, `pos` within the device `bounds`.
    AbsMove {
        /// Absolute position in device coordinates.
        pos: PxPoint,
        /// Device coordinate bounds.
        bounds: PxBox,
    },
    /// Button press.
    Press(u32),
    /// Button release.
    Release(u32),
    /// Button double-click.
    DClick(u32),
}

/// Pointing device event as delivered by the input service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PtdEvent {
    /// Source pointing device.
    pub device: DeviceId,
    /// The action.
    pub action: PtdAction,
}

/// Position event action, see [`PosEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PosAction {
    /// Button press.
    Press(u32),
    /// Button release.
    Release(u32),
    /// Button double-click.
    DClick(u32),
    /// Pointer moved.
    Update,
}

/// Position event, synthesized by a seat from pointing device events.
///
/// The position is in display coordinates when routed inside the server
/// and translated to window-local coordinates when delivered to a client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PosEvent {
    /// Device that caused the event.
    pub device: DeviceId,
    /// The action.
    pub action: PosAction,
    /// Pointer position.
    pub pos: PxPoint,
}
impl PosEvent {
    /// This event translated by `offset`.
    #[must_use]
    pub fn translated(mut self, offset: PxVector) -> Self {
        self.pos += offset;
        self
    }
}

/// Event queued to a drawing client, targeted at one of its windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum WindowEvent {
    /// The window should close.
    Close,
    /// The window gained focus in some seat.
    Focus {
        /// Number of seats now focusing the window.
        nfocus: u32,
    },
    /// The window lost focus in some seat.
    Unfocus {
        /// Number of seats still focusing the window.
        nfocus: u32,
    },
    /// Keyboard input.
    Kbd(KbdEvent),
    /// Pointer input, window-local coordinates.
    Pos(PosEvent),
    /// The window was resized by the server, the client must reallocate
    /// its surface to the new rectangle.
    Resize {
        /// New window rectangle, window-local.
        rect: PxBox,
    },
}

/// Event queued to a window management client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum WmEvent {
    /// A window appeared.
    WindowAdded(WindowId),
    /// A window is gone.
    WindowRemoved(WindowId),
    /// Window caption, flags or focus count changed.
    WindowChanged(WindowId),
}

/// Event queued to a configuration client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CfgEvent {
    /// A seat was created.
    SeatAdded(SeatId),
    /// A seat was removed.
    SeatRemoved(SeatId),
}
