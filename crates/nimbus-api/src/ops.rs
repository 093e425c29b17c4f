//! The three service surfaces, as traits implemented by the server.
//!
//! Each endpoint owns an outbound event queue drained by `get_event`; a
//! pending callback registered at connect time signals the transport when
//! the queue may have become non-empty.

use crate::{
    DeviceId, Error, SeatId, WindowId,
    event::{CfgEvent, WindowEvent, WmEvent},
    unit::{PxBox, PxPoint, PxVector},
    window::{DisplayInfo, ResizeDirection, SeatInfo, WindowInfo, WindowParams},
};

/// The *display* service: window lifetime, geometry and event delivery
/// for one drawing client.
pub trait DisplayApi {
    /// Create a window owned by this client.
    fn window_create(&mut self, params: WindowParams) -> Result<WindowId, Error>;

    /// Destroy one of this client's windows.
    fn window_destroy(&mut self, id: WindowId) -> Result<(), Error>;

    /// Start an interactive move; `pos` is the pointer position in
    /// window coordinates, `pos_id` the positioning device.
    fn window_move_req(&mut self, id: WindowId, pos: PxPoint, pos_id: DeviceId) -> Result<(), Error>;

    /// Move the window to a display position.
    fn window_move(&mut self, id: WindowId, dpos: PxPoint) -> Result<(), Error>;

    /// Current display position of the window.
    fn window_get_pos(&mut self, id: WindowId) -> Result<PxPoint, Error>;

    /// The rectangle a maximized window would occupy.
    fn window_get_max_rect(&mut self, id: WindowId) -> Result<PxBox, Error>;

    /// Start an interactive resize dragging the given edge or corner.
    fn window_resize_req(
        &mut self,
        id: WindowId,
        direction: ResizeDirection,
        pos: PxPoint,
        pos_id: DeviceId,
    ) -> Result<(), Error>;

    /// Resize the window; `offset` adjusts the display position so the
    /// retained edge stays put, `rect` is the new window rectangle.
    fn window_resize(&mut self, id: WindowId, offset: PxVector, rect: PxBox) -> Result<(), Error>;

    /// Minimize the window.
    fn window_minimize(&mut self, id: WindowId) -> Result<(), Error>;

    /// Unminimize the window.
    fn window_unminimize(&mut self, id: WindowId) -> Result<(), Error>;

    /// Maximize the window.
    fn window_maximize(&mut self, id: WindowId) -> Result<(), Error>;

    /// Restore the window to its pre-maximize geometry.
    fn window_unmaximize(&mut self, id: WindowId) -> Result<(), Error>;

    /// Select a stock cursor shown while the pointer hovers the window.
    ///
    /// Fails with [`Error::Invalid`] if `cursor` is not a stock cursor
    /// code.
    fn window_set_cursor(&mut self, id: WindowId, cursor: u32) -> Result<(), Error>;

    /// Set the window caption.
    fn window_set_caption(&mut self, id: WindowId, caption: &str) -> Result<(), Error>;

    /// Pop the next queued event, if any.
    fn get_event(&mut self) -> Option<(WindowId, WindowEvent)>;

    /// Display information.
    fn get_info(&mut self) -> DisplayInfo;
}

/// The *window management* service: observation and control of every
/// window on the display.
pub trait WndMgtApi {
    /// IDs of all windows in stacking order, topmost first.
    fn get_window_list(&mut self) -> Vec<WindowId>;

    /// Information about any window.
    fn get_window_info(&mut self, id: WindowId) -> Result<WindowInfo, Error>;

    /// Focus the window from the seat owning `dev`, unminimizing it
    /// first if needed.
    fn activate_window(&mut self, dev: DeviceId, id: WindowId) -> Result<(), Error>;

    /// Ask the owning client to close the window.
    fn close_window(&mut self, id: WindowId) -> Result<(), Error>;

    /// Pop the next queued event, if any.
    fn get_event(&mut self) -> Option<WmEvent>;
}

/// The *configuration* service: seats and input device assignment.
pub trait DispCfgApi {
    /// IDs of all seats in creation order.
    fn get_seat_list(&mut self) -> Vec<SeatId>;

    /// Information about a seat.
    fn get_seat_info(&mut self, id: SeatId) -> Result<SeatInfo, Error>;

    /// Create a seat. Fails with [`Error::Exists`] on name collision.
    fn seat_create(&mut self, name: &str) -> Result<SeatId, Error>;

    /// Delete a seat and every device assignment pointing at it.
    ///
    /// Fails with [`Error::Busy`] when `id` is the last remaining seat.
    fn seat_delete(&mut self, id: SeatId) -> Result<(), Error>;

    /// Assign an input device to a seat.
    fn dev_assign(&mut self, dev: DeviceId, seat: SeatId) -> Result<(), Error>;

    /// Remove the assignment of an input device.
    fn dev_unassign(&mut self, dev: DeviceId) -> Result<(), Error>;

    /// Devices assigned to a seat.
    fn get_asgn_dev_list(&mut self, seat: SeatId) -> Result<Vec<DeviceId>, Error>;

    /// Pop the next queued event, if any.
    fn get_event(&mut self) -> Option<CfgEvent>;
}
