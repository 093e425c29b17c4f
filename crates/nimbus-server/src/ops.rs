//! Display service endpoint.
//!
//! One instance per drawing client connection. Every call takes the
//! display lock for its duration; windows are resolved through the
//! owning client so one client cannot operate on another's windows.
//! Dropping the endpoint is the disconnect: all owned windows are
//! destroyed in an orderly fashion.

use std::sync::Arc;

use nimbus_api::{
    DeviceId, Error, WindowId,
    event::WindowEvent,
    ops::DisplayApi,
    unit::{PxBox, PxPoint, PxVector},
    window::{DisplayInfo, ResizeDirection, WindowParams},
};

use crate::client::{Client, ClientId, PendingFn};
use crate::display::{Display, DisplayShared};

/// Display service endpoint for one drawing client.
pub struct DisplayEndpoint {
    shared: Arc<DisplayShared>,
    client: ClientId,
}

impl DisplayEndpoint {
    /// Connect a new drawing client.
    ///
    /// `pending` is invoked whenever the client's event queue may have
    /// become non-empty.
    pub fn connect(shared: &Arc<DisplayShared>, pending: Option<PendingFn>) -> DisplayEndpoint {
        let mut display = shared.lock();
        let client = ClientId(display.alloc_conn_id());
        display.clients.insert(client, Client::new(client, pending));

        DisplayEndpoint {
            shared: shared.clone(),
            client,
        }
    }

    fn owned(&self, display: &Display, id: WindowId) -> Result<(), Error> {
        match display.windows.get(&id) {
            Some(wnd) if wnd.client == self.client => Ok(()),
            _ => Err(Error::NotFound),
        }
    }

    /// The GC tunnel: hand out the surface context of a window.
    ///
    /// The window is located display-wide by ID; the returned context is
    /// drawn into without holding the display lock.
    pub fn window_gc(&self, id: WindowId) -> Result<Arc<crate::MemGc>, Error> {
        self.shared.window_gc(id)
    }
}

impl DisplayApi for DisplayEndpoint {
    fn window_create(&mut self, params: WindowParams) -> Result<WindowId, Error> {
        self.shared.lock().window_create(self.client, &params)
    }

    fn window_destroy(&mut self, id: WindowId) -> Result<(), Error> {
        let mut display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_destroy(id)
    }

    fn window_move_req(&mut self, id: WindowId, pos: PxPoint, pos_id: DeviceId) -> Result<(), Error> {
        let mut display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_move_req(id, pos, pos_id)
    }

    fn window_move(&mut self, id: WindowId, dpos: PxPoint) -> Result<(), Error> {
        let mut display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_move(id, dpos)
    }

    fn window_get_pos(&mut self, id: WindowId) -> Result<PxPoint, Error> {
        let display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_get_pos(id)
    }

    fn window_get_max_rect(&mut self, id: WindowId) -> Result<PxBox, Error> {
        let display = self.shared.lock();
        self.owned(&display, id)?;
        Ok(display.max_rect())
    }

    fn window_resize_req(
        &mut self,
        id: WindowId,
        direction: ResizeDirection,
        pos: PxPoint,
        pos_id: DeviceId,
    ) -> Result<(), Error> {
        let mut display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_resize_req(id, direction, pos, pos_id)
    }

    fn window_resize(&mut self, id: WindowId, offset: PxVector, rect: PxBox) -> Result<(), Error> {
        let mut display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_resize(id, offset, rect)
    }

    fn window_minimize(&mut self, id: WindowId) -> Result<(), Error> {
        let mut display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_minimize(id)
    }

    fn window_unminimize(&mut self, id: WindowId) -> Result<(), Error> {
        let mut display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_unminimize(id)
    }

    fn window_maximize(&mut self, id: WindowId) -> Result<(), Error> {
        let mut display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_maximize(id)
    }

    fn window_unmaximize(&mut self, id: WindowId) -> Result<(), Error> {
        let mut display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_unmaximize(id)
    }

    fn window_set_cursor(&mut self, id: WindowId, cursor: u32) -> Result<(), Error> {
        let mut display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_set_cursor(id, cursor)
    }

    fn window_set_caption(&mut self, id: WindowId, caption: &str) -> Result<(), Error> {
        let mut display = self.shared.lock();
        self.owned(&display, id)?;
        display.window_set_caption(id, caption)
    }

    fn get_event(&mut self) -> Option<(WindowId, WindowEvent)> {
        let mut display = self.shared.lock();
        let client = self.client;
        display.clients.get_mut(&client).and_then(|c| c.get_event())
    }

    fn get_info(&mut self) -> DisplayInfo {
        self.shared.lock().get_info()
    }
}

impl Drop for DisplayEndpoint {
    fn drop(&mut self) {
        let mut display = self.shared.lock();
        while let Some(wnd) = display.clients.get(&self.client).and_then(|c| c.windows.first().copied()) {
            let _ = display.window_destroy(wnd);
        }
        display.clients.remove(&self.client);
    }
}
