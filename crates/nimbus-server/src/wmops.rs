//! Window management service endpoint.

use std::sync::Arc;

use nimbus_api::{
    DeviceId, Error, WindowId,
    event::{WindowEvent, WmEvent},
    ops::WndMgtApi,
    window::WindowInfo,
};

use crate::client::PendingFn;
use crate::display::DisplayShared;
use crate::wmclient::{WmClient, WmClientId};

/// Window management endpoint for one WM client.
pub struct WmEndpoint {
    shared: Arc<DisplayShared>,
    client: WmClientId,
}

impl WmEndpoint {
    /// Connect a new window management client.
    pub fn connect(shared: &Arc<DisplayShared>, pending: Option<PendingFn>) -> WmEndpoint {
        let mut display = shared.lock();
        let client = WmClientId(display.alloc_conn_id());
        display.wmclients.insert(client, WmClient::new(client, pending));

        WmEndpoint {
            shared: shared.clone(),
            client,
        }
    }
}

impl WndMgtApi for WmEndpoint {
    fn get_window_list(&mut self) -> Vec<WindowId> {
        self.shared.lock().z_order.clone()
    }

    fn get_window_info(&mut self, id: WindowId) -> Result<WindowInfo, Error> {
        let display = self.shared.lock();
        match display.windows.get(&id) {
            Some(wnd) => Ok(wnd.info()),
            None => Err(Error::NotFound),
        }
    }

    fn activate_window(&mut self, dev: DeviceId, id: WindowId) -> Result<(), Error> {
        let mut display = self.shared.lock();
        if !display.windows.contains_key(&id) {
            return Err(Error::NotFound);
        }
        let seat = display.seat_by_idev(dev).ok_or(Error::NotFound)?;
        display.seat_set_focus(seat, Some(id));
        Ok(())
    }

    fn close_window(&mut self, id: WindowId) -> Result<(), Error> {
        let mut display = self.shared.lock();
        let client = match display.windows.get(&id) {
            Some(wnd) => wnd.client,
            None => return Err(Error::NotFound),
        };
        display.client_post_event(client, id, WindowEvent::Close);
        Ok(())
    }

    fn get_event(&mut self) -> Option<WmEvent> {
        let mut display = self.shared.lock();
        let client = self.client;
        display.wmclients.get_mut(&client).and_then(|c| c.get_event())
    }
}

impl Drop for WmEndpoint {
    fn drop(&mut self) {
        self.shared.lock().wmclients.remove(&self.client);
    }
}
