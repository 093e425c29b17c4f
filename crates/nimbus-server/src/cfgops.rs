//! Configuration service endpoint.
//!
//! Seat and input device administration. Mutations repaint where they
//! change pixels and persist the configuration best-effort.

use std::sync::Arc;

use nimbus_api::{
    DeviceId, Error, SeatId,
    event::CfgEvent,
    ops::DispCfgApi,
    window::SeatInfo,
};

use crate::cfgclient::{CfgClient, CfgClientId};
use crate::client::PendingFn;
use crate::display::DisplayShared;

/// Configuration endpoint for one configuration client.
pub struct CfgEndpoint {
    shared: Arc<DisplayShared>,
    client: CfgClientId,
}

impl CfgEndpoint {
    /// Connect a new configuration client.
    pub fn connect(shared: &Arc<DisplayShared>, pending: Option<PendingFn>) -> CfgEndpoint {
        let mut display = shared.lock();
        let client = CfgClientId(display.alloc_conn_id());
        display.cfgclients.insert(client, CfgClient::new(client, pending));

        CfgEndpoint {
            shared: shared.clone(),
            client,
        }
    }
}

impl DispCfgApi for CfgEndpoint {
    fn get_seat_list(&mut self) -> Vec<SeatId> {
        self.shared.lock().seats.iter().map(|s| s.id).collect()
    }

    fn get_seat_info(&mut self, id: SeatId) -> Result<SeatInfo, Error> {
        let display = self.shared.lock();
        match display.seat(id) {
            Some(seat) => Ok(SeatInfo {
                name: seat.name.clone(),
            }),
            None => Err(Error::NotFound),
        }
    }

    fn seat_create(&mut self, name: &str) -> Result<SeatId, Error> {
        let mut display = self.shared.lock();
        let id = display.seat_create(name)?;
        let _ = display.paint(None);
        display.save_cfg_default();
        Ok(id)
    }

    fn seat_delete(&mut self, id: SeatId) -> Result<(), Error> {
        let mut display = self.shared.lock();
        if display.seat(id).is_none() {
            return Err(Error::NotFound);
        }
        // The last seat cannot be deleted.
        if display.seats.len() == 1 {
            return Err(Error::Busy);
        }

        display.seat_destroy(id)?;
        let _ = display.paint(None);
        display.save_cfg_default();
        Ok(())
    }

    fn dev_assign(&mut self, dev: DeviceId, seat: SeatId) -> Result<(), Error> {
        let mut display = self.shared.lock();
        display.find_seat(seat).ok_or(Error::NotFound)?;
        display.idevcfg_create(dev, seat)?;
        display.save_cfg_default();
        Ok(())
    }

    fn dev_unassign(&mut self, dev: DeviceId) -> Result<(), Error> {
        let mut display = self.shared.lock();
        display.idevcfg_destroy(dev)?;
        display.save_cfg_default();
        Ok(())
    }

    fn get_asgn_dev_list(&mut self, seat: SeatId) -> Result<Vec<DeviceId>, Error> {
        let display = self.shared.lock();
        display.find_seat(seat).ok_or(Error::NotFound)?;
        Ok(display.seat_idevcfgs(seat))
    }

    fn get_event(&mut self) -> Option<CfgEvent> {
        let mut display = self.shared.lock();
        let client = self.client;
        display.cfgclients.get_mut(&client).and_then(|c| c.get_event())
    }
}

impl Drop for CfgEndpoint {
    fn drop(&mut self) {
        self.shared.lock().cfgclients.remove(&self.client);
    }
}
