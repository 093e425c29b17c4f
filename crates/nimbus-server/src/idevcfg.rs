//! Input device configuration entries.
//!
//! An entry binds one input device service ID to a seat. Entries are
//! owned by the display and enumerated per seat; destroying a seat
//! cascades to its entries.

use nimbus_api::{DeviceId, Error, SeatId};

use crate::display::Display;

/// Binding of an input device to a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IdevCfg {
    /// Device service ID.
    pub svc_id: DeviceId,
    /// Seat the device is assigned to.
    pub seat: SeatId,
}

impl Display {
    /// Create an input device configuration entry.
    pub fn idevcfg_create(&mut self, svc_id: DeviceId, seat: SeatId) -> Result<(), Error> {
        if self.seat(seat).is_none() {
            return Err(Error::NotFound);
        }
        self.idevcfgs.push(IdevCfg { svc_id, seat });
        Ok(())
    }

    /// Destroy the configuration entry of a device.
    pub fn idevcfg_destroy(&mut self, svc_id: DeviceId) -> Result<(), Error> {
        match self.idevcfgs.iter().position(|c| c.svc_id == svc_id) {
            Some(at) => {
                self.idevcfgs.remove(at);
                Ok(())
            }
            None => Err(Error::NotFound),
        }
    }

    /// Devices assigned to a seat, in assignment order.
    pub fn seat_idevcfgs(&self, seat: SeatId) -> Vec<DeviceId> {
        self.idevcfgs
            .iter()
            .filter(|c| c.seat == seat)
            .map(|c| c.svc_id)
            .collect()
    }
}
