//! Display configuration persistence.
//!
//! Seats and input device assignments survive restarts. The on-disk
//! tree mirrors the protocol model: `display { seats { seat(id, name)* }
//! idevcfgs { idevcfg(svc-name, seat-id)* } }`, serialized as JSON.
//! Device bindings are stored by service name and resolved back through
//! the input device registry on load; entries whose device is not
//! connected are silently dropped.

use std::path::Path;

use nimbus_api::{DeviceId, Error, SeatId};
use serde::{Deserialize, Serialize};

use crate::display::Display;

/// Input device name registry.
///
/// The raw input service owns the name space; the display server only
/// needs the two lookups used by configuration persistence.
pub trait IdevRegistry: Send + Sync {
    /// Resolve a device service name to the connected device.
    fn device_by_name(&self, name: &str) -> Option<DeviceId>;

    /// Service name of a connected device.
    fn device_name(&self, dev: DeviceId) -> Option<String>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CfgRoot {
    display: CfgDisplay,
}

#[derive(Debug, Serialize, Deserialize)]
struct CfgDisplay {
    seats: Vec<CfgSeat>,
    idevcfgs: Vec<CfgIdevCfg>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CfgSeat {
    id: u32,
    name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CfgIdevCfg {
    #[serde(rename = "svc-name")]
    svc_name: String,
    #[serde(rename = "seat-id")]
    seat_id: u32,
}

impl Display {
    /// Load seats and device assignments from the configuration file.
    ///
    /// On parse or lookup errors every seat loaded so far is destroyed
    /// again and the error is returned; a missing device only drops its
    /// entry.
    pub fn load_cfg(&mut self, path: &Path) -> Result<(), Error> {
        let text = std::fs::read_to_string(path)?;
        let root: CfgRoot = serde_json::from_str(&text).map_err(|_| Error::Invalid)?;

        let mut loaded = vec![];
        let rc = self.load_cfg_inner(&root, &mut loaded);
        if rc.is_err() {
            for seat in loaded {
                let _ = self.seat_destroy(seat);
            }
        }
        rc
    }

    fn load_cfg_inner(&mut self, root: &CfgRoot, loaded: &mut Vec<SeatId>) -> Result<(), Error> {
        for seat in &root.display.seats {
            if seat.id == 0 {
                return Err(Error::Invalid);
            }
            let id = self.seat_create_with_id(&seat.name, Some(SeatId::from_raw(seat.id)))?;
            loaded.push(id);
        }

        for entry in &root.display.idevcfgs {
            let dev = self.registry.as_ref().and_then(|r| r.device_by_name(&entry.svc_name));
            let Some(dev) = dev else {
                // Device not currently connected, skip the entry.
                tracing::debug!("load_cfg: device {:?} not connected, dropping entry", entry.svc_name);
                continue;
            };

            let seat = self
                .find_seat(SeatId::from_raw(entry.seat_id))
                .ok_or(Error::Invalid)?;
            self.idevcfg_create(dev, seat)?;
        }
        Ok(())
    }

    /// Save seats and device assignments to the configuration file.
    ///
    /// The write is atomic, the previous file stays intact on failure.
    pub fn save_cfg(&self, path: &Path) -> Result<(), Error> {
        let mut seats = vec![];
        for seat in &self.seats {
            seats.push(CfgSeat {
                id: seat.id.get(),
                name: seat.name.clone(),
            });
        }

        let mut idevcfgs = vec![];
        for entry in &self.idevcfgs {
            let name = self
                .registry
                .as_ref()
                .and_then(|r| r.device_name(entry.svc_id))
                .ok_or(Error::NotFound)?;
            idevcfgs.push(CfgIdevCfg {
                svc_name: name,
                seat_id: entry.seat.get(),
            });
        }

        let root = CfgRoot {
            display: CfgDisplay { seats, idevcfgs },
        };
        let text = serde_json::to_string_pretty(&root).map_err(|e| Error::Io(e.to_string()))?;

        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, text)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Best-effort save to the configured path, failures are logged.
    pub(crate) fn save_cfg_default(&self) {
        let Some(path) = self.cfg_path.clone() else {
            return;
        };
        if let Err(e) = self.save_cfg(&path) {
            tracing::warn!("failed to save display configuration: {e}");
        }
    }
}
