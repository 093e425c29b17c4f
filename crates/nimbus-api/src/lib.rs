//! The Nimbus display server API.
//!
//! Nimbus isolates everything that crosses a protocol boundary into this
//! crate: pixel geometry, input and outbound event types, window
//! parameters, the graphics-context contract implemented by pixel sinks,
//! and the three service surfaces (*display*, *window management* and
//! *configuration*) as traits the server implements.

#![warn(unused_extern_crates)]
#![warn(missing_docs)]

pub mod event;
pub mod gfx;
pub mod ops;
pub mod unit;
pub mod window;

mod error;
pub use error::*;

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! declare_id {
    ($(
        $(#[$docs:meta])+
        pub struct $Id:ident(_);
    )+) => {$(
        $(#[$docs])+
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $Id(u32);

        impl $Id {
            /// Dummy ID, zero.
            pub const INVALID: Self = Self(0);

            /// Create the first valid ID.
            pub const fn first() -> Self {
                Self(1)
            }

            /// Create the next ID.
            ///
            /// IDs are only unique for one display instance.
            #[must_use]
            pub const fn next(self) -> Self {
                Self(self.0.wrapping_add(1))
            }

            /// The raw ID.
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Create an ID using a custom value.
            ///
            /// Note that only the display server must generate IDs.
            pub const fn from_raw(id: u32) -> Self {
                Self(id)
            }
        }

        impl fmt::Debug for $Id {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                if f.alternate() {
                    f.debug_tuple(stringify!($Id)).field(&self.0).finish()
                } else {
                    write!(f, "{}({})", stringify!($Id), self.0)
                }
            }
        }

        impl fmt::Display for $Id {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    )+};
}

declare_id! {
    /// Window ID in channel.
    ///
    /// In the server events this is the ID of the window the event targets,
    /// in the client requests it selects the window operated on. IDs are
    /// display-wide and monotonic, assigned by the server.
    pub struct WindowId(_);

    /// Seat ID.
    ///
    /// Identifies one virtual user: a focus target, a pointer and a set of
    /// assigned input devices.
    pub struct SeatId(_);

    /// Input device ID.
    ///
    /// Assigned by the input service, opaque to the display server.
    pub struct DeviceId(_);
}
