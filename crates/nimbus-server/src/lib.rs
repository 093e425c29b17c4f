//! Nimbus compositing display server.
//!
//! The server owns one composited screen: windows in stacking order,
//! seats with their focus and pointer, outbound event queues for drawing,
//! window-management and configuration endpoints, and a software render
//! path that fans frames out to every attached output.
//!
//! Everything in the model is serialized behind one display lock, see
//! [`DisplayShared`]. The input event pump is the only internal thread;
//! endpoint calls run on their transport's task.

#![warn(unused_extern_crates)]
#![warn(missing_docs)]

mod cfgclient;
mod cfgops;
mod client;
mod clonegc;
mod config;
mod cursimg;
mod cursor;
mod display;
mod idevcfg;
mod ievent;
mod memgc;
mod ops;
mod seat;
mod window;
mod wmclient;
mod wmops;

pub use cfgops::CfgEndpoint;
pub use client::PendingFn;
pub use clonegc::CloneGc;
pub use config::IdevRegistry;
pub use display::{Display, DisplayFlags, DisplayShared};
pub use ievent::IeventPump;
pub use memgc::MemGc;
pub use ops::DisplayEndpoint;
pub use wmops::WmEndpoint;

#[cfg(any(test, feature = "test_util"))]
pub mod testgc;
