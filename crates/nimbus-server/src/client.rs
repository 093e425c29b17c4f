//! Display server client.
//!
//! One drawing endpoint: owns its windows and a FIFO of outbound window
//! events. The pending callback pokes the transport whenever the queue
//! may have become non-empty; delivery is best-effort, the model never
//! rolls a mutation back because an event could not be signaled.

use std::collections::VecDeque;
use std::fmt;

use nimbus_api::{WindowId, event::WindowEvent};

/// Callback notifying a transport that events are pending.
pub type PendingFn = Box<dyn Fn() + Send + Sync>;

/// Drawing endpoint connection ID, server-local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ClientId(pub u32);

/// Display server client.
pub(crate) struct Client {
    pub id: ClientId,
    /// Owned windows in creation order.
    pub windows: Vec<WindowId>,
    events: VecDeque<(WindowId, WindowEvent)>,
    pending: Option<PendingFn>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("id", &self.id)
            .field("windows", &self.windows)
            .field("events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(id: ClientId, pending: Option<PendingFn>) -> Client {
        Client {
            id,
            windows: vec![],
            events: VecDeque::new(),
            pending,
        }
    }

    /// Queue an event targeted at `wnd` and notify the transport.
    pub fn post_event(&mut self, wnd: WindowId, event: WindowEvent) {
        tracing::debug!("client {:?}: post {:?} for {}", self.id, event, wnd);
        self.events.push_back((wnd, event));
        if let Some(pending) = &self.pending {
            pending();
        }
    }

    /// Pop the next queued event.
    pub fn get_event(&mut self) -> Option<(WindowId, WindowEvent)> {
        self.events.pop_front()
    }

    /// Remove all queued events targeting `wnd`.
    ///
    /// Called when the window is destroyed so the queue never hands out
    /// an event for a window that no longer resolves.
    pub fn purge_window_events(&mut self, wnd: WindowId) {
        self.events.retain(|(w, _)| *w != wnd);
    }
}
