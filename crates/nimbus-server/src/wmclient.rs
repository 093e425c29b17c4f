//! Display server WM client.
//!
//! A window management endpoint owns no windows, it observes every
//! window's lifecycle and focus transitions through its event queue.

use std::collections::VecDeque;

use nimbus_api::event::WmEvent;

use crate::client::PendingFn;

/// WM endpoint connection ID, server-local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct WmClientId(pub u32);

/// Display server WM client.
pub(crate) struct WmClient {
    pub id: WmClientId,
    events: VecDeque<WmEvent>,
    pending: Option<PendingFn>,
}

impl WmClient {
    pub fn new(id: WmClientId, pending: Option<PendingFn>) -> WmClient {
        WmClient {
            id,
            events: VecDeque::new(),
            pending,
        }
    }

    /// Queue an event and notify the transport.
    pub fn post_event(&mut self, event: WmEvent) {
        tracing::debug!("wmclient {:?}: post {:?}", self.id, event);
        self.events.push_back(event);
        if let Some(pending) = &self.pending {
            pending();
        }
    }

    /// Pop the next queued event.
    pub fn get_event(&mut self) -> Option<WmEvent> {
        self.events.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_api::WindowId;

    #[test]
    fn events_are_fifo() {
        let mut wm = WmClient::new(WmClientId(1), None);
        let w = WindowId::from_raw(3);
        wm.post_event(WmEvent::WindowAdded(w));
        wm.post_event(WmEvent::WindowChanged(w));

        assert_eq!(wm.get_event(), Some(WmEvent::WindowAdded(w)));
        assert_eq!(wm.get_event(), Some(WmEvent::WindowChanged(w)));
        assert_eq!(wm.get_event(), None);
    }
}
