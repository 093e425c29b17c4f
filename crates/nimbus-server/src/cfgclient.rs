//! Display server CFG client.
//!
//! A configuration endpoint observes seat creation and removal through
//! its event queue.

use std::collections::VecDeque;

use nimbus_api::event::CfgEvent;

use crate::client::PendingFn;

/// Configuration endpoint connection ID, server-local.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CfgClientId(pub u32);

/// Display server CFG client.
pub(crate) struct CfgClient {
    pub id: CfgClientId,
    events: VecDeque<CfgEvent>,
    pending: Option<PendingFn>,
}

impl CfgClient {
    pub fn new(id: CfgClientId, pending: Option<PendingFn>) -> CfgClient {
        CfgClient {
            id,
            events: VecDeque::new(),
            pending,
        }
    }

    /// Queue an event and notify the transport.
    pub fn post_event(&mut self, event: CfgEvent) {
        tracing::debug!("cfgclient {:?}: post {:?}", self.id, event);
        self.events.push_back(event);
        if let Some(pending) = &self.pending {
            pending();
        }
    }

    /// Pop the next queued event.
    pub fn get_event(&mut self) -> Option<CfgEvent> {
        self.events.pop_front()
    }
}
