//! Input event queue.
//!
//! Normalized input events are queued on the display and drained by one
//! pump thread that routes them under the display lock. High-frequency
//! pointer streams are coalesced at enqueue time: consecutive relative
//! moves from the same device merge their deltas, consecutive absolute
//! moves keep only the latest position, ordering relative to button
//! events is preserved.

use std::sync::Arc;
use std::thread::JoinHandle;

use nimbus_api::event::{KbdEvent, PtdAction, PtdEvent};

use crate::display::DisplayShared;

/// A queued input event.
pub(crate) enum InputEvent {
    /// Keyboard event.
    Kbd(KbdEvent),
    /// Pointing device event.
    Ptd(PtdEvent),
}

impl DisplayShared {
    /// Queue a keyboard event for the pump.
    pub fn ievent_post_kbd(&self, event: KbdEvent) {
        let mut display = self.lock();
        display.ievents.push_back(InputEvent::Kbd(event));
        self.ievent_cv.notify_one();
    }

    /// Queue a pointing device event for the pump, coalescing with the
    /// queue tail where possible.
    pub fn ievent_post_ptd(&self, event: PtdEvent) {
        let mut display = self.lock();

        if let Some(InputEvent::Ptd(prev)) = display.ievents.back_mut() {
            if prev.device == event.device {
                match (&mut prev.action, event.action) {
                    (PtdAction::Move(pd), PtdAction::Move(nd)) => {
                        *pd += nd;
                        return;
                    }
                    (
                        PtdAction::AbsMove { pos, bounds },
                        PtdAction::AbsMove {
                            pos: npos,
                            bounds: nbounds,
                        },
                    ) => {
                        *pos = npos;
                        *bounds = nbounds;
                        return;
                    }
                    _ => {}
                }
            }
        }

        display.ievents.push_back(InputEvent::Ptd(event));
        self.ievent_cv.notify_one();
    }
}

/// The input event pump thread.
///
/// Dropping the pump shuts it down: the quit flag is raised, the pump
/// acknowledges, remaining events are discarded and the thread joined.
pub struct IeventPump {
    display: Arc<DisplayShared>,
    thread: Option<JoinHandle<()>>,
}

impl IeventPump {
    /// Start processing input events of `display`.
    pub fn start(display: Arc<DisplayShared>) -> IeventPump {
        let d = display.clone();
        let thread = std::thread::Builder::new()
            .name("nimbus-ievent".into())
            .spawn(move || Self::run(&d))
            .expect("failed to spawn input event pump");

        IeventPump {
            display,
            thread: Some(thread),
        }
    }

    fn run(shared: &DisplayShared) {
        let mut display = shared.lock();

        loop {
            while display.ievents.is_empty() && !display.ievent_quit {
                shared.ievent_cv.wait(&mut display);
            }
            if display.ievent_quit {
                break;
            }

            let event = display.ievents.pop_front().unwrap();
            let rc = match &event {
                InputEvent::Kbd(kbd) => display.post_kbd_event(kbd),
                InputEvent::Ptd(ptd) => display.post_ptd_event(ptd),
            };
            if let Err(e) = rc {
                tracing::warn!("input event dispatch failed: {e}");
            }
        }

        display.ievent_done = true;
        shared.ievent_cv.notify_all();
    }

    /// Stop the pump and join its thread.
    pub fn fini(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };

        {
            let mut display = self.display.lock();
            display.ievent_quit = true;
            self.display.ievent_cv.notify_all();

            while !display.ievent_done {
                self.display.ievent_cv.wait(&mut display);
            }
            display.ievents.clear();
        }

        let _ = thread.join();
    }
}

impl Drop for IeventPump {
    fn drop(&mut self) {
        self.shutdown();
    }
}
