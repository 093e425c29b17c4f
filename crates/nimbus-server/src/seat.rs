//! Display server seat.
//!
//! A seat is one virtual user: a focus target, an optional popup, a
//! pointer and the cursor shown at it. The effective cursor is the
//! window-management override when set, the client-selected cursor
//! otherwise.

use nimbus_api::{
    Error, SeatId, WindowId,
    event::{KbdEvent, KeyCode, KeyState, PosAction, PosEvent, PtdAction, PtdEvent, WindowEvent},
    unit::{PxBox, PxPoint, clip_point, envelope, project},
    window::{StockCursor, WindowFlags},
};

use crate::display::Display;

/// Display server seat.
pub(crate) struct Seat {
    pub id: SeatId,
    /// Name, unique within the display.
    pub name: String,
    /// Focused window.
    pub focus: Option<WindowId>,
    /// Popup window capturing the pointer target.
    pub popup: Option<WindowId>,
    /// Pointer position, display coordinates.
    pub pntpos: PxPoint,
    /// Cursor selected by the hovered window's client.
    pub client_cursor: StockCursor,
    /// Window management cursor override (resize drags).
    pub wm_cursor: Option<StockCursor>,
}

impl Seat {
    /// The cursor currently shown at the pointer.
    pub fn effective_cursor(&self) -> StockCursor {
        self.wm_cursor.unwrap_or(self.client_cursor)
    }
}

impl Display {
    /// Create a seat.
    ///
    /// The name must be unique; the new seat focuses the topmost window
    /// when one exists. Configuration clients are notified.
    pub fn seat_create(&mut self, name: &str) -> Result<SeatId, Error> {
        self.seat_create_with_id(name, None)
    }

    pub(crate) fn seat_create_with_id(&mut self, name: &str, id: Option<SeatId>) -> Result<SeatId, Error> {
        if self.seats.iter().any(|s| s.name == name) {
            return Err(Error::Exists);
        }

        let id = match id {
            Some(id) => {
                self.bump_seat_id(id);
                id
            }
            None => self.alloc_seat_id(),
        };
        tracing::debug!("seat_create: id={id} name={name:?}");

        self.seats.push(Seat {
            id,
            name: name.to_string(),
            focus: None,
            popup: None,
            pntpos: PxPoint::zero(),
            client_cursor: StockCursor::Arrow,
            wm_cursor: None,
        });

        if let Some(wnd) = self.z_order.first().copied() {
            self.seat_set_focus(id, Some(wnd));
        }

        self.post_cfg_event(nimbus_api::event::CfgEvent::SeatAdded(id));
        Ok(id)
    }

    /// Destroy a seat.
    ///
    /// Device assignments pointing at the seat are cascade-deleted and
    /// its focused window receives an unfocus event.
    pub fn seat_destroy(&mut self, id: SeatId) -> Result<(), Error> {
        if self.seat(id).is_none() {
            return Err(Error::NotFound);
        }
        tracing::debug!("seat_destroy: id={id}");

        self.idevcfgs.retain(|c| c.seat != id);

        if let Some(focus) = self.seat(id).unwrap().focus {
            self.window_post_unfocus_event(focus);
        }

        self.seats.retain(|s| s.id != id);
        self.post_cfg_event(nimbus_api::event::CfgEvent::SeatRemoved(id));
        Ok(())
    }

    /// Set the seat focus.
    ///
    /// The new target is unminimized and brought to top; focus and
    /// unfocus events are queued on the affected clients and the popup
    /// is dismissed, focus changes always close it.
    pub(crate) fn seat_set_focus(&mut self, seat: SeatId, wnd: Option<WindowId>) {
        let Some(s) = self.seat(seat) else {
            return;
        };
        let prev = s.focus;
        if prev == wnd {
            return;
        }

        if let Some(w) = wnd {
            if self.window_unminimize(w).is_err() {
                return;
            }
        }

        if let Some(p) = prev {
            self.window_post_unfocus_event(p);
        }

        self.seat_mut(seat).unwrap().focus = wnd;

        if let Some(w) = wnd {
            self.window_post_focus_event(w);
            self.window_bring_to_top(w);
        }

        self.seat_set_popup(seat, None);
    }

    /// Set the seat popup window.
    ///
    /// A replaced popup is asked to close.
    pub(crate) fn seat_set_popup(&mut self, seat: SeatId, wnd: Option<WindowId>) {
        let Some(s) = self.seat(seat) else {
            return;
        };
        let prev = s.popup;
        if prev == wnd {
            return;
        }

        if let Some(p) = prev {
            if let Some(client) = self.windows.get(&p).map(|w| w.client) {
                self.client_post_event(client, p, WindowEvent::Close);
            }
        }
        self.seat_mut(seat).unwrap().popup = wnd;
    }

    /// Drop any focus or popup reference to `wnd` without seeking a
    /// replacement focus. Used when the window is going away.
    pub(crate) fn seat_evac_wnd_refs(&mut self, seat: SeatId, wnd: WindowId) {
        let Some(s) = self.seat(seat) else {
            return;
        };
        if s.focus == Some(wnd) {
            self.seat_set_focus(seat, None);
        }
        if self.seat(seat).unwrap().popup == Some(wnd) {
            self.seat_set_popup(seat, None);
        }
    }

    /// Move focus away from `wnd` to an alternate window.
    ///
    /// Prefers a window that is neither minimized nor a system window,
    /// falls back to any non-minimized window, accepts none.
    pub(crate) fn seat_unfocus_wnd(&mut self, seat: SeatId, wnd: WindowId) {
        let Some(s) = self.seat(seat) else {
            return;
        };
        if s.focus != Some(wnd) {
            return;
        }

        let nwnd = self
            .window_find_prev(wnd, !(WindowFlags::MINIMIZED | WindowFlags::SYSTEM))
            .or_else(|| self.window_find_prev(wnd, !WindowFlags::MINIMIZED));

        self.seat_set_focus(seat, nwnd);
    }

    /// Cycle focus to the next window (Alt-Tab).
    ///
    /// System windows are skipped; with no current focus the topmost
    /// window is taken.
    pub(crate) fn seat_switch_focus(&mut self, seat: SeatId) {
        let Some(s) = self.seat(seat) else {
            return;
        };
        let nwnd = match s.focus {
            Some(f) => self.window_find_next(f, !WindowFlags::SYSTEM),
            None => self.z_order.first().copied(),
        };

        if nwnd.is_some() {
            self.seat_set_focus(seat, nwnd);
        }
    }

    /// Route a keyboard event through the seat.
    ///
    /// Alt-Tab and Shift-Tab switch focus and are absorbed; everything
    /// else goes to the popup if there is one, else to the focused
    /// window, else nowhere.
    pub(crate) fn seat_post_kbd_event(&mut self, seat: SeatId, event: &KbdEvent) -> Result<(), Error> {
        if event.state == KeyState::Pressed && event.mods.alt_or_shift() && event.key == KeyCode::Tab {
            self.seat_switch_focus(seat);
            return Ok(());
        }

        let Some(s) = self.seat(seat) else {
            return Ok(());
        };
        match s.popup.or(s.focus) {
            Some(wnd) => self.window_post_kbd_event(wnd, event),
            None => Ok(()),
        }
    }

    /// Route a pointing device event through the seat.
    ///
    /// Button 1 presses focus the window under the pointer; moves update
    /// the pointer position and repaint its envelope; button events are
    /// turned into position events at the current pointer position.
    pub(crate) fn seat_post_ptd_event(&mut self, seat: SeatId, event: &PtdEvent) -> Result<(), Error> {
        let Some(s) = self.seat(seat) else {
            return Ok(());
        };
        let pntpos = s.pntpos;
        let disp_rect = self.rect;
        let wnd = self.window_by_pos(pntpos);

        if event.action == PtdAction::Press(1) {
            if let Some(w) = wnd {
                let flags = self.windows[&w].flags;
                if !flags.intersects(WindowFlags::POPUP | WindowFlags::NOFOCUS) {
                    self.seat_set_focus(seat, Some(w));
                }
            }
        }

        match event.action {
            PtdAction::Press(btn) | PtdAction::Release(btn) | PtdAction::DClick(btn) => {
                let action = match event.action {
                    PtdAction::Press(_) => PosAction::Press(btn),
                    PtdAction::Release(_) => PosAction::Release(btn),
                    _ => PosAction::DClick(btn),
                };
                let pevent = PosEvent {
                    device: event.device,
                    action,
                    pos: pntpos,
                };
                self.seat_post_pos_event(seat, &pevent)?;
            }
            PtdAction::Move(dmove) => {
                let npos = clip_point(pntpos + dmove, disp_rect);
                self.seat_move_pointer(seat, npos, event)?;
            }
            PtdAction::AbsMove { pos, bounds } => {
                // Project the device area onto the display area.
                let npos = clip_point(project(pos, bounds, disp_rect), disp_rect);
                self.seat_move_pointer(seat, npos, event)?;
            }
        }
        Ok(())
    }

    /// Update the pointer position, deliver the position event and
    /// repaint the pointer envelope.
    fn seat_move_pointer(&mut self, seat: SeatId, npos: PxPoint, event: &PtdEvent) -> Result<(), Error> {
        let old_rect = self.seat_pointer_rect(seat);
        self.seat_mut(seat).unwrap().pntpos = npos;

        let pevent = PosEvent {
            device: event.device,
            action: PosAction::Update,
            pos: npos,
        };
        self.seat_post_pos_event(seat, &pevent)?;

        self.seat_repaint_pointer(seat, old_rect)
    }

    /// Deliver a position event to the relevant windows.
    ///
    /// Non-press events go to the popup-or-focus window first when it is
    /// not the window under the pointer; the window under the pointer
    /// always receives the event and selects the client cursor. A press
    /// outside the popup dismisses it.
    pub(crate) fn seat_post_pos_event(&mut self, seat: SeatId, event: &PosEvent) -> Result<(), Error> {
        let Some(s) = self.seat(seat) else {
            return Ok(());
        };
        let popup = s.popup;
        let pntpos = s.pntpos;
        let pwindow = self.window_by_pos(pntpos);
        let cwindow = popup.or(s.focus);

        let is_press = matches!(event.action, PosAction::Press(_));

        if !is_press {
            if let Some(cw) = cwindow {
                if Some(cw) != pwindow {
                    self.window_post_pos_event(cw, event)?;
                }
            }
        }

        match pwindow {
            Some(pw) => {
                let cursor = self.windows[&pw].cursor;
                self.seat_set_client_cursor(seat, cursor);
                self.window_post_pos_event(pw, event)?;
            }
            None => {
                self.seat_set_client_cursor(seat, StockCursor::Arrow);
            }
        }

        if is_press && pwindow != popup {
            self.seat_set_popup(seat, None);
        }
        Ok(())
    }

    /// Set the client-selected cursor, repainting the pointer when the
    /// effective cursor changes.
    pub(crate) fn seat_set_client_cursor(&mut self, seat: SeatId, cursor: StockCursor) {
        let Some(s) = self.seat(seat) else {
            return;
        };
        let changed = s.wm_cursor.unwrap_or(cursor) != s.effective_cursor();

        if changed {
            let old_rect = self.seat_pointer_rect(seat);
            self.seat_mut(seat).unwrap().client_cursor = cursor;
            let _ = self.seat_repaint_pointer(seat, old_rect);
        } else {
            self.seat_mut(seat).unwrap().client_cursor = cursor;
        }
    }

    /// Set or clear the window-management cursor override, repainting
    /// the pointer when the effective cursor changes.
    pub(crate) fn seat_set_wm_cursor(&mut self, seat: SeatId, cursor: Option<StockCursor>) {
        let Some(s) = self.seat(seat) else {
            return;
        };
        let changed = cursor.unwrap_or(s.client_cursor) != s.effective_cursor();

        if changed {
            let old_rect = self.seat_pointer_rect(seat);
            self.seat_mut(seat).unwrap().wm_cursor = cursor;
            let _ = self.seat_repaint_pointer(seat, old_rect);
        } else {
            self.seat_mut(seat).unwrap().wm_cursor = cursor;
        }
    }

    /// Rectangle covered by the seat pointer.
    pub(crate) fn seat_pointer_rect(&self, seat: SeatId) -> PxBox {
        let Some(s) = self.seat(seat) else {
            return PxBox::zero();
        };
        self.cursors[s.effective_cursor().code() as usize].rect_at(s.pntpos)
    }

    /// Repaint the pointer that was previously at `old_rect`.
    fn seat_repaint_pointer(&self, seat: SeatId, old_rect: PxBox) -> Result<(), Error> {
        let new_rect = self.seat_pointer_rect(seat);
        let env = envelope(old_rect, new_rect);
        if env.is_empty() {
            return Ok(());
        }
        self.paint(Some(env))
    }

    /// Paint the seat pointer, clipped to `clip`.
    pub(crate) fn seat_paint_pointer(&self, seat: SeatId, clip: Option<PxBox>) -> Result<(), Error> {
        let Some(s) = self.seat(seat) else {
            return Ok(());
        };
        let Some(gc) = self.gc() else {
            return Ok(());
        };
        self.cursors[s.effective_cursor().code() as usize].paint(gc, s.pntpos, clip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Client, ClientId};
    use crate::display::{Display, DisplayFlags, DisplayShared};
    use crate::testgc::{TestGc, TestGcOp};
    use crate::window::DragState;
    use nimbus_api::{
        DeviceId, WindowId,
        event::{KeyMods, PtdEvent, WindowEvent},
        gfx::Color,
        unit::{PxVector, px_box},
        window::WindowParams,
    };
    use std::sync::Arc;

    const BG: Color = Color::rgb(0x80, 0xc8, 0xff);

    fn setup() -> (Arc<DisplayShared>, TestGc, ClientId) {
        let shared = DisplayShared::new(None, DisplayFlags::empty());
        let out = TestGc::new();
        let mut d = shared.lock();
        d.add_output(px_box(0, 0, 500, 500), out.handle()).unwrap();
        d.seat_create("Alice").unwrap();
        let client = ClientId(d.alloc_conn_id());
        d.clients.insert(client, Client::new(client, None));
        drop(d);
        (shared, out, client)
    }

    fn wnd_at(d: &mut Display, client: ClientId, x: i32, y: i32, w: i32, h: i32, flags: WindowFlags) -> WindowId {
        let mut params = WindowParams::new(px_box(0, 0, w, h));
        params.flags = flags | WindowFlags::SETPOS;
        params.pos = PxPoint::new(x, y);
        d.window_create(client, &params).unwrap()
    }

    fn drain(d: &mut Display, client: ClientId) -> Vec<(WindowId, WindowEvent)> {
        let mut events = vec![];
        while let Some(e) = d.clients.get_mut(&client).unwrap().get_event() {
            events.push(e);
        }
        events
    }

    fn mv(dev: u32, dx: i32, dy: i32) -> PtdEvent {
        PtdEvent {
            device: DeviceId::from_raw(dev),
            action: PtdAction::Move(PxVector::new(dx, dy)),
        }
    }

    fn btn(dev: u32, action: PtdAction) -> PtdEvent {
        PtdEvent {
            device: DeviceId::from_raw(dev),
            action,
        }
    }

    fn kbd_press(dev: u32, key: KeyCode, mods: KeyMods) -> KbdEvent {
        KbdEvent {
            device: DeviceId::from_raw(dev),
            state: KeyState::Pressed,
            key,
            mods,
        }
    }

    /// Seats whose focus points at the window.
    fn focus_count(d: &Display, wnd: WindowId) -> u32 {
        d.seats.iter().filter(|s| s.focus == Some(wnd)).count() as u32
    }

    fn assert_focus_invariants(d: &Display) {
        for wnd in d.windows.values() {
            assert_eq!(wnd.nfocus, focus_count(d, wnd.id), "focus counter of {}", wnd.id);
        }
        for seat in &d.seats {
            if let Some(f) = seat.focus {
                let wnd = d.windows.get(&f).expect("focus must resolve");
                assert!(!wnd.flags.contains(WindowFlags::MINIMIZED), "focus on minimized window");
                assert!(d.z_order.contains(&f));
            }
        }
    }

    #[test]
    fn focus_follows_click() {
        let (shared, _out, client) = setup();
        let mut d = shared.lock();
        let seat = d.default_seat().unwrap();

        let w0 = wnd_at(&mut d, client, 10, 10, 1, 1, WindowFlags::empty());
        let w1 = wnd_at(&mut d, client, 400, 400, 1, 1, WindowFlags::empty());
        d.seat_set_focus(seat, Some(w0));
        d.post_ptd_event(&mv(1, 10, 10)).unwrap();
        drain(&mut d, client);

        d.post_ptd_event(&mv(1, 390, 390)).unwrap();
        d.post_ptd_event(&btn(1, PtdAction::Press(1))).unwrap();
        d.post_ptd_event(&mv(1, -390, -390)).unwrap();
        d.post_ptd_event(&btn(1, PtdAction::Press(1))).unwrap();

        assert_eq!(d.seat(seat).unwrap().focus, Some(w0));
        assert_focus_invariants(&d);

        let interesting: Vec<_> = drain(&mut d, client)
            .into_iter()
            .filter(|(_, e)| {
                matches!(
                    e,
                    WindowEvent::Focus { .. }
                        | WindowEvent::Unfocus { .. }
                        | WindowEvent::Pos(PosEvent {
                            action: PosAction::Press(_),
                            ..
                        })
                )
            })
            .collect();
        assert_eq!(
            interesting,
            [
                (w0, WindowEvent::Unfocus { nfocus: 0 }),
                (w1, WindowEvent::Focus { nfocus: 1 }),
                (
                    w1,
                    WindowEvent::Pos(PosEvent {
                        device: DeviceId::from_raw(1),
                        action: PosAction::Press(1),
                        pos: PxPoint::new(0, 0),
                    })
                ),
                (w1, WindowEvent::Unfocus { nfocus: 0 }),
                (w0, WindowEvent::Focus { nfocus: 1 }),
                (
                    w0,
                    WindowEvent::Pos(PosEvent {
                        device: DeviceId::from_raw(1),
                        action: PosAction::Press(1),
                        pos: PxPoint::new(0, 0),
                    })
                ),
            ]
        );
    }

    #[test]
    fn alt_tab_cycles_focus() {
        let (shared, _out, client) = setup();
        let mut d = shared.lock();
        let seat = d.default_seat().unwrap();

        let w0 = wnd_at(&mut d, client, 0, 0, 10, 10, WindowFlags::empty());
        let w1 = wnd_at(&mut d, client, 20, 0, 10, 10, WindowFlags::empty());
        d.seat_set_focus(seat, Some(w0));
        drain(&mut d, client);

        d.post_kbd_event(&kbd_press(1, KeyCode::Tab, KeyMods::ALT)).unwrap();
        assert_eq!(d.seat(seat).unwrap().focus, Some(w1));

        let focus_events: Vec<_> = drain(&mut d, client)
            .into_iter()
            .filter(|(_, e)| matches!(e, WindowEvent::Focus { .. } | WindowEvent::Unfocus { .. }))
            .collect();
        assert_eq!(
            focus_events,
            [(w0, WindowEvent::Unfocus { nfocus: 0 }), (w1, WindowEvent::Focus { nfocus: 1 })]
        );

        // No keyboard event reaches the client, the chord is absorbed.
        d.post_kbd_event(&kbd_press(1, KeyCode::Tab, KeyMods::SHIFT)).unwrap();
        assert_eq!(d.seat(seat).unwrap().focus, Some(w0));
        assert!(
            drain(&mut d, client)
                .iter()
                .all(|(_, e)| !matches!(e, WindowEvent::Kbd(_)))
        );
        assert_focus_invariants(&d);
    }

    #[test]
    fn drag_owned_by_originating_seat() {
        let (shared, _out, client) = setup();
        let mut d = shared.lock();
        let s0 = d.default_seat().unwrap();
        let s1 = d.seat_create("Bob").unwrap();
        let d0 = DeviceId::from_raw(10);
        let d1 = DeviceId::from_raw(11);
        d.idevcfg_create(d0, s0).unwrap();
        d.idevcfg_create(d1, s1).unwrap();

        let w = wnd_at(&mut d, client, 0, 0, 200, 200, WindowFlags::empty());

        // Both pointers inside the window; D0 starts the move.
        d.post_ptd_event(&mv(10, 50, 50)).unwrap();
        d.post_ptd_event(&mv(11, 20, 20)).unwrap();
        d.post_ptd_event(&btn(10, PtdAction::Press(2))).unwrap();
        assert!(matches!(d.windows[&w].state, DragState::Moving { .. }));
        let preview = d.windows[&w].preview_rect();

        // Motion from the other seat must not move the preview.
        d.post_ptd_event(&mv(11, 30, 30)).unwrap();
        assert_eq!(d.windows[&w].preview_rect(), preview);

        // Motion from the originating seat moves it.
        d.post_ptd_event(&mv(10, 30, 30)).unwrap();
        assert_eq!(d.windows[&w].preview_rect(), preview.translate(PxVector::new(30, 30)));

        // Release from the other seat does not finish the drag.
        d.post_ptd_event(&btn(11, PtdAction::Release(2))).unwrap();
        assert!(matches!(d.windows[&w].state, DragState::Moving { .. }));
        assert_eq!(d.windows[&w].dpos, PxPoint::new(0, 0));

        // Release from the originating seat commits the new position.
        d.post_ptd_event(&btn(10, PtdAction::Release(2))).unwrap();
        assert!(matches!(d.windows[&w].state, DragState::Idle));
        assert_eq!(d.windows[&w].dpos, PxPoint::new(30, 30));
    }

    #[test]
    fn effective_cursor_changes_repaint_once() {
        let (shared, out, client) = setup();
        let mut d = shared.lock();
        let seat = d.default_seat().unwrap();
        let _w = wnd_at(&mut d, client, 0, 0, 10, 10, WindowFlags::empty());

        let paints = |out: &TestGc| {
            out.ops()
                .iter()
                .filter(|op| matches!(op, TestGcOp::SetColor(c) if *c == BG))
                .count()
        };

        // Override changes the effective cursor: one repaint.
        out.clear_ops();
        d.seat_set_wm_cursor(seat, Some(StockCursor::SizeLr));
        assert_eq!(paints(&out), 1);
        assert_eq!(d.seat(seat).unwrap().effective_cursor(), StockCursor::SizeLr);

        // Client cursor hidden behind the override: no repaint.
        out.clear_ops();
        d.seat_set_client_cursor(seat, StockCursor::IBeam);
        assert_eq!(paints(&out), 0);

        // Clearing the override reveals the client cursor: one repaint.
        out.clear_ops();
        d.seat_set_wm_cursor(seat, None);
        assert_eq!(paints(&out), 1);
        assert_eq!(d.seat(seat).unwrap().effective_cursor(), StockCursor::IBeam);
    }

    #[test]
    fn popup_dismissed_on_focus_change_and_outside_press() {
        let (shared, _out, client) = setup();
        let mut d = shared.lock();
        let seat = d.default_seat().unwrap();

        let w = wnd_at(&mut d, client, 0, 0, 100, 100, WindowFlags::empty());
        let popup = wnd_at(&mut d, client, 200, 200, 50, 50, WindowFlags::POPUP);
        assert_eq!(d.seat(seat).unwrap().popup, Some(popup));
        drain(&mut d, client);

        // Press outside the popup: dismissed with a close request.
        d.post_ptd_event(&mv(1, 50, 50)).unwrap();
        d.post_ptd_event(&btn(1, PtdAction::Press(1))).unwrap();
        assert_eq!(d.seat(seat).unwrap().popup, None);
        assert!(drain(&mut d, client).contains(&(popup, WindowEvent::Close)));
        let _ = w;
    }

    #[test]
    fn minimize_moves_focus_to_alternate() {
        let (shared, _out, client) = setup();
        let mut d = shared.lock();
        let seat = d.default_seat().unwrap();

        let w0 = wnd_at(&mut d, client, 0, 0, 10, 10, WindowFlags::empty());
        let w1 = wnd_at(&mut d, client, 20, 0, 10, 10, WindowFlags::empty());
        assert_eq!(d.seat(seat).unwrap().focus, Some(w1));

        d.window_minimize(w1).unwrap();
        assert_eq!(d.seat(seat).unwrap().focus, Some(w0));
        assert_focus_invariants(&d);

        // Focusing a minimized window unminimizes it first.
        d.seat_set_focus(seat, Some(w1));
        assert!(!d.windows[&w1].flags.contains(WindowFlags::MINIMIZED));
        assert_focus_invariants(&d);

        d.window_minimize(w1).unwrap();
        d.window_minimize(w0).unwrap();
        assert_eq!(d.seat(seat).unwrap().focus, None);
        assert_focus_invariants(&d);
    }

    #[test]
    fn abs_move_projects_device_bounds_onto_display() {
        let (shared, _out, _client) = setup();
        let mut d = shared.lock();
        let seat = d.default_seat().unwrap();

        let bounds = px_box(0, 0, 100, 100);
        d.post_ptd_event(&PtdEvent {
            device: DeviceId::from_raw(1),
            action: PtdAction::AbsMove {
                pos: PxPoint::new(99, 0),
                bounds,
            },
        })
        .unwrap();
        assert_eq!(d.seat(seat).unwrap().pntpos, PxPoint::new(499, 0));

        // Out-of-bounds device coordinates clip to the display.
        d.post_ptd_event(&PtdEvent {
            device: DeviceId::from_raw(1),
            action: PtdAction::AbsMove {
                pos: PxPoint::new(300, 300),
                bounds,
            },
        })
        .unwrap();
        assert_eq!(d.seat(seat).unwrap().pntpos, PxPoint::new(499, 499));
    }

    #[test]
    fn kbd_routes_to_popup_before_focus() {
        let (shared, _out, client) = setup();
        let mut d = shared.lock();

        let w = wnd_at(&mut d, client, 0, 0, 100, 100, WindowFlags::empty());
        let popup = wnd_at(&mut d, client, 200, 200, 50, 50, WindowFlags::POPUP);
        drain(&mut d, client);

        d.post_kbd_event(&kbd_press(1, KeyCode::Char('a'), KeyMods::empty())).unwrap();
        let kbd_targets: Vec<_> = drain(&mut d, client)
            .into_iter()
            .filter(|(_, e)| matches!(e, WindowEvent::Kbd(_)))
            .map(|(w, _)| w)
            .collect();
        assert_eq!(kbd_targets, [popup]);

        // Popup gone: the focused window receives input again.
        d.window_destroy(popup).unwrap();
        drain(&mut d, client);
        d.post_kbd_event(&kbd_press(1, KeyCode::Char('a'), KeyMods::empty())).unwrap();
        let kbd_targets: Vec<_> = drain(&mut d, client)
            .into_iter()
            .filter(|(_, e)| matches!(e, WindowEvent::Kbd(_)))
            .map(|(w, _)| w)
            .collect();
        assert_eq!(kbd_targets, [w]);
    }

    #[test]
    fn focus_counter_invariant_over_operation_sequences() {
        let (shared, _out, client) = setup();
        let mut d = shared.lock();
        let s0 = d.default_seat().unwrap();
        let s1 = d.seat_create("Bob").unwrap();

        let w0 = wnd_at(&mut d, client, 0, 0, 10, 10, WindowFlags::empty());
        let w1 = wnd_at(&mut d, client, 20, 0, 10, 10, WindowFlags::empty());
        let w2 = wnd_at(&mut d, client, 40, 0, 10, 10, WindowFlags::empty());
        assert_focus_invariants(&d);

        // Both seats on the same window.
        d.seat_set_focus(s0, Some(w2));
        d.seat_set_focus(s1, Some(w2));
        assert_eq!(d.windows[&w2].nfocus, 2);
        assert_focus_invariants(&d);

        d.seat_set_focus(s0, Some(w0));
        assert_focus_invariants(&d);
        d.window_minimize(w0).unwrap();
        assert_focus_invariants(&d);
        d.window_unminimize(w0).unwrap();
        assert_focus_invariants(&d);
        d.window_destroy(w2).unwrap();
        assert_focus_invariants(&d);
        d.seat_destroy(s1).unwrap();
        assert_focus_invariants(&d);
        d.window_destroy(w0).unwrap();
        d.window_destroy(w1).unwrap();
        assert_focus_invariants(&d);
        assert!(d.seats.iter().all(|s| s.focus.is_none()));
    }
}
