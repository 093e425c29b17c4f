//! Display server window.
//!
//! A window owns an off-screen surface and the memory context clients
//! draw into through the GC tunnel, plus the state machine for
//! interactive move and resize. Operations that touch more than the
//! window itself (stacking, seats, repaints) live on [`Display`].

use std::sync::Arc;

use nimbus_api::{
    DeviceId, Error, WindowId,
    event::{KbdEvent, KeyCode, KeyState, PosAction, PosEvent, WindowEvent},
    gfx::{BitmapParams, Color, GcBitmap, pixmap_alloc},
    unit::{PxBox, PxPoint, PxSize, PxVector, clip, envelope, overlaps, px_box},
    window::{ResizeDirection, StockCursor, WindowFlags, WindowInfo, WindowParams},
};

use crate::display::Display;
use crate::memgc::MemGc;

/// Interactive drag state.
pub(crate) enum DragState {
    /// Not being moved or resized.
    Idle,
    /// Moving by pointer drag.
    Moving {
        /// Pointer position when the drag started, display coordinates.
        orig_pos: PxPoint,
        /// Device that started the drag.
        orig_pos_id: DeviceId,
        /// Previewed display position.
        preview_pos: PxPoint,
    },
    /// Resizing by pointer drag.
    Resizing {
        /// Pointer position when the drag started, display coordinates.
        orig_pos: PxPoint,
        /// Device that started the drag.
        orig_pos_id: DeviceId,
        /// Edge or corner being dragged.
        direction: ResizeDirection,
        /// Previewed window rectangle, window-local.
        preview_rect: PxBox,
    },
}

/// Display server window.
pub(crate) struct Window {
    pub id: WindowId,
    /// Owning client.
    pub client: crate::client::ClientId,
    /// Bounding rectangle, window-local coordinates.
    pub rect: PxBox,
    /// Display position of the rectangle origin.
    pub dpos: PxPoint,
    /// Minimum size enforced by interactive resize.
    pub min_size: PxSize,
    pub flags: WindowFlags,
    pub caption: String,
    /// Cursor shown while the pointer hovers this window.
    pub cursor: StockCursor,
    /// Number of seats focusing this window.
    pub nfocus: u32,
    /// Window rectangle before maximization.
    pub normal_rect: PxBox,
    /// Display position before maximization.
    pub normal_dpos: PxPoint,
    /// Surface bitmap on the compositing context, `None` when the
    /// display has no render target.
    pub bitmap: Option<Box<dyn GcBitmap>>,
    /// Memory context over the surface, shared with the GC tunnel.
    pub mgc: Arc<MemGc>,
    pub state: DragState,
}

impl Window {
    /// If the window participates in painting and hit testing.
    pub fn is_visible(&self) -> bool {
        !self.flags.contains(WindowFlags::MINIMIZED)
    }

    /// Bounding rectangle in display coordinates.
    pub fn display_rect(&self) -> PxBox {
        self.rect.translate(self.dpos.to_vector())
    }

    /// The preview rectangle of an in-progress drag, empty when idle.
    pub fn preview_rect(&self) -> PxBox {
        match &self.state {
            DragState::Idle => PxBox::zero(),
            DragState::Moving { preview_pos, .. } => self.rect.translate(preview_pos.to_vector()),
            DragState::Resizing { preview_rect, .. } => preview_rect.translate(self.dpos.to_vector()),
        }
    }

    /// Device that started the in-progress drag.
    pub fn orig_pos_id(&self) -> Option<DeviceId> {
        match &self.state {
            DragState::Idle => None,
            DragState::Moving { orig_pos_id, .. } | DragState::Resizing { orig_pos_id, .. } => Some(*orig_pos_id),
        }
    }

    /// Information for window management clients.
    pub fn info(&self) -> WindowInfo {
        WindowInfo {
            caption: self.caption.clone(),
            flags: self.flags,
            nfocus: self.nfocus,
        }
    }
}

impl Display {
    /// Create a window owned by `client`.
    ///
    /// The surface and its context are allocated first so a failure
    /// leaves no partial insertions behind. The owning seat is derived
    /// from the creating device (or the default seat): popups become the
    /// seat popup, everything else is focused unless flagged no-focus.
    pub(crate) fn window_create(&mut self, client: crate::client::ClientId, params: &WindowParams) -> Result<WindowId, Error> {
        if !self.clients.contains_key(&client) {
            return Err(Error::NotFound);
        }
        let id = self.alloc_wnd_id();
        tracing::debug!("window_create: id={id} rect={:?} flags={:?}", params.rect, params.flags);

        let alloc = pixmap_alloc(params.rect.size());
        let bitmap = match self.gc() {
            Some(gc) => Some(gc.bitmap_create(BitmapParams::new(params.rect), Some(alloc.clone()))?),
            None => None,
        };

        // Drawing through the tunnel repaints the modified display area;
        // the callback runs on the tunnel task, without the display lock.
        let shared = self.shared.clone();
        let mgc = MemGc::new(
            params.rect,
            alloc,
            Box::new(move |rect| {
                let Some(shared) = shared.upgrade() else {
                    return;
                };
                let display = shared.lock();
                if let Some(wnd) = display.windows.get(&id) {
                    let drect = rect.translate(wnd.dpos.to_vector());
                    if let Err(e) = display.paint(Some(drect)) {
                        tracing::warn!("window {id}: repaint after invalidate failed: {e}");
                    }
                }
            }),
        );

        let dpos = if params.flags.contains(WindowFlags::SETPOS) {
            params.pos
        } else {
            // Automatic placement, tiles new windows over four anchors.
            let n = id.get() - 1;
            PxPoint::new(((n & 1) * 400) as i32, ((n & 2) / 2 * 300) as i32)
        };

        self.windows.insert(
            id,
            Window {
                id,
                client,
                rect: params.rect,
                dpos,
                min_size: params.min_size,
                flags: params.flags,
                caption: params.caption.clone(),
                cursor: StockCursor::Arrow,
                nfocus: 0,
                normal_rect: PxBox::zero(),
                normal_dpos: PxPoint::zero(),
                bitmap,
                mgc,
                state: DragState::Idle,
            },
        );
        self.clients.get_mut(&client).unwrap().windows.push(id);
        self.add_window(id);

        let seat = if params.idev_id != DeviceId::INVALID {
            self.seat_by_idev(params.idev_id)
        } else {
            self.default_seat()
        };
        if let Some(seat) = seat {
            if params.flags.contains(WindowFlags::POPUP) {
                self.seat_set_popup(seat, Some(id));
            } else if !params.flags.contains(WindowFlags::NOFOCUS) {
                self.seat_set_focus(seat, Some(id));
            }
        }

        if params.flags.contains(WindowFlags::AVOID) {
            self.update_max_rect();
        }

        let _ = self.paint(None);
        Ok(id)
    }

    /// Destroy a window.
    ///
    /// Focus moves on, seat references and queued events targeting the
    /// window are evacuated before it is dropped.
    pub(crate) fn window_destroy(&mut self, id: WindowId) -> Result<(), Error> {
        if !self.windows.contains_key(&id) {
            return Err(Error::NotFound);
        }
        tracing::debug!("window_destroy: id={id}");

        self.window_unfocus(id);

        // A drag dies with its window; release the resize cursor the
        // originating seat is showing.
        if let DragState::Resizing { orig_pos_id, .. } = self.windows[&id].state {
            if let Some(seat) = self.seat_by_idev(orig_pos_id) {
                self.seat_set_wm_cursor(seat, None);
            }
        }

        let seat_ids: Vec<_> = self.seats.iter().map(|s| s.id).collect();
        for seat in seat_ids {
            self.seat_evac_wnd_refs(seat, id);
        }

        let client = self.windows[&id].client;
        if let Some(client) = self.clients.get_mut(&client) {
            client.purge_window_events(id);
            client.windows.retain(|w| *w != id);
        }

        let avoid = self.windows[&id].flags.contains(WindowFlags::AVOID);
        self.remove_window(id);
        self.windows.remove(&id);
        if avoid {
            self.update_max_rect();
        }

        let _ = self.paint(None);
        Ok(())
    }

    /// Paint a window surface, clipped to `rect` when given.
    pub(crate) fn window_paint(&self, id: WindowId, rect: Option<PxBox>) -> Result<(), Error> {
        let Some(wnd) = self.windows.get(&id) else {
            return Ok(());
        };
        if !wnd.is_visible() {
            return Ok(());
        }

        let brect = match rect {
            Some(r) => {
                let srect = r.translate(-wnd.dpos.to_vector());
                let crect = clip(srect, wnd.rect);
                if crect.is_empty() {
                    return Ok(());
                }
                Some(crect)
            }
            None => None,
        };

        match &wnd.bitmap {
            Some(bitmap) => bitmap.render(brect, Some(wnd.dpos.to_vector())),
            None => Ok(()),
        }
    }

    /// Paint the drag preview outline of a window, a no-op when idle.
    pub(crate) fn window_paint_preview(&self, id: WindowId, rect: Option<PxBox>) -> Result<(), Error> {
        let Some(wnd) = self.windows.get(&id) else {
            return Ok(());
        };
        let prect = wnd.preview_rect();
        if prect.is_empty() {
            return Ok(());
        }
        let Some(gc) = self.gc() else {
            return Ok(());
        };

        gc.set_color(Color::WHITE)?;

        let bars = [
            px_box(prect.min.x, prect.min.y, prect.max.x, prect.min.y + 1),
            px_box(prect.min.x, prect.max.y - 1, prect.max.x, prect.max.y),
            px_box(prect.min.x, prect.min.y, prect.min.x + 1, prect.max.y),
            px_box(prect.max.x - 1, prect.min.y, prect.max.x, prect.max.y),
        ];
        for bar in bars {
            let dr = match rect {
                Some(r) => clip(bar, r),
                None => bar,
            };
            if !dr.is_empty() {
                gc.fill_rect(dr)?;
            }
        }
        Ok(())
    }

    /// Repaint after the drag preview moved away from `old_rect`.
    fn window_repaint_preview(&self, id: WindowId, old_rect: PxBox) -> Result<(), Error> {
        let prect = self.windows.get(&id).map(|w| w.preview_rect()).unwrap_or_else(PxBox::zero);
        let oldr = !old_rect.is_empty();
        let newr = !prect.is_empty();

        if oldr && newr && overlaps(old_rect, prect) {
            self.paint(Some(envelope(old_rect, prect)))
        } else {
            if oldr {
                self.paint(Some(old_rect))?;
            }
            if newr {
                self.paint(Some(prect))?;
            }
            Ok(())
        }
    }

    fn window_start_move(&mut self, id: WindowId, pos: PxPoint, pos_id: DeviceId) {
        tracing::debug!("window_start_move: id={id} pos={pos:?}");
        let Some(wnd) = self.windows.get_mut(&id) else {
            return;
        };
        if !matches!(wnd.state, DragState::Idle) {
            return;
        }
        wnd.state = DragState::Moving {
            orig_pos: pos,
            orig_pos_id: pos_id,
            preview_pos: wnd.dpos,
        };
        let _ = self.window_repaint_preview(id, PxBox::zero());
    }

    fn window_update_move(&mut self, id: WindowId, pos: PxPoint) {
        let Some(wnd) = self.windows.get_mut(&id) else {
            return;
        };
        let DragState::Moving { orig_pos, preview_pos, .. } = &mut wnd.state else {
            return;
        };
        let old_rect = wnd.rect.translate(preview_pos.to_vector());
        let nwpos = wnd.dpos + (pos - *orig_pos);
        *preview_pos = nwpos;
        let _ = self.window_repaint_preview(id, old_rect);
    }

    fn window_finish_move(&mut self, id: WindowId, pos: PxPoint) {
        tracing::debug!("window_finish_move: id={id} pos={pos:?}");
        let Some(wnd) = self.windows.get_mut(&id) else {
            return;
        };
        let DragState::Moving { orig_pos, .. } = wnd.state else {
            return;
        };
        wnd.dpos += pos - orig_pos;
        wnd.state = DragState::Idle;
        let _ = self.paint(None);
    }

    fn window_start_resize(&mut self, id: WindowId, direction: ResizeDirection, pos: PxPoint, pos_id: DeviceId) {
        tracing::debug!("window_start_resize: id={id} dir={direction:?} pos={pos:?}");
        let Some(seat) = self.seat_by_idev(pos_id) else {
            return;
        };
        let Some(wnd) = self.windows.get_mut(&id) else {
            return;
        };
        if !matches!(wnd.state, DragState::Idle) {
            return;
        }
        wnd.state = DragState::Resizing {
            orig_pos: pos,
            orig_pos_id: pos_id,
            direction,
            preview_rect: wnd.rect,
        };
        self.seat_set_wm_cursor(seat, Some(direction.cursor()));
        let _ = self.window_repaint_preview(id, PxBox::zero());
    }

    fn window_update_resize(&mut self, id: WindowId, pos: PxPoint) {
        let Some(wnd) = self.windows.get(&id) else {
            return;
        };
        let DragState::Resizing { orig_pos, .. } = wnd.state else {
            return;
        };
        let nrect = self.window_calc_resize(id, pos - orig_pos);
        let wnd = self.windows.get_mut(&id).unwrap();
        let old_rect = wnd.preview_rect();
        let DragState::Resizing { preview_rect, .. } = &mut wnd.state else {
            unreachable!()
        };
        *preview_rect = nrect;
        let _ = self.window_repaint_preview(id, old_rect);
    }

    fn window_finish_resize(&mut self, id: WindowId, pos: PxPoint) {
        tracing::debug!("window_finish_resize: id={id} pos={pos:?}");
        let Some(wnd) = self.windows.get(&id) else {
            return;
        };
        let DragState::Resizing { orig_pos, orig_pos_id, .. } = wnd.state else {
            return;
        };
        let nrect = self.window_calc_resize(id, pos - orig_pos);

        let wnd = self.windows.get_mut(&id).unwrap();
        wnd.state = DragState::Idle;
        let client = wnd.client;

        // The client owns the surface; it reacts to the resize event by
        // allocating a new one and calling window_resize.
        self.client_post_event(client, id, WindowEvent::Resize { rect: nrect });

        if let Some(seat) = self.seat_by_idev(orig_pos_id) {
            self.seat_set_wm_cursor(seat, None);
        }
        let _ = self.paint(None);
    }

    /// New window rectangle for a resize drag displaced by `delta`.
    ///
    /// Dragged edges move with the delta but never shrink the window
    /// below its minimum size; the opposite edges stay.
    pub(crate) fn window_calc_resize(&self, id: WindowId, delta: PxVector) -> PxBox {
        let Some(wnd) = self.windows.get(&id) else {
            return PxBox::zero();
        };
        let DragState::Resizing { direction, .. } = wnd.state else {
            return wnd.rect;
        };

        let mut nrect = wnd.rect;
        if direction.is_top() {
            nrect.min.y = (wnd.rect.min.y + delta.y).min(wnd.rect.max.y - wnd.min_size.height);
        }
        if direction.is_left() {
            nrect.min.x = (wnd.rect.min.x + delta.x).min(wnd.rect.max.x - wnd.min_size.width);
        }
        if direction.is_bottom() {
            nrect.max.y = (wnd.rect.max.y + delta.y).max(wnd.rect.min.y + wnd.min_size.height);
        }
        if direction.is_right() {
            nrect.max.x = (wnd.rect.max.x + delta.x).max(wnd.rect.min.x + wnd.min_size.width);
        }
        nrect
    }

    /// Post a keyboard event to a window.
    ///
    /// Alt-F4 and Shift-F4 turn into a close request, everything else is
    /// forwarded to the owning client.
    pub(crate) fn window_post_kbd_event(&mut self, id: WindowId, event: &KbdEvent) -> Result<(), Error> {
        let Some(wnd) = self.windows.get(&id) else {
            return Ok(());
        };
        let client = wnd.client;

        if event.state == KeyState::Pressed && event.mods.alt_or_shift() && event.key == KeyCode::F(4) {
            self.client_post_event(client, id, WindowEvent::Close);
            return Ok(());
        }
        self.client_post_event(client, id, WindowEvent::Kbd(*event));
        Ok(())
    }

    /// Post a position event to a window.
    ///
    /// Button 2 pressed inside a non-maximized window starts a move
    /// drag; update and release events continue or finish a drag when
    /// they come from the seat that started it. Everything else is
    /// forwarded to the client in window-local coordinates.
    pub(crate) fn window_post_pos_event(&mut self, id: WindowId, event: &PosEvent) -> Result<(), Error> {
        let Some(wnd) = self.windows.get(&id) else {
            return Ok(());
        };
        let pos = event.pos;
        let pos_id = event.device;
        let inside = wnd.display_rect().contains(pos);
        let moving = matches!(wnd.state, DragState::Moving { .. });
        let resizing = matches!(wnd.state, DragState::Resizing { .. });
        let maximized = wnd.flags.contains(WindowFlags::MAXIMIZED);
        let client = wnd.client;
        let dpos = wnd.dpos;

        if event.action == PosAction::Press(2) && inside && !maximized {
            self.window_start_move(id, pos, pos_id);
            return Ok(());
        }

        if matches!(event.action, PosAction::Release(_)) {
            // Only the seat that started the drag can finish it.
            if moving && self.window_orig_seat(id, pos_id) {
                self.window_finish_move(id, pos);
                return Ok(());
            }
            if resizing && self.window_orig_seat(id, pos_id) {
                self.window_finish_resize(id, pos);
                return Ok(());
            }
        }

        if event.action == PosAction::Update {
            if moving && self.window_orig_seat(id, pos_id) {
                self.window_update_move(id, pos);
                return Ok(());
            }
            if resizing && self.window_orig_seat(id, pos_id) {
                self.window_update_resize(id, pos);
                return Ok(());
            }
        }

        let tevent = event.translated(-dpos.to_vector());
        self.client_post_event(client, id, WindowEvent::Pos(tevent));
        Ok(())
    }

    /// Post a focus event, bumping the focus counter.
    pub(crate) fn window_post_focus_event(&mut self, id: WindowId) {
        let Some(wnd) = self.windows.get_mut(&id) else {
            return;
        };
        wnd.nfocus += 1;
        let nfocus = wnd.nfocus;
        let client = wnd.client;
        self.client_post_event(client, id, WindowEvent::Focus { nfocus });
        self.post_wm_event(nimbus_api::event::WmEvent::WindowChanged(id));
    }

    /// Post an unfocus event, dropping the focus counter.
    pub(crate) fn window_post_unfocus_event(&mut self, id: WindowId) {
        let Some(wnd) = self.windows.get_mut(&id) else {
            return;
        };
        wnd.nfocus = wnd.nfocus.saturating_sub(1);
        let nfocus = wnd.nfocus;
        let client = wnd.client;
        self.client_post_event(client, id, WindowEvent::Unfocus { nfocus });
        self.post_wm_event(nimbus_api::event::WmEvent::WindowChanged(id));
    }

    /// Client-requested interactive move, `pos` window-local.
    pub(crate) fn window_move_req(&mut self, id: WindowId, pos: PxPoint, pos_id: DeviceId) -> Result<(), Error> {
        let Some(wnd) = self.windows.get(&id) else {
            return Err(Error::NotFound);
        };
        let orig_pos = wnd.dpos + pos.to_vector();
        self.window_start_move(id, orig_pos, pos_id);
        Ok(())
    }

    /// Client-requested interactive resize, `pos` window-local.
    pub(crate) fn window_resize_req(
        &mut self,
        id: WindowId,
        direction: ResizeDirection,
        pos: PxPoint,
        pos_id: DeviceId,
    ) -> Result<(), Error> {
        let Some(wnd) = self.windows.get(&id) else {
            return Err(Error::NotFound);
        };
        let orig_pos = wnd.dpos + pos.to_vector();
        self.window_start_resize(id, direction, orig_pos, pos_id);
        Ok(())
    }

    /// Move the window to a display position.
    pub(crate) fn window_move(&mut self, id: WindowId, dpos: PxPoint) -> Result<(), Error> {
        let Some(wnd) = self.windows.get_mut(&id) else {
            return Err(Error::NotFound);
        };
        wnd.dpos = dpos;
        let _ = self.paint(None);
        Ok(())
    }

    /// Current display position.
    pub(crate) fn window_get_pos(&self, id: WindowId) -> Result<PxPoint, Error> {
        match self.windows.get(&id) {
            Some(wnd) => Ok(wnd.dpos),
            None => Err(Error::NotFound),
        }
    }

    /// Resize the window to `rect`, moving it by `offs` so the retained
    /// edge keeps its place on the screen.
    ///
    /// The surface is reallocated, previous contents are not preserved.
    pub(crate) fn window_resize(&mut self, id: WindowId, offs: PxVector, nrect: PxBox) -> Result<(), Error> {
        if !self.windows.contains_key(&id) {
            return Err(Error::NotFound);
        }

        let realloc = match self.gc() {
            Some(gc) => {
                let alloc = pixmap_alloc(nrect.size());
                let bitmap = gc.bitmap_create(BitmapParams::new(nrect), Some(alloc.clone()))?;
                Some((alloc, bitmap))
            }
            None => None,
        };

        let wnd = self.windows.get_mut(&id).unwrap();
        if let Some((alloc, bitmap)) = realloc {
            wnd.bitmap = Some(bitmap);
            wnd.mgc.retarget(nrect, alloc);
        }
        wnd.dpos += offs;
        wnd.rect = nrect;

        if wnd.flags.contains(WindowFlags::AVOID) {
            self.update_max_rect();
        }
        let _ = self.paint(None);
        Ok(())
    }

    /// Minimize the window, idempotent.
    pub(crate) fn window_minimize(&mut self, id: WindowId) -> Result<(), Error> {
        let Some(wnd) = self.windows.get(&id) else {
            return Err(Error::NotFound);
        };
        if wnd.flags.contains(WindowFlags::MINIMIZED) {
            return Ok(());
        }

        self.window_unfocus(id);
        self.windows.get_mut(&id).unwrap().flags.insert(WindowFlags::MINIMIZED);
        let _ = self.paint(None);
        Ok(())
    }

    /// Unminimize the window, idempotent.
    pub(crate) fn window_unminimize(&mut self, id: WindowId) -> Result<(), Error> {
        let Some(wnd) = self.windows.get_mut(&id) else {
            return Err(Error::NotFound);
        };
        if !wnd.flags.contains(WindowFlags::MINIMIZED) {
            return Ok(());
        }
        wnd.flags.remove(WindowFlags::MINIMIZED);
        let _ = self.paint(None);
        Ok(())
    }

    /// Maximize the window to the maximization rectangle, idempotent.
    ///
    /// Window contents keep their place on the screen; the previous
    /// geometry is stashed for unmaximize.
    pub(crate) fn window_maximize(&mut self, id: WindowId) -> Result<(), Error> {
        let Some(wnd) = self.windows.get(&id) else {
            return Err(Error::NotFound);
        };
        if wnd.flags.contains(WindowFlags::MAXIMIZED) {
            return Ok(());
        }

        let old_rect = wnd.rect;
        let old_dpos = wnd.dpos;
        let max_rect = self.max_rect;

        let offs = max_rect.min - wnd.dpos;
        // Maximized window coordinates start at the origin.
        let nrect = max_rect.translate(-max_rect.min.to_vector());

        self.window_resize(id, offs, nrect)?;

        let wnd = self.windows.get_mut(&id).unwrap();
        wnd.flags.insert(WindowFlags::MAXIMIZED);
        wnd.normal_rect = old_rect;
        wnd.normal_dpos = old_dpos;
        Ok(())
    }

    /// Restore the pre-maximize geometry, idempotent.
    pub(crate) fn window_unmaximize(&mut self, id: WindowId) -> Result<(), Error> {
        let Some(wnd) = self.windows.get(&id) else {
            return Err(Error::NotFound);
        };
        if !wnd.flags.contains(WindowFlags::MAXIMIZED) {
            return Ok(());
        }

        let offs = wnd.normal_dpos - wnd.dpos;
        let nrect = wnd.normal_rect;
        self.window_resize(id, offs, nrect)?;

        self.windows.get_mut(&id).unwrap().flags.remove(WindowFlags::MAXIMIZED);
        Ok(())
    }

    /// Select the cursor shown over the window.
    pub(crate) fn window_set_cursor(&mut self, id: WindowId, cursor: u32) -> Result<(), Error> {
        let cursor = StockCursor::try_from(cursor)?;
        match self.windows.get_mut(&id) {
            Some(wnd) => {
                wnd.cursor = cursor;
                Ok(())
            }
            None => Err(Error::NotFound),
        }
    }

    /// Set the window caption and notify window managers.
    pub(crate) fn window_set_caption(&mut self, id: WindowId, caption: &str) -> Result<(), Error> {
        let Some(wnd) = self.windows.get_mut(&id) else {
            return Err(Error::NotFound);
        };
        wnd.caption = caption.to_string();
        self.post_wm_event(nimbus_api::event::WmEvent::WindowChanged(id));
        Ok(())
    }

    /// Bring the window to the top of its stratum.
    pub(crate) fn window_bring_to_top(&mut self, id: WindowId) {
        self.window_to_top(id);
        let _ = self.paint(None);
    }

    /// Make sure no seat keeps the window focused, moving focus to an
    /// alternate window where possible.
    pub(crate) fn window_unfocus(&mut self, id: WindowId) {
        let seat_ids: Vec<_> = self.seats.iter().map(|s| s.id).collect();
        for seat in seat_ids {
            self.seat_unfocus_wnd(seat, id);
        }
    }

    /// Alternate window search towards the bottom of the stacking order,
    /// wrapping around; only windows whose flags are all in `allowed`
    /// qualify, the window itself never does.
    pub(crate) fn window_find_prev(&self, id: WindowId, allowed: WindowFlags) -> Option<WindowId> {
        let i = self.z_order.iter().position(|w| *w == id)?;
        let check = |w: WindowId| self.windows[&w].flags.difference(allowed).is_empty();

        self.z_order[i + 1..]
            .iter()
            .copied()
            .find(|&w| check(w))
            .or_else(|| self.z_order[..i].iter().copied().find(|&w| check(w)))
    }

    /// Alternate window search towards the top of the stacking order,
    /// wrapping around.
    pub(crate) fn window_find_next(&self, id: WindowId, allowed: WindowFlags) -> Option<WindowId> {
        let i = self.z_order.iter().position(|w| *w == id)?;
        let check = |w: WindowId| self.windows[&w].flags.difference(allowed).is_empty();

        self.z_order[..i]
            .iter()
            .rev()
            .copied()
            .find(|&w| check(w))
            .or_else(|| self.z_order[i + 1..].iter().rev().copied().find(|&w| check(w)))
    }

    /// If `dev` belongs to the same seat as the device that started the
    /// window's drag.
    ///
    /// When two seats focus the same window only devices of the seat
    /// that started the move or resize may affect it, pointers of other
    /// seats must not disrupt the drag.
    pub(crate) fn window_orig_seat(&self, id: WindowId, dev: DeviceId) -> bool {
        let Some(orig) = self.windows.get(&id).and_then(|w| w.orig_pos_id()) else {
            return false;
        };
        self.seat_by_idev(orig) == self.seat_by_idev(dev)
    }
}
