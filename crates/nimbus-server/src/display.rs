//! Display server display.
//!
//! [`Display`] is the root aggregate: every client, seat, window, output
//! and cursor hangs off it and every mutation happens while holding the
//! one lock in [`DisplayShared`]. Objects reference each other by ID;
//! destruction scans the sibling collections to evacuate back-references
//! before the object is dropped.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Weak};

use nimbus_api::{
    DeviceId, Error, SeatId, WindowId,
    event::{CfgEvent, KbdEvent, PtdEvent, WindowEvent, WmEvent},
    gfx::{BitmapParams, Color, Gc, GcBitmap, pixmap_alloc},
    unit::{PxBox, PxPoint, envelope},
    window::{DisplayInfo, StockCursor, WindowFlags},
};
use parking_lot::{Condvar, Mutex, MutexGuard};
use rustc_hash::FxHashMap;

use crate::cfgclient::{CfgClient, CfgClientId};
use crate::client::{Client, ClientId};
use crate::clonegc::CloneGc;
use crate::config::IdevRegistry;
use crate::cursor::Cursor;
use crate::idevcfg::IdevCfg;
use crate::ievent::InputEvent;
use crate::memgc::MemGc;
use crate::seat::Seat;
use crate::window::Window;
use crate::wmclient::{WmClient, WmClientId};

bitflags::bitflags! {
    /// Display behavior flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DisplayFlags: u32 {
        /// Compose frames into a back buffer and flush the dirty
        /// rectangle to the outputs at the end of each paint.
        const DOUBLE_BUF = 0x1;
    }
}

/// The display model and the lock serializing access to it.
///
/// Any task that wants to touch the display graph locks it for the
/// duration of the operation; rendering runs under the lock as well.
pub struct DisplayShared {
    state: Mutex<Display>,
    pub(crate) ievent_cv: Condvar,
}

impl DisplayShared {
    /// New display.
    ///
    /// If `gc` is given it is installed as the front compositing target;
    /// otherwise the target is built when the first output is attached.
    pub fn new(gc: Option<Box<dyn Gc>>, flags: DisplayFlags) -> Arc<DisplayShared> {
        Arc::new_cyclic(|weak| DisplayShared {
            state: Mutex::new(Display::new(weak.clone(), gc, flags)),
            ievent_cv: Condvar::new(),
        })
    }

    /// Lock the display.
    pub fn lock(&self) -> MutexGuard<'_, Display> {
        self.state.lock()
    }

    /// The shared surface context of a window, for the GC tunnel.
    ///
    /// The window is located by ID across all clients; the returned
    /// context is driven by the tunnel without holding the display lock.
    pub fn window_gc(&self, id: WindowId) -> Result<Arc<MemGc>, Error> {
        let state = self.lock();
        match state.windows.get(&id) {
            Some(wnd) => Ok(wnd.mgc.clone()),
            None => Err(Error::NotFound),
        }
    }
}

/// Display server display.
pub struct Display {
    pub(crate) shared: Weak<DisplayShared>,

    /// Bounding rectangle, origin-anchored union of the output rects.
    pub(crate) rect: PxBox,
    /// Maximization rectangle, the bounding rectangle minus panels.
    pub(crate) max_rect: PxBox,
    bg_color: Color,
    flags: DisplayFlags,

    next_wnd_id: WindowId,
    next_seat_id: SeatId,
    next_conn_id: u32,

    pub(crate) clients: FxHashMap<ClientId, Client>,
    pub(crate) wmclients: FxHashMap<WmClientId, WmClient>,
    pub(crate) cfgclients: FxHashMap<CfgClientId, CfgClient>,

    pub(crate) windows: FxHashMap<WindowId, Window>,
    /// Window IDs in strict top-to-bottom stacking order; topmost-flagged
    /// windows form a contiguous prefix.
    pub(crate) z_order: Vec<WindowId>,

    /// Seats in creation order, the first one is the default seat.
    pub(crate) seats: Vec<Seat>,
    pub(crate) idevcfgs: Vec<IdevCfg>,

    pub(crate) cursors: [Cursor; StockCursor::COUNT as usize],

    /// Front compositing target cloning to all outputs.
    fbgc: Option<CloneGc>,
    /// Back buffer bitmap on the front target, when double-buffering.
    backbuf: Option<Box<dyn GcBitmap>>,
    /// Back buffer memory context, when double-buffering.
    bbgc: Option<Arc<MemGc>>,
    /// Envelope of every back buffer pixel modified since the last flush.
    dirty: Arc<Mutex<PxBox>>,

    pub(crate) ievents: VecDeque<InputEvent>,
    pub(crate) ievent_quit: bool,
    pub(crate) ievent_done: bool,

    pub(crate) cfg_path: Option<PathBuf>,
    pub(crate) registry: Option<Arc<dyn IdevRegistry>>,
}

impl Display {
    fn new(shared: Weak<DisplayShared>, gc: Option<Box<dyn Gc>>, flags: DisplayFlags) -> Display {
        Display {
            shared,
            rect: PxBox::zero(),
            max_rect: PxBox::zero(),
            bg_color: Color::rgb(0x80, 0xc8, 0xff),
            flags,
            next_wnd_id: WindowId::first(),
            next_seat_id: SeatId::first(),
            next_conn_id: 1,
            clients: FxHashMap::default(),
            wmclients: FxHashMap::default(),
            cfgclients: FxHashMap::default(),
            windows: FxHashMap::default(),
            z_order: vec![],
            seats: vec![],
            idevcfgs: vec![],
            cursors: std::array::from_fn(|i| Cursor::stock(StockCursor::try_from(i as u32).unwrap())),
            fbgc: gc.map(CloneGc::new),
            backbuf: None,
            bbgc: None,
            dirty: Arc::new(Mutex::new(PxBox::zero())),
            ievents: VecDeque::new(),
            ievent_quit: false,
            ievent_done: false,
            cfg_path: None,
            registry: None,
        }
    }

    /// Display information.
    pub fn get_info(&self) -> DisplayInfo {
        DisplayInfo { rect: self.rect }
    }

    /// Display bounding rectangle.
    pub fn rect(&self) -> PxBox {
        self.rect
    }

    /// Current maximization rectangle.
    pub fn max_rect(&self) -> PxBox {
        self.max_rect
    }

    /// Set the configuration file path used by the configuration
    /// endpoints to persist seat changes.
    pub fn set_cfg_path(&mut self, path: PathBuf) {
        self.cfg_path = Some(path);
    }

    /// Set the input device registry used to resolve persisted device
    /// names.
    pub fn set_idev_registry(&mut self, registry: Arc<dyn IdevRegistry>) {
        self.registry = Some(registry);
    }

    pub(crate) fn alloc_conn_id(&mut self) -> u32 {
        let id = self.next_conn_id;
        self.next_conn_id += 1;
        id
    }

    pub(crate) fn alloc_wnd_id(&mut self) -> WindowId {
        let id = self.next_wnd_id;
        self.next_wnd_id = id.next();
        id
    }

    pub(crate) fn alloc_seat_id(&mut self) -> SeatId {
        let id = self.next_seat_id;
        self.next_seat_id = id.next();
        id
    }

    pub(crate) fn bump_seat_id(&mut self, used: SeatId) {
        if used.get() >= self.next_seat_id.get() {
            self.next_seat_id = used.next();
        }
    }

    // ------------------------------------------------------------------
    // Outputs and render targets

    /// Attach an output covering `rect` with the sink context `gc`.
    ///
    /// The first output defines the display rectangle and builds the
    /// cloning front target; later outputs mirror it. Fails atomically,
    /// on error the display state is unchanged.
    pub fn add_output(&mut self, rect: PxBox, gc: Box<dyn Gc>) -> Result<(), Error> {
        if self.rect.is_empty() {
            let old_rect = self.rect;
            self.rect = rect;

            let created_fbgc = self.fbgc.is_none();
            let rc = match &self.fbgc {
                None => {
                    self.fbgc = Some(CloneGc::new(gc));
                    Ok(())
                }
                Some(fbgc) => fbgc.add_output(gc),
            };
            let rc = rc.and_then(|()| self.alloc_backbuf());
            if let Err(e) = rc {
                if created_fbgc {
                    self.fbgc = None;
                }
                self.rect = old_rect;
                return Err(e);
            }
        } else {
            let Some(fbgc) = &self.fbgc else {
                return Err(Error::Invalid);
            };
            fbgc.add_output(gc)?;
        }

        self.update_max_rect();
        Ok(())
    }

    /// Allocate the back buffer, a no-op when not double-buffering or
    /// when it exists already.
    fn alloc_backbuf(&mut self) -> Result<(), Error> {
        if !self.flags.contains(DisplayFlags::DOUBLE_BUF) || self.backbuf.is_some() {
            return Ok(());
        }
        let Some(ugc) = &self.fbgc else {
            return Ok(());
        };

        // Caller-allocated so every output aliases the composed pixels.
        let alloc = pixmap_alloc(self.rect.size());
        let backbuf = ugc.bitmap_create(BitmapParams::new(self.rect), Some(alloc.clone()))?;

        let dirty = self.dirty.clone();
        let bbgc = MemGc::new(
            self.rect,
            alloc,
            Box::new(move |rect| {
                let mut d = dirty.lock();
                *d = envelope(*d, rect);
            }),
        );

        self.backbuf = Some(backbuf);
        self.bbgc = Some(bbgc);
        *self.dirty.lock() = PxBox::zero();
        Ok(())
    }

    /// The context all compositing paints into: the back buffer when
    /// double-buffering, the cloning front target otherwise. `None` when
    /// the display has no target yet.
    pub(crate) fn gc(&self) -> Option<&dyn Gc> {
        if self.flags.contains(DisplayFlags::DOUBLE_BUF) {
            if let Some(bbgc) = &self.bbgc {
                return Some(&**bbgc);
            }
        }
        self.unbuf_gc()
    }

    /// The unbuffered (front) context.
    fn unbuf_gc(&self) -> Option<&dyn Gc> {
        self.fbgc.as_ref().map(|gc| gc as &dyn Gc)
    }

    // ------------------------------------------------------------------
    // Painting

    /// Paint the display background.
    fn paint_bg(&self, rect: Option<PxBox>) -> Result<(), Error> {
        let crect = match rect {
            Some(r) => nimbus_api::unit::clip(r, self.rect),
            None => self.rect,
        };
        let Some(gc) = self.gc() else {
            return Ok(());
        };
        gc.set_color(self.bg_color)?;
        gc.fill_rect(crect)
    }

    /// Flush the back buffer dirty envelope to the outputs.
    fn update_front(&self, rect: Option<PxBox>) -> Result<(), Error> {
        let Some(backbuf) = &self.backbuf else {
            return Ok(());
        };

        let mut dirty = self.dirty.lock();
        let mut srect = *dirty;
        if let Some(r) = rect {
            srect = envelope(srect, nimbus_api::unit::clip(r, self.rect));
        }
        *dirty = PxBox::zero();
        drop(dirty);

        if srect.is_empty() {
            return Ok(());
        }
        backbuf.render(Some(srect), None)
    }

    /// Paint the display, or the clip of `rect` against it.
    ///
    /// Bottom-to-top: background, window surfaces, move/resize previews,
    /// then every seat's pointer; double-buffered displays end with the
    /// dirty-rectangle flush to the front.
    pub fn paint(&self, rect: Option<PxBox>) -> Result<(), Error> {
        self.paint_bg(rect)?;

        for i in (0..self.z_order.len()).rev() {
            self.window_paint(self.z_order[i], rect)?;
        }
        for i in (0..self.z_order.len()).rev() {
            self.window_paint_preview(self.z_order[i], rect)?;
        }
        for i in 0..self.seats.len() {
            self.seat_paint_pointer(self.seats[i].id, rect)?;
        }

        self.update_front(rect)
    }

    // ------------------------------------------------------------------
    // Window collection

    /// Insert the window into the stacking order.
    ///
    /// Topmost windows are enlisted before any other window, non-topmost
    /// windows before any other non-topmost window.
    fn enlist_window(&mut self, id: WindowId) {
        let topmost = self.windows[&id].flags.contains(WindowFlags::TOPMOST);
        let at = if topmost {
            0
        } else {
            self.z_order
                .iter()
                .position(|w| !self.windows[w].flags.contains(WindowFlags::TOPMOST))
                .unwrap_or(self.z_order.len())
        };
        self.z_order.insert(at, id);
    }

    /// Add a window to the display and notify window managers.
    pub(crate) fn add_window(&mut self, id: WindowId) {
        self.enlist_window(id);
        self.post_wm_event(WmEvent::WindowAdded(id));
    }

    /// Remove a window from the display and notify window managers.
    pub(crate) fn remove_window(&mut self, id: WindowId) {
        self.z_order.retain(|w| *w != id);
        self.post_wm_event(WmEvent::WindowRemoved(id));
    }

    /// Move a window to the top of its stratum.
    pub(crate) fn window_to_top(&mut self, id: WindowId) {
        self.z_order.retain(|w| *w != id);
        self.enlist_window(id);
    }

    /// Topmost visible window containing the position.
    pub fn window_by_pos(&self, pos: PxPoint) -> Option<WindowId> {
        self.z_order
            .iter()
            .copied()
            .find(|id| {
                let wnd = &self.windows[id];
                wnd.is_visible() && wnd.display_rect().contains(pos)
            })
    }

    // ------------------------------------------------------------------
    // Seats

    /// The seat lookup by ID.
    pub(crate) fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.id == id)
    }

    pub(crate) fn seat_mut(&mut self, id: SeatId) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.id == id)
    }

    /// The default seat, the first one created.
    pub fn default_seat(&self) -> Option<SeatId> {
        self.seats.first().map(|s| s.id)
    }

    /// Find a seat by ID.
    pub fn find_seat(&self, id: SeatId) -> Option<SeatId> {
        self.seat(id).map(|s| s.id)
    }

    /// The seat owning the input device, the default seat when the
    /// device has no binding.
    pub fn seat_by_idev(&self, dev: DeviceId) -> Option<SeatId> {
        self.idevcfgs
            .iter()
            .find(|c| c.svc_id == dev)
            .map(|c| c.seat)
            .or_else(|| self.default_seat())
    }

    // ------------------------------------------------------------------
    // Input routing

    /// Route a keyboard event to the seat owning its source device.
    ///
    /// Events from devices with no seat to route to are dropped.
    pub fn post_kbd_event(&mut self, event: &KbdEvent) -> Result<(), Error> {
        match self.seat_by_idev(event.device) {
            Some(seat) => self.seat_post_kbd_event(seat, event),
            None => Ok(()),
        }
    }

    /// Route a pointing device event to the seat owning its source
    /// device.
    pub fn post_ptd_event(&mut self, event: &PtdEvent) -> Result<(), Error> {
        match self.seat_by_idev(event.device) {
            Some(seat) => self.seat_post_ptd_event(seat, event),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Maximization rectangle

    /// Recalculate the maximization rectangle from the display rectangle
    /// and every avoid-flagged window.
    pub fn update_max_rect(&mut self) {
        let mut max_rect = self.rect;
        for id in &self.z_order {
            let wnd = &self.windows[id];
            if wnd.flags.contains(WindowFlags::AVOID) {
                max_rect = crop_max_rect(wnd.display_rect(), max_rect);
            }
        }
        self.max_rect = max_rect;
    }

    // ------------------------------------------------------------------
    // Outbound event fan-out

    /// Queue an event on a client, notifying its pending callback.
    pub(crate) fn client_post_event(&mut self, client: ClientId, wnd: WindowId, event: WindowEvent) {
        if let Some(client) = self.clients.get_mut(&client) {
            client.post_event(wnd, event);
        }
    }

    /// Broadcast an event to every window management client.
    pub(crate) fn post_wm_event(&mut self, event: WmEvent) {
        for wmclient in self.wmclients.values_mut() {
            wmclient.post_event(event);
        }
    }

    /// Broadcast an event to every configuration client.
    pub(crate) fn post_cfg_event(&mut self, event: CfgEvent) {
        for cfgclient in self.cfgclients.values_mut() {
            cfgclient.post_event(event);
        }
    }
}

/// Crop the maximization rectangle by an avoid rectangle.
///
/// The avoid rectangle only has an effect when it covers the full top,
/// bottom, left or right edge band of `mrect`; a floating avoid window
/// leaves the maximization rectangle unchanged.
pub fn crop_max_rect(arect: PxBox, mrect: PxBox) -> PxBox {
    let mut mrect = mrect;
    if arect.min.x == mrect.min.x && arect.min.y == mrect.min.y && arect.max.x == mrect.max.x {
        // Top band.
        mrect.min.y = arect.max.y;
    } else if arect.min.x == mrect.min.x && arect.max.x == mrect.max.x && arect.max.y == mrect.max.y {
        // Bottom band.
        mrect.max.y = arect.min.y;
    } else if arect.min.x == mrect.min.x && arect.min.y == mrect.min.y && arect.max.y == mrect.max.y {
        // Left band.
        mrect.min.x = arect.max.x;
    } else if arect.min.y == mrect.min.y && arect.max.x == mrect.max.x && arect.max.y == mrect.max.y {
        // Right band.
        mrect.max.x = arect.min.x;
    }
    mrect
}
