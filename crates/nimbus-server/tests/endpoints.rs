//! End-to-end tests of the three service endpoints.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nimbus_api::{
    DeviceId, Error, SeatId,
    event::{CfgEvent, WindowEvent, WmEvent},
    gfx::{Color, Gc},
    ops::{DispCfgApi, DisplayApi, WndMgtApi},
    unit::{PxPoint, px_box},
    window::{WindowFlags, WindowParams},
};
use nimbus_server::testgc::TestGc;
use nimbus_server::{CfgEndpoint, DisplayEndpoint, DisplayFlags, DisplayShared, IdevRegistry, WmEndpoint};

fn setup() -> (Arc<DisplayShared>, TestGc) {
    let shared = DisplayShared::new(None, DisplayFlags::empty());
    let out = TestGc::new();
    {
        let mut d = shared.lock();
        d.add_output(px_box(0, 0, 500, 500), out.handle()).unwrap();
        d.seat_create("Alice").unwrap();
    }
    (shared, out)
}

fn params_at(x: i32, y: i32, w: i32, h: i32) -> WindowParams {
    let mut params = WindowParams::new(px_box(0, 0, w, h));
    params.flags = WindowFlags::SETPOS;
    params.pos = PxPoint::new(x, y);
    params.caption = "test".into();
    params
}

fn drain_wm(wm: &mut WmEndpoint) -> Vec<WmEvent> {
    let mut events = vec![];
    while let Some(e) = wm.get_event() {
        events.push(e);
    }
    events
}

#[test]
fn window_lifecycle_notifies_window_managers() {
    let (shared, _out) = setup();
    let mut disp = DisplayEndpoint::connect(&shared, None);
    let mut wm = WmEndpoint::connect(&shared, None);

    let w = disp.window_create(params_at(10, 10, 100, 100)).unwrap();
    let events = drain_wm(&mut wm);
    assert!(events.contains(&WmEvent::WindowAdded(w)));

    assert_eq!(wm.get_window_list(), [w]);
    let info = wm.get_window_info(w).unwrap();
    assert_eq!(info.caption, "test");
    assert_eq!(info.nfocus, 1);

    disp.window_set_caption(w, "renamed").unwrap();
    assert!(drain_wm(&mut wm).contains(&WmEvent::WindowChanged(w)));
    assert_eq!(wm.get_window_info(w).unwrap().caption, "renamed");

    disp.window_destroy(w).unwrap();
    assert!(drain_wm(&mut wm).contains(&WmEvent::WindowRemoved(w)));
    assert_eq!(wm.get_window_list(), []);
    assert_eq!(wm.get_window_info(w), Err(Error::NotFound));
}

#[test]
fn clients_cannot_touch_foreign_windows() {
    let (shared, _out) = setup();
    let mut a = DisplayEndpoint::connect(&shared, None);
    let mut b = DisplayEndpoint::connect(&shared, None);

    let w = a.window_create(params_at(0, 0, 10, 10)).unwrap();
    assert_eq!(b.window_destroy(w), Err(Error::NotFound));
    assert_eq!(b.window_move(w, PxPoint::new(5, 5)), Err(Error::NotFound));
    assert_eq!(b.window_get_pos(w), Err(Error::NotFound));

    // Still alive and owned by `a`.
    assert_eq!(a.window_get_pos(w), Ok(PxPoint::new(0, 0)));
}

#[test]
fn disconnect_destroys_owned_windows() {
    let (shared, _out) = setup();
    let mut wm = WmEndpoint::connect(&shared, None);
    {
        let mut disp = DisplayEndpoint::connect(&shared, None);
        disp.window_create(params_at(0, 0, 10, 10)).unwrap();
        disp.window_create(params_at(20, 0, 10, 10)).unwrap();
        assert_eq!(wm.get_window_list().len(), 2);
    }
    assert_eq!(wm.get_window_list(), []);
}

#[test]
fn pending_callback_fires_on_enqueue() {
    let (shared, _out) = setup();
    let calls = Arc::new(AtomicUsize::new(0));
    let c = calls.clone();
    let mut disp = DisplayEndpoint::connect(
        &shared,
        Some(Box::new(move || {
            c.fetch_add(1, Ordering::Relaxed);
        })),
    );

    disp.window_create(params_at(0, 0, 10, 10)).unwrap();
    // At least the focus event was queued and signaled.
    assert!(calls.load(Ordering::Relaxed) > 0);
    assert!(matches!(disp.get_event(), Some((_, WindowEvent::Focus { .. }))));
}

#[test]
fn stock_cursor_codes_validated() {
    let (shared, _out) = setup();
    let mut disp = DisplayEndpoint::connect(&shared, None);
    let w = disp.window_create(params_at(0, 0, 10, 10)).unwrap();

    disp.window_set_cursor(w, 5).unwrap();
    assert_eq!(disp.window_set_cursor(w, 6), Err(Error::Invalid));
}

#[test]
fn get_info_reports_display_rect() {
    let (shared, _out) = setup();
    let mut disp = DisplayEndpoint::connect(&shared, None);
    assert_eq!(disp.get_info().rect, px_box(0, 0, 500, 500));

    let w = disp.window_create(params_at(0, 0, 10, 10)).unwrap();
    assert_eq!(disp.window_get_max_rect(w).unwrap(), px_box(0, 0, 500, 500));
}

#[test]
fn wm_activate_and_close() {
    let (shared, _out) = setup();
    let mut disp = DisplayEndpoint::connect(&shared, None);
    let mut wm = WmEndpoint::connect(&shared, None);

    let w0 = disp.window_create(params_at(0, 0, 10, 10)).unwrap();
    let w1 = disp.window_create(params_at(20, 0, 10, 10)).unwrap();
    assert_eq!(wm.get_window_info(w1).unwrap().nfocus, 1);

    wm.activate_window(DeviceId::from_raw(1), w0).unwrap();
    assert_eq!(wm.get_window_info(w0).unwrap().nfocus, 1);
    assert_eq!(wm.get_window_info(w1).unwrap().nfocus, 0);

    while disp.get_event().is_some() {}
    wm.close_window(w1).unwrap();
    assert_eq!(disp.get_event(), Some((w1, WindowEvent::Close)));

    assert_eq!(wm.activate_window(DeviceId::from_raw(1), nimbus_api::WindowId::from_raw(99)), Err(Error::NotFound));
}

#[test]
fn minimized_window_activation_unminimizes() {
    let (shared, _out) = setup();
    let mut disp = DisplayEndpoint::connect(&shared, None);
    let mut wm = WmEndpoint::connect(&shared, None);

    let w = disp.window_create(params_at(0, 0, 10, 10)).unwrap();
    disp.window_minimize(w).unwrap();
    assert!(wm.get_window_info(w).unwrap().flags.contains(WindowFlags::MINIMIZED));

    wm.activate_window(DeviceId::from_raw(1), w).unwrap();
    let info = wm.get_window_info(w).unwrap();
    assert!(!info.flags.contains(WindowFlags::MINIMIZED));
    assert_eq!(info.nfocus, 1);
}

struct TestRegistry;
impl IdevRegistry for TestRegistry {
    fn device_by_name(&self, name: &str) -> Option<DeviceId> {
        name.strip_prefix("dev").and_then(|n| n.parse().ok()).map(DeviceId::from_raw)
    }

    fn device_name(&self, dev: DeviceId) -> Option<String> {
        Some(format!("dev{}", dev.get()))
    }
}

#[test]
fn cfg_endpoint_administers_seats_and_devices() {
    let (shared, _out) = setup();
    let mut cfg = CfgEndpoint::connect(&shared, None);

    let alice = cfg.get_seat_list()[0];
    assert_eq!(cfg.get_seat_info(alice).unwrap().name, "Alice");

    let bob = cfg.seat_create("Bob").unwrap();
    assert_eq!(cfg.get_event(), Some(CfgEvent::SeatAdded(bob)));
    assert_eq!(cfg.seat_create("Bob"), Err(Error::Exists));

    let d0 = DeviceId::from_raw(10);
    cfg.dev_assign(d0, bob).unwrap();
    assert_eq!(cfg.get_asgn_dev_list(bob).unwrap(), [d0]);
    assert_eq!(cfg.get_asgn_dev_list(alice).unwrap(), []);
    assert_eq!(cfg.dev_assign(d0, SeatId::from_raw(99)), Err(Error::NotFound));

    cfg.dev_unassign(d0).unwrap();
    assert_eq!(cfg.dev_unassign(d0), Err(Error::NotFound));

    cfg.seat_delete(bob).unwrap();
    assert_eq!(cfg.get_event(), Some(CfgEvent::SeatRemoved(bob)));

    // The last remaining seat cannot be deleted.
    assert_eq!(cfg.seat_delete(alice), Err(Error::Busy));
}

#[test]
fn seat_removal_cascades_device_assignments() {
    let (shared, _out) = setup();
    let mut cfg = CfgEndpoint::connect(&shared, None);

    let bob = cfg.seat_create("Bob").unwrap();
    cfg.dev_assign(DeviceId::from_raw(20), bob).unwrap();
    cfg.dev_assign(DeviceId::from_raw(21), bob).unwrap();
    cfg.seat_delete(bob).unwrap();

    // The bindings died with the seat.
    assert_eq!(cfg.dev_unassign(DeviceId::from_raw(20)), Err(Error::NotFound));
    assert_eq!(cfg.dev_unassign(DeviceId::from_raw(21)), Err(Error::NotFound));
}

#[test]
fn cfg_mutations_persist() {
    let (shared, _out) = setup();
    let mut path = std::env::temp_dir();
    path.push(format!("nimbus-endpoint-cfg-{}.json", std::process::id()));
    {
        let mut d = shared.lock();
        d.set_cfg_path(path.clone());
        d.set_idev_registry(Arc::new(TestRegistry));
    }

    let mut cfg = CfgEndpoint::connect(&shared, None);
    let bob = cfg.seat_create("Bob").unwrap();
    cfg.dev_assign(DeviceId::from_raw(7), bob).unwrap();

    let restored = DisplayShared::new(None, DisplayFlags::empty());
    {
        let mut d = restored.lock();
        d.set_idev_registry(Arc::new(TestRegistry));
        d.load_cfg(&path).unwrap();
        assert_eq!(d.seat_by_idev(DeviceId::from_raw(7)), d.find_seat(bob));
    }
    let mut cfg2 = CfgEndpoint::connect(&restored, None);
    assert_eq!(cfg2.get_seat_list().len(), 2);
    assert_eq!(cfg2.get_seat_info(bob).unwrap().name, "Bob");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn gc_tunnel_draws_and_repaints() {
    let (shared, out) = setup();
    let mut disp = DisplayEndpoint::connect(&shared, None);
    let w = disp.window_create(params_at(10, 10, 50, 50)).unwrap();

    let gc = disp.window_gc(w).unwrap();
    out.clear_ops();

    // Drawn without the display lock; the invalidate callback repaints
    // the corresponding display rectangle.
    gc.set_color(Color::rgb(200, 0, 0)).unwrap();
    gc.fill_rect(px_box(0, 0, 10, 10)).unwrap();

    assert_eq!(gc.target().lock().pixel(5, 5), Color::rgb(200, 0, 0).to_pixel());
    assert!(!out.ops().is_empty(), "invalidate must repaint the display");

    assert_eq!(disp.window_gc(nimbus_api::WindowId::from_raw(99)).err(), Some(Error::NotFound));
}
