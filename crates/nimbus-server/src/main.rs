//! Nimbus display server daemon.
//!
//! Brings up the display, restores the persisted seat configuration (or
//! starts fresh with one default seat) and runs the input event pump.
//! Output discovery and the endpoint transports are provided by the
//! embedding environment; the daemon keeps the model alive.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nimbus_server::{DisplayFlags, DisplayShared, IeventPump};

#[derive(Parser)]
#[command(name = "nimbus-display", about = "Nimbus compositing display server")]
struct Args {
    /// Service instance number.
    #[arg(long, default_value_t = 0)]
    instance: u32,

    /// Configuration file path.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Compose into a back buffer and flush dirty rectangles.
    #[arg(long)]
    double_buffer: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let cfg_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(format!("/var/lib/nimbus/display-{}.json", args.instance)));

    let flags = if args.double_buffer {
        DisplayFlags::DOUBLE_BUF
    } else {
        DisplayFlags::empty()
    };

    let display = DisplayShared::new(None, flags);
    {
        let mut d = display.lock();
        d.set_cfg_path(cfg_path.clone());
        if let Err(e) = d.load_cfg(&cfg_path) {
            tracing::info!("no usable configuration ({e}), starting fresh");
            d.seat_create("Alice").expect("failed to create default seat");
        }
    }

    let _pump = IeventPump::start(display.clone());
    tracing::info!("display server instance {} running", args.instance);

    loop {
        std::thread::park();
    }
}
