//! `clock-gadget`: a small always-on-bottom desktop clock.

mod cli;
mod face;
mod fonts;
mod gadget;
mod state;
mod themes;

use std::process::ExitCode;

use anyhow::{Context, Result};
use gadget_clock::{ClockDisplay, SettingsStore};
use gadget_engine::device::GpuInit;
use gadget_engine::logging::{init_logging, LoggingConfig};
use gadget_engine::text::FontSystem;
use gadget_engine::window::{Runtime, RuntimeConfig, WindowMode};
use winit::dpi::{LogicalSize, PhysicalPosition};

use crate::cli::Args;
use crate::face::Face;
use crate::gadget::ClockGadget;
use crate::state::GadgetState;

const TITLE: &str = "Clock Gadget";
const DEFAULT_SIZE: (f32, f32) = (300.0, 120.0);
const FALLBACK_SETTINGS: &str = "clock-gadget-settings.json";

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    init_logging(if args.debug { LoggingConfig::debug() } else { LoggingConfig::default() });

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("clock-gadget: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    // Theme and font problems are fatal before any window exists.
    let loaded = themes::load(args.theme.as_deref())?;
    let mut fonts = FontSystem::new();
    let font = fonts::load(&mut fonts, loaded.theme.font.as_deref(), loaded.dir())?;

    let store = SettingsStore::at_default_path().unwrap_or_else(|e| {
        log::warn!("{e}; keeping settings in {FALLBACK_SETTINGS}");
        SettingsStore::new(FALLBACK_SETTINGS)
    });
    let prefs = store.load_or_init();
    log::debug!("starting with {prefs:?}, seconds {}", args.seconds);

    let display = ClockDisplay::new(prefs.clock_mode, args.seconds);
    let face = Face::new(loaded.theme);
    let (min_width, min_height) = face.min_size();

    let mode = if args.normal { WindowMode::Normal } else { WindowMode::Gadget };
    let config = RuntimeConfig {
        title: TITLE.to_string(),
        initial_size: LogicalSize::new(
            f64::from(min_width.max(DEFAULT_SIZE.0)),
            f64::from(min_height.max(DEFAULT_SIZE.1)),
        ),
        min_size: Some(LogicalSize::new(f64::from(min_width), f64::from(min_height))),
        position: Some(PhysicalPosition::new(prefs.position.x, prefs.position.y)),
        mode,
    };
    let gpu_init = match mode {
        WindowMode::Gadget => GpuInit::transparent(),
        WindowMode::Normal => GpuInit::default(),
    };

    let runtime = Runtime::new()?;
    let quit = runtime.quit_handle();
    if let Err(e) = ctrlc::set_handler(move || quit.request_quit()) {
        log::warn!("cannot install the interrupt handler: {e}");
    }

    let state = GadgetState::new(display, prefs, store, face);
    runtime
        .run(config, gpu_init, ClockGadget::new(state, fonts, font))
        .context("clock gadget stopped with an error")
}
