//! dsfront - headless runner
//!
//! Boots the demo core, runs its workers for a fixed time while a 60 Hz
//! presentation loop paces frames and forwards input, then stops.

mod args;

use anyhow::{bail, Context};
use args::CliArgs;
use ds_core::{Config, Core};
use ds_input::{InputRouter, KeyBindings};
use ds_runtime::{DemoLoader, Runtime};
use ds_video::{Presenter, TickOutcome};
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Host refresh period the presentation loop ticks at
const HOST_TICK: Duration = Duration::from_micros(16_667);

fn main() -> ExitCode {
    let args = CliArgs::parse();
    if args.show_help {
        CliArgs::print_help();
        return ExitCode::from(2);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    if !ds_core::logging::init(config.debug.log_level) {
        eprintln!("A global logger was already installed");
    }

    match run(args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs, config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting dsfront");

    let mut loader = DemoLoader::new(config.paths.clone());
    loader.require_system_files = args.require_system_files;
    loader.direct_boot = config.general.direct_boot && !args.firmware_boot;

    let mut presenter = Presenter::from_config(&config, args.width, args.height);
    let mut router = InputRouter::new(KeyBindings::from_config(&config.input));
    let mut runtime = Runtime::new(loader, config);

    if let Err(e) = runtime.boot(args.roms.clone()) {
        eprintln!("{}\n{}\n{}", e.title(), e, e.hint());
        bail!("boot failed: {}", e);
    }
    runtime.start().context("starting workers")?;

    for key in &args.held_keys {
        if !router.key_down(runtime.running_core(), key) {
            tracing::warn!("Host key {:?} is not bound to any button", key);
        }
    }

    let layout = presenter.layout();
    tracing::info!(
        "Layout {}x{}: top {:?}, bottom {:?}",
        layout.output_width,
        layout.output_height,
        layout.top,
        layout.bottom
    );
    if layout.is_below_minimum() {
        tracing::warn!(
            "Output is smaller than the {}x{} minimum",
            layout.min_width,
            layout.min_height
        );
    }

    let stats = present_loop(&runtime, &mut presenter, &mut router, args.duration);

    router.release_all(runtime.running_core());
    let joined = runtime.stop();

    tracing::info!(
        "Presented {} new frames and {} repeats over {} ticks, swap interval {}, {} workers joined",
        stats.new_frames,
        stats.repeats,
        stats.ticks,
        presenter.pacer().swap_interval(),
        joined
    );
    if let Some(core) = runtime.core() {
        if let Some(fps) = core.fps() {
            tracing::info!("Core reported {} FPS", fps);
        }
    }

    runtime.shutdown();
    Ok(())
}

#[derive(Debug, Default)]
struct PresentStats {
    ticks: u64,
    new_frames: u64,
    repeats: u64,
}

/// Tick the presenter at the host refresh rate until `duration` has passed.
///
/// Halfway through, the pointer taps the middle of the touch screen.
fn present_loop<L: ds_core::CoreLoader>(
    runtime: &Runtime<L>,
    presenter: &mut Presenter,
    router: &mut InputRouter,
    duration: Duration,
) -> PresentStats {
    let mut stats = PresentStats::default();
    let start = Instant::now();
    let mut next = start;
    let mut tapped = false;
    let mut last_fps = None;

    while start.elapsed() < duration {
        let core = runtime.running_core();

        match presenter.tick(core) {
            TickOutcome::NewFrame => stats.new_frames += 1,
            TickOutcome::Repeat => stats.repeats += 1,
            TickOutcome::Cleared | TickOutcome::Suppressed => {}
        }
        stats.ticks += 1;

        if !tapped && start.elapsed() >= duration / 2 {
            tapped = true;
            let bottom = presenter.layout().bottom;
            let x = (bottom.x + bottom.width / 2) as i32;
            let y = (bottom.y + bottom.height / 2) as i32;
            if let Some(point) = router.pointer_down(core, presenter.layout(), x, y) {
                tracing::debug!("Tapped touch screen at {},{}", point.x, point.y);
            }
            router.pointer_up(core);
        }

        let fps = presenter.fps_text();
        if fps != last_fps {
            if let Some(text) = &fps {
                tracing::debug!("{}", text);
            }
            last_fps = fps;
        }

        next += HOST_TICK;
        let now = Instant::now();
        if next > now {
            std::thread::sleep(next - now);
        } else {
            next = now;
        }
    }

    stats
}
