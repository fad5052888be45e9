//! Bounce Lab entry point
//!
//! Headless runner: steps the simulation on the software surface at a fixed
//! 60 Hz and reports metrics and warnings through the log.

use bounce_lab::experiments;
use bounce_lab::renderer::{PixelBuffer, Renderer};
use bounce_lab::sim::ManualClock;
use bounce_lab::{FrameOutcome, ResetOptions, SimulationContext, SimulationParams, Viewport};
use clap::Parser;

const FRAME_DT: f64 = 1.0 / 60.0;
const VIEWPORT: Viewport = Viewport::new(800, 600);

#[derive(Parser, Debug)]
#[command(name = "bounce-lab", version, about = "Headless 2D bounce simulation runner")]
struct Args {
    /// Parameter file (JSON, camelCase fields)
    #[arg(long)]
    params: Option<String>,
    /// Built-in experiment id to apply after init
    #[arg(long)]
    experiment: Option<String>,
    /// Number of 60 Hz frames to run
    #[arg(long, default_value_t = 600)]
    frames: u32,
    /// Reset with this seed before running
    #[arg(long)]
    seed: Option<u64>,
}

/// Load parameters from JSON, falling back to defaults
fn load_params(path: Option<&str>) -> SimulationParams {
    let Some(path) = path else {
        log::info!("Using default parameters");
        return SimulationParams::default();
    };

    match std::fs::read_to_string(path) {
        Ok(json) => match SimulationParams::from_json(&json) {
            Ok(params) => {
                log::info!("Loaded parameters from {}", path);
                params
            }
            Err(e) => {
                log::warn!("Invalid parameter file {}: {}", path, e);
                SimulationParams::default()
            }
        },
        Err(e) => {
            log::warn!("Cannot read {}: {}", path, e);
            SimulationParams::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Bounce Lab (headless) starting...");

    let args = Args::parse();
    let params = load_params(args.params.as_deref());
    match params.to_json() {
        Ok(json) => log::debug!("Effective parameters: {}", json),
        Err(e) => log::warn!("Cannot serialize parameters: {}", e),
    }
    let frames = args.frames;

    let clock = ManualClock::new();
    let mut sim = SimulationContext::new(params, PixelBuffer::new(1, 1), clock.clone());
    sim.init(VIEWPORT);

    if let Some(id) = args.experiment.as_deref() {
        match experiments::find(id) {
            Some(exp) => {
                log::info!("Experiment: {} - {}", exp.title, exp.description);
                sim.apply_experiment(&exp.patch);
            }
            None => log::warn!("Unknown experiment {:?}", id),
        }
    }
    if args.seed.is_some() {
        sim.reset(ResetOptions {
            preserve_pause: true,
            seed: args.seed,
        });
    }

    let mut advanced = 0u32;
    for i in 0..frames {
        clock.advance(FRAME_DT);
        if let FrameOutcome::Advanced { .. } = sim.step() {
            advanced += 1;
        }

        // Report once per simulated second
        if (i + 1) % 60 == 0 {
            log::info!("t={:.2}s {:?}", sim.elapsed(), sim.metrics());
            for w in sim.warnings() {
                log::warn!("[{}] {}", w.id.as_str(), w.message);
            }
        }
    }

    log::info!("Ran {} of {} frames", advanced, frames);
    match serde_json::to_string_pretty(sim.metrics()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Cannot serialize metrics: {}", e),
    }

    sim.teardown();
}
