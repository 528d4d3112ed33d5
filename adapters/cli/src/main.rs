#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs headless Pixel Shooter simulations.

mod report;
mod script;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use pixel_shooter_core::{Event, Intent};
use pixel_shooter_driver::{Config, Simulation};

use crate::report::RunReport;
use crate::script::IntentScript;

/// Command-line options accepted by the headless harness.
#[derive(Debug, Parser)]
#[command(
    name = "pixel-shooter",
    version,
    about = "Headless Pixel Shooter simulation harness"
)]
struct Args {
    /// Seed for the run's random streams.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of fixed steps to simulate.
    #[arg(long, default_value_t = 3_600)]
    steps: u32,

    /// Simulated milliseconds per step.
    #[arg(long = "dt-ms", default_value_t = 16)]
    dt_ms: u64,

    /// TOML intent timeline driving the player, indexed by elapsed run time.
    #[arg(long)]
    script: Option<PathBuf>,

    /// File that receives the JSON run report.
    #[arg(long)]
    report: Option<PathBuf>,
}

/// Entry point for the Pixel Shooter command-line interface.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let script = match &args.script {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read intent script at {}", path.display()))?;
            let script = IntentScript::parse(&contents)
                .with_context(|| format!("failed to parse intent script at {}", path.display()))?;
            Some(script)
        }
        None => None,
    };

    let mut simulation = Simulation::new(Config::new(args.seed));
    info!("{}", simulation.welcome_banner());
    info!(
        "starting run: seed={} steps={} dt={}ms",
        args.seed, args.steps, args.dt_ms
    );

    let dt = Duration::from_millis(args.dt_ms);
    let mut events = Vec::new();
    record_events(&mut events, simulation.start());

    let mut elapsed_ms = 0u64;
    for _ in 0..args.steps {
        let intent = script
            .as_ref()
            .map_or(Intent::NONE, |script| script.intent_at(elapsed_ms));
        record_events(&mut events, simulation.step(dt, intent));
        elapsed_ms = elapsed_ms.saturating_add(args.dt_ms);

        if !simulation.is_running() {
            break;
        }
    }

    let snapshot = simulation.snapshot();
    info!(
        "run finished: score={} lives={} running={}",
        snapshot.score, snapshot.lives, snapshot.running
    );

    if let Some(path) = &args.report {
        let report = RunReport::new(args.seed, args.steps, args.dt_ms, &events, &snapshot);
        let json =
            serde_json::to_string_pretty(&report).context("failed to serialise run report")?;
        fs::write(path, json)
            .with_context(|| format!("failed to write run report to {}", path.display()))?;
        info!("run report written to {}", path.display());
    }

    Ok(())
}

fn record_events(log: &mut Vec<Event>, step_events: &[Event]) {
    for event in step_events {
        if let Event::GameOver { score } = event {
            info!("game over with score {score}");
        }
        debug!("event: {event:?}");
    }
    log.extend_from_slice(step_events);
}
