//! Arcade Sim entry point
//!
//! Headless native runner: drives the fixed-timestep loop from a simulated
//! frame clock with a scripted controller and logs the HUD. A renderer and
//! real input capture would replace the clock and the script.
//!
//! Usage: `arcade-sim [settings.json] [--seconds N] [--seed N] [--pair-scan MODE] [--json]`

use std::path::PathBuf;

use clap::Parser;

use arcade_sim::{PairScan, Settings};
use arcade_sim::sim::{Controller, GameLoop, GamePhase, ScriptedController};

/// Host frame interval, deliberately off the 60 Hz tick rate
const FRAME_INTERVAL: f64 = 1.0 / 50.0;

#[derive(Parser, Debug)]
#[command(name = "arcade-sim")]
#[command(about = "Run a headless arcade simulation session and report the HUD")]
struct Args {
    /// JSON settings file (defaults apply when omitted)
    settings: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,

    /// Override the session seed
    #[arg(long)]
    seed: Option<u64>,

    /// Collision pair enumeration: unordered (once) or ordered (twice)
    #[arg(long, value_parser = parse_pair_scan)]
    pair_scan: Option<PairScan>,

    /// Print the final frame snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn parse_pair_scan(s: &str) -> Result<PairScan, String> {
    PairScan::from_str(s).ok_or_else(|| format!("unknown pair scan `{s}` (use unordered or ordered)"))
}

/// Sweep left and right across the playfield while holding fire
fn weave_script(ticks_per_second: u32) -> ScriptedController {
    let leg = ticks_per_second as usize * 2;
    let mut script = ScriptedController::default();
    for _ in 0..64 {
        script = script
            .hold(Controller::new(-1, 0, true), leg)
            .hold(Controller::new(1, -1, true), leg / 2)
            .hold(Controller::new(1, 1, true), leg / 2);
    }
    script
}

fn main() {
    env_logger::init();
    log::info!("Arcade Sim (headless) starting...");

    let args = Args::parse();
    let mut settings = match &args.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(scan) = args.pair_scan {
        settings.pair_scan = scan;
    }
    log::info!("Collision pair scan: {}", settings.pair_scan.as_str());

    let mut game = GameLoop::new(&settings);
    let mut input = weave_script(settings.ticks_per_second);
    game.world.start();

    let mut now = 0.0;
    let mut last_report = 0u64;
    let mut last_phase = game.world.phase;
    game.frame(now, &mut input);
    while now < args.seconds {
        now += FRAME_INTERVAL;
        game.frame(now, &mut input);

        if game.world.phase != last_phase {
            log::info!("Phase {:?} -> {:?} at {:.2}s", last_phase, game.world.phase, now);
            last_phase = game.world.phase;
        }

        let second = game.ticks_run / settings.ticks_per_second as u64;
        if second != last_report && game.world.phase == GamePhase::Running {
            last_report = second;
            let hud = game.world.hud();
            log::info!(
                "t={:>3}s hp={:>4} kills={:>3} mobs={:>3} live={}",
                second,
                hud.health,
                hud.kills,
                hud.mobs_spawned,
                game.world.registry.len()
            );
        }
    }

    let hud = game.world.hud();
    println!(
        "{} ticks, phase {:?}, health {}, kills {}, mobs spawned {}, restarts {}",
        game.ticks_run,
        game.world.phase,
        hud.health,
        hud.kills,
        hud.mobs_spawned,
        game.world.restarts
    );

    if args.json {
        match serde_json::to_string_pretty(&game.world.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Could not serialize snapshot: {e}"),
        }
    }
}
