//! Cube Arena entry point
//!
//! Runs a headless session with scripted input and prints the final snapshot.
//!
//! Usage: `cube-arena [tuning.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
use cube_arena::{GameLoop, Tuning, consts::NOMINAL_DT};

/// Simulated session length in seconds
#[cfg(not(target_arch = "wasm32"))]
const SESSION_SECS: f64 = 60.0;

/// How long each scripted input step is held
#[cfg(not(target_arch = "wasm32"))]
const STEP_SECS: f64 = 1.5;

/// Scripted held-key sets, cycled for the whole session
#[cfg(not(target_arch = "wasm32"))]
const SCRIPT: &[&[&str]] = &[
    &["d"],
    &["s", "shift"],
    &["a", "k"],
    &["w"],
    &["w", "d", "shift"],
    &[],
];

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cube Arena (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load tuning from {path}: {e}, using defaults");
            Tuning::default()
        }),
        None => Tuning::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Invalid seed: {e}, using 0");
            0
        }
        None => 0,
    };

    let mut game = GameLoop::new(seed, tuning);
    let frame_secs = f64::from(NOMINAL_DT);
    let frames = (SESSION_SECS / frame_secs) as u64;
    let mut step: Option<usize> = None;

    for i in 0..frames {
        let now = i as f64 * frame_secs;

        // Swap held keys when the script moves to the next step
        let current = (now / STEP_SECS) as usize;
        if step != Some(current) {
            if let Some(prev) = step {
                for key in SCRIPT[prev % SCRIPT.len()] {
                    game.key_up(key);
                }
            }
            for key in SCRIPT[current % SCRIPT.len()] {
                game.key_down(key);
            }
            step = Some(current);
        }

        game.frame(now);

        if i % 600 == 0 {
            let state = game.state();
            log::info!(
                "t={:.1}s phase={:?} health={:.0} sprint={:.0} enemies={} bullets={} kills={}",
                state.time,
                state.phase,
                state.player.health,
                state.player.sprint.current,
                state.enemies.len(),
                state.bullets.len(),
                state.kills
            );
        }

        if game.phase().is_game_over() {
            break;
        }
    }

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The headless runner is native only
}
