//! # Kestrel Headless
//!
//! Runs the demo level at a fixed time step without a window and prints a
//! frame summary. Useful for checking gameplay changes on a server.
//!
//! ```text
//! kestrel_headless [config.toml]
//! ```

use std::process::ExitCode;

use kestrel::components::Transform;
use kestrel::{Game, GameConfig, GameResult, KeyCode};

/// Simulated seconds the demo runs for.
const RUN_SECONDS: u32 = 12;

fn load_config() -> GameResult<GameConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).map_err(|e| {
                kestrel::GameError::InvalidConfig(format!("{path}: {e}"))
            })?;
            GameConfig::from_toml_str(&text)
        }
        None => Ok(GameConfig::default()),
    }
}

fn run() -> GameResult<()> {
    let config = load_config()?;
    let delta_time = config.frame_duration().as_secs_f64();
    let total_frames = RUN_SECONDS * config.target_fps;

    let mut game = Game::new(config);
    let level = game.load_level()?;

    // Scripted input: fly right, then down.
    let script = [(1, KeyCode::D), (total_frames / 2, KeyCode::S)];

    let mut collisions = 0;
    for frame in 1..=total_frames {
        for &(at, key) in &script {
            if at == frame {
                game.handle_key(key);
            }
        }
        collisions += game.frame(delta_time)?.collisions;
        if !game.is_running() {
            break;
        }
    }

    let chopper = game.registry().get_component::<Transform>(level.chopper)?;
    let camera = game.camera();
    println!("═══════════════════════════════════════════════════════");
    println!("                 KESTREL HEADLESS RUN");
    println!("═══════════════════════════════════════════════════════");
    println!("  Frames:      {}", game.frame_count());
    println!("  Game time:   {} ms", game.elapsed_ms());
    println!("  Collisions:  {collisions}");
    println!(
        "  Chopper:     ({:.1}, {:.1})",
        chopper.position.x, chopper.position.y
    );
    println!("  Camera:      ({:.1}, {:.1})", camera.x, camera.y);
    println!("  Draw list:   {} entities", game.render_order()?.len());
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("kestrel_headless: {error}");
            ExitCode::FAILURE
        }
    }
}
